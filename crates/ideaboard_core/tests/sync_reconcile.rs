use ideaboard_core::remote::wire::{
    CardPatch, CardRecord, ConnectionRecord, CreateCardRequest, CreateConnectionRequest, CreatedId,
};
use ideaboard_core::{
    Anchor, BoardApi, BoardStore, CardId, Connection, RemoteError, RemoteResult, SyncReconciler,
};
use std::cell::{Cell, RefCell};

/// Records every call and fails the next mutating call on demand.
#[derive(Default)]
struct FakeApi {
    calls: RefCell<Vec<String>>,
    listed_cards: RefCell<Vec<CardRecord>>,
    listed_connections: RefCell<Vec<ConnectionRecord>>,
    next_id: Cell<i64>,
    fail_next: RefCell<Option<RemoteError>>,
}

impl FakeApi {
    fn new() -> Self {
        let api = Self::default();
        api.next_id.set(1);
        api
    }

    fn fail_next_call(&self, err: RemoteError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    fn take_failure(&self) -> Option<RemoteError> {
        self.fail_next.borrow_mut().take()
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn assign_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl BoardApi for FakeApi {
    fn list_cards(&self) -> RemoteResult<Vec<CardRecord>> {
        self.calls.borrow_mut().push("list_cards".into());
        Ok(self.listed_cards.borrow().clone())
    }

    fn create_card(&self, request: &CreateCardRequest) -> RemoteResult<CreatedId> {
        self.calls
            .borrow_mut()
            .push(format!("create_card text={}", request.text));
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(CreatedId {
            id: self.assign_id(),
        })
    }

    fn update_card(&self, id: i64, patch: &CardPatch) -> RemoteResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("update_card id={id} patch={patch:?}"));
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn update_card_text(&self, id: i64, text: &str) -> RemoteResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("update_card_text id={id} text={text}"));
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn delete_card(&self, id: i64) -> RemoteResult<()> {
        self.calls.borrow_mut().push(format!("delete_card id={id}"));
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn list_connections(&self) -> RemoteResult<Vec<ConnectionRecord>> {
        self.calls.borrow_mut().push("list_connections".into());
        Ok(self.listed_connections.borrow().clone())
    }

    fn create_connection(&self, request: &CreateConnectionRequest) -> RemoteResult<CreatedId> {
        self.calls.borrow_mut().push(format!(
            "create_connection from={} to={} {}->{}",
            request.from_id, request.to_id, request.from_pos, request.to_pos
        ));
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(CreatedId {
            id: self.assign_id(),
        })
    }

    fn delete_connection(&self, id: i64) -> RemoteResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("delete_connection id={id}"));
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn transport_error() -> RemoteError {
    RemoteError::Transport("connection refused".into())
}

fn record(id: i64, text: &str) -> CardRecord {
    CardRecord {
        id,
        text: text.into(),
        x: Some(100.0),
        y: Some(100.0),
        width: Some(200.0),
        height: Some(100.0),
        z_index: Some(1),
        cluster: None,
    }
}

fn loaded_board(api: FakeApi) -> (BoardStore, SyncReconciler<FakeApi>) {
    let mut store = BoardStore::new();
    let mut reconciler = SyncReconciler::new(api);
    reconciler.load_board(&mut store).unwrap();
    (store, reconciler)
}

// ---- loading ----

#[test]
fn load_applies_wire_defaults_for_absent_fields() {
    let api = FakeApi::new();
    api.listed_cards.borrow_mut().push(CardRecord {
        id: 7,
        text: "bare".into(),
        x: None,
        y: None,
        width: None,
        height: None,
        z_index: None,
        cluster: Some(2),
    });
    api.listed_cards.borrow_mut().push(record(8, "full"));

    let (store, _) = loaded_board(api);
    let bare = store.card(CardId::Persisted(7)).unwrap();
    assert_eq!((bare.x, bare.y), (100.0, 100.0));
    assert_eq!((bare.width, bare.height), (200.0, 100.0));
    assert_eq!(bare.z_index, 1); // list position 0 + 1
    assert_eq!(bare.cluster, Some(2));
    assert!(!bare.is_editing);
}

#[test]
fn load_failure_leaves_the_store_untouched() {
    // The fake never fails its list calls, so use a dedicated stub whose
    // connection listing is down.
    struct FailingApi;
    impl BoardApi for FailingApi {
        fn list_cards(&self) -> RemoteResult<Vec<CardRecord>> {
            Ok(vec![])
        }
        fn create_card(&self, _: &CreateCardRequest) -> RemoteResult<CreatedId> {
            unreachable!()
        }
        fn update_card(&self, _: i64, _: &CardPatch) -> RemoteResult<()> {
            unreachable!()
        }
        fn update_card_text(&self, _: i64, _: &str) -> RemoteResult<()> {
            unreachable!()
        }
        fn delete_card(&self, _: i64) -> RemoteResult<()> {
            unreachable!()
        }
        fn list_connections(&self) -> RemoteResult<Vec<ConnectionRecord>> {
            Err(RemoteError::Transport("down".into()))
        }
        fn create_connection(&self, _: &CreateConnectionRequest) -> RemoteResult<CreatedId> {
            unreachable!()
        }
        fn delete_connection(&self, _: i64) -> RemoteResult<()> {
            unreachable!()
        }
    }

    let mut store = BoardStore::new();
    store.create_card();
    let before = store.snapshot();

    let mut reconciler = SyncReconciler::new(FailingApi);
    assert!(reconciler.load_board(&mut store).is_err());
    assert_eq!(store.snapshot(), before);
}

// ---- card create / text commit ----

#[test]
fn first_nonempty_commit_creates_and_promotes_by_temp_id() {
    let (mut store, mut reconciler) = loaded_board(FakeApi::new());

    let first = store.create_card();
    let second = store.create_card();
    store.update_card(second, |card| card.text = "second born first".into());

    // Committing the *second* temp card must not touch the first one.
    reconciler.commit_text(&mut store, second);

    assert!(store.card(second).is_none(), "temp id replaced");
    let promoted = store.card(CardId::Persisted(1)).unwrap();
    assert_eq!(promoted.text, "second born first");
    assert!(!promoted.is_editing);
    assert!(store.card(first).is_some(), "other temp card untouched");
    assert_eq!(
        reconciler.api().calls().last().unwrap(),
        "create_card text=second born first"
    );
}

#[test]
fn empty_commit_is_a_silent_noop() {
    let (mut store, mut reconciler) = loaded_board(FakeApi::new());
    let id = store.create_card();
    store.update_card(id, |card| card.text = "   ".into());

    reconciler.commit_text(&mut store, id);

    let card = store.card(id).unwrap();
    assert!(card.is_editing, "card stays in editing mode");
    assert!(!card.is_persisted());
    assert_eq!(reconciler.api().calls().len(), 2); // the two load lists only
}

#[test]
fn failed_create_stays_temporary_until_the_next_commit() {
    let (mut store, mut reconciler) = loaded_board(FakeApi::new());
    let id = store.create_card();
    store.update_card(id, |card| card.text = "stubborn".into());

    reconciler.api().fail_next_call(transport_error());
    reconciler.commit_text(&mut store, id);
    assert!(store.card(id).is_some(), "still temporary after failure");

    // No automatic retry; the next explicit commit tries again.
    reconciler.commit_text(&mut store, id);
    assert!(store.card(id).is_none());
    assert!(store.card(CardId::Persisted(1)).is_some());
    let creates = reconciler
        .api()
        .calls()
        .iter()
        .filter(|call| call.starts_with("create_card"))
        .count();
    assert_eq!(creates, 2);
}

#[test]
fn text_update_failure_rolls_back_to_acknowledged_text() {
    let api = FakeApi::new();
    api.listed_cards.borrow_mut().push(record(3, "original"));
    let (mut store, mut reconciler) = loaded_board(api);

    store.update_card(CardId::Persisted(3), |card| card.text = "edited".into());
    reconciler.api().fail_next_call(transport_error());
    reconciler.commit_text(&mut store, CardId::Persisted(3));

    assert_eq!(store.card(CardId::Persisted(3)).unwrap().text, "original");
}

// ---- field updates ----

#[test]
fn position_commit_is_skipped_for_temporary_cards() {
    let (mut store, mut reconciler) = loaded_board(FakeApi::new());
    let id = store.create_card();
    store.update_card(id, |card| {
        card.x = 500.0;
        card.y = 500.0;
    });

    reconciler.commit_position(&mut store, id);
    assert_eq!(reconciler.api().calls().len(), 2); // load lists only
}

#[test]
fn update_failure_restores_the_acknowledged_baseline() {
    let api = FakeApi::new();
    api.listed_cards.borrow_mut().push(record(3, "anchored"));
    let (mut store, mut reconciler) = loaded_board(api);
    let id = CardId::Persisted(3);

    // First move succeeds and advances the baseline.
    store.update_card(id, |card| {
        card.x = 50.0;
        card.y = 60.0;
    });
    reconciler.commit_position(&mut store, id);

    // Second move fails; the card returns to the acknowledged spot.
    store.update_card(id, |card| {
        card.x = 999.0;
        card.y = 999.0;
    });
    reconciler.api().fail_next_call(transport_error());
    reconciler.commit_position(&mut store, id);

    let card = store.card(id).unwrap();
    assert_eq!((card.x, card.y), (50.0, 60.0));
}

#[test]
fn size_commit_patches_width_and_height() {
    let api = FakeApi::new();
    api.listed_cards.borrow_mut().push(record(3, "sized"));
    let (mut store, mut reconciler) = loaded_board(api);
    let id = CardId::Persisted(3);

    store.update_card(id, |card| {
        card.width = 260.0;
        card.height = 140.0;
    });
    reconciler.commit_size(&mut store, id);

    let last = reconciler.api().calls().last().unwrap().clone();
    assert!(last.starts_with("update_card id=3"));
    assert!(last.contains("width: Some(260.0)"));
    assert!(!last.contains("x: Some"), "position not in a size patch");
}

// ---- card delete ----

#[test]
fn delete_is_optimistic_and_fire_and_forget() {
    let api = FakeApi::new();
    api.listed_cards.borrow_mut().push(record(3, "doomed"));
    let (mut store, mut reconciler) = loaded_board(api);

    reconciler.api().fail_next_call(transport_error());
    reconciler.delete_card(&mut store, CardId::Persisted(3));

    assert!(store.card(CardId::Persisted(3)).is_none());
    assert_eq!(reconciler.api().calls().last().unwrap(), "delete_card id=3");
}

#[test]
fn deleting_a_temporary_card_makes_no_call() {
    let (mut store, mut reconciler) = loaded_board(FakeApi::new());
    let id = store.create_card();

    reconciler.delete_card(&mut store, id);
    assert!(store.card(id).is_none());
    assert_eq!(reconciler.api().calls().len(), 2); // load lists only
}

// ---- connections ----

fn two_card_board() -> (BoardStore, SyncReconciler<FakeApi>) {
    let api = FakeApi::new();
    api.listed_cards.borrow_mut().push(record(1, "a"));
    api.listed_cards.borrow_mut().push(record(2, "b"));
    loaded_board(api)
}

#[test]
fn connection_create_confirms_the_exact_optimistic_record() {
    let (mut store, mut reconciler) = two_card_board();

    reconciler.create_connection(
        &mut store,
        CardId::Persisted(1),
        Anchor::Right,
        CardId::Persisted(2),
        Anchor::Left,
    );

    let between: Vec<&Connection> = store
        .connections()
        .iter()
        .filter(|conn| {
            conn.from_id == CardId::Persisted(1) && conn.to_id == CardId::Persisted(2)
        })
        .collect();
    assert_eq!(between.len(), 1);
    assert_eq!(between[0].id, Some(1));
    assert!(store.connections().iter().all(|conn| conn.id.is_some()));
    assert_eq!(
        reconciler.api().calls().last().unwrap(),
        "create_connection from=1 to=2 right->left"
    );
}

#[test]
fn connection_create_failure_restores_the_previous_list() {
    let (mut store, mut reconciler) = two_card_board();
    let before: Vec<Connection> = store.connections().to_vec();

    reconciler.api().fail_next_call(transport_error());
    reconciler.create_connection(
        &mut store,
        CardId::Persisted(1),
        Anchor::Bottom,
        CardId::Persisted(2),
        Anchor::Top,
    );

    assert_eq!(store.connections().to_vec(), before);
}

#[test]
fn connection_with_unpersisted_endpoint_is_a_validation_noop() {
    let (mut store, mut reconciler) = two_card_board();
    let temp = store.create_card();

    reconciler.create_connection(
        &mut store,
        CardId::Persisted(1),
        Anchor::Right,
        temp,
        Anchor::Left,
    );

    assert!(store.connections().is_empty());
    assert_eq!(reconciler.api().calls().len(), 2); // load lists only
}

#[test]
fn deleting_an_unpersisted_connection_removes_only_that_record() {
    let (mut store, mut reconciler) = two_card_board();

    // Two identical endpoint pairs, neither persisted.
    let first = store.insert_connection(
        CardId::Persisted(1),
        CardId::Persisted(2),
        Anchor::Right,
        Anchor::Left,
    );
    let second = store.insert_connection(
        CardId::Persisted(1),
        CardId::Persisted(2),
        Anchor::Right,
        Anchor::Left,
    );

    reconciler.delete_connection(&mut store, first);

    assert_eq!(store.connections().len(), 1);
    assert_eq!(store.connections()[0].handle, second);
    assert_eq!(reconciler.api().calls().len(), 2); // no delete call
}

#[test]
fn persisted_connection_is_removed_only_after_the_backend_confirms() {
    let (mut store, mut reconciler) = two_card_board();
    let handle = store.insert_connection(
        CardId::Persisted(1),
        CardId::Persisted(2),
        Anchor::Top,
        Anchor::Bottom,
    );
    store.confirm_connection(handle, 42);

    reconciler.api().fail_next_call(transport_error());
    reconciler.delete_connection(&mut store, handle);
    assert_eq!(store.connections().len(), 1, "kept on failure");

    reconciler.delete_connection(&mut store, handle);
    assert!(store.connections().is_empty());
    assert_eq!(
        reconciler.api().calls().last().unwrap(),
        "delete_connection id=42"
    );
}
