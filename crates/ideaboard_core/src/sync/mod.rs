//! Optimistic persistence reconciliation.
//!
//! # Responsibility
//! - Translate store mutations into `BoardApi` calls, one per logical
//!   mutation.
//! - Reconcile server-assigned identity back into the store, and roll back
//!   optimistic state on confirmed failure.
//!
//! # Invariants
//! - Local state is updated before the persistence call is issued.
//! - Reconciliation matches records by identity (temp id or session
//!   handle), never by list position.
//! - No failure is surfaced to the end user; every path logs and either
//!   continues or rolls back.

mod reconciler;

pub use reconciler::SyncReconciler;
