//! Reconciliation controller for the user dashboard.
//!
//! The dashboard owns three pieces of state: the committed record list, the
//! edit draft, and the current selection. The committed list is only ever
//! replaced wholesale with a fresh read of the collection, performed on
//! initialization and after every successful mutation, so it always
//! reflects the store rather than a locally patched guess.
//!
//! Whether a record is selected is the sole discriminator between create
//! mode and edit mode: `submit` updates the selected record when a
//! selection is present and creates a new record otherwise.
//!
//! Store failures never propagate to the caller. They are logged and the
//! operation has no visible effect; on a failed submit the draft (and
//! selection) stay in place so the user can retry without re-typing.

use tokio::sync::watch;

use crate::models::{User, UserFields};
use crate::store::RecordStore;

/// Read-only view of dashboard state, published after every transition.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub records: Vec<User>,
    pub draft: UserFields,
    pub selection: Option<User>,
}

/// Which draft field to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
}

/// The reconciliation controller.
///
/// Generic over the record store so the presentation layer can run against
/// the HTTP store or an in-memory one interchangeably.
pub struct Dashboard<S> {
    store: S,
    records: Vec<User>,
    draft: UserFields,
    selection: Option<User>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<S: RecordStore> Dashboard<S> {
    /// Creates a dashboard with an empty committed list. No fetch is
    /// performed; use [`Dashboard::init`] for the usual startup path.
    pub fn new(store: S) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            store,
            records: Vec::new(),
            draft: UserFields::default(),
            selection: None,
            snapshot_tx,
        }
    }

    /// Creates a dashboard and performs the initial fetch. If the fetch
    /// fails the dashboard starts with an empty list and the error is
    /// logged.
    pub async fn init(store: S) -> Self {
        let mut dashboard = Self::new(store);
        dashboard.refresh().await;
        dashboard
    }

    /// The committed record list, as of the last successful fetch.
    pub fn records(&self) -> &[User] {
        &self.records
    }

    /// The current edit draft.
    pub fn draft(&self) -> &UserFields {
        &self.draft
    }

    /// The record selected for editing, if any.
    pub fn selection(&self) -> Option<&User> {
        self.selection.as_ref()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.clone(),
            draft: self.draft.clone(),
            selection: self.selection.clone(),
        }
    }

    /// Subscribes to state changes. A fresh snapshot is published after
    /// every transition, so a presentation layer can re-render on change
    /// without polling.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Sets one field of the draft.
    pub fn set_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::Name => self.draft.name = value.into(),
            DraftField::Email => self.draft.email = value.into(),
        }
        self.publish();
    }

    /// Replaces the committed list with a fresh read of the collection.
    /// On failure the last good list is kept.
    pub async fn refresh(&mut self) {
        self.fetch_records().await;
        self.publish();
    }

    /// Commits the draft: updates the selected record in edit mode,
    /// creates a new record in create mode. On success the draft (and
    /// selection) are cleared and the list is refetched.
    ///
    /// A draft with an empty name or email is ignored: no store call, no
    /// state change. This mirrors the form's behavior of giving no
    /// validation feedback.
    pub async fn submit(&mut self) {
        if !self.draft.is_complete() {
            tracing::debug!("submit ignored: draft incomplete");
            return;
        }

        if let Some(selected) = self.selection.clone() {
            match self.store.update(&selected.id, &self.draft).await {
                Ok(()) => {
                    self.selection = None;
                    self.draft = UserFields::default();
                    self.fetch_records().await;
                    self.publish();
                }
                Err(e) => tracing::warn!("failed to update user {}: {}", selected.id, e),
            }
        } else {
            match self.store.create(&self.draft).await {
                Ok(()) => {
                    self.draft = UserFields::default();
                    self.fetch_records().await;
                    self.publish();
                }
                Err(e) => tracing::warn!("failed to create user: {}", e),
            }
        }
    }

    /// Selects a record from the committed list for editing and mirrors
    /// its fields into the draft. An id not present in the list is a
    /// logged no-op.
    pub fn select_for_edit(&mut self, id: &str) {
        match self.records.iter().find(|r| r.id == id) {
            Some(record) => {
                self.draft = UserFields::new(&record.name, &record.email);
                self.selection = Some(record.clone());
                self.publish();
            }
            None => tracing::warn!("cannot edit unknown record {}", id),
        }
    }

    /// Leaves edit mode and clears the draft. Safe to call in create mode.
    /// Makes no store calls.
    pub fn cancel(&mut self) {
        self.selection = None;
        self.draft = UserFields::default();
        self.publish();
    }

    /// Deletes the record at `id` and refetches the list. The delete is
    /// considered committed even if the refetch fails.
    pub async fn delete_record(&mut self, id: &str) {
        match self.store.delete(id).await {
            Ok(()) => {
                self.fetch_records().await;
                self.publish();
            }
            Err(e) => tracing::warn!("failed to delete user {}: {}", id, e),
        }
    }

    async fn fetch_records(&mut self) {
        match self.store.list_all().await {
            Ok(records) => self.records = records,
            Err(e) => tracing::warn!("failed to fetch records: {}", e),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
