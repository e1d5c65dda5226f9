//! Page-level CRUD controllers.
//!
//! One [`CrudController`] drives one resource page:
//!
//! ```text
//! Loading -> Ready <-> Saving <-> Ready
//! ```
//!
//! with an orthogonal edit dialog (closed / create / edit) and delete
//! confirmation (closed / pending id). Every successful mutation is followed
//! by a full list refresh; the server response replaces the local list.
//!
//! State sits behind `Arc<RwLock<_>>`. The
//! lock is never held across a network call; the `Saving` phase is what
//! rejects a second submit while one is in flight, and only the save that
//! entered it may leave it. Each list request takes a ticket, and a response
//! whose ticket is older than the latest request is dropped.

mod notice;
mod singleton;

pub use notice::{Notice, NoticeLevel};
pub use singleton::SingletonEditor;

use masjid_records::RecordId;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::ApiError;
use crate::resources::{Resource, ResourceClient, Toggle, Validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Saving,
}

/// Create/edit dialog and its form.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog<D> {
    Closed,
    Create(D),
    Edit { id: RecordId, form: D },
}

impl<D> Dialog<D> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn form(&self) -> Option<&D> {
        match self {
            Self::Closed => None,
            Self::Create(form) | Self::Edit { form, .. } => Some(form),
        }
    }
}

/// Result of a submit or delete confirmation.
#[derive(Debug)]
pub enum Outcome {
    Saved,
    Deleted,
    /// Client-side validation failed; nothing was sent
    Invalid,
    /// Another save is in flight
    Busy,
    /// No dialog or confirmation was open
    Idle,
    /// The record is protected from deletion
    Protected,
    Failed(ApiError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved | Self::Deleted)
    }
}

struct PageState<R: Resource> {
    phase: Phase,
    items: Vec<R>,
    filter: R::Filter,
    dialog: Dialog<R::Draft>,
    pending_delete: Option<RecordId>,
    notices: Vec<Notice>,
    // Ticket of the most recently issued list request
    list_seq: u64,
}

pub struct CrudController<R: Resource> {
    client: ResourceClient<R>,
    state: Arc<RwLock<PageState<R>>>,
}

impl<R: Resource> Clone for CrudController<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: self.state.clone(),
        }
    }
}

impl<R: Resource> CrudController<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self::with_filter(client, R::Filter::default())
    }

    pub fn with_filter(client: ResourceClient<R>, filter: R::Filter) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(PageState {
                phase: Phase::Loading,
                items: Vec::new(),
                filter,
                dialog: Dialog::Closed,
                pending_delete: None,
                notices: Vec::new(),
                list_seq: 0,
            })),
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    pub async fn items(&self) -> Vec<R> {
        self.state.read().await.items.clone()
    }

    pub async fn find(&self, id: &RecordId) -> Option<R> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    pub async fn dialog(&self) -> Dialog<R::Draft> {
        self.state.read().await.dialog.clone()
    }

    pub async fn pending_delete(&self) -> Option<RecordId> {
        self.state.read().await.pending_delete.clone()
    }

    pub async fn filter(&self) -> R::Filter {
        self.state.read().await.filter.clone()
    }

    /// Drain queued notifications, oldest first.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().await.notices)
    }

    async fn notify(&self, notice: Notice) {
        self.state.write().await.notices.push(notice);
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Initial load when the page opens. A save in flight keeps its
    /// `Saving` phase; the list is still reloaded.
    pub async fn mount(&self) -> Result<(), ApiError> {
        {
            let mut state = self.state.write().await;
            if state.phase != Phase::Saving {
                state.phase = Phase::Loading;
            }
        }
        let result = self.refresh().await;
        let mut state = self.state.write().await;
        if state.phase == Phase::Loading {
            state.phase = Phase::Ready;
        }
        if let Err(e) = &result {
            state.notices.push(Notice::error(e.user_message()));
        }
        result
    }

    /// Replace the list with the server's current answer, unless a newer
    /// list request was issued meanwhile.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let (ticket, filter) = {
            let mut state = self.state.write().await;
            state.list_seq += 1;
            (state.list_seq, state.filter.clone())
        };
        let items = self.client.list(&filter).await?;

        let mut state = self.state.write().await;
        if ticket != state.list_seq {
            debug!(resource = R::PATH, ticket, latest = state.list_seq, "Dropping stale list");
            return Ok(());
        }
        debug!(resource = R::PATH, count = items.len(), "List refreshed");
        state.items = items;
        Ok(())
    }

    /// Change the list filter and reload.
    pub async fn apply_filter(&self, filter: R::Filter) -> Result<(), ApiError> {
        self.state.write().await.filter = filter;
        self.mount().await
    }

    /// Refresh after a mutation, then leave `Saving`. A failed refresh keeps
    /// the previous list and tells the user.
    async fn finish_mutation(&self) {
        let result = self.refresh().await;
        let mut state = self.state.write().await;
        state.phase = Phase::Ready;
        if let Err(e) = result {
            state.notices.push(Notice::error(e.user_message()));
        }
    }

    // =========================================================================
    // Create / edit dialog
    // =========================================================================

    pub async fn open_create(&self) {
        self.open_create_with(R::Draft::default()).await;
    }

    pub async fn open_create_with(&self, form: R::Draft) {
        self.state.write().await.dialog = Dialog::Create(form);
    }

    /// Open the dialog pre-populated from a listed record.
    pub async fn open_edit(&self, id: &RecordId) -> bool {
        let mut state = self.state.write().await;
        let Some(record) = state.items.iter().find(|r| r.id() == id) else {
            return false;
        };
        let form = R::Draft::from(record);
        state.dialog = Dialog::Edit {
            id: id.clone(),
            form,
        };
        true
    }

    /// Mutate the open form. Returns false when no dialog is open.
    pub async fn update_form(&self, edit: impl FnOnce(&mut R::Draft)) -> bool {
        let mut state = self.state.write().await;
        match &mut state.dialog {
            Dialog::Closed => false,
            Dialog::Create(form) | Dialog::Edit { form, .. } => {
                edit(form);
                true
            }
        }
    }

    pub async fn close_dialog(&self) {
        self.state.write().await.dialog = Dialog::Closed;
    }

    /// Validate and send the open form: create for a new record, a full-form
    /// patch for an edited one. The dialog stays open on failure.
    pub async fn submit(&self) -> Outcome {
        let (target, form) = {
            let mut state = self.state.write().await;
            if state.phase != Phase::Ready {
                return Outcome::Busy;
            }
            let (target, form) = match &state.dialog {
                Dialog::Closed => return Outcome::Idle,
                Dialog::Create(form) => (None, form.clone()),
                Dialog::Edit { id, form } => (Some(id.clone()), form.clone()),
            };
            if let Err(e) = form.validate(target.is_some()) {
                state.notices.push(Notice::error(e.user_message()));
                return Outcome::Invalid;
            }
            state.phase = Phase::Saving;
            (target, form)
        };

        let result = match &target {
            None => self.client.create(&form).await.map(|_| ()),
            Some(id) => self.client.update(id, &R::Patch::from(form)).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.dialog = Dialog::Closed;
                    state
                        .notices
                        .push(Notice::success(format!("{} berhasil disimpan", R::LABEL)));
                }
                self.finish_mutation().await;
                Outcome::Saved
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.phase = Phase::Ready;
                state.notices.push(Notice::error(e.user_message()));
                Outcome::Failed(e)
            }
        }
    }

    // =========================================================================
    // Delete confirmation
    // =========================================================================

    /// Whether the delete control for this record should be enabled.
    pub async fn can_delete(&self, id: &RecordId) -> bool {
        self.find(id)
            .await
            .map(|r| !r.is_protected())
            .unwrap_or(false)
    }

    /// Ask for confirmation. Refused for unknown and protected records.
    pub async fn request_delete(&self, id: &RecordId) -> bool {
        if !self.can_delete(id).await {
            return false;
        }
        self.state.write().await.pending_delete = Some(id.clone());
        true
    }

    pub async fn cancel_delete(&self) {
        self.state.write().await.pending_delete = None;
    }

    /// Delete the record awaiting confirmation.
    pub async fn confirm_delete(&self) -> Outcome {
        let id = {
            let mut state = self.state.write().await;
            if state.phase != Phase::Ready {
                return Outcome::Busy;
            }
            let Some(id) = state.pending_delete.take() else {
                return Outcome::Idle;
            };
            if state
                .items
                .iter()
                .any(|r| r.id() == &id && r.is_protected())
            {
                return Outcome::Protected;
            }
            state.phase = Phase::Saving;
            id
        };

        match self.client.delete(&id).await {
            Ok(_) => {
                self.notify(Notice::success(format!("{} berhasil dihapus", R::LABEL)))
                    .await;
                self.finish_mutation().await;
                Outcome::Deleted
            }
            Err(e) => {
                let mut state = self.state.write().await;
                state.phase = Phase::Ready;
                state.notices.push(Notice::error(e.user_message()));
                Outcome::Failed(e)
            }
        }
    }
}

impl<R: Toggle> CrudController<R> {
    /// Best-effort flip of the active/published flag: sends only the flag,
    /// then refreshes. A failure leaves whatever the refresh shows.
    pub async fn set_active(&self, id: &RecordId, active: bool) -> bool {
        let sent = match self.client.set_active(id, active).await {
            Ok(_) => true,
            Err(e) => {
                warn!(resource = R::PATH, %id, "Toggle failed: {}", e);
                false
            }
        };
        if let Err(e) = self.refresh().await {
            warn!(resource = R::PATH, "Refresh after toggle failed: {}", e);
        }
        sent
    }

    /// Flip the flag relative to the listed value.
    pub async fn toggle(&self, id: &RecordId) -> bool {
        match self.find(id).await {
            Some(record) => self.set_active(id, !record.is_active()).await,
            None => false,
        }
    }
}
