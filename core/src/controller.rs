//! Blocking driver that runs each session operation to completion.
//!
//! Every network operation is begin → `Transport::execute` → complete inside
//! one call. Taking `&mut self` means two operations can never interleave on
//! the same state. Hosts that need to keep a UI responsive while a request is
//! out should drive `TodoSession` directly instead.

use crate::error::TodoError;
use crate::session::{Outcome, PendingRequest, TodoSession};
use crate::state::TodoCollectionState;
use crate::transport::Transport;
use crate::types::{TodoId, TodoItem};

#[derive(Debug)]
pub struct TodoListController<T> {
    session: TodoSession,
    transport: T,
}

impl<T: Transport> TodoListController<T> {
    pub fn new(session: TodoSession, transport: T) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &TodoSession {
        &self.session
    }

    pub fn state(&self) -> &TodoCollectionState {
        self.session.state()
    }

    pub fn into_parts(self) -> (TodoSession, T) {
        (self.session, self.transport)
    }

    fn round_trip(&mut self, pending: PendingRequest) -> Result<Outcome, TodoError> {
        let response = self.transport.execute(&pending.request);
        self.session.complete(pending.ticket, response)
    }

    /// Replace the local list with the server's. On failure the previous
    /// items are kept.
    pub fn load(&mut self) -> Result<Outcome, TodoError> {
        let pending = self.session.begin_load();
        self.round_trip(pending)
    }

    pub fn create(&mut self, title: &str) -> Result<Outcome, TodoError> {
        let pending = self.session.begin_create(title)?;
        self.round_trip(pending)
    }

    /// Create from the add box; see `TodoSession::begin_submit`.
    pub fn submit(&mut self) -> Result<Outcome, TodoError> {
        let pending = self.session.begin_submit()?;
        self.round_trip(pending)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.session.set_input(text);
    }

    pub fn request_delete(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.session.request_delete(id)
    }

    /// `Ok(None)` when no delete was awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Result<Option<Outcome>, TodoError> {
        match self.session.begin_confirm_delete()? {
            Some(pending) => self.round_trip(pending).map(Some),
            None => Ok(None),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.session.cancel_delete();
    }

    pub fn begin_edit(&mut self, id: TodoId, current_title: impl Into<String>) {
        self.session.begin_edit(id, current_title);
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        self.session.update_draft(text)
    }

    /// `Ok(None)` when no edit is active or the draft is blank.
    pub fn commit_edit(&mut self) -> Result<Option<Outcome>, TodoError> {
        match self.session.begin_commit_edit()? {
            Some(pending) => self.round_trip(pending).map(Some),
            None => Ok(None),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
    }

    pub fn reveal(&mut self) -> bool {
        self.session.reveal()
    }

    pub fn visible_items(&self) -> &[TodoItem] {
        self.session.visible_items()
    }

    pub fn has_more(&self) -> bool {
        self.session.has_more()
    }
}

#[cfg(feature = "ureq")]
impl TodoListController<crate::transport::UreqTransport> {
    /// Controller talking to the configured collaborator over ureq.
    pub fn from_config(config: &crate::config::ClientConfig) -> Self {
        Self::new(
            TodoSession::from_config(config),
            crate::transport::UreqTransport::from_config(config),
        )
    }
}
