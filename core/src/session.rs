//! Sans-IO session: the todo list state plus the bookkeeping for requests
//! that are out on the wire.
//!
//! # Design
//! Every network-backed operation is split in two. `begin_*` validates the
//! intent against local state and returns a `PendingRequest` carrying a
//! ticket and the `HttpRequest` to execute; `complete` takes the ticket and
//! whatever the round-trip produced and folds the result into the state.
//! Local state changes only in `complete`, after the server has answered,
//! so the state always lags the server and never runs ahead of it.
//!
//! Tickets the session no longer knows about (already completed, or dropped
//! by `abandon_in_flight`) complete as `Outcome::Stale` without touching the
//! state. A view that goes away mid-request just abandons its tickets.
//!
//! A listing can be outrun by mutations issued after it: the server may
//! answer the list before it sees a create, but the create is confirmed
//! first. Mutations confirmed while a load is outstanding are journaled and
//! replayed on top of the listing so a confirmed change is never lost.

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, TodoError};
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{validate_title, TodoCollectionState, EMPTY_INPUT_ALERT};
use crate::types::{is_blank, CreateTodo, TodoId, TodoItem, UpdateTodo};

/// Identifies one outstanding request within a session.
pub type Ticket = u64;

/// Kind of request currently outstanding, for UI affordances such as a
/// spinner on the add box or fading out the row being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    Load,
    Create,
    Update(TodoId),
    Delete(TodoId),
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    /// `replay_from` indexes the journal as it was when the load was issued.
    Load { replay_from: usize },
    Create { clears_input: bool },
    Update { id: TodoId },
    Delete { id: TodoId },
}

impl Operation {
    fn in_flight(self) -> InFlight {
        match self {
            Operation::Load { .. } => InFlight::Load,
            Operation::Create { .. } => InFlight::Create,
            Operation::Update { id } => InFlight::Update(id),
            Operation::Delete { id } => InFlight::Delete(id),
        }
    }
}

/// A server-confirmed mutation, kept while a load is outstanding.
#[derive(Debug, Clone)]
enum Confirmed {
    Created(TodoItem),
    Updated(TodoItem),
    Deleted(TodoId),
}

/// A request the caller must execute and hand back to `TodoSession::complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending request does nothing until it is executed and completed"]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// What a completed request did to the local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The collection was replaced; carries the new item count.
    Loaded(usize),
    Created(TodoItem),
    Updated(TodoItem),
    Deleted(TodoId),
    /// The ticket was unknown; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct TodoSession {
    client: TodoClient,
    state: TodoCollectionState,
    in_flight: Vec<(Ticket, Operation)>,
    next_ticket: Ticket,
    journal: Vec<Confirmed>,
}

impl TodoSession {
    pub fn new(client: TodoClient, page_size: usize) -> Self {
        Self {
            client,
            state: TodoCollectionState::new(page_size),
            in_flight: Vec::new(),
            next_ticket: 1,
            journal: Vec::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TodoClient::from_config(config), config.page_size)
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn state(&self) -> &TodoCollectionState {
        &self.state
    }

    pub fn in_flight(&self) -> impl Iterator<Item = InFlight> + '_ {
        self.in_flight.iter().map(|(_, op)| op.in_flight())
    }

    pub fn is_in_flight(&self, kind: InFlight) -> bool {
        self.in_flight().any(|op| op == kind)
    }

    /// Forget every outstanding ticket; their responses will complete as
    /// `Outcome::Stale`. Returns how many were dropped.
    pub fn abandon_in_flight(&mut self) -> usize {
        let dropped = self.in_flight.len();
        if dropped > 0 {
            debug!(dropped, "abandoning in-flight requests");
        }
        self.in_flight.clear();
        self.journal.clear();
        dropped
    }

    // -----------------------------------------------------------------------
    // Local operations
    // -----------------------------------------------------------------------

    pub fn request_delete(&mut self, id: TodoId) -> Result<(), TodoError> {
        self.state.request_delete(id)
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    pub fn begin_edit(&mut self, id: TodoId, current_title: impl Into<String>) {
        self.state.begin_edit(id, current_title);
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        self.state.update_draft(text)
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    pub fn reveal(&mut self) -> bool {
        self.state.reveal()
    }

    pub fn visible_items(&self) -> &[TodoItem] {
        self.state.visible_items()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    // -----------------------------------------------------------------------
    // Network operations, first half
    // -----------------------------------------------------------------------

    /// Reload the whole collection. Creates, updates and deletes confirmed
    /// while the load is out are re-applied on top of the listing.
    pub fn begin_load(&mut self) -> PendingRequest {
        let request = self.client.build_list_todos();
        let replay_from = self.journal.len();
        self.issue(Operation::Load { replay_from }, request)
    }

    /// Blank titles fail with `TodoError::Validation` and produce no request.
    pub fn begin_create(&mut self, title: &str) -> Result<PendingRequest, TodoError> {
        validate_title(title)?;
        self.create_request(title, false)
    }

    /// Create from the add box. A blank box raises the alert instead; the
    /// box is cleared only once the server has accepted the item.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, TodoError> {
        if is_blank(self.state.input()) {
            self.state.set_alert(EMPTY_INPUT_ALERT);
            return Err(TodoError::Validation(EMPTY_INPUT_ALERT.to_string()));
        }
        self.state.clear_alert();
        let title = self.state.input().to_string();
        self.create_request(&title, true)
    }

    fn create_request(&mut self, title: &str, clears_input: bool) -> Result<PendingRequest, TodoError> {
        let request = self.client.build_create_todo(&CreateTodo {
            title: title.to_string(),
        })?;
        Ok(self.issue(Operation::Create { clears_input }, request))
    }

    /// Delete the item awaiting confirmation. `Ok(None)` when nothing is
    /// pending or the same delete is already on the wire.
    pub fn begin_confirm_delete(&mut self) -> Result<Option<PendingRequest>, TodoError> {
        let Some(id) = self.state.pending_delete() else {
            return Ok(None);
        };
        if !self.state.contains(id) {
            self.state.cancel_delete();
            return Err(TodoError::NotFoundLocal(id));
        }
        if self.is_in_flight(InFlight::Delete(id)) {
            return Ok(None);
        }
        let request = self.client.build_delete_todo(id);
        Ok(Some(self.issue(Operation::Delete { id }, request)))
    }

    /// Send the active edit. `Ok(None)` when no edit is active or the draft
    /// is blank; in both cases the state is left exactly as it was.
    pub fn begin_commit_edit(&mut self) -> Result<Option<PendingRequest>, TodoError> {
        let (id, draft) = match self.state.pending_edit() {
            Some(edit) if !is_blank(&edit.draft) => (edit.id, edit.draft.clone()),
            _ => return Ok(None),
        };
        if !self.state.contains(id) {
            self.state.cancel_edit();
            return Err(TodoError::NotFoundLocal(id));
        }
        let request = self.client.build_update_todo(id, &UpdateTodo { title: draft })?;
        Ok(Some(self.issue(Operation::Update { id }, request)))
    }

    fn issue(&mut self, op: Operation, request: HttpRequest) -> PendingRequest {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        debug!(ticket, method = %request.method, path = %request.path, "issuing request");
        self.in_flight.push((ticket, op));
        PendingRequest { ticket, request }
    }

    /// Journal a confirmed mutation if some load could still overwrite it.
    fn record(&mut self, change: Confirmed) {
        if self.is_in_flight(InFlight::Load) {
            self.journal.push(change);
        }
    }

    // -----------------------------------------------------------------------
    // Network operations, second half
    // -----------------------------------------------------------------------

    /// Apply the result of executing the request issued under `ticket`.
    /// Pass transport failures as `Err`; they are handled like any other
    /// failed round-trip.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<Outcome, TodoError> {
        let Some(pos) = self.in_flight.iter().position(|(t, _)| *t == ticket) else {
            debug!(ticket, "ignoring response for unknown ticket");
            return Ok(Outcome::Stale);
        };
        let (_, op) = self.in_flight.remove(pos);

        match op {
            Operation::Load { replay_from } => {
                let replay = self.journal.get(replay_from..).map(<[_]>::to_vec).unwrap_or_default();
                if !self.is_in_flight(InFlight::Load) {
                    self.journal.clear();
                }
                let items = response
                    .and_then(|r| self.client.parse_list_todos(r))
                    .map_err(|e| failed(ticket, "load", e))?;
                self.state.apply_loaded(items);
                if !replay.is_empty() {
                    debug!(ticket, replayed = replay.len(), "replaying mutations confirmed during load");
                }
                for change in replay {
                    match change {
                        Confirmed::Created(item) => self.state.apply_created(item),
                        Confirmed::Updated(item) => {
                            self.state.apply_updated(item);
                        }
                        Confirmed::Deleted(id) => {
                            self.state.apply_deleted(id);
                        }
                    }
                }
                let count = self.state.len();
                info!(ticket, count, "loaded todos");
                Ok(Outcome::Loaded(count))
            }
            Operation::Create { clears_input } => {
                let item = response
                    .and_then(|r| self.client.parse_create_todo(r))
                    .map_err(|e| failed(ticket, "create", e))?;
                info!(ticket, id = item.id, "created todo");
                self.state.apply_created(item.clone());
                self.record(Confirmed::Created(item.clone()));
                if clears_input {
                    self.state.clear_input();
                }
                Ok(Outcome::Created(item))
            }
            Operation::Update { id } => {
                let item = response
                    .and_then(|r| self.client.parse_update_todo(r))
                    .map_err(|e| failed(ticket, "update", e))?;
                if !self.state.apply_updated(item.clone()) {
                    warn!(ticket, id = item.id, "updated todo is no longer in the local list");
                }
                self.record(Confirmed::Updated(item.clone()));
                self.state.clear_pending_edit_for(id);
                info!(ticket, id, "updated todo");
                Ok(Outcome::Updated(item))
            }
            Operation::Delete { id } => {
                let result = response.and_then(|r| self.client.parse_delete_todo(r));
                // a failed delete must not leave the confirmation stuck open
                self.state.clear_pending_delete_for(id);
                result.map_err(|e| failed(ticket, "delete", e))?;
                self.state.apply_deleted(id);
                self.record(Confirmed::Deleted(id));
                info!(ticket, id, "deleted todo");
                Ok(Outcome::Deleted(id))
            }
        }
    }
}

fn failed(ticket: Ticket, operation: &'static str, err: ApiError) -> TodoError {
    warn!(ticket, operation, error = %err, "request failed");
    TodoError::Network(err)
}
