//! Client-side state for a todo list backed by a remote REST collection.
//!
//! # Overview
//! Keeps an ordered local mirror of `{id, title}` items, a paged visible
//! window over it, and the transient intents a list UI needs (one pending
//! edit, one pending delete confirmation, the add box). Mutations reach the
//! local list only after the server has confirmed them.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest`s and parses `HttpResponse`s without
//!   touching the network (host-does-IO pattern).
//! - `TodoCollectionState` is the owned state; every transition is a method.
//! - `TodoSession` splits each network operation into `begin_*` and
//!   `complete`, with tickets marking the suspend point between them.
//! - `TodoListController` drives a session through a `Transport` for callers
//!   that are happy to block.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod session;
pub mod state;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::{ClientConfig, ConfigError};
pub use controller::TodoListController;
pub use error::{ApiError, TodoError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{InFlight, Outcome, PendingRequest, Ticket, TodoSession};
pub use state::{PendingEdit, TodoCollectionState, EMPTY_INPUT_ALERT};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{CreateTodo, TodoId, TodoItem, UpdateTodo};
