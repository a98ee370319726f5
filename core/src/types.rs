//! Wire DTOs for the todo collection resource.
//!
//! # Design
//! These mirror the collaborator's JSON schema (`{id, title}` records) but are
//! defined independently of the mock-server crate. Integration tests catch
//! any schema drift between the two.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo. Never generated locally.
pub type TodoId = i64;

/// A single todo item as returned by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
}

/// Request payload for `POST <base>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for `PUT <base>/<id>`. The title replaces the stored one
/// wholesale; there are no partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
}

/// Returns true when `title` is empty or whitespace-only.
pub fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}
