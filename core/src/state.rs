//! Local mirror of the remote todo collection plus the transient UI intents
//! layered on top of it.
//!
//! # Design
//! `TodoCollectionState` is plain owned data. Purely local operations (paging,
//! starting an edit, asking for delete confirmation) are methods here; server
//! results are folded in through the `apply_*` methods, which `TodoSession`
//! calls only after a request has succeeded. Nothing in this module performs
//! I/O, so every transition is unit-testable.
//!
//! `pending_edit` and `pending_delete` are independent: the same item may be
//! mid-edit and awaiting delete confirmation at once.

use std::collections::HashSet;

use tracing::warn;

use crate::error::TodoError;
use crate::types::{is_blank, TodoId, TodoItem};

/// Alert shown when the add box is submitted blank.
pub const EMPTY_INPUT_ALERT: &str = "Please enter a todo.";

/// The single item currently in edit mode and its uncommitted title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub id: TodoId,
    pub draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCollectionState {
    items: Vec<TodoItem>,
    page_size: usize,
    visible_count: usize,
    pending_edit: Option<PendingEdit>,
    pending_delete: Option<TodoId>,
    input: String,
    alert: Option<String>,
}

impl TodoCollectionState {
    /// Empty state showing one page. A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            items: Vec::new(),
            page_size,
            visible_count: page_size,
            pending_edit: None,
            pending_delete: None,
            input: String::new(),
            alert: None,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.pending_edit.as_ref()
    }

    pub fn pending_delete(&self) -> Option<TodoId> {
        self.pending_delete
    }

    /// Current contents of the add box.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    // -----------------------------------------------------------------------
    // Paging
    // -----------------------------------------------------------------------

    /// The leading `visible_count` items, or all of them if there are fewer.
    pub fn visible_items(&self) -> &[TodoItem] {
        let end = self.visible_count.min(self.items.len());
        &self.items[..end]
    }

    pub fn has_more(&self) -> bool {
        self.items.len() > self.visible_count
    }

    /// Grow the visible window by one page. Does nothing once every item is
    /// visible; returns whether the window changed.
    pub fn reveal(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.visible_count += self.page_size;
        true
    }

    // -----------------------------------------------------------------------
    // Delete confirmation
    // -----------------------------------------------------------------------

    /// Ask for confirmation before deleting `id`. Unknown ids are rejected and
    /// leave any existing confirmation untouched.
    pub fn request_delete(&mut self, id: TodoId) -> Result<(), TodoError> {
        if !self.contains(id) {
            return Err(TodoError::NotFoundLocal(id));
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub(crate) fn clear_pending_delete_for(&mut self, id: TodoId) {
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Put `id` in edit mode. An uncommitted edit of another item is dropped.
    pub fn begin_edit(&mut self, id: TodoId, current_title: impl Into<String>) {
        self.pending_edit = Some(PendingEdit {
            id,
            draft: current_title.into(),
        });
    }

    /// Replace the draft title. Returns false when no edit is active.
    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        match self.pending_edit.as_mut() {
            Some(edit) => {
                edit.draft = text.into();
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.pending_edit = None;
    }

    pub(crate) fn clear_pending_edit_for(&mut self, id: TodoId) {
        if self.pending_edit.as_ref().is_some_and(|edit| edit.id == id) {
            self.pending_edit = None;
        }
    }

    // -----------------------------------------------------------------------
    // Add box
    // -----------------------------------------------------------------------

    /// Replace the add-box text. Typing dismisses any alert.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.alert = None;
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    pub(crate) fn set_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub(crate) fn clear_alert(&mut self) {
        self.alert = None;
    }

    // -----------------------------------------------------------------------
    // Server results
    // -----------------------------------------------------------------------

    /// Replace the whole collection with a fresh listing. Duplicate ids keep
    /// their first occurrence. Returns the number of items kept.
    pub fn apply_loaded(&mut self, items: Vec<TodoItem>) -> usize {
        let mut seen = HashSet::with_capacity(items.len());
        let total = items.len();
        self.items = items.into_iter().filter(|item| seen.insert(item.id)).collect();
        if self.items.len() != total {
            warn!(
                received = total,
                kept = self.items.len(),
                "dropped duplicate ids from listing"
            );
        }
        self.items.len()
    }

    /// Append a newly created item. If the id is already present (a reload
    /// raced the create) the existing entry is replaced in place.
    pub fn apply_created(&mut self, item: TodoItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Replace the item with the same id by the server's representation.
    /// Returns false if the id is no longer present.
    pub fn apply_updated(&mut self, item: TodoItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Remove the item with `id`. Returns false if it was not present.
    pub fn apply_deleted(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }
}

impl Default for TodoCollectionState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PAGE_SIZE)
    }
}

/// Reject blank titles before anything reaches the network.
pub fn validate_title(title: &str) -> Result<(), TodoError> {
    if is_blank(title) {
        return Err(TodoError::Validation(EMPTY_INPUT_ALERT.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: TodoId, title: &str) -> TodoItem {
        TodoItem {
            id,
            title: title.to_string(),
        }
    }

    fn state_with(n: i64) -> TodoCollectionState {
        let mut state = TodoCollectionState::new(3);
        state.apply_loaded((1..=n).map(|id| item(id, &format!("todo {id}"))).collect());
        state
    }

    #[test]
    fn new_state_shows_one_page() {
        let state = TodoCollectionState::new(3);
        assert_eq!(state.visible_count(), 3);
        assert!(state.visible_items().is_empty());
        assert!(!state.has_more());
    }

    #[test]
    fn zero_page_size_is_bumped_to_one() {
        assert_eq!(TodoCollectionState::new(0).page_size(), 1);
    }

    #[test]
    fn visible_items_is_min_of_len_and_window() {
        for n in 0..8 {
            let state = state_with(n);
            assert_eq!(
                state.visible_items().len(),
                (n as usize).min(state.visible_count())
            );
        }
    }

    #[test]
    fn append_past_window_hides_new_item_until_reveal() {
        let mut state = state_with(3);
        assert!(!state.has_more());

        state.apply_created(item(4, "Write"));
        assert!(state.has_more());
        assert_eq!(state.visible_items().len(), 3);
        assert!(!state.visible_items().iter().any(|t| t.id == 4));

        assert!(state.reveal());
        assert_eq!(state.visible_count(), 6);
        assert_eq!(state.visible_items().len(), 4);
        assert!(!state.has_more());
    }

    #[test]
    fn reveal_is_idempotent_once_everything_is_visible() {
        let mut state = state_with(4);
        state.reveal();
        let visible: Vec<_> = state.visible_items().to_vec();
        let count = state.visible_count();

        assert!(!state.reveal());
        assert!(!state.reveal());
        assert_eq!(state.visible_items(), visible.as_slice());
        assert_eq!(state.visible_count(), count);
    }

    #[test]
    fn request_delete_rejects_unknown_id() {
        let mut state = state_with(2);
        state.request_delete(1).unwrap();

        let err = state.request_delete(99).unwrap_err();
        assert!(matches!(err, TodoError::NotFoundLocal(99)));
        assert_eq!(state.pending_delete(), Some(1));
    }

    #[test]
    fn cancel_delete_never_touches_items() {
        let mut state = state_with(3);
        let before = state.items().to_vec();
        state.request_delete(2).unwrap();
        state.cancel_delete();
        state.cancel_delete();
        assert_eq!(state.pending_delete(), None);
        assert_eq!(state.items(), before.as_slice());
    }

    #[test]
    fn begin_edit_discards_previous_draft() {
        let mut state = state_with(3);
        state.begin_edit(1, "todo 1");
        assert!(state.update_draft("half-typed"));
        state.begin_edit(2, "todo 2");

        let edit = state.pending_edit().unwrap();
        assert_eq!(edit.id, 2);
        assert_eq!(edit.draft, "todo 2");
    }

    #[test]
    fn update_draft_without_edit_is_ignored() {
        let mut state = state_with(1);
        assert!(!state.update_draft("nothing"));
        assert!(state.pending_edit().is_none());
    }

    #[test]
    fn edit_and_delete_can_target_the_same_item() {
        let mut state = state_with(2);
        state.begin_edit(1, "todo 1");
        state.request_delete(1).unwrap();
        assert_eq!(state.pending_edit().map(|e| e.id), Some(1));
        assert_eq!(state.pending_delete(), Some(1));
    }

    #[test]
    fn conditional_clears_only_match_their_id() {
        let mut state = state_with(3);
        state.begin_edit(2, "todo 2");
        state.request_delete(3).unwrap();

        state.clear_pending_edit_for(1);
        state.clear_pending_delete_for(1);
        assert!(state.pending_edit().is_some());
        assert!(state.pending_delete().is_some());

        state.clear_pending_edit_for(2);
        state.clear_pending_delete_for(3);
        assert!(state.pending_edit().is_none());
        assert!(state.pending_delete().is_none());
    }

    #[test]
    fn loaded_listing_drops_duplicate_ids() {
        let mut state = TodoCollectionState::new(3);
        let kept = state.apply_loaded(vec![item(1, "a"), item(2, "b"), item(1, "dup")]);
        assert_eq!(kept, 2);
        assert_eq!(state.get(1).unwrap().title, "a");
    }

    #[test]
    fn created_item_with_known_id_replaces_in_place() {
        let mut state = state_with(2);
        state.apply_created(item(1, "fresh"));
        assert_eq!(state.len(), 2);
        assert_eq!(state.items()[0].title, "fresh");
    }

    #[test]
    fn apply_updated_and_deleted_report_missing_ids() {
        let mut state = state_with(2);
        assert!(!state.apply_updated(item(9, "ghost")));
        assert!(!state.apply_deleted(9));
        assert!(state.apply_deleted(1));
        assert_eq!(state.items(), &[item(2, "todo 2")]);
    }

    #[test]
    fn typing_clears_alert() {
        let mut state = TodoCollectionState::new(3);
        state.set_alert(EMPTY_INPUT_ALERT);
        state.set_input("B");
        assert_eq!(state.alert(), None);
        assert_eq!(state.input(), "B");
    }

    #[test]
    fn validate_title_rejects_blank() {
        assert!(validate_title("").unwrap_err().is_validation());
        assert!(validate_title(" \t\n").unwrap_err().is_validation());
        assert!(validate_title(" x ").is_ok());
    }
}
