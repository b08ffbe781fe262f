//! View-state machines for list and form screens.
//!
//! # Design
//! A list screen moves `Loading → (Error | Empty | Ready)` once per load.
//! Every `begin_load` hands out a `LoadTicket`; `finish_load` applies only
//! the ticket issued last, so a slow response for a previous pet (or a
//! previous refresh) can never overwrite the current view. Starting a load
//! drops the old items, so nothing from the previous key is ever rendered.
//!
//! Writes (`Submitting`) never fabricate records: on failure the list keeps
//! server truth and carries the error for an alert. A write belongs to the
//! load it started under; a new `begin_load` orphans it and its outcome is
//! dropped.

use crate::error::ApiError;
use crate::types::Identified;
use crate::validation::{FieldError, ValidationErrors};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Empty,
    Ready(Vec<T>),
}

impl<T> ViewState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ViewState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Proof of which load a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    key: String,
}

impl LoadTicket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Outcome of handing a response to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// A newer load was started since this ticket (or write) was issued.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListScreen<T> {
    state: ViewState<T>,
    generation: u64,
    key: Option<String>,
    /// Generation of the load the in-flight write started under.
    submitting: Option<u64>,
    editing: Option<String>,
    last_error: Option<String>,
}

impl<T> Default for ListScreen<T> {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            generation: 0,
            key: None,
            submitting: None,
            editing: None,
            last_error: None,
        }
    }
}

impl<T: Identified + Clone> ListScreen<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// The key (e.g. pet id) of the current load.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Error from the last failed write, for a dismissable alert.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Enter `Loading` for `key`, discarding whatever was shown before.
    pub fn begin_load(&mut self, key: &str) -> LoadTicket {
        self.generation += 1;
        self.key = Some(key.to_string());
        self.state = ViewState::Loading;
        self.editing = None;
        self.submitting = None;
        LoadTicket {
            generation: self.generation,
            key: key.to_string(),
        }
    }

    pub fn finish_load(&mut self, ticket: &LoadTicket, outcome: Result<Vec<T>, ApiError>) -> Applied {
        if ticket.generation != self.generation || !self.state.is_loading() {
            return Applied::Stale;
        }
        self.state = match outcome {
            Ok(items) if items.is_empty() => ViewState::Empty,
            Ok(items) => ViewState::Ready(items),
            Err(e) => ViewState::Error(e.user_message()),
        };
        Applied::Applied
    }

    /// Mark a write in flight. Returns `false` if one already is, or the
    /// screen has nothing loaded to write against.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting.is_some() || matches!(self.state, ViewState::Loading | ViewState::Error(_)) {
            return false;
        }
        self.submitting = Some(self.generation);
        self.last_error = None;
        true
    }

    /// Apply a create or update result: insert or replace by id.
    ///
    /// Returns `Stale` without touching the screen when no write is in
    /// flight for the current load.
    pub fn finish_submit(&mut self, outcome: Result<T, ApiError>) -> Applied {
        if self.submitting.take() != Some(self.generation) {
            return Applied::Stale;
        }
        match outcome {
            Ok(item) => {
                let mut items = self.take_items();
                match items.iter().position(|i| i.id() == item.id()) {
                    Some(pos) => items[pos] = item,
                    None => items.insert(0, item),
                }
                self.editing = None;
                self.state = ViewState::Ready(items);
            }
            Err(e) => self.last_error = Some(e.user_message()),
        }
        Applied::Applied
    }

    /// Remove exactly `id`. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let mut items = self.take_items();
        let before = items.len();
        items.retain(|i| i.id() != id);
        let removed = items.len() != before;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        self.state = if items.is_empty() {
            match &self.state {
                ViewState::Ready(_) | ViewState::Empty => ViewState::Empty,
                other => other.clone(),
            }
        } else {
            ViewState::Ready(items)
        };
        removed
    }

    /// Enter inline edit for an item that is on screen.
    pub fn start_edit(&mut self, id: &str) -> bool {
        if self.state.items().iter().any(|i| i.id() == id) {
            self.editing = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    fn take_items(&mut self) -> Vec<T> {
        match std::mem::replace(&mut self.state, ViewState::Empty) {
            ViewState::Ready(items) => items,
            other => {
                self.state = other;
                Vec::new()
            }
        }
    }
}

/// Field errors and submit gating for a form screen.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    errors: Vec<FieldError>,
    submitting: bool,
    submit_error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// The user edited `field`; its error no longer applies.
    pub fn touch(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    /// Run `validate`; on success enter `submitting` and return `true`.
    pub fn try_submit(&mut self, validate: impl FnOnce() -> Result<(), ValidationErrors>) -> bool {
        if self.submitting {
            return false;
        }
        self.submit_error = None;
        match validate() {
            Ok(()) => {
                self.errors.clear();
                self.submitting = true;
                true
            }
            Err(errors) => {
                self.errors = errors.errors;
                false
            }
        }
    }

    pub fn finish_submit(&mut self, outcome: Result<(), ApiError>) {
        self.submitting = false;
        match outcome {
            Ok(()) => self.submit_error = None,
            Err(ApiError::Validation(errors)) => self.errors = errors.errors,
            Err(e) => self.submit_error = Some(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        label: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: id.to_string(),
            label,
        }
    }

    fn ready_screen() -> ListScreen<Item> {
        let mut screen = ListScreen::new();
        let ticket = screen.begin_load("pet-1");
        screen.finish_load(&ticket, Ok(vec![item("a", "A"), item("b", "B"), item("c", "C")]));
        screen
    }

    #[test]
    fn load_to_ready_once() {
        let mut screen = ListScreen::<Item>::new();
        let ticket = screen.begin_load("pet-1");
        assert!(screen.state().is_loading());
        assert_eq!(screen.finish_load(&ticket, Ok(vec![item("a", "A")])), Applied::Applied);
        assert_eq!(screen.state().items().len(), 1);
        // A second completion for the same ticket is ignored.
        assert_eq!(screen.finish_load(&ticket, Ok(vec![])), Applied::Stale);
        assert_eq!(screen.state().items().len(), 1);
    }

    #[test]
    fn load_error() {
        let mut screen = ListScreen::<Item>::new();
        let ticket = screen.begin_load("pet-1");
        screen.finish_load(&ticket, Err(ApiError::Transport("offline".to_string())));
        assert!(matches!(screen.state(), ViewState::Error(_)));
    }

    #[test]
    fn empty_result_is_empty_state() {
        let mut screen = ListScreen::<Item>::new();
        let ticket = screen.begin_load("pet-1");
        screen.finish_load(&ticket, Ok(Vec::new()));
        assert_eq!(screen.state(), &ViewState::Empty);
    }

    #[test]
    fn stale_response_for_previous_key_is_ignored() {
        let mut screen = ready_screen();
        let old = screen.begin_load("pet-1");
        let new = screen.begin_load("pet-2");
        // Switching keys hides the previous pet's items immediately.
        assert!(screen.state().items().is_empty());
        assert_eq!(screen.finish_load(&old, Ok(vec![item("x", "old")])), Applied::Stale);
        assert!(screen.state().is_loading());
        screen.finish_load(&new, Ok(vec![item("y", "new")]));
        assert_eq!(screen.state().items()[0].label, "new");
        assert_eq!(screen.key(), Some("pet-2"));
    }

    #[test]
    fn remove_exactly_one() {
        let mut screen = ready_screen();
        assert!(screen.remove("b"));
        let ids: Vec<&str> = screen.state().items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(!screen.remove("zzz"));
        assert_eq!(screen.state().items().len(), 2);
    }

    #[test]
    fn removing_last_item_is_empty() {
        let mut screen = ListScreen::<Item>::new();
        let ticket = screen.begin_load("k");
        screen.finish_load(&ticket, Ok(vec![item("only", "O")]));
        screen.remove("only");
        assert_eq!(screen.state(), &ViewState::Empty);
    }

    #[test]
    fn submit_inserts_or_replaces() {
        let mut screen = ready_screen();
        assert!(screen.begin_submit());
        assert!(!screen.begin_submit());
        screen.finish_submit(Ok(item("b", "B2")));
        assert_eq!(screen.state().items()[1].label, "B2");
        assert_eq!(screen.state().items().len(), 3);

        assert!(screen.begin_submit());
        screen.finish_submit(Ok(item("d", "D")));
        assert_eq!(screen.state().items()[0].id, "d");
    }

    #[test]
    fn failed_submit_keeps_server_truth() {
        let mut screen = ready_screen();
        assert!(screen.begin_submit());
        screen.finish_submit(Err(ApiError::Http {
            status: 500,
            message: "sunucu hatası".to_string(),
        }));
        assert_eq!(screen.state().items().len(), 3);
        assert_eq!(screen.last_error(), Some("sunucu hatası"));
        assert!(!screen.is_submitting());
    }

    #[test]
    fn write_started_before_key_switch_is_dropped() {
        let mut screen = ready_screen();
        assert!(screen.begin_submit());
        let next = screen.begin_load("pet-2");
        assert!(!screen.is_submitting());

        assert_eq!(screen.finish_submit(Ok(item("a", "from pet-1"))), Applied::Stale);
        assert!(screen.state().is_loading());

        assert_eq!(screen.finish_load(&next, Ok(vec![item("x", "pet-2")])), Applied::Applied);
        let labels: Vec<&str> = screen.state().items().iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["pet-2"]);
    }

    #[test]
    fn submit_without_begin_is_ignored() {
        let mut screen = ready_screen();
        assert_eq!(screen.finish_submit(Ok(item("z", "Z"))), Applied::Stale);
        assert_eq!(screen.state().items().len(), 3);
    }

    #[test]
    fn submit_into_empty_list() {
        let mut screen = ListScreen::<Item>::new();
        let ticket = screen.begin_load("k");
        screen.finish_load(&ticket, Ok(vec![]));
        assert!(screen.begin_submit());
        screen.finish_submit(Ok(item("n", "N")));
        assert_eq!(screen.state().items().len(), 1);
    }

    #[test]
    fn edit_only_visible_items() {
        let mut screen = ready_screen();
        assert!(screen.start_edit("a"));
        assert_eq!(screen.editing(), Some("a"));
        assert!(!screen.start_edit("nope"));
        screen.remove("a");
        assert_eq!(screen.editing(), None);
    }

    #[test]
    fn form_blocks_on_validation_errors() {
        let mut form = FormState::new();
        let submitted = form.try_submit(|| {
            let mut v = crate::validation::Validator::new();
            v.required("name", "");
            v.finish()
        });
        assert!(!submitted);
        assert_eq!(form.field_error("name"), Some("name is required"));
        form.touch("name");
        assert!(!form.has_errors());
        assert!(form.try_submit(|| Ok(())));
        assert!(form.is_submitting());
        form.finish_submit(Err(ApiError::Transport("x".to_string())));
        assert_eq!(form.submit_error(), Some("Could not reach the server."));
    }
}
