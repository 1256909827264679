//! Recipient selection with "main handler" and "for information" classifications
//!
//! A node can carry at most one classification. Toggling a node into one
//! classification removes it from the other.

use serde::{Deserialize, Serialize};

/// What kind of tree node a selection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    User,
    Org,
}

/// A selected node. Identity is `(kind, id)`; the name is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
}

impl SelectionEntry {
    pub fn new(kind: NodeKind, id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }

    pub fn user(id: u64, name: impl Into<String>) -> Self {
        Self::new(NodeKind::User, id, name)
    }

    pub fn org(id: u64, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Org, id, name)
    }

    fn same_node(&self, other: &SelectionEntry) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}

/// The two ways a recipient can be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    /// Primary responsible party
    Main,
    /// Copied without primary responsibility
    ToKnow,
}

/// Two disjoint, insertion-ordered sets of selected nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    main: Vec<SelectionEntry>,
    to_know: Vec<SelectionEntry>,
}

impl SelectionState {
    /// Seed from caller-supplied receivers.
    ///
    /// Duplicates collapse; an entry seeded into both lists stays in `main` only.
    pub fn new(
        main: impl IntoIterator<Item = SelectionEntry>,
        to_know: impl IntoIterator<Item = SelectionEntry>,
    ) -> Self {
        let mut state = Self::default();
        for entry in main {
            if state.classification_of(&entry).is_none() {
                state.main.push(entry);
            }
        }
        for entry in to_know {
            if state.classification_of(&entry).is_none() {
                state.to_know.push(entry);
            }
        }
        state
    }

    /// Toggle membership in the main set, leaving the to-know set if needed
    pub fn toggle_main(&mut self, entry: SelectionEntry) {
        Self::toggle_into(&mut self.main, &mut self.to_know, entry);
    }

    /// Toggle membership in the to-know set, leaving the main set if needed
    pub fn toggle_to_know(&mut self, entry: SelectionEntry) {
        Self::toggle_into(&mut self.to_know, &mut self.main, entry);
    }

    pub fn toggle(&mut self, classification: Classification, entry: SelectionEntry) {
        match classification {
            Classification::Main => self.toggle_main(entry),
            Classification::ToKnow => self.toggle_to_know(entry),
        }
    }

    fn toggle_into(
        target: &mut Vec<SelectionEntry>,
        other: &mut Vec<SelectionEntry>,
        entry: SelectionEntry,
    ) {
        other.retain(|e| !e.same_node(&entry));

        match target.iter().position(|e| e.same_node(&entry)) {
            Some(pos) => {
                target.remove(pos);
            }
            None => target.push(entry),
        }
    }

    pub fn clear(&mut self) {
        self.main.clear();
        self.to_know.clear();
    }

    pub fn classification_of(&self, entry: &SelectionEntry) -> Option<Classification> {
        if self.main.iter().any(|e| e.same_node(entry)) {
            Some(Classification::Main)
        } else if self.to_know.iter().any(|e| e.same_node(entry)) {
            Some(Classification::ToKnow)
        } else {
            None
        }
    }

    pub fn is_main(&self, entry: &SelectionEntry) -> bool {
        self.classification_of(entry) == Some(Classification::Main)
    }

    pub fn is_to_know(&self, entry: &SelectionEntry) -> bool {
        self.classification_of(entry) == Some(Classification::ToKnow)
    }

    pub fn main(&self) -> &[SelectionEntry] {
        &self.main
    }

    pub fn to_know(&self) -> &[SelectionEntry] {
        &self.to_know
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.to_know.is_empty()
    }

    pub fn len(&self) -> usize {
        self.main.len() + self.to_know.len()
    }
}
