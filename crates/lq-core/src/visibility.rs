//! Per-question "show answers" flags for the question list.
//!
//! Flags follow question identity, not list position: deleting an entry in
//! the middle never hands its flag to the entry that slides into its place.

use std::collections::HashSet;

use crate::question::QuestionId;

/// Which questions currently have their answers revealed.
#[derive(Debug, Clone, Default)]
pub struct AnswerVisibility {
    revealed: HashSet<QuestionId>,
}

impl AnswerVisibility {
    /// Everything hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag for `id`. Returns the new state.
    pub fn toggle(&mut self, id: QuestionId) -> bool {
        if self.revealed.remove(&id) {
            false
        } else {
            self.revealed.insert(id);
            true
        }
    }

    /// Whether answers of `id` are revealed.
    pub fn is_revealed(&self, id: QuestionId) -> bool {
        self.revealed.contains(&id)
    }

    /// Drop the flag of a deleted question.
    pub fn forget(&mut self, id: QuestionId) {
        self.revealed.remove(&id);
    }

    /// Hide everything.
    pub fn reset(&mut self) {
        self.revealed.clear();
    }

    /// Number of revealed questions.
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
