//! The in-memory ordered question bank, free of any persistence.

use crate::question::{Question, QuestionId};

/// A question together with its in-memory identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    /// Identity of the entry.
    pub id: QuestionId,
    /// The question itself.
    pub question: Question,
}

/// Ordered list of questions. Insertion order is display and play order.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    entries: Vec<BankEntry>,
}

impl QuestionBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bank from questions, assigning fresh identities.
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            entries: questions
                .into_iter()
                .map(|question| BankEntry {
                    id: QuestionId::new(),
                    question,
                })
                .collect(),
        }
    }

    /// Append a question at the end. Returns its new identity.
    pub fn push(&mut self, question: Question) -> QuestionId {
        let id = QuestionId::new();
        self.entries.push(BankEntry { id, question });
        id
    }

    /// Remove the entry at `index`, shifting later entries down.
    pub fn remove(&mut self, index: usize) -> Option<BankEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Put an entry back at `index` (clamped to the end).
    pub fn insert(&mut self, index: usize, entry: BankEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Remove the last entry.
    pub fn pop(&mut self) -> Option<BankEntry> {
        self.entries.pop()
    }

    /// The entry at `index`.
    pub fn get(&self, index: usize) -> Option<&BankEntry> {
        self.entries.get(index)
    }

    /// Position of the entry with the given identity.
    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[BankEntry] {
        &self.entries
    }

    /// All questions in order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.entries.iter().map(|e| &e.question)
    }

    /// An owned copy of the questions, for persisting or for a game session.
    pub fn snapshot(&self) -> Vec<Question> {
        self.questions().cloned().collect()
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bank is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionDraft;

    fn question(prompt: &str) -> Question {
        QuestionDraft::expression("x", "1")
            .with_prompt(prompt)
            .with_option("1")
            .with_correct_answer("1")
            .build()
            .unwrap()
    }

    fn prompts(bank: &QuestionBank) -> Vec<String> {
        bank.questions().map(|q| q.prompt.clone()).collect()
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut bank = QuestionBank::new();
        bank.push(question("q0"));
        bank.push(question("q1"));
        assert_eq!(prompts(&bank), ["q0", "q1"]);
    }

    #[test]
    fn remove_middle_preserves_relative_order() {
        let mut bank = QuestionBank::from_questions([question("q0"), question("q1"), question("q2")]);
        let removed = bank.remove(1).unwrap();
        assert_eq!(removed.question.prompt, "q1");
        assert_eq!(prompts(&bank), ["q0", "q2"]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut bank = QuestionBank::from_questions([question("q0")]);
        assert!(bank.remove(1).is_none());
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn insert_restores_removed_entry() {
        let mut bank = QuestionBank::from_questions([question("q0"), question("q1"), question("q2")]);
        let entry = bank.remove(1).unwrap();
        let id = entry.id;
        bank.insert(1, entry);
        assert_eq!(prompts(&bank), ["q0", "q1", "q2"]);
        assert_eq!(bank.position(id), Some(1));
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut bank = QuestionBank::from_questions([question("q0")]);
        let snapshot = bank.snapshot();
        bank.push(question("q1"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(bank.len(), 2);
    }
}
