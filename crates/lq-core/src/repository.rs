//! The question repository: a [`QuestionBank`] kept in sync with a
//! [`QuestionStore`].
//!
//! Every mutation is applied to the bank first and then persisted. When
//! persisting fails the mutation is undone, so memory and storage never
//! disagree.

use crate::bank::{BankEntry, QuestionBank};
use crate::error::{RepoError, RepoResult};
use crate::question::{Question, QuestionDraft};
use crate::store::QuestionStore;
use crate::visibility::AnswerVisibility;

/// What happened when the repository was restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreReport {
    /// Nothing was stored yet.
    Fresh,
    /// This many questions were loaded.
    Restored(usize),
    /// Stored data was unreadable and has been discarded.
    Discarded(String),
    /// The store itself could not be read. It is left as it is and the
    /// repository refuses changes until restarted.
    Unavailable(String),
}

/// Owns the authored questions for the lifetime of the application.
pub struct QuestionRepository<S: QuestionStore> {
    bank: QuestionBank,
    store: S,
    visibility: AnswerVisibility,
    report: RestoreReport,
}

impl<S: QuestionStore> QuestionRepository<S> {
    /// Load whatever `store` holds. Corrupt data is quarantined and the
    /// repository starts empty. A store that cannot be read at all is left
    /// alone and the repository starts empty and read-only. Never fails.
    pub fn restore(mut store: S) -> Self {
        let (bank, report) = match store.load() {
            Ok(Some(questions)) => {
                tracing::info!(count = questions.len(), "restored questions");
                let count = questions.len();
                (
                    QuestionBank::from_questions(questions),
                    RestoreReport::Restored(count),
                )
            }
            Ok(None) => {
                tracing::debug!("no stored questions, starting empty");
                (QuestionBank::new(), RestoreReport::Fresh)
            }
            Err(e) if !e.is_corrupt_data() => {
                tracing::warn!(error = %e, "question store unavailable, starting read-only");
                (QuestionBank::new(), RestoreReport::Unavailable(e.to_string()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable questions");
                if let Err(qe) = store.quarantine() {
                    tracing::warn!(error = %qe, "could not quarantine unreadable questions");
                }
                (QuestionBank::new(), RestoreReport::Discarded(e.to_string()))
            }
        };

        Self {
            bank,
            store,
            visibility: AnswerVisibility::new(),
            report,
        }
    }

    /// How the initial load went.
    pub fn restore_report(&self) -> &RestoreReport {
        &self.report
    }

    /// Validate `draft`, append it, and persist. Rejected drafts change nothing.
    pub fn create(&mut self, draft: &QuestionDraft) -> RepoResult<&Question> {
        let question = draft.build()?;
        self.ensure_writable()?;
        let id = self.bank.push(question);

        if let Err(e) = self.store.save(&self.bank.snapshot()) {
            self.bank.pop();
            tracing::warn!(error = %e, "rolled back question creation");
            return Err(RepoError::Store(e));
        }

        tracing::info!(%id, total = self.bank.len(), "question created");
        let index = self.bank.len() - 1;
        Ok(&self.bank.entries()[index].question)
    }

    /// Remove the question at `index` and persist. Out-of-range positions
    /// change nothing.
    pub fn delete_at(&mut self, index: usize) -> RepoResult<Question> {
        self.ensure_writable()?;
        let len = self.bank.len();
        let entry = self
            .bank
            .remove(index)
            .ok_or(RepoError::IndexOutOfRange { index, len })?;

        if let Err(e) = self.store.save(&self.bank.snapshot()) {
            self.bank.insert(index, entry);
            tracing::warn!(error = %e, index, "rolled back question deletion");
            return Err(RepoError::Store(e));
        }

        self.visibility.forget(entry.id);
        tracing::info!(id = %entry.id, index, total = self.bank.len(), "question deleted");
        Ok(entry.question)
    }

    fn ensure_writable(&self) -> RepoResult<()> {
        match &self.report {
            RestoreReport::Unavailable(reason) => Err(RepoError::Unavailable(reason.clone())),
            _ => Ok(()),
        }
    }

    /// Flip the "show answers" flag of the question at `index`. Returns the
    /// new state, or `None` when there is no such question.
    pub fn toggle_answer_visibility(&mut self, index: usize) -> Option<bool> {
        let id = self.bank.get(index)?.id;
        Some(self.visibility.toggle(id))
    }

    /// Whether the answers of the question at `index` are revealed.
    pub fn is_answer_visible(&self, index: usize) -> bool {
        self.bank
            .get(index)
            .is_some_and(|entry| self.visibility.is_revealed(entry.id))
    }

    /// The question at `index`.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.bank.get(index).map(|e| &e.question)
    }

    /// All questions in order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.bank.questions()
    }

    /// All entries (with identities) in order.
    pub fn entries(&self) -> &[BankEntry] {
        self.bank.entries()
    }

    /// An owned copy of the current questions.
    pub fn snapshot(&self) -> Vec<Question> {
        self.bank.snapshot()
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.bank.len()
    }

    /// Whether there are no questions.
    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The backing store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
