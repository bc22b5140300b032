//! Game session: walks a snapshot of the question bank, one question at a time.
//!
//! ```text
//! idle ──start──▶ playing ──advance (last)──▶ finished
//!                  │  ▲                           │
//!                  └──┘ advance (not last)        │
//!   ◀──────────────── abandon ────────────────────┘
//! ```
//!
//! Answering and advancing are separate steps so the UI can show feedback
//! before moving on.

use crate::error::{SessionError, SessionResult};
use crate::outcome::FinalTally;
use crate::question::Question;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No game running.
    #[default]
    Idle,
    /// A question is on screen.
    Playing,
    /// All questions were played; the tally is available.
    Finished,
}

/// The answer given to the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// The option text the player picked.
    pub selected: String,
    /// Whether it was the correct answer.
    pub correct: bool,
}

/// Result of [`GameSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved on to the question at `index`.
    Next {
        /// New 0-based position.
        index: usize,
    },
    /// That was the last question.
    Finished(FinalTally),
}

/// State of one play-through.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    snapshot: Vec<Question>,
    current_index: usize,
    score: usize,
    phase: Phase,
    answer: Option<Answer>,
}

impl GameSession {
    /// An idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing `snapshot`, replacing any previous game. The session
    /// owns its copy, so later edits to the bank do not reach it. An empty
    /// snapshot is refused and leaves the session untouched.
    pub fn start(&mut self, snapshot: Vec<Question>) -> SessionResult<()> {
        if snapshot.is_empty() {
            return Err(SessionError::EmptyBank);
        }
        tracing::debug!(questions = snapshot.len(), "game started");
        *self = Self {
            snapshot,
            current_index: 0,
            score: 0,
            phase: Phase::Playing,
            answer: None,
        };
        Ok(())
    }

    /// Answer the current question with the option text `selected`.
    /// Returns whether it was correct. Only the first answer per question counts.
    pub fn submit_answer(&mut self, selected: &str) -> SessionResult<bool> {
        if self.phase != Phase::Playing {
            return Err(SessionError::NotPlaying);
        }
        if self.answer.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }

        let correct = self.snapshot[self.current_index].is_correct(selected);
        if correct {
            self.score += 1;
        }
        self.answer = Some(Answer {
            selected: selected.to_string(),
            correct,
        });
        tracing::debug!(index = self.current_index, correct, score = self.score, "answer submitted");
        Ok(correct)
    }

    /// Answer with the option at 0-based `position` of the current question.
    pub fn submit_option(&mut self, position: usize) -> SessionResult<bool> {
        let option = self
            .current_question()
            .ok_or(SessionError::NotPlaying)?
            .answer_options
            .get(position)
            .cloned()
            .ok_or(SessionError::NoSuchOption(position))?;
        self.submit_answer(&option)
    }

    /// Move past an answered question. Finishes the game after the last one.
    pub fn advance(&mut self) -> SessionResult<Progress> {
        if self.phase != Phase::Playing {
            return Err(SessionError::NotPlaying);
        }
        if self.answer.is_none() {
            return Err(SessionError::NotAnswered);
        }

        if self.current_index + 1 < self.snapshot.len() {
            self.current_index += 1;
            self.answer = None;
            Ok(Progress::Next {
                index: self.current_index,
            })
        } else {
            self.phase = Phase::Finished;
            let tally = self.final_tally();
            tracing::info!(score = tally.score, total = tally.total, "game finished");
            Ok(Progress::Finished(tally))
        }
    }

    /// Return to the menu: drop the game and its score.
    pub fn abandon(&mut self) {
        if self.phase == Phase::Playing {
            tracing::debug!(index = self.current_index, score = self.score, "game abandoned");
        }
        *self = Self::default();
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Correct answers so far.
    pub fn score(&self) -> usize {
        self.score
    }

    /// 0-based position of the current question.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of questions in this game.
    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    /// The question on screen, while playing.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Playing => self.snapshot.get(self.current_index),
            Phase::Idle | Phase::Finished => None,
        }
    }

    /// The answer given to the current question, if any.
    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    /// Whether the current question has been answered.
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    /// The final tally, once finished.
    pub fn tally(&self) -> Option<FinalTally> {
        (self.phase == Phase::Finished).then(|| self.final_tally())
    }

    fn final_tally(&self) -> FinalTally {
        FinalTally {
            score: self.score,
            total: self.snapshot.len(),
        }
    }
}
