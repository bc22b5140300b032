use lq_core::{GameSession, Progress, QuestionRepository, QuestionStore, RestoreReport};
use lq_expr::Domain;

use super::form::{EditorForm, Field};
use super::tips::TipRotator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Editor,
    Game,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App<S: QuestionStore> {
    pub repository: QuestionRepository<S>,
    pub session: GameSession,
    pub screen: Screen,
    pub form: EditorForm,
    pub tips: TipRotator,
    pub plot: Domain,
    pub status: Option<Status>,
    pub show_help: bool,
    pub should_quit: bool,

    // Editor question list
    pub list_cursor: usize,

    // Highlighted option on the game screen
    pub game_cursor: usize,
}

impl<S: QuestionStore> App<S> {
    pub fn new(repository: QuestionRepository<S>, tips: TipRotator, plot: Domain) -> Self {
        let status = match repository.restore_report() {
            RestoreReport::Discarded(reason) => Some(Status {
                kind: StatusKind::Error,
                text: format!("Saved questions could not be read and were set aside: {reason}"),
            }),
            RestoreReport::Unavailable(reason) => Some(Status {
                kind: StatusKind::Error,
                text: format!("Question file could not be opened, changes are disabled: {reason}"),
            }),
            RestoreReport::Restored(n) => Some(Status {
                kind: StatusKind::Info,
                text: format!("Loaded {n} question{}", if *n == 1 { "" } else { "s" }),
            }),
            RestoreReport::Fresh => None,
        };
        Self {
            repository,
            session: GameSession::new(),
            screen: Screen::Menu,
            form: EditorForm::default(),
            tips,
            plot,
            status,
            show_help: false,
            should_quit: false,
            list_cursor: 0,
            game_cursor: 0,
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Menu → editor.
    pub fn open_editor(&mut self) {
        self.screen = Screen::Editor;
        self.status = None;
    }

    /// Back to the title screen from anywhere. Any game in progress is dropped.
    pub fn back_to_menu(&mut self) {
        self.session.abandon();
        self.screen = Screen::Menu;
        self.status = None;
    }

    // Editor

    /// Submit the form. Invalid or unsaved questions keep the form contents.
    pub fn save_question(&mut self) {
        let draft = self.form.to_draft();
        match self.repository.create(&draft) {
            Ok(question) => {
                let text = format!("Saved \"{}\"", question.prompt);
                self.list_cursor = self.repository.len() - 1;
                self.form.reset();
                self.info(text);
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn add_answer(&mut self) {
        match self.form.add_answer() {
            Ok(()) => self.status = None,
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn mark_correct(&mut self) {
        if self.form.mark_highlighted_correct() {
            let text = format!("Correct answer: {}", self.form.draft.correct_answer);
            self.info(text);
        }
    }

    pub fn remove_option(&mut self) {
        if let Some(removed) = self.form.remove_highlighted() {
            self.info(format!("Removed option \"{removed}\""));
        }
    }

    pub fn list_down(&mut self) {
        if self.list_cursor + 1 < self.repository.len() {
            self.list_cursor += 1;
        }
    }

    pub fn list_up(&mut self) {
        self.list_cursor = self.list_cursor.saturating_sub(1);
    }

    pub fn toggle_reveal(&mut self) {
        self.repository.toggle_answer_visibility(self.list_cursor);
    }

    pub fn delete_selected(&mut self) {
        if self.repository.is_empty() {
            return;
        }
        match self.repository.delete_at(self.list_cursor) {
            Ok(question) => {
                self.list_cursor = self
                    .list_cursor
                    .min(self.repository.len().saturating_sub(1));
                self.info(format!("Deleted \"{}\"", question.prompt));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    // Game

    /// Start a game over every question in the bank.
    pub fn start_game(&mut self) {
        match self.session.start(self.repository.snapshot()) {
            Ok(()) => {
                self.screen = Screen::Game;
                self.game_cursor = 0;
                self.status = None;
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Answer with option `position`. Ignored once the question is answered.
    pub fn choose(&mut self, position: usize) {
        if self.session.is_answered() {
            return;
        }
        match self.session.submit_option(position) {
            Ok(_) => self.game_cursor = position,
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn choose_highlighted(&mut self) {
        self.choose(self.game_cursor);
    }

    pub fn move_game_cursor(&mut self, delta: isize) {
        if self.session.is_answered() {
            return;
        }
        let count = self
            .session
            .current_question()
            .map_or(0, |q| q.answer_options.len());
        if count == 0 {
            return;
        }
        self.game_cursor = self
            .game_cursor
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    /// Next question, or the final screen after the last one. Needs an answer first.
    pub fn next_question(&mut self) {
        match self.session.advance() {
            Ok(Progress::Next { .. }) => self.game_cursor = 0,
            Ok(Progress::Finished(_)) => self.screen = Screen::Final,
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Whether typed characters go into a text field.
    pub fn is_typing(&self) -> bool {
        self.screen == Screen::Editor && self.form.focus.is_text()
    }

    pub fn focus(&self) -> Field {
        self.form.focus
    }
}
