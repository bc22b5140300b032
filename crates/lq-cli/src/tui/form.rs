//! Authoring form state.

use crossterm::event::{KeyCode, KeyEvent};
use lq_core::{QuestionDraft, QuestionKind, ValidationError};

/// A single-line text field with a byte cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false when the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.text.remove(prev);
                    self.cursor = prev;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.text.len());
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            KeyCode::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            _ => return false,
        }
        true
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Focusable parts of the editor, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Kind,
    Expression,
    Point,
    Side,
    Image,
    Prompt,
    Answer,
    Options,
    Save,
    List,
}

impl Field {
    const ORDER: [Field; 10] = [
        Field::Kind,
        Field::Expression,
        Field::Point,
        Field::Side,
        Field::Image,
        Field::Prompt,
        Field::Answer,
        Field::Options,
        Field::Save,
        Field::List,
    ];

    /// Whether the field is shown for questions of `kind`.
    pub fn applies_to(self, kind: QuestionKind) -> bool {
        match self {
            Field::Expression | Field::Point | Field::Side => kind == QuestionKind::Expression,
            Field::Image => kind == QuestionKind::Image,
            _ => true,
        }
    }

    /// Whether typing goes into this field.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Field::Expression | Field::Point | Field::Image | Field::Prompt | Field::Answer
        )
    }

    fn step(self, kind: QuestionKind, forward: bool) -> Field {
        let len = Self::ORDER.len();
        let start = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        (1..=len)
            .map(|offset| {
                let i = if forward {
                    (start + offset) % len
                } else {
                    (start + len - offset) % len
                };
                Self::ORDER[i]
            })
            .find(|f| f.applies_to(kind))
            .unwrap_or(self)
    }
}

/// The editor form: a [`QuestionDraft`] plus cursors for its text fields.
#[derive(Debug, Clone, Default)]
pub struct EditorForm {
    pub focus: Field,
    pub draft: QuestionDraft,
    pub expression: TextInput,
    pub point: TextInput,
    pub image: TextInput,
    pub prompt: TextInput,
    pub answer: TextInput,
    /// Highlighted answer option.
    pub option_cursor: usize,
}

impl EditorForm {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.step(self.draft.kind, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.step(self.draft.kind, false);
    }

    /// The text input under focus, if the focus is on one.
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Field::Expression => Some(&mut self.expression),
            Field::Point => Some(&mut self.point),
            Field::Image => Some(&mut self.image),
            Field::Prompt => Some(&mut self.prompt),
            Field::Answer => Some(&mut self.answer),
            _ => None,
        }
    }

    pub fn toggle_kind(&mut self) {
        self.draft.kind = self.draft.kind.toggled();
    }

    pub fn cycle_side(&mut self) {
        self.draft.side = self.draft.side.next();
    }

    /// Move the typed answer into the option list. Blank input is ignored.
    pub fn add_answer(&mut self) -> Result<(), ValidationError> {
        if self.draft.add_option(self.answer.text())? {
            self.answer.clear();
            self.option_cursor = self.draft.answer_options.len() - 1;
        }
        Ok(())
    }

    pub fn mark_highlighted_correct(&mut self) -> bool {
        self.draft.mark_correct(self.option_cursor)
    }

    pub fn remove_highlighted(&mut self) -> Option<String> {
        let removed = self.draft.remove_option(self.option_cursor)?;
        self.option_cursor = self
            .option_cursor
            .min(self.draft.answer_options.len().saturating_sub(1));
        Some(removed)
    }

    pub fn option_down(&mut self) {
        if self.option_cursor + 1 < self.draft.answer_options.len() {
            self.option_cursor += 1;
        }
    }

    pub fn option_up(&mut self) {
        self.option_cursor = self.option_cursor.saturating_sub(1);
    }

    /// The draft with the current text of every field.
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            expression: self.expression.text().to_string(),
            limit_point: self.point.text().to_string(),
            image_reference: self.image.text().to_string(),
            prompt: self.prompt.text().to_string(),
            ..self.draft.clone()
        }
    }

    /// Empty every field, keeping the focus on the list when it was there.
    pub fn reset(&mut self) {
        let focus = if self.focus == Field::List {
            Field::List
        } else {
            Field::Kind
        };
        *self = Self {
            focus,
            ..Self::default()
        };
    }
}
