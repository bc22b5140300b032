//! Questions, their kind-specific stimulus, and the authoring draft.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Identity of a question inside a repository. Assigned on create/restore,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(pub Uuid);

impl QuestionId {
    /// Generate a new random question ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What the question shows the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// A limit of an expression near a point.
    #[default]
    Expression,
    /// A static image (usually a graph).
    Image,
}

impl QuestionKind {
    /// Parse a kind name (`expression`/`function`, `image`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "expression" | "function" | "expr" => Some(Self::Expression),
            "image" | "img" => Some(Self::Image),
            _ => None,
        }
    }

    /// The other kind.
    pub fn toggled(self) -> Self {
        match self {
            Self::Expression => Self::Image,
            Self::Image => Self::Expression,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression => write!(f, "expression"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Direction from which the variable approaches the limit point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitSide {
    /// Two-sided limit.
    #[default]
    None,
    /// Approach from the right (`a⁺`).
    Right,
    /// Approach from the left (`a⁻`).
    Left,
}

impl LimitSide {
    /// All sides in form-cycling order.
    pub const ALL: [LimitSide; 3] = [LimitSide::None, LimitSide::Right, LimitSide::Left];

    /// Parse a side (`none`, `right`/`+`, `left`/`-`). An empty string is two-sided.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "none" | "both" => Some(Self::None),
            "right" | "+" | "r" => Some(Self::Right),
            "left" | "-" | "l" => Some(Self::Left),
            _ => None,
        }
    }

    /// Superscript marker appended to the limit point.
    pub fn superscript(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Right => "⁺",
            Self::Left => "⁻",
        }
    }

    /// The next side in cycling order.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Right,
            Self::Right => Self::Left,
            Self::Left => Self::None,
        }
    }
}

impl fmt::Display for LimitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Right => write!(f, "right"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// Kind-specific part of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Stimulus {
    /// `lim x→a f(x)` for an expression `f`.
    Expression {
        /// Expression text in one free variable.
        expression: String,
        /// The value the variable approaches.
        #[serde(rename = "limitPoint")]
        limit_point: String,
        /// Approach direction.
        #[serde(default)]
        side: LimitSide,
    },
    /// A prompt image.
    Image {
        /// Opaque reference to the image (file URI, URL, data URI).
        #[serde(rename = "imageReference")]
        image_reference: String,
    },
}

impl Stimulus {
    /// The kind discriminator.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Expression { .. } => QuestionKind::Expression,
            Self::Image { .. } => QuestionKind::Image,
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// What the question shows.
    #[serde(flatten)]
    pub stimulus: Stimulus,
    /// The question statement.
    pub prompt: String,
    /// Options in display order.
    pub answer_options: Vec<String>,
    /// The option that scores.
    pub correct_answer: String,
}

impl Question {
    /// The question kind.
    pub fn kind(&self) -> QuestionKind {
        self.stimulus.kind()
    }

    /// The expression, for expression questions.
    pub fn expression(&self) -> Option<&str> {
        match &self.stimulus {
            Stimulus::Expression { expression, .. } => Some(expression),
            Stimulus::Image { .. } => None,
        }
    }

    /// Whether `answer` is exactly the correct answer.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// Check that every field required by the kind is present and that the
    /// correct answer is one of the distinct options.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.prompt) {
            return Err(ValidationError::MissingPrompt);
        }

        match &self.stimulus {
            Stimulus::Expression {
                expression,
                limit_point,
                ..
            } => {
                if is_blank(expression) {
                    return Err(ValidationError::MissingExpression);
                }
                if is_blank(limit_point) {
                    return Err(ValidationError::MissingLimitPoint);
                }
            }
            Stimulus::Image { image_reference } => {
                if is_blank(image_reference) {
                    return Err(ValidationError::MissingImage);
                }
            }
        }

        if self.answer_options.is_empty() {
            return Err(ValidationError::NoAnswerOptions);
        }

        let mut seen = HashSet::new();
        for (i, option) in self.answer_options.iter().enumerate() {
            if is_blank(option) {
                return Err(ValidationError::BlankOption(i + 1));
            }
            if !seen.insert(option.as_str()) {
                return Err(ValidationError::DuplicateOption(option.clone()));
            }
        }

        if self.correct_answer.is_empty() {
            return Err(ValidationError::MissingCorrectAnswer);
        }
        if !seen.contains(self.correct_answer.as_str()) {
            return Err(ValidationError::CorrectAnswerNotAnOption(
                self.correct_answer.clone(),
            ));
        }

        Ok(())
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// A candidate question as typed into the authoring form.
///
/// Every field is plain text so half-filled forms can be represented;
/// [`QuestionDraft::build`] turns it into a validated [`Question`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    /// Selected question kind.
    pub kind: QuestionKind,
    /// Expression text (expression questions).
    pub expression: String,
    /// Limit point text (expression questions).
    pub limit_point: String,
    /// Approach direction (expression questions).
    pub side: LimitSide,
    /// Image reference (image questions).
    pub image_reference: String,
    /// Question statement.
    pub prompt: String,
    /// Answer options in insertion order.
    pub answer_options: Vec<String>,
    /// The chosen correct option.
    pub correct_answer: String,
}

impl QuestionDraft {
    /// Start a draft for an expression question.
    pub fn expression(expression: impl Into<String>, limit_point: impl Into<String>) -> Self {
        Self {
            kind: QuestionKind::Expression,
            expression: expression.into(),
            limit_point: limit_point.into(),
            ..Self::default()
        }
    }

    /// Start a draft for an image question.
    pub fn image(image_reference: impl Into<String>) -> Self {
        Self {
            kind: QuestionKind::Image,
            image_reference: image_reference.into(),
            ..Self::default()
        }
    }

    /// Set the approach direction.
    pub fn with_side(mut self, side: LimitSide) -> Self {
        self.side = side;
        self
    }

    /// Set the question statement.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Append an answer option without any checks.
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.answer_options.push(option.into());
        self
    }

    /// Set the correct answer.
    pub fn with_correct_answer(mut self, answer: impl Into<String>) -> Self {
        self.correct_answer = answer.into();
        self
    }

    /// Add an option the way the authoring form does: blank input is
    /// ignored (`Ok(false)`), a duplicate is rejected.
    pub fn add_option(&mut self, text: &str) -> Result<bool, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        if self.answer_options.iter().any(|o| o == text) {
            return Err(ValidationError::DuplicateOption(text.to_string()));
        }
        self.answer_options.push(text.to_string());
        Ok(true)
    }

    /// Remove the option at `index`. Clears the correct answer if it was that option.
    pub fn remove_option(&mut self, index: usize) -> Option<String> {
        if index >= self.answer_options.len() {
            return None;
        }
        let removed = self.answer_options.remove(index);
        if removed == self.correct_answer {
            self.correct_answer.clear();
        }
        Some(removed)
    }

    /// Mark the option at `index` as the correct answer.
    pub fn mark_correct(&mut self, index: usize) -> bool {
        match self.answer_options.get(index) {
            Some(option) => {
                self.correct_answer = option.clone();
                true
            }
            None => false,
        }
    }

    /// Reset the draft to an empty expression question.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build and validate the question. Fields that do not belong to the
    /// selected kind are dropped.
    pub fn build(&self) -> Result<Question, ValidationError> {
        let stimulus = match self.kind {
            QuestionKind::Expression => Stimulus::Expression {
                expression: self.expression.trim().to_string(),
                limit_point: self.limit_point.trim().to_string(),
                side: self.side,
            },
            QuestionKind::Image => Stimulus::Image {
                image_reference: self.image_reference.trim().to_string(),
            },
        };

        let question = Question {
            stimulus,
            prompt: self.prompt.trim().to_string(),
            answer_options: self.answer_options.clone(),
            correct_answer: self.correct_answer.clone(),
        };
        question.validate()?;
        Ok(question)
    }
}

impl From<&Question> for QuestionDraft {
    fn from(question: &Question) -> Self {
        let mut draft = Self {
            kind: question.kind(),
            prompt: question.prompt.clone(),
            answer_options: question.answer_options.clone(),
            correct_answer: question.correct_answer.clone(),
            ..Self::default()
        };
        match &question.stimulus {
            Stimulus::Expression {
                expression,
                limit_point,
                side,
            } => {
                draft.expression = expression.clone();
                draft.limit_point = limit_point.clone();
                draft.side = *side;
            }
            Stimulus::Image { image_reference } => {
                draft.image_reference = image_reference.clone();
            }
        }
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sinc_draft() -> QuestionDraft {
        QuestionDraft::expression("sin(x)/x", "0")
            .with_prompt("What is the limit?")
            .with_option("0")
            .with_option("1")
            .with_option("does not exist")
            .with_correct_answer("1")
    }

    #[test]
    fn build_valid_expression_question() {
        let q = sinc_draft().build().unwrap();
        assert_eq!(q.kind(), QuestionKind::Expression);
        assert_eq!(q.expression(), Some("sin(x)/x"));
        assert!(q.is_correct("1"));
        assert!(!q.is_correct("0"));
    }

    #[test]
    fn build_valid_image_question() {
        let q = QuestionDraft::image("file:///tmp/graph.png")
            .with_prompt("Read the limit from the graph")
            .with_option("2")
            .with_correct_answer("2")
            .build()
            .unwrap();
        assert_eq!(q.kind(), QuestionKind::Image);
        assert_eq!(q.expression(), None);
    }

    #[test]
    fn image_kind_drops_expression_fields() {
        let mut draft = sinc_draft();
        draft.kind = QuestionKind::Image;
        draft.image_reference = "file:///tmp/a.png".into();
        let q = draft.build().unwrap();
        assert_eq!(
            q.stimulus,
            Stimulus::Image {
                image_reference: "file:///tmp/a.png".into()
            }
        );
    }

    #[test]
    fn rejects_missing_prompt() {
        let draft = sinc_draft().with_prompt("   ");
        assert_eq!(draft.build(), Err(ValidationError::MissingPrompt));
    }

    #[test]
    fn rejects_missing_expression_and_point() {
        let mut draft = sinc_draft();
        draft.expression.clear();
        assert_eq!(draft.build(), Err(ValidationError::MissingExpression));

        let mut draft = sinc_draft();
        draft.limit_point = " ".into();
        assert_eq!(draft.build(), Err(ValidationError::MissingLimitPoint));
    }

    #[test]
    fn rejects_image_question_without_image() {
        let draft = QuestionDraft::image("")
            .with_prompt("Graph?")
            .with_option("1")
            .with_correct_answer("1");
        assert_eq!(draft.build(), Err(ValidationError::MissingImage));
    }

    #[test]
    fn rejects_empty_options() {
        let draft = QuestionDraft::expression("x", "1")
            .with_prompt("Limit?")
            .with_correct_answer("1");
        assert_eq!(draft.build(), Err(ValidationError::NoAnswerOptions));
    }

    #[test]
    fn rejects_correct_answer_outside_options() {
        let draft = sinc_draft().with_correct_answer("2");
        assert_eq!(
            draft.build(),
            Err(ValidationError::CorrectAnswerNotAnOption("2".into()))
        );
        let draft = sinc_draft().with_correct_answer("");
        assert_eq!(draft.build(), Err(ValidationError::MissingCorrectAnswer));
    }

    #[test]
    fn rejects_duplicate_and_blank_options() {
        let draft = sinc_draft().with_option("0");
        assert_eq!(
            draft.build(),
            Err(ValidationError::DuplicateOption("0".into()))
        );
        let draft = sinc_draft().with_option("  ");
        assert_eq!(draft.build(), Err(ValidationError::BlankOption(4)));
    }

    #[test]
    fn add_option_ignores_blank_and_rejects_duplicates() {
        let mut draft = QuestionDraft::default();
        assert_eq!(draft.add_option("   "), Ok(false));
        assert_eq!(draft.add_option(" 1 "), Ok(true));
        assert_eq!(
            draft.add_option("1"),
            Err(ValidationError::DuplicateOption("1".into()))
        );
        assert_eq!(draft.answer_options, vec!["1".to_string()]);
    }

    #[test]
    fn removing_correct_option_clears_correct_answer() {
        let mut draft = sinc_draft();
        assert!(draft.mark_correct(0));
        assert_eq!(draft.correct_answer, "0");
        assert_eq!(draft.remove_option(0), Some("0".to_string()));
        assert!(draft.correct_answer.is_empty());
        assert_eq!(draft.remove_option(9), None);
        assert!(!draft.mark_correct(9));
    }

    #[test]
    fn side_parsing_accepts_symbols() {
        assert_eq!(LimitSide::parse("+"), Some(LimitSide::Right));
        assert_eq!(LimitSide::parse("left"), Some(LimitSide::Left));
        assert_eq!(LimitSide::parse(""), Some(LimitSide::None));
        assert_eq!(LimitSide::parse("up"), None);
        assert_eq!(LimitSide::Left.superscript(), "⁻");
    }

    #[test]
    fn serializes_flat_camel_case_record() {
        let q = sinc_draft().with_side(LimitSide::Right).build().unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["kind"], "expression");
        assert_eq!(json["limitPoint"], "0");
        assert_eq!(json["side"], "right");
        assert_eq!(json["answerOptions"][1], "1");
        assert_eq!(json["correctAnswer"], "1");

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn missing_side_defaults_to_none() {
        let json = r#"{"kind":"expression","expression":"x","limitPoint":"1",
            "prompt":"p","answerOptions":["1"],"correctAnswer":"1"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(matches!(
            q.stimulus,
            Stimulus::Expression {
                side: LimitSide::None,
                ..
            }
        ));
    }

    #[test]
    fn draft_round_trips_from_question() {
        let q = sinc_draft().build().unwrap();
        let draft = QuestionDraft::from(&q);
        assert_eq!(draft.build().unwrap(), q);
    }
}
