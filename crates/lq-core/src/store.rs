//! Persistence port for the question repository and its implementations.
//!
//! Questions are stored as one JSON document:
//!
//! ```json
//! { "version": 1, "savedAt": "…", "questions": [ { "kind": "expression", … } ] }
//! ```
//!
//! A bare JSON array of question records (the pre-versioning layout) is
//! still accepted on read. Writes always produce the versioned envelope.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::question::Question;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Where the repository persists its questions.
pub trait QuestionStore {
    /// Read the persisted questions. `Ok(None)` when nothing was saved yet.
    fn load(&mut self) -> StoreResult<Option<Vec<Question>>>;

    /// Replace the persisted questions with `questions`.
    fn save(&mut self, questions: &[Question]) -> StoreResult<()>;

    /// Move unreadable data out of the way so the next save does not destroy it.
    fn quarantine(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    questions: &'a [Question],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    version: u32,
    #[allow(dead_code)]
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    questions: Vec<Question>,
}

/// Serialize questions into the versioned envelope.
pub fn encode(questions: &[Question]) -> StoreResult<String> {
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        saved_at: Utc::now(),
        questions,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse stored text. All-or-nothing: any malformed question rejects the
/// whole document.
pub fn decode(text: &str) -> StoreResult<Vec<Question>> {
    let value: Value = serde_json::from_str(text)?;

    let questions: Vec<Question> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(_) => {
            let envelope: Envelope = serde_json::from_value(value)?;
            if envelope.version != FORMAT_VERSION {
                return Err(StoreError::UnsupportedVersion(envelope.version));
            }
            envelope.questions
        }
        other => {
            return Err(StoreError::Json(serde_json::Error::custom(format!(
                "expected a list of questions, found {}",
                json_type_name(&other)
            ))));
        }
    };

    for (index, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|source| StoreError::Malformed { index, source })?;
    }

    Ok(questions)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Stores questions in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the next quarantine will move the file: `<file>.corrupt`, or
    /// `<file>.corrupt.N` with the first free `N` when earlier copies exist.
    pub fn quarantine_path(&self) -> PathBuf {
        let first = sibling(&self.path, ".corrupt");
        if !first.exists() {
            return first;
        }
        (1u32..)
            .map(|n| sibling(&self.path, &format!(".corrupt.{n}")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl QuestionStore for JsonFileStore {
    fn load(&mut self) -> StoreResult<Option<Vec<Question>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        decode(&text).map(Some)
    }

    fn save(&mut self, questions: &[Question]) -> StoreResult<()> {
        let text = encode(questions)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = sibling(&self.path, ".tmp");
        fs::write(&tmp, text).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            fs::remove_file(&tmp).ok();
            return Err(self.io_error(e));
        }

        tracing::debug!(path = %self.path.display(), count = questions.len(), "saved questions");
        Ok(())
    }

    fn quarantine(&mut self) -> StoreResult<()> {
        let target = self.quarantine_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => {
                tracing::warn!(
                    from = %self.path.display(),
                    to = %target.display(),
                    "moved unreadable question file aside"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Keeps the serialized document in memory. Used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    quarantined: Option<String>,
    read_only: bool,
    saves: usize,
}

impl MemoryStore {
    /// An empty store (nothing saved yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `text`, valid or not.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            ..Self::default()
        }
    }

    /// Make every save fail with [`StoreError::ReadOnly`].
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Toggle write failures on an existing store.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The currently stored document.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// The document moved aside by [`QuestionStore::quarantine`].
    pub fn quarantined(&self) -> Option<&str> {
        self.quarantined.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl QuestionStore for MemoryStore {
    fn load(&mut self) -> StoreResult<Option<Vec<Question>>> {
        match &self.contents {
            Some(text) => decode(text).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, questions: &[Question]) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.contents = Some(encode(questions)?);
        self.saves += 1;
        Ok(())
    }

    fn quarantine(&mut self) -> StoreResult<()> {
        if let Some(text) = self.contents.take() {
            self.quarantined = Some(text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionDraft;

    fn question(prompt: &str) -> Question {
        QuestionDraft::expression("1/x", "0")
            .with_prompt(prompt)
            .with_option("∞")
            .with_option("does not exist")
            .with_correct_answer("does not exist")
            .build()
            .unwrap()
    }

    #[test]
    fn encode_then_decode_keeps_order() {
        let text = encode(&[question("a"), question("b")]).unwrap();
        assert!(text.contains("\"version\": 1"));
        let back = decode(&text).unwrap();
        assert_eq!(back[0].prompt, "a");
        assert_eq!(back[1].prompt, "b");
    }

    #[test]
    fn decode_accepts_legacy_array() {
        let text = r#"[{"kind":"image","imageReference":"file:///g.png",
            "prompt":"p","answerOptions":["1","2"],"correctAnswer":"2"}]"#;
        let questions = decode(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "2");
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(matches!(decode("42"), Err(StoreError::Json(_))));
        assert!(matches!(decode("{\"foo\": 1}"), Err(StoreError::Json(_))));
        assert!(matches!(decode("not json"), Err(StoreError::Json(_))));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let text = r#"{"version": 99, "questions": []}"#;
        assert!(matches!(
            decode(text),
            Err(StoreError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn decode_rejects_malformed_question() {
        let text = r#"[{"kind":"expression","expression":"x","limitPoint":"1",
            "prompt":"p","answerOptions":["1"],"correctAnswer":"7"}]"#;
        assert!(matches!(
            decode(text),
            Err(StoreError::Malformed { index: 0, .. })
        ));
    }

    #[test]
    fn file_store_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("questions.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/questions.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&[question("a")]).unwrap();
        assert!(path.exists());

        let mut reopened = JsonFileStore::new(&path);
        let loaded = reopened.load().unwrap().unwrap();
        assert_eq!(loaded[0].prompt, "a");
    }

    #[test]
    fn file_store_quarantine_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        fs::write(&path, "{ broken").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
        store.quarantine().unwrap();
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(store.quarantine_path()).unwrap(),
            "{ broken"
        );
    }

    #[test]
    fn file_store_quarantine_keeps_earlier_copies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        let mut store = JsonFileStore::new(&path);

        fs::write(&path, "first broken").unwrap();
        store.quarantine().unwrap();
        fs::write(&path, "second broken").unwrap();
        store.quarantine().unwrap();
        fs::write(&path, "third broken").unwrap();
        store.quarantine().unwrap();

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("questions.json.corrupt"), "first broken");
        assert_eq!(read("questions.json.corrupt.1"), "second broken");
        assert_eq!(read("questions.json.corrupt.2"), "third broken");
        assert!(!path.exists());
    }

    #[test]
    fn file_store_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        // A non-empty directory cannot be replaced by a file.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(
            store.save(&[question("a")]),
            Err(StoreError::Io { .. })
        ));
        assert!(!dir.path().join("questions.json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn only_data_errors_count_as_corrupt() {
        assert!(decode("not json").unwrap_err().is_corrupt_data());
        assert!(StoreError::UnsupportedVersion(2).is_corrupt_data());
        let io = StoreError::Io {
            path: PathBuf::from("questions.json"),
            source: std::io::Error::from(ErrorKind::PermissionDenied),
        };
        assert!(!io.is_corrupt_data());
        assert!(!StoreError::ReadOnly.is_corrupt_data());
    }

    #[test]
    fn memory_store_read_only_refuses_saves() {
        let mut store = MemoryStore::new().read_only();
        assert!(matches!(store.save(&[]), Err(StoreError::ReadOnly)));
        assert_eq!(store.save_count(), 0);
    }
}
