pub mod add;
pub mod list;
pub mod play;
pub mod preview;
pub mod remove;
pub mod show;

use std::path::Path;

use lq_core::{JsonFileStore, QuestionRepository, RestoreReport};

/// Open the question file, warning on stderr when it could not be used.
pub fn open_repository(path: &Path) -> QuestionRepository<JsonFileStore> {
    let repository = QuestionRepository::restore(JsonFileStore::new(path));
    match repository.restore_report() {
        RestoreReport::Discarded(reason) => eprintln!(
            "  warning: {} could not be read and was set aside ({reason})",
            path.display()
        ),
        RestoreReport::Unavailable(reason) => eprintln!(
            "  warning: {} could not be opened and was left untouched ({reason})",
            path.display()
        ),
        RestoreReport::Fresh | RestoreReport::Restored(_) => {}
    }
    repository
}

/// Convert a 1-based question number into a 0-based position.
fn position(number: usize, len: usize) -> Result<usize, String> {
    if number == 0 || number > len {
        return Err(match len {
            0 => "there are no questions yet".to_string(),
            1 => format!("no question {number} (there is only 1)"),
            _ => format!("no question {number} (choose 1 to {len})"),
        });
    }
    Ok(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        assert_eq!(position(1, 3), Ok(0));
        assert_eq!(position(3, 3), Ok(2));
        assert!(position(0, 3).is_err());
        assert!(position(4, 3).unwrap_err().contains("1 to 3"));
        assert!(position(1, 0).unwrap_err().contains("no questions"));
    }
}
