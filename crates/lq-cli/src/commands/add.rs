use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use lq_core::{LimitSide, QuestionDraft};
use lq_expr::diagnostics::render_syntax_errors;
use lq_expr::{Expression, ExprError, LimitPoint};

use crate::config::AppConfig;
use crate::present;

/// Flags for `lq add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// The question statement
    #[arg(short, long)]
    pub prompt: String,

    /// Expression whose limit is asked for, e.g. "(x^2 - 1)/(x - 1)"
    #[arg(short, long, requires = "point", conflicts_with_all = ["image", "image_ref"])]
    pub expression: Option<String>,

    /// Point the variable approaches, e.g. 1, pi/2, -inf
    #[arg(long, requires = "expression")]
    pub point: Option<String>,

    /// Approach side: none, left, right
    #[arg(long, default_value = "none")]
    pub side: String,

    /// Image file to show instead of an expression
    #[arg(long, conflicts_with = "image_ref")]
    pub image: Option<PathBuf>,

    /// Image reference stored as given (URL, data URI, ...)
    #[arg(long)]
    pub image_ref: Option<String>,

    /// An answer option (repeat for each option)
    #[arg(short, long = "option", value_name = "OPTION")]
    pub options: Vec<String>,

    /// The correct option, by text or by 1-based number
    #[arg(short, long)]
    pub correct: String,
}

pub fn run(config: &AppConfig, args: &AddArgs) -> Result<(), String> {
    let draft = draft_from_args(args)?;

    if let (Some(expression), Some(point)) = (&args.expression, &args.point) {
        check_expression(expression, point)?;
    }

    let mut repository = super::open_repository(&config.store);
    let question = repository.create(&draft).map_err(|e| e.to_string())?;
    let summary = present::stimulus_summary(question);

    println!(
        "  {} question {}: {}",
        "Added".green().bold(),
        repository.len(),
        summary
    );
    Ok(())
}

fn draft_from_args(args: &AddArgs) -> Result<QuestionDraft, String> {
    let draft = match (&args.expression, &args.image, &args.image_ref) {
        (Some(expression), _, _) => {
            let side = LimitSide::parse(&args.side)
                .ok_or_else(|| format!("unknown side \"{}\" (use none, left or right)", args.side))?;
            QuestionDraft::expression(expression, args.point.clone().unwrap_or_default())
                .with_side(side)
        }
        (None, Some(path), _) => QuestionDraft::image(file_uri(path)?),
        (None, None, Some(reference)) => QuestionDraft::image(reference),
        (None, None, None) => {
            return Err("give either --expression and --point, or --image / --image-ref".into());
        }
    };

    let mut draft = draft.with_prompt(&args.prompt);
    for option in &args.options {
        draft.add_option(option).map_err(|e| e.to_string())?;
    }

    let correct = args.correct.trim();
    let marked = match correct.parse::<usize>() {
        Ok(number) if !draft.answer_options.iter().any(|o| o == correct) => {
            number > 0 && draft.mark_correct(number - 1)
        }
        _ => false,
    };
    if !marked {
        draft.correct_answer = correct.to_string();
    }

    Ok(draft)
}

/// Reject expressions and points the quiz could not display.
fn check_expression(expression: &str, point: &str) -> Result<(), String> {
    if let Err(e) = Expression::parse(expression).and_then(|e| e.free_variable().map(drop)) {
        return Err(report("expression", expression, &e));
    }
    if let Err(e) = LimitPoint::parse(point) {
        return Err(report("limit point", point, &e));
    }
    Ok(())
}

fn report(name: &str, source: &str, error: &ExprError) -> String {
    let syntax = error.syntax_errors();
    if !syntax.is_empty() {
        eprint!("{}", render_syntax_errors(source, name, syntax, true));
    }
    format!("invalid {name} \"{source}\": {error}")
}

/// `file://` URI of the canonical path.
fn file_uri(path: &Path) -> Result<String, String> {
    let canonical = std::fs::canonicalize(path)
        .map_err(|e| format!("cannot read image {}: {e}", path.display()))?;
    if !canonical.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    let text = canonical.to_string_lossy().replace('\\', "/");
    if text.starts_with('/') {
        Ok(format!("file://{text}"))
    } else {
        Ok(format!("file:///{text}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(correct: &str, options: &[&str]) -> AddArgs {
        AddArgs {
            prompt: "What is the limit?".into(),
            expression: Some("sin(x)/x".into()),
            point: Some("0".into()),
            side: "right".into(),
            image: None,
            image_ref: None,
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.into(),
        }
    }

    #[test]
    fn correct_by_text_or_number() {
        let draft = draft_from_args(&args("1", &["0", "1", "∞"])).unwrap();
        assert_eq!(draft.correct_answer, "1");
        assert_eq!(draft.side, LimitSide::Right);

        let draft = draft_from_args(&args("3", &["0", "1", "∞"])).unwrap();
        assert_eq!(draft.correct_answer, "∞");
        assert!(draft.build().is_ok());
    }

    #[test]
    fn unknown_correct_answer_fails_validation() {
        let draft = draft_from_args(&args("7", &["0", "1"])).unwrap();
        assert!(draft.build().is_err());
    }

    #[test]
    fn duplicate_options_rejected() {
        assert!(draft_from_args(&args("1", &["1", " 1 "])).is_err());
    }

    #[test]
    fn image_ref_kept_verbatim() {
        let mut a = args("a", &["a"]);
        a.expression = None;
        a.point = None;
        a.image_ref = Some("https://example.org/graph.png".into());
        let draft = draft_from_args(&a).unwrap();
        assert_eq!(draft.image_reference, "https://example.org/graph.png");
    }

    #[test]
    fn image_file_becomes_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.png");
        std::fs::write(&path, b"png").unwrap();
        let uri = file_uri(&path).unwrap();
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("graph.png"));
        assert!(file_uri(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn expressions_are_checked() {
        assert!(check_expression("sin(x)/x", "0").is_ok());
        assert!(check_expression("x y", "0").is_err());
        assert!(check_expression("sin(x", "0").is_err());
        assert!(check_expression("x", "t").is_err());
        assert!(check_expression("1/x", "-inf").is_ok());
    }
}
