use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::error::SyntaxError;

/// Render syntax errors against their source with ariadne.
///
/// `name` labels the source in the report (e.g. `expression` or `limit point`).
/// Colors are only emitted when `color` is set.
pub fn render_syntax_errors(source: &str, name: &str, errors: &[SyntaxError], color: bool) -> String {
    let mut output = Vec::new();

    for error in errors {
        // Zero-width spans (end of input) still need something to point at.
        let span = if !error.span.is_empty() {
            error.span.clone()
        } else if error.span.start < source.len() {
            error.span.start..error.span.start + 1
        } else {
            source.len().saturating_sub(1)..source.len()
        };

        Report::build(ReportKind::Error, (name, span.clone()))
            .with_config(
                Config::default()
                    .with_color(color)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(&error.message)
            .with_label(
                Label::new((name, span))
                    .with_message(&error.message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((name, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expression;

    #[test]
    fn renders_parse_error() {
        let source = "sin(x) + ";
        let err = Expression::parse(source).unwrap_err();
        let output = render_syntax_errors(source, "expression", err.syntax_errors(), false);
        assert!(output.contains("expression"));
        assert!(output.contains("Error"));
    }

    #[test]
    fn renders_lex_error_message() {
        let source = "x # 2";
        let err = Expression::parse(source).unwrap_err();
        let output = render_syntax_errors(source, "expression", err.syntax_errors(), false);
        assert!(output.contains("unexpected character"));
    }

    #[test]
    fn nothing_to_render() {
        assert!(render_syntax_errors("x", "expression", &[], false).is_empty());
    }
}
