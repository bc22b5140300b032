//! Text shared by the subcommands and the TUI.

use lq_core::{LimitSide, Outcome, Question, Stimulus};
use lq_expr::{Direction, Expression};

/// `lim x→a⁺ f(x)` in Unicode. Unreadable expressions are shown as typed.
pub fn limit_statement(expression: &str, limit_point: &str, side: LimitSide) -> String {
    let parsed = Expression::parse(expression).ok();
    let variable = parsed
        .as_ref()
        .and_then(|e| e.free_variable().ok())
        .unwrap_or_else(|| lq_expr::DEFAULT_VARIABLE.to_string());
    let body = parsed.map_or_else(|| expression.to_string(), |e| e.to_pretty());
    let point = lq_expr::pretty(limit_point);
    format!("lim {variable}→{point}{} {body}", side.superscript())
}

/// LaTeX for the whole limit, e.g. `\lim_{x \to 0^{+}} \frac{1}{x}`.
pub fn limit_tex(expression: &str, limit_point: &str, side: LimitSide) -> String {
    let variable = Expression::parse(expression)
        .ok()
        .and_then(|e| e.free_variable().ok())
        .unwrap_or_else(|| lq_expr::DEFAULT_VARIABLE.to_string());
    let side = match side {
        LimitSide::None => "",
        LimitSide::Right => "^{+}",
        LimitSide::Left => "^{-}",
    };
    format!(
        "\\lim_{{{variable} \\to {}{side}}} {}",
        lq_expr::typeset(limit_point),
        lq_expr::typeset(expression)
    )
}

/// One-line description of what a question shows.
pub fn stimulus_summary(question: &Question) -> String {
    match &question.stimulus {
        Stimulus::Expression {
            expression,
            limit_point,
            side,
        } => limit_statement(expression, limit_point, *side),
        Stimulus::Image { image_reference } => format!("[image] {image_reference}"),
    }
}

/// Which way to tabulate an approach for a question's side.
pub fn direction(side: LimitSide) -> Direction {
    match side {
        LimitSide::None => Direction::Both,
        LimitSide::Right => Direction::Right,
        LimitSide::Left => Direction::Left,
    }
}

/// Closing message for a finished game.
pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Zero => "Incredible… you didn't get a single one right.",
        Outcome::Perfect => "Impressive! You answered all correctly, a true expert.",
        Outcome::Partial => "Well done! You got several, but you can still improve.",
    }
}

/// Shorten `text` to `max` characters, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements() {
        assert_eq!(
            limit_statement("sin(x)/x", "0", LimitSide::None),
            "lim x→0 sin(x)/x"
        );
        assert_eq!(limit_statement("1/t", "0", LimitSide::Right), "lim t→0⁺ 1/t");
        assert_eq!(limit_statement("1/x", "-inf", LimitSide::None), "lim x→−∞ 1/x");
        assert_eq!(limit_statement("x +", "1", LimitSide::Left), "lim x→1⁻ x +");
    }

    #[test]
    fn tex() {
        assert_eq!(
            limit_tex("1/x", "0", LimitSide::Right),
            "\\lim_{x \\to 0^{+}} \\frac{1}{x}"
        );
    }

    #[test]
    fn outcome_messages_differ() {
        let messages = [Outcome::Zero, Outcome::Partial, Outcome::Perfect].map(outcome_message);
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert!(messages[2].starts_with("Impressive"));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer prompt", 8), "a longe…");
        assert_eq!(truncate("límites", 7), "límites");
    }
}
