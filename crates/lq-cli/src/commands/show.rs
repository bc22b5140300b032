use colored::Colorize;
use lq_core::Stimulus;

use crate::config::AppConfig;
use crate::present;

pub fn run(config: &AppConfig, number: usize, reveal: bool) -> Result<(), String> {
    let mut repository = super::open_repository(&config.store);
    let index = super::position(number, repository.len())?;

    // Visibility is per process, so a fresh repository starts hidden.
    if reveal {
        repository.toggle_answer_visibility(index);
    }
    let revealed = repository.is_answer_visible(index);

    let question = repository
        .get(index)
        .ok_or_else(|| format!("no question {number}"))?;

    println!(
        "  {} [{}]",
        format!("Question {number}").bold(),
        question.kind().to_string().dimmed()
    );
    println!();
    println!("  {}", question.prompt);
    println!();

    match &question.stimulus {
        Stimulus::Expression {
            expression,
            limit_point,
            side,
        } => {
            println!(
                "  limit:      {}",
                present::limit_statement(expression, limit_point, *side)
            );
            println!("  expression: {expression}");
            println!("  latex:      {}", present::limit_tex(expression, limit_point, *side));
        }
        Stimulus::Image { image_reference } => {
            println!("  image:      {image_reference}");
        }
    }
    println!();

    println!("  {}", "options".dimmed());
    for (i, option) in question.answer_options.iter().enumerate() {
        if revealed && option == &question.correct_answer {
            println!("    {}. {} {}", i + 1, option.green().bold(), "✓".green());
        } else {
            println!("    {}. {option}", i + 1);
        }
    }

    Ok(())
}
