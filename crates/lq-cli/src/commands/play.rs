//! Line-oriented quiz on stdin/stdout.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use lq_core::{GameSession, Progress, Question, Stimulus};

use crate::config::AppConfig;
use crate::present;

pub fn run(config: &AppConfig) -> Result<(), String> {
    let repository = super::open_repository(&config.store);
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(repository.snapshot(), stdin.lock(), stdout.lock())
}

/// Play `questions` reading choices from `input`. `q` or end of input abandons the game.
pub fn play<R: BufRead, W: Write>(
    questions: Vec<Question>,
    mut input: R,
    mut output: W,
) -> Result<(), String> {
    let mut session = GameSession::new();
    session
        .start(questions)
        .map_err(|e| format!("{e}; add some with `lq add`"))?;

    let io_err = |e: io::Error| format!("cannot write output: {e}");

    while let Some(question) = session.current_question().cloned() {
        print_question(&mut output, &session, &question).map_err(io_err)?;

        let Some(position) = read_choice(&mut input, &mut output, &question).map_err(io_err)?
        else {
            session.abandon();
            writeln!(output, "\n  Game abandoned.").map_err(io_err)?;
            return Ok(());
        };

        let correct = session.submit_option(position).map_err(|e| e.to_string())?;
        if correct {
            writeln!(output, "  {}", "Correct!".green().bold()).map_err(io_err)?;
        } else {
            writeln!(
                output,
                "  {} The answer was {}.",
                "Wrong.".red().bold(),
                question.correct_answer.bold()
            )
            .map_err(io_err)?;
        }
        writeln!(output).map_err(io_err)?;

        if let Progress::Finished(tally) = session.advance().map_err(|e| e.to_string())? {
            writeln!(output, "  Final score: {}", tally.to_string().bold()).map_err(io_err)?;
            writeln!(output, "  {}", present::outcome_message(tally.outcome())).map_err(io_err)?;
        }
    }

    Ok(())
}

fn print_question<W: Write>(
    output: &mut W,
    session: &GameSession,
    question: &Question,
) -> io::Result<()> {
    writeln!(
        output,
        "  {}",
        format!(
            "Question {} / {} | Score {}",
            session.current_index() + 1,
            session.total(),
            session.score()
        )
        .dimmed()
    )?;
    writeln!(output, "  {}", question.prompt.bold())?;
    match &question.stimulus {
        Stimulus::Expression {
            expression,
            limit_point,
            side,
        } => writeln!(
            output,
            "  {}",
            present::limit_statement(expression, limit_point, *side)
        )?,
        Stimulus::Image { image_reference } => writeln!(output, "  image: {image_reference}")?,
    }
    for (i, option) in question.answer_options.iter().enumerate() {
        writeln!(output, "    {}. {option}", i + 1)?;
    }
    Ok(())
}

/// Prompt until the player picks an option by number or text. `None` means quit.
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &Question,
) -> io::Result<Option<usize>> {
    let count = question.answer_options.len();
    loop {
        write!(output, "  answer [1-{count}, q to quit]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        if let Some(position) = question.answer_options.iter().position(|o| o == line) {
            return Ok(Some(position));
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(output, "  pick a number from 1 to {count}")?,
        }
    }
}
