use lq_core::{Question, QuestionStore, Stimulus};
use lq_expr::limit::format_number;
use lq_expr::{LimitPoint, Series};
use ratatui::prelude::*;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};

use crate::present;
use crate::tui::app::App;

pub fn draw<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let Some(question) = app.session.current_question() else {
        frame.render_widget(Paragraph::new("No game in progress."), area);
        return;
    };

    let option_rows = question.answer_options.len().div_ceil(2) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                  // Prompt
            Constraint::Min(6),                     // Chart or image
            Constraint::Length(option_rows * 3),    // Options
            Constraint::Length(1),                  // Feedback
        ])
        .split(area);

    draw_prompt(frame, question, chunks[0]);
    match &question.stimulus {
        Stimulus::Expression {
            expression,
            limit_point,
            ..
        } => draw_chart(frame, app, expression, limit_point, chunks[1]),
        Stimulus::Image { image_reference } => {
            let image = Paragraph::new(vec![
                Line::from(""),
                Line::from(image_reference.as_str()).style(Style::default().fg(Color::Cyan)),
                Line::from(""),
                Line::from("Open the image above to see the graph.")
                    .style(Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Image ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            );
            frame.render_widget(image, chunks[1]);
        }
    }
    draw_options(frame, app, question, chunks[2]);
    draw_feedback(frame, app, question, chunks[3]);
}

fn draw_prompt(frame: &mut Frame, question: &Question, area: Rect) {
    let mut lines = vec![Line::from(question.prompt.as_str()).style(Style::default().bold())];
    if let Stimulus::Expression {
        expression,
        limit_point,
        side,
    } = &question.stimulus
    {
        lines.push(
            Line::from(present::limit_statement(expression, limit_point, *side))
                .style(Style::default().fg(Color::Cyan)),
        );
    }
    let prompt = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(prompt, area);
}

/// Vertical window for a plot: the middle 90% of the defined values plus a
/// margin, so poles do not flatten the rest of the curve.
fn y_window(series: &Series) -> (f64, f64) {
    let mut ys: Vec<f64> = series.defined().map(|(_, y)| y).collect();
    if ys.is_empty() {
        return (-1.0, 1.0);
    }
    ys.sort_by(f64::total_cmp);
    let lo = ys[ys.len() * 5 / 100];
    let hi = ys[(ys.len() * 95 / 100).min(ys.len() - 1)];
    if hi - lo < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let margin = (hi - lo) * 0.1;
    (lo - margin, hi + margin)
}

fn draw_chart<S: QuestionStore>(
    frame: &mut Frame,
    app: &App<S>,
    expression: &str,
    limit_point: &str,
    area: Rect,
) {
    let series = lq_expr::sample(expression, &app.plot);
    let segments = series.segments();
    let block = Block::default()
        .title(format!(" f({}) ", series.variable))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if segments.is_empty() {
        let message = Paragraph::new(format!("Cannot plot {expression}"))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let x_start = app.plot.start;
    let x_end = app.plot.end().unwrap_or(x_start + 1.0);
    let (y_lo, y_hi) = y_window(&series);

    let point = match LimitPoint::parse(limit_point) {
        Ok(LimitPoint::Finite(a)) if (x_start..=x_end).contains(&a) => Some(a),
        _ => None,
    };
    let marker: Vec<(f64, f64)> = point.map_or_else(Vec::new, |a| vec![(a, y_lo), (a, y_hi)]);

    let mut datasets: Vec<Dataset> = segments
        .iter()
        .map(|segment| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(segment)
        })
        .collect();
    if let Some(a) = point {
        datasets.push(
            Dataset::default()
                .name(format!("{} → {}", series.variable, format_number(a)))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&marker),
        );
    }

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([x_start, x_end])
                .labels([
                    format_number(x_start),
                    format_number((x_start + x_end) / 2.0),
                    format_number(x_end),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_lo, y_hi])
                .labels([format!("{y_lo:.1}"), format!("{y_hi:.1}")]),
        );
    frame.render_widget(chart, area);
}

fn draw_options<S: QuestionStore>(frame: &mut Frame, app: &App<S>, question: &Question, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3);
            question.answer_options.len().div_ceil(2)
        ])
        .split(area);

    let answer = app.session.answer();
    for (i, option) in question.answer_options.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[i / 2]);

        let (border, text) = match answer {
            Some(_) if *option == question.correct_answer => (
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Black).bg(Color::Green).bold(),
            ),
            Some(given) if given.selected == *option => (
                Style::default().fg(Color::Red),
                Style::default().fg(Color::White).bg(Color::Red).bold(),
            ),
            Some(_) => (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            ),
            None if i == app.game_cursor => (
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::White).bold(),
            ),
            None => (Style::default().fg(Color::Gray), Style::default()),
        };

        let cell = Paragraph::new(Span::styled(format!(" {}. {option} ", i + 1), text))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(cell, cells[i % 2]);
    }
}

fn draw_feedback<S: QuestionStore>(frame: &mut Frame, app: &App<S>, question: &Question, area: Rect) {
    let last = app.session.current_index() + 1 == app.session.total();
    let line = match app.session.answer() {
        Some(answer) if answer.correct => Line::from(vec![
            Span::styled("Correct! ", Style::default().fg(Color::Green).bold()),
            Span::raw(if last { "Enter: see results" } else { "Enter: next question" }),
        ]),
        Some(_) => Line::from(vec![
            Span::styled("Wrong. ", Style::default().fg(Color::Red).bold()),
            Span::raw(format!("The answer was {}. ", question.correct_answer)),
            Span::raw(if last { "Enter: see results" } else { "Enter: next question" }),
        ]),
        None => Line::from(format!(
            "Choose an answer (1-{})",
            question.answer_options.len()
        ))
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}
