use lq_core::{QuestionKind, QuestionStore};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::present;
use crate::tui::app::App;
use crate::tui::form::{Field, TextInput};

pub fn draw<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_form(frame, app, columns[0]);
    draw_question_list(frame, app, columns[1]);
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let color = if focused { Color::Yellow } else { Color::DarkGray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn draw_input(frame: &mut Frame, input: &TextInput, title: &str, focused: bool, area: Rect) {
    frame.render_widget(
        Paragraph::new(input.text()).block(field_block(title, focused)),
        area,
    );
    if focused {
        let x = area.x + 1 + input.cursor_column() as u16;
        if x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

fn draw_choice(frame: &mut Frame, value: &str, title: &str, focused: bool, area: Rect) {
    let text = Line::from(vec![
        Span::raw("◀ "),
        Span::styled(value.to_string(), Style::default().fg(Color::White).bold()),
        Span::raw(" ▶"),
    ]);
    frame.render_widget(Paragraph::new(text).block(field_block(title, focused)), area);
}

fn draw_form<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let form = &app.form;
    let focus = form.focus;
    let is_expression = form.draft.kind == QuestionKind::Expression;

    let mut constraints = vec![Constraint::Length(3)];
    if is_expression {
        constraints.extend([Constraint::Length(3); 4]);
    } else {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(3), // Prompt
        Constraint::Length(3), // Answer
        Constraint::Min(3),    // Options
        Constraint::Length(3), // Save
    ]);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_choice(
        frame,
        &form.draft.kind.to_string(),
        "Question type",
        focus == Field::Kind,
        rows[0],
    );

    let next = if is_expression {
        draw_input(
            frame,
            &form.expression,
            "Expression",
            focus == Field::Expression,
            rows[1],
        );
        draw_input(frame, &form.point, "Limit point", focus == Field::Point, rows[2]);
        draw_choice(
            frame,
            &form.draft.side.to_string(),
            "Side",
            focus == Field::Side,
            rows[3],
        );
        let preview = present::limit_statement(
            form.expression.text(),
            form.point.text(),
            form.draft.side,
        );
        frame.render_widget(
            Paragraph::new(preview)
                .style(Style::default().fg(Color::Cyan))
                .block(field_block("Preview", false)),
            rows[4],
        );
        5
    } else {
        draw_input(
            frame,
            &form.image,
            "Image (path or URL)",
            focus == Field::Image,
            rows[1],
        );
        2
    };

    draw_input(frame, &form.prompt, "Question", focus == Field::Prompt, rows[next]);
    draw_input(
        frame,
        &form.answer,
        "Answer (Enter to add)",
        focus == Field::Answer,
        rows[next + 1],
    );

    let items: Vec<ListItem> = form
        .draft
        .answer_options
        .iter()
        .map(|option| {
            if *option == form.draft.correct_answer {
                ListItem::new(Line::from(vec![
                    Span::styled(option.as_str(), Style::default().fg(Color::Green).bold()),
                    Span::styled("  ✓ correct", Style::default().fg(Color::Green)),
                ]))
            } else {
                ListItem::new(option.as_str())
            }
        })
        .collect();
    let options_focused = focus == Field::Options;
    let list = List::new(items)
        .block(field_block("Options", options_focused))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    if options_focused && !form.draft.answer_options.is_empty() {
        state.select(Some(form.option_cursor));
    }
    frame.render_stateful_widget(list, rows[next + 2], &mut state);

    let save_style = if focus == Field::Save {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Green)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(" Save question ", save_style))
            .alignment(Alignment::Center)
            .block(field_block("", focus == Field::Save)),
        rows[next + 3],
    );
}

fn draw_question_list<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let focused = app.form.focus == Field::List;
    let width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = app
        .repository
        .questions()
        .enumerate()
        .map(|(i, question)| {
            let revealed = app.repository.is_answer_visible(i);
            let options: Vec<Span> = question
                .answer_options
                .iter()
                .enumerate()
                .flat_map(|(j, option)| {
                    let style = if revealed && *option == question.correct_answer {
                        Style::default().fg(Color::Green).bold()
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    let separator = if j == 0 { "   " } else { " · " };
                    [Span::raw(separator), Span::styled(option.as_str(), style)]
                })
                .collect();

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        present::truncate(&question.prompt, width),
                        Style::default().fg(Color::White).bold(),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("   {}", present::truncate(&present::stimulus_summary(question), width)),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(options),
                Line::from(Span::styled(
                    if revealed { "   [r] hide answer" } else { "   [r] show answer" },
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let title = format!(" Questions ({}) ", app.repository.len());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused {
                    Color::Yellow
                } else {
                    Color::Blue
                })),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !app.repository.is_empty() {
        state.select(Some(app.list_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);

    if app.repository.is_empty() {
        let inner = area.inner(Margin::new(2, 2));
        frame.render_widget(
            Paragraph::new("No questions yet. Fill in the form and save.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    }
}
