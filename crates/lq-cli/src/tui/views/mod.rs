pub mod editor;
pub mod final_screen;
pub mod game;
pub mod menu;

use lq_core::QuestionStore;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::app::{App, Screen, StatusKind};
use super::form::Field;

pub fn draw<S: QuestionStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Screen
            Constraint::Length(3), // Mascot
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match app.screen {
        Screen::Menu => menu::draw(frame, app, chunks[0]),
        Screen::Editor => editor::draw(frame, app, chunks[0]),
        Screen::Game => game::draw(frame, app, chunks[0]),
        Screen::Final => final_screen::draw(frame, app, chunks[0]),
    }

    draw_mascot(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_mascot<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let tip = Paragraph::new(Line::from(vec![
        Span::styled("(•‿•) ", Style::default().fg(Color::Yellow).bold()),
        Span::styled(app.tips.current(), Style::default().fg(Color::White).italic()),
    ]))
    .block(
        Block::default()
            .title(" Tip ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(tip, area);
}

fn draw_status_bar<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::Black).bg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::White).bg(Color::Red),
        };
        frame.render_widget(Paragraph::new(status.text.as_str()).style(style), area);
        return;
    }

    let hint = match app.screen {
        Screen::Menu => "Enter:play ?:help q:quit".to_string(),
        Screen::Editor => match app.focus() {
            Field::Kind | Field::Side => {
                "Space:change Tab:next field Ctrl+S:save Esc:menu".to_string()
            }
            Field::Answer => "Enter:add option Tab:next field Ctrl+S:save Esc:menu".to_string(),
            Field::Options => {
                "j/k:select Enter:mark correct d:remove Tab:next field Esc:menu".to_string()
            }
            Field::Save => "Enter:save question Tab:next field Esc:menu".to_string(),
            Field::List => format!(
                "{} questions | j/k:select r:reveal d:delete p:play Esc:menu",
                app.repository.len()
            ),
            Field::Expression | Field::Point | Field::Image | Field::Prompt => {
                "Enter:next field Ctrl+S:save Esc:menu".to_string()
            }
        },
        Screen::Game => format!(
            "Question {} / {} | Score {} | 1-9:answer Enter:next Esc:menu",
            app.session.current_index() + 1,
            app.session.total(),
            app.session.score()
        ),
        Screen::Final => "Enter:back to menu q:quit".to_string(),
    };

    let bar = Paragraph::new(hint).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(bar, area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Editor:"),
        Line::from("  Tab / S-Tab  Next / previous field"),
        Line::from("  Space        Toggle kind or side"),
        Line::from("  Enter        Add option, mark correct, save"),
        Line::from("  Ctrl+S       Save question"),
        Line::from(""),
        Line::from("Question list:"),
        Line::from("  j / k        Move down / up"),
        Line::from("  r            Show or hide answers"),
        Line::from("  d            Delete question"),
        Line::from("  p            Play"),
        Line::from(""),
        Line::from("Game:"),
        Line::from("  1-9          Answer"),
        Line::from("  Enter        Answer highlighted / next question"),
        Line::from(""),
        Line::from("  Esc          Back to menu"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl+C   Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
