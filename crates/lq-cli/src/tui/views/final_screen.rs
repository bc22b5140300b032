use lq_core::{Outcome, QuestionStore};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::present;
use crate::tui::app::App;

pub fn draw<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let area = super::centered_rect(60, 60, area);

    let Some(tally) = app.session.tally() else {
        frame.render_widget(Paragraph::new("No finished game."), area);
        return;
    };

    let color = match tally.outcome() {
        Outcome::Perfect => Color::Green,
        Outcome::Partial => Color::Yellow,
        Outcome::Zero => Color::Red,
    };

    let lines = vec![
        Line::from(""),
        Line::from("Final score").style(Style::default().fg(Color::DarkGray)),
        Line::from(Span::styled(
            tally.to_string(),
            Style::default().fg(color).bold(),
        )),
        Line::from(format!("{}%", tally.percent())).style(Style::default().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(present::outcome_message(tally.outcome())),
        Line::from(""),
        Line::from(Span::styled(
            "  Back to menu  ",
            Style::default().fg(Color::Black).bg(Color::White).bold(),
        )),
    ];

    let screen = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Game over ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(screen, area);
}
