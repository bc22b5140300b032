use lq_core::QuestionStore;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;

pub fn draw<S: QuestionStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let area = super::centered_rect(70, 80, area);

    let count = app.repository.len();
    let lines = vec![
        Line::from(""),
        Line::from("L I M I T   Q U I Z").style(Style::default().fg(Color::Cyan).bold()),
        Line::from("lim x→a f(x) = ?").style(Style::default().fg(Color::Cyan)),
        Line::from(""),
        Line::from(format!(
            "{count} question{} in the bank",
            if count == 1 { "" } else { "s" }
        ))
        .style(Style::default().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            "  ▶ Play  ",
            Style::default().fg(Color::Black).bg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from("press Enter").style(Style::default().fg(Color::DarkGray)),
    ];

    let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(menu, area);
}
