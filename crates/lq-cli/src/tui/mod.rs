//! Full-screen terminal UI.

mod app;
mod form;
mod tips;
mod views;

use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use lq_core::{JsonFileStore, QuestionRepository, QuestionStore};
use ratatui::prelude::*;

use crate::config::AppConfig;
use app::{App, Screen};
use form::Field;
use tips::TipRotator;

pub fn run(config: &AppConfig) -> Result<(), String> {
    let repository = QuestionRepository::restore(JsonFileStore::new(&config.store));
    let tips = TipRotator::from_seed(config.seed, config.tip_interval());
    let mut app = App::new(repository, tips, config.plot);

    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_loop<S: QuestionStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        // Wake up for the next tip even without input.
        let timeout = app.tips.until_next(Instant::now());
        if event::poll(timeout).map_err(|e| format!("event error: {e}"))?
            && let Event::Key(key) = event::read().map_err(|e| format!("event error: {e}"))?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
        app.tips.tick(Instant::now());
    }
}

fn handle_key<S: QuestionStore>(app: &mut App<S>, key: KeyEvent) {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Messages stay up until the next key.
    app.status = None;

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return;
    }

    if !app.is_typing() {
        match key.code {
            KeyCode::Char('q') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                app.toggle_help();
                return;
            }
            _ => {}
        }
    }

    match app.screen {
        Screen::Menu => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char(' ')) {
                app.open_editor();
            }
        }
        Screen::Editor => handle_editor_key(app, key),
        Screen::Game => match key.code {
            KeyCode::Esc => app.back_to_menu(),
            KeyCode::Char(c @ '1'..='9') => app.choose(c as usize - '1' as usize),
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => app.move_game_cursor(-1),
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => app.move_game_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if app.session.is_answered() {
                    app.next_question();
                } else {
                    app.choose_highlighted();
                }
            }
            KeyCode::Char('n') => app.next_question(),
            _ => {}
        },
        Screen::Final => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('m')) {
                app.back_to_menu();
            }
        }
    }
}

fn handle_editor_key<S: QuestionStore>(app: &mut App<S>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        app.save_question();
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.back_to_menu();
            return;
        }
        KeyCode::Tab => {
            app.form.focus_next();
            return;
        }
        KeyCode::BackTab => {
            app.form.focus_prev();
            return;
        }
        _ => {}
    }

    match app.focus() {
        Field::Kind => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                app.form.toggle_kind();
            }
            KeyCode::Down => app.form.focus_next(),
            KeyCode::Up => app.form.focus_prev(),
            _ => {}
        },
        Field::Side => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                app.form.cycle_side();
            }
            KeyCode::Down => app.form.focus_next(),
            KeyCode::Up => app.form.focus_prev(),
            _ => {}
        },
        Field::Answer if key.code == KeyCode::Enter => app.add_answer(),
        Field::Expression | Field::Point | Field::Image | Field::Prompt | Field::Answer => {
            match key.code {
                KeyCode::Enter | KeyCode::Down => app.form.focus_next(),
                KeyCode::Up => app.form.focus_prev(),
                _ => {
                    if let Some(input) = app.form.focused_input() {
                        input.handle_key(key);
                    }
                }
            }
        }
        Field::Options => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.form.option_down(),
            KeyCode::Char('k') | KeyCode::Up => app.form.option_up(),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => app.mark_correct(),
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => app.remove_option(),
            _ => {}
        },
        Field::Save => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.save_question(),
            KeyCode::Down => app.form.focus_next(),
            KeyCode::Up => app.form.focus_prev(),
            _ => {}
        },
        Field::List => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.list_down(),
            KeyCode::Char('k') | KeyCode::Up => app.list_up(),
            KeyCode::Char(' ') | KeyCode::Char('r') => app.toggle_reveal(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            KeyCode::Char('p') | KeyCode::Enter => app.start_game(),
            _ => {}
        },
    }
}
