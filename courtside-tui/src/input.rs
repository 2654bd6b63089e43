//! Keyboard input dispatch: overlays, then form input, then global keys, then route keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay, PlayerTab, Route};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. The model form's numeric field.
    if matches!(app.route(), Route::Player { .. })
        && app.player.tab == PlayerTab::Probability
        && app.player.form.value_label().is_some()
        && handle_form_input(app, key)
    {
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.navigate(Route::Help);
            return;
        }
        KeyCode::Char('g') => {
            app.home();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.back();
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_cursor(1);
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_cursor(-1);
            return;
        }
        KeyCode::PageDown => {
            app.move_cursor(10);
            return;
        }
        KeyCode::PageUp => {
            app.move_cursor(-10);
            return;
        }
        KeyCode::Enter => {
            app.select();
            return;
        }
        KeyCode::Char('s') => {
            app.next_season();
            return;
        }
        _ => {}
    }

    // 4. Route-specific keys.
    match app.route().clone() {
        Route::Standings => {
            if key.code == KeyCode::Char('t') {
                app.navigate(Route::TeamFilter);
            }
        }
        Route::TeamFilter => match key.code {
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.cycle_report_kind(true),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.cycle_report_kind(false),
            _ => {}
        },
        Route::Player { .. } => handle_player_key(app, key),
        Route::Roster { .. }
        | Route::PlayerStats { .. }
        | Route::Dashboard { .. }
        | Route::Help => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

/// Returns true when the key edited the field.
fn handle_form_input(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
            app.player.form.push_char(c);
            true
        }
        // Backspace edits while there is text, and navigates back otherwise.
        KeyCode::Backspace => app.player.form.pop_char(),
        _ => false,
    }
}

fn handle_player_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
            app.next_tab(true);
            return;
        }
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
            app.next_tab(false);
            return;
        }
        KeyCode::Char('d') => {
            app.open_dashboard();
            return;
        }
        KeyCode::Char('p') => {
            app.open_player_stats();
            return;
        }
        _ => {}
    }

    match app.player.tab {
        PlayerTab::Info => {}
        PlayerTab::Games => match key.code {
            KeyCode::Char('o') | KeyCode::Char(']') => app.cycle_opponent(true),
            KeyCode::Char('O') | KeyCode::Char('[') => app.cycle_opponent(false),
            KeyCode::Char('f') => app.apply_opponent_filter(),
            _ => {}
        },
        PlayerTab::Probability => match key.code {
            KeyCode::Char('m') => app.cycle_model(),
            KeyCode::Char('v') => app.cycle_metric(),
            KeyCode::Char('n') => app.toggle_gamlss_model(),
            _ => {}
        },
    }
}
