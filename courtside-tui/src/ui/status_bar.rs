//! Bottom status bar: route hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, PlayerTab, Route, StatusLevel};
use crate::theme;

fn hints(app: &AppState) -> &'static str {
    match app.route() {
        Route::Standings => " j/k:move Enter:roster t:teams s:season ?:help q:quit",
        Route::TeamFilter => " j/k:team h/l:report s:season Enter:fetch Esc:back",
        Route::Roster { .. } => " j/k:move Enter:player s:season Esc:back",
        Route::Player { .. } => match app.player.tab {
            PlayerTab::Info => " Tab:tabs d:dashboard p:stats Esc:back",
            PlayerTab::Games => " Tab:tabs o/O:opponent f:filter s:season Esc:back",
            PlayerTab::Probability => " Tab:tabs m:model v:metric n:family Enter:run",
        },
        Route::PlayerStats { .. } => " s:season r:retry Esc:back",
        Route::Dashboard { .. } => " s:season r:retry Esc:back",
        Route::Help => " j/k:scroll Esc:back",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(hints(app), theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
