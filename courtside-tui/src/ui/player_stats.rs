//! Season and career statistics for one player.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::theme;
use crate::ui::{message, placeholder, tables};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.player_stats;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let season = panel(f, cols[0], &format!(" Season {} ", view.season));
    if let Some(p) = placeholder(&view.season_stats) {
        f.render_widget(p, season);
    } else if let Some(table) = view.season_stats.ready() {
        if table.is_empty() {
            f.render_widget(message("No season stats found."), season);
        } else {
            f.render_widget(Paragraph::new(tables::key_values(&table.rows)), season);
        }
    }

    let career = panel(f, cols[1], " Career ");
    if let Some(p) = placeholder(&view.career) {
        f.render_widget(p, career);
    } else if let Some(stats) = view.career.ready() {
        f.render_widget(Paragraph::new(tables::key_values(&stats.table().rows)), career);
    }
}

/// Draw a bordered panel and return its inner area.
fn panel(f: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(title.to_string())
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Loadable;
    use crate::test_helpers::{render_to_string, test_app};
    use courtside_core::domain::{CareerStats, StatTable};

    #[test]
    fn empty_season_and_missing_career_fields() {
        let (mut app, _rx) = test_app();
        app.player_stats.season_stats = Loadable::Ready(StatTable::default());
        app.player_stats.career = Loadable::Ready(CareerStats {
            games: Some(1021.0),
            ..CareerStats::default()
        });
        let screen = render_to_string(110, 12, |f| render(f, f.area(), &app));
        assert!(screen.contains("No season stats found."));
        assert!(screen.contains("Total Games"));
        assert!(screen.contains("1021"));
        assert!(screen.contains("N/A"));
    }

    #[test]
    fn season_rows_render() {
        let (mut app, _rx) = test_app();
        let mut table = StatTable::default();
        table.push("Points per game", "26.40");
        app.player_stats.season_stats = Loadable::Ready(table);
        let screen = render_to_string(110, 8, |f| render(f, f.area(), &app));
        assert!(screen.contains("Points per game"));
        assert!(screen.contains("26.40"));
        assert!(screen.contains("Loading"));
    }
}
