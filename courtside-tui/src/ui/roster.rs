//! Team roster list.

use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use courtside_core::domain::RosterEntry;

use crate::app::AppState;
use crate::ui::{message, placeholder, tables};

const COLUMNS: [&str; 4] = ["ID", "Name", "Age", "Team"];

fn row(entry: &RosterEntry) -> Vec<String> {
    vec![
        entry.id.to_string(),
        entry.name.clone(),
        entry
            .age
            .map(|a| format!("{a:.0}"))
            .unwrap_or_else(|| "N/A".to_string()),
        entry.team.clone().unwrap_or_else(|| "N/A".to_string()),
    ]
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.roster;
    if let Some(p) = placeholder(&view.data) {
        f.render_widget(p, area);
        return;
    }
    let roster = view.data.ready().map(Vec::as_slice).unwrap_or(&[]);
    if roster.is_empty() {
        f.render_widget(message("No players found for this team and season."), area);
        return;
    }

    let rows: Vec<Vec<String>> = roster.iter().map(row).collect();
    let lines = tables::grid(&COLUMNS, &rows, Some(view.cursor), 0, area.height as usize);
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Loadable;
    use crate::test_helpers::{render_to_string, test_app};

    #[test]
    fn missing_fields_render_as_na() {
        let entry = RosterEntry {
            id: 1_628_969,
            name: "Mikal Bridges".into(),
            age: None,
            team: None,
        };
        assert_eq!(row(&entry), vec!["1628969", "Mikal Bridges", "N/A", "N/A"]);
    }

    #[test]
    fn empty_roster_message() {
        let (mut app, _rx) = test_app();
        app.roster.data = Loadable::Ready(Vec::new());
        let screen = render_to_string(80, 5, |f| render(f, f.area(), &app));
        assert!(screen.contains("No players found"));
    }
}
