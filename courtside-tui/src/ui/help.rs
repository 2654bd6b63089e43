//! Help: every key binding, grouped by view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn lines() -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Everywhere");
    key(&mut lines, "q", "Quit");
    key(&mut lines, "?", "This help");
    key(&mut lines, "Esc / Backspace", "Back to the previous view");
    key(&mut lines, "g", "Back to the standings");
    key(&mut lines, "j / k / Up / Down", "Move or scroll");
    key(&mut lines, "PageUp / PageDown", "Move by ten");
    key(&mut lines, "s", "Next season");
    key(&mut lines, "r", "Retry failed requests");
    key(&mut lines, "e", "Error history");
    lines.push(Line::from(""));

    section(&mut lines, "Standings");
    key(&mut lines, "Enter", "Open the selected team's roster");
    key(&mut lines, "t", "Team reports");
    lines.push(Line::from(""));

    section(&mut lines, "Team Reports");
    key(&mut lines, "h / l / Tab", "Cycle the report kind");
    key(&mut lines, "Enter", "Fetch the report for the selected team");
    lines.push(Line::from(""));

    section(&mut lines, "Roster");
    key(&mut lines, "Enter", "Open the selected player");
    lines.push(Line::from(""));

    section(&mut lines, "Player");
    key(&mut lines, "Tab / Shift+Tab", "Info, Games, Probability");
    key(&mut lines, "d", "Season dashboard (Info tab: Enter too)");
    key(&mut lines, "p", "Season and career stats");
    key(&mut lines, "o / O", "Next / previous opponent (Games tab)");
    key(&mut lines, "f / Enter", "Apply the opponent filter (Games tab)");
    key(&mut lines, "m", "Cycle the model (Probability tab)");
    key(&mut lines, "v", "Cycle the metric (Probability tab)");
    key(&mut lines, "n", "Toggle the GAMLSS family (Probability tab)");
    key(&mut lines, "0-9 . -", "Edit x or the limit (Probability tab)");
    key(&mut lines, "Enter", "Run the model (Probability tab)");
    lines.push(Line::from(""));

    section(&mut lines, "Dashboard");
    key(&mut lines, "", "Mean, median and mode per metric, then a box plot");
    key(&mut lines, "", "Dots on the box plot are outliers beyond 1.5 IQR");

    lines
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let para = Paragraph::new(lines()).scroll((app.help_scroll as u16, 0));
    f.render_widget(para, area);
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'static>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{render_to_string, test_app};

    #[test]
    fn scroll_moves_the_text() {
        let (mut app, _rx) = test_app();
        let top = render_to_string(80, 4, |f| render(f, f.area(), &app));
        assert!(top.contains("Everywhere"));

        app.help_scroll = 1;
        let scrolled = render_to_string(80, 4, |f| render(f, f.area(), &app));
        assert!(!scrolled.contains("Everywhere"));
        assert!(scrolled.contains("Quit"));
    }
}
