//! Player dashboard: Mean / Median / Mode bars per metric above a shared box plot.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use courtside_core::domain::{fmt_num, Metric};
use courtside_core::PlayerDashboard;

use crate::app::AppState;
use crate::theme::{self, Theme};
use crate::ui::box_plot::BoxPlot;
use crate::ui::{message, placeholder};

/// Bars are integer-height; two decimals survive the scaling.
fn scaled(v: f64) -> u64 {
    (v.max(0.0) * 100.0).round() as u64
}

/// Labelled value bars in a bordered chart, each bar printing its real value.
pub fn value_chart(title: String, bars: &[(&str, f64)]) -> BarChart<'static> {
    let max = bars.iter().map(|&(_, v)| v).fold(0.0, f64::max);
    let data: Vec<Bar<'static>> = bars
        .iter()
        .map(|&(label, v)| {
            Bar::default()
                .label(Line::from(label.to_string()))
                .value(scaled(v))
                .text_value(fmt_num(v))
        })
        .collect();

    BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border(false))
                .title(title)
                .title_style(theme::panel_title(false)),
        )
        .data(BarGroup::default().bars(&data))
        .bar_width(8)
        .bar_gap(2)
        .bar_style(theme::accent())
        .value_style(theme::selected())
        .label_style(theme::text())
        .max(scaled(max).max(1))
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.dashboard;
    if let Some(p) = placeholder(&view.data) {
        f.render_widget(p, area);
        return;
    }
    let Some(dashboard) = view.data.ready() else {
        return;
    };
    if !dashboard.has_games() {
        f.render_widget(message("No games found for this season."), area);
        return;
    }
    render_dashboard(f, area, dashboard);
}

fn render_dashboard(f: &mut Frame, area: Rect, dashboard: &PlayerDashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(11),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            format!(" {} games summarized", dashboard.summaries.games),
            theme::accent_bold(),
        ),
        Span::styled(format!("  ·  season {}", dashboard.season), theme::muted()),
    ]);
    f.render_widget(Paragraph::new(header), rows[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    for (metric, slot) in Metric::ALL.iter().zip(charts.iter()) {
        let summary = dashboard.summaries.get(*metric);
        let bars: Vec<(&str, f64)> = summary
            .comparison_bars()
            .iter()
            .map(|b| (b.label, b.value))
            .collect();
        let title = format!(
            " {} · mode seen {}x ",
            metric.label(),
            summary.mode.frequency
        );
        f.render_widget(value_chart(title, &bars), *slot);
    }

    let box_rows = dashboard.summaries.box_plot_rows();
    let palette = Theme::default();
    f.render_widget(BoxPlot::new(&box_rows, &palette), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Loadable;
    use crate::test_helpers::{game, render_to_string, test_app};
    use courtside_core::Season;

    #[test]
    fn scaling_keeps_two_decimals_and_floors_negatives() {
        assert_eq!(scaled(21.6), 2160);
        assert_eq!(scaled(-3.0), 0);
    }

    #[test]
    fn charts_and_box_plot_render() {
        let (mut app, _rx) = test_app();
        let games = vec![game(30.0, 10.0, 5.0), game(20.0, 8.0, 7.0), game(25.0, 8.0, 6.0)];
        app.dashboard.data = Loadable::Ready(PlayerDashboard::from_games(
            1_628_983,
            Season::current(),
            None,
            games,
        ));
        let screen = render_to_string(120, 32, |f| render(f, f.area(), &app));
        assert!(screen.contains("3 games summarized"));
        assert!(screen.contains("Rebounds · mode seen 2x"));
        assert!(screen.contains("Median"));
        assert!(screen.contains("Distribution by Metric"));
    }

    #[test]
    fn no_games_message() {
        let (mut app, _rx) = test_app();
        app.dashboard.data = Loadable::Ready(PlayerDashboard::from_games(
            7,
            Season::current(),
            None,
            Vec::new(),
        ));
        let screen = render_to_string(80, 6, |f| render(f, f.area(), &app));
        assert!(screen.contains("No games found for this season."));
    }
}
