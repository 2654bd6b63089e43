//! Box plot widget - one horizontal box-and-whisker per metric
//!
//! Renders, on a shared value axis:
//! - Whiskers from min to max
//! - Box from Q1 to Q3 with a median marker
//! - Outliers (beyond the 1.5×IQR fences) as dots
//! - A value line under each box

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use courtside_core::domain::fmt_num;
use courtside_core::stats::BoxPlotRow;

use crate::theme::Theme;

const LABEL_WIDTH: u16 = 10;

pub struct BoxPlot<'a> {
    rows: &'a [BoxPlotRow],
    theme: &'a Theme,
}

impl<'a> BoxPlot<'a> {
    pub fn new(rows: &'a [BoxPlotRow], theme: &'a Theme) -> Self {
        Self { rows, theme }
    }

    /// Shared axis bounds across every row.
    fn bounds(&self) -> (f64, f64) {
        let lo = self.rows.iter().map(|r| r.min).fold(f64::INFINITY, f64::min);
        let hi = self
            .rows
            .iter()
            .map(|r| r.max)
            .fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    }
}

impl Widget for BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Distribution by Metric ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.neutral))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() || inner.width < LABEL_WIDTH + 10 || inner.height < 2 {
            return;
        }

        let (min_val, max_val) = self.bounds();
        let range = max_val - min_val;
        if !range.is_finite() || range < 1e-12 {
            buf.set_string(
                inner.x,
                inner.y,
                format!("All values = {}", fmt_num(max_val.max(0.0))),
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let plot_left = inner.x + LABEL_WIDTH;
        let plot_width = inner.width.saturating_sub(LABEL_WIDTH);
        let val_to_x = |v: f64| -> u16 {
            let frac = ((v - min_val) / range).clamp(0.0, 1.0);
            plot_left + (frac * (plot_width.saturating_sub(1)) as f64).round() as u16
        };

        let label_style = Style::default()
            .fg(self.theme.text_primary)
            .add_modifier(Modifier::BOLD);
        let whisker_style = Style::default().fg(self.theme.muted);
        let box_style = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let median_style = Style::default()
            .fg(self.theme.warning)
            .add_modifier(Modifier::BOLD);
        let outlier_style = Style::default()
            .fg(self.theme.negative)
            .add_modifier(Modifier::BOLD);

        for (i, row) in self.rows.iter().enumerate() {
            let y = inner.y + (i as u16) * 3;
            if y >= inner.bottom() {
                break;
            }

            buf.set_string(inner.x, y, row.metric.label(), label_style);

            let x_min = val_to_x(row.min);
            let x_q1 = val_to_x(row.q1);
            let x_med = val_to_x(row.median);
            let x_q3 = val_to_x(row.q3);
            let x_max = val_to_x(row.max);

            // Whiskers
            for x in x_min..x_q1 {
                buf.set_string(x, y, "\u{2500}", whisker_style); // ─
            }
            for x in (x_q3 + 1)..=x_max {
                buf.set_string(x, y, "\u{2500}", whisker_style);
            }
            buf.set_string(x_min, y, "\u{251C}", whisker_style); // ├
            buf.set_string(x_max, y, "\u{2524}", whisker_style); // ┤

            // Box
            for x in x_q1..=x_q3 {
                buf.set_string(x, y, "\u{2550}", box_style); // ═
            }
            buf.set_string(x_q1, y, "\u{255E}", box_style); // ╞
            buf.set_string(x_q3, y, "\u{2561}", box_style); // ╡

            // Median marker (overwrite)
            buf.set_string(x_med, y, "\u{2502}", median_style); // │

            for &o in &row.outliers {
                buf.set_string(val_to_x(o), y, "\u{25CF}", outlier_style); // ●
            }

            // Value line
            let val_y = y + 1;
            if val_y < inner.bottom() {
                let mut text = format!(
                    "min {}  Q1 {}  med {}  Q3 {}  max {}",
                    fmt_num(row.min),
                    fmt_num(row.q1),
                    fmt_num(row.median),
                    fmt_num(row.q3),
                    fmt_num(row.max),
                );
                if !row.outliers.is_empty() {
                    let list: Vec<String> = row.outliers.iter().map(|&o| fmt_num(o)).collect();
                    text.push_str(&format!("  outliers {}", list.join(", ")));
                }
                let max_len = plot_width as usize;
                let text: String = text.chars().take(max_len).collect();
                buf.set_string(plot_left, val_y, text, Style::default().fg(self.theme.text_secondary));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::buffer_text;
    use courtside_core::domain::Metric;
    use courtside_core::stats::summarize;

    fn render(rows: &[BoxPlotRow]) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 70, 11);
        let mut buf = Buffer::empty(area);
        BoxPlot::new(rows, &theme).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn outliers_are_marked() {
        let rows = vec![
            summarize(&[1.0, 2.0, 2.0, 3.0, 100.0]).box_plot_row(Metric::Points),
            summarize(&[4.0, 5.0, 6.0]).box_plot_row(Metric::Rebounds),
        ];
        let screen = render(&rows);
        assert!(screen.contains("Points"));
        assert!(screen.contains("Rebounds"));
        assert!(screen.contains('\u{25CF}'));
        assert!(screen.contains("outliers 100"));
    }

    #[test]
    fn empty_rows_render_frame_only() {
        let screen = render(&[]);
        assert!(screen.contains("Distribution by Metric"));
    }

    #[test]
    fn flat_data_reports_single_value() {
        let rows = vec![summarize(&[]).box_plot_row(Metric::Assists)];
        let screen = render(&rows);
        assert!(screen.contains("All values = 0"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let rows = vec![summarize(&[1.0, 9.0]).box_plot_row(Metric::Points)];
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        BoxPlot::new(&rows, &theme).render(area, &mut buf);
    }
}
