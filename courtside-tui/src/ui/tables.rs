//! Fixed-width text tables shared by the list and report views.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme;

const MAX_COLUMN_WIDTH: usize = 28;

/// Header line plus the visible rows, keeping `cursor` on screen.
///
/// `height` counts the header. Without a cursor the window starts at `scroll`.
pub fn grid<S: AsRef<str>>(
    columns: &[S],
    rows: &[Vec<String>],
    cursor: Option<usize>,
    scroll: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let widths = column_widths(columns, rows);
    let mut lines = Vec::with_capacity(height);

    let header: Vec<Span> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| Span::styled(pad(c.as_ref(), w), theme::accent_bold()))
        .collect();
    lines.push(Line::from(header));

    let body = height.saturating_sub(1);
    let (start, end) = match cursor {
        Some(c) => window(c, rows.len(), body),
        None => {
            let start = scroll.min(rows.len());
            (start, (start + body).min(rows.len()))
        }
    };

    for (i, row) in rows.iter().enumerate().take(end).skip(start) {
        let style = if cursor == Some(i) {
            theme::selected()
        } else {
            theme::text()
        };
        lines.push(row_line(row, &widths, style));
    }
    lines
}

/// Two-column `label  value` lines for key/value tables.
pub fn key_values(rows: &[(String, String)]) -> Vec<Line<'static>> {
    let width = rows
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_COLUMN_WIDTH);
    rows.iter()
        .map(|(k, v)| {
            Line::from(vec![
                Span::styled(format!("  {}  ", pad(k, width)), theme::muted()),
                Span::styled(v.clone(), theme::accent()),
            ])
        })
        .collect()
}

fn row_line(row: &[String], widths: &[usize], style: Style) -> Line<'static> {
    let spans: Vec<Span> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            Span::styled(pad(cell, w), style)
        })
        .collect();
    Line::from(spans)
}

fn column_widths<S: AsRef<str>>(columns: &[S], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(c.as_ref().chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Visible `[start, end)` range of `len` rows that keeps `cursor` in view.
pub fn window(cursor: usize, len: usize, height: usize) -> (usize, usize) {
    if height == 0 || len == 0 {
        return (0, 0);
    }
    let start = if cursor >= height { cursor + 1 - height } else { 0 };
    (start, (start + height).min(len))
}

/// Left-align `s` in `width` columns plus a two-space gutter, truncating
/// with a trailing `.`.
fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len <= width {
        format!("{s}{}  ", " ".repeat(width - len))
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}.  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn pad_truncates_on_char_boundaries() {
        assert_eq!(pad("abc", 5), "abc    ");
        assert_eq!(pad("Açaí Bowl", 4), "Aça.  ");
    }

    #[test]
    fn window_follows_cursor() {
        assert_eq!(window(0, 100, 10), (0, 10));
        assert_eq!(window(9, 100, 10), (0, 10));
        assert_eq!(window(10, 100, 10), (1, 11));
        assert_eq!(window(99, 100, 10), (90, 100));
        assert_eq!(window(3, 0, 10), (0, 0));
    }

    #[test]
    fn grid_sizes_columns_to_content() {
        let rows = vec![
            vec!["1".to_string(), "Boston Celtics".to_string()],
            vec!["2".to_string(), "Knicks".to_string()],
        ];
        let lines = grid(&["Rank", "Team"], &rows, Some(1), 0, 10);
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "Rank  Team            ");
        assert_eq!(text(&lines[2]), "2     Knicks          ");
        assert_eq!(lines[2].spans[0].style, theme::selected());
    }

    #[test]
    fn grid_scrolls_without_cursor() {
        let rows: Vec<Vec<String>> = (0..20).map(|i| vec![i.to_string()]).collect();
        let lines = grid(&["n"], &rows, None, 15, 4);
        assert_eq!(lines.len(), 4);
        assert_eq!(text(&lines[1]).trim(), "15");
    }

    proptest::proptest! {
        #[test]
        fn window_always_shows_cursor(len in 1usize..500, height in 1usize..60, seed in 0usize..500) {
            let cursor = seed % len;
            let (start, end) = window(cursor, len, height);
            proptest::prop_assert!(start <= cursor && cursor < end);
            proptest::prop_assert!(end <= len);
            proptest::prop_assert!(end - start <= height);
        }
    }
}
