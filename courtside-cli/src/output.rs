//! Rendering command results as aligned text, JSON or CSV.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Csv,
}

/// Header plus rows of display strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tabular {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Tabular {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            title: None,
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Two-column `Stat / Value` table.
    pub fn pairs<K: AsRef<str>>(rows: &[(K, String)]) -> Self {
        let mut t = Self::new(&["Stat", "Value"]);
        for (k, v) in rows {
            t.push(vec![k.as_ref().to_string(), v.clone()]);
        }
        t
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header.
pub fn render_table(t: &Tabular) -> String {
    let mut widths: Vec<usize> = t.headers.iter().map(|h| h.chars().count()).collect();
    for row in &t.rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    if let Some(title) = &t.title {
        out.push_str(&format!("=== {title} ===\n"));
    }
    out.push_str(&line(&t.headers));
    out.push('\n');
    let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');
    for row in &t.rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

pub fn render_csv(t: &Tabular) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&t.headers)?;
    for row in &t.rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(String::from_utf8(bytes)?)
}

/// Write `value` as JSON, or each of `tables` as text or CSV.
pub fn emit<T: Serialize>(
    out: &mut impl Write,
    format: Format,
    value: &T,
    tables: &[Tabular],
) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
        Format::Table => {
            for (i, t) in tables.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                if t.is_empty() {
                    if let Some(title) = &t.title {
                        writeln!(out, "=== {title} ===")?;
                    }
                    writeln!(out, "(no data)")?;
                } else {
                    write!(out, "{}", render_table(t))?;
                }
            }
        }
        Format::Csv => {
            for (i, t) in tables.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", render_csv(t)?)?;
            }
        }
    }
    Ok(())
}
