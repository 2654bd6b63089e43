//! Display tables built from loosely shaped backend objects.

use serde::Serialize;
use serde_json::{Map, Value};

use super::wire::display_value;

/// Ordered `statistic → value` pairs, ready for a two-column table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatTable {
    pub rows: Vec<(String, String)>,
}

impl StatTable {
    /// Build from a JSON object, keeping the backend's key order.
    ///
    /// Underscores in keys become spaces. Non-object values yield an empty
    /// table.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let rows = map
            .iter()
            .map(|(k, v)| (humanize_key(k), display_value(v)))
            .collect();
        Self { rows }
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push((label.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Generic rows-and-columns table.
///
/// Columns come from the first row's keys; later rows missing a column show
/// `N/A` in that cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from a slice of JSON objects. Non-object entries are skipped.
    pub fn from_objects(items: &[Value]) -> Self {
        let columns: Vec<String> = items
            .iter()
            .find_map(Value::as_object)
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();

        let rows = items
            .iter()
            .filter_map(Value::as_object)
            .map(|obj| {
                columns
                    .iter()
                    .map(|c| obj.get(c).map(display_value).unwrap_or_else(|| "N/A".into()))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// `field_goal_pct` → `field goal pct`.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stat_table_keeps_key_order_and_humanizes() {
        let table = StatTable::from_value(&json!({
            "pontos_por_jogo": 27.3,
            "jogos": 70,
            "equipe": "NYK",
        }));
        assert_eq!(
            table.rows,
            vec![
                ("pontos por jogo".to_string(), "27.30".to_string()),
                ("jogos".to_string(), "70".to_string()),
                ("equipe".to_string(), "NYK".to_string()),
            ]
        );
    }

    #[test]
    fn stat_table_from_non_object_is_empty() {
        assert!(StatTable::from_value(&json!([1, 2])).is_empty());
        assert!(StatTable::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn record_table_uses_first_row_columns() {
        let table = RecordTable::from_objects(&[
            json!({"date": "2024-11-01", "result": "W"}),
            json!({"date": "2024-11-03"}),
            json!("skipped"),
        ]);
        assert_eq!(table.columns, vec!["date", "result"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["2024-11-03", "N/A"]);
    }
}
