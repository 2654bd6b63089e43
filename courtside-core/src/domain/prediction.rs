//! Model requests and results for the backend's projection endpoints.
//!
//! Requests serialize to the backend's field names; the client wraps each
//! one with the player's `team_id`. Results decode leniently: every number
//! is optional and arrays tolerate `null` entries.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::metric::Metric;
use super::player::fmt_num;
use super::wire;

/// Which projection model to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Gumbel,
    Linear,
    Logistic,
    Gamlss,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Gumbel,
        ModelKind::Linear,
        ModelKind::Logistic,
        ModelKind::Gamlss,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Gumbel => "Gumbel Probability",
            ModelKind::Linear => "Linear Regression",
            ModelKind::Logistic => "Logistic Regression",
            ModelKind::Gamlss => "GAMLSS Prediction",
        }
    }

    pub fn path_prefix(self) -> &'static str {
        match self {
            ModelKind::Gumbel => "/gumbel/probability",
            ModelKind::Linear => "/linear-regression",
            ModelKind::Logistic => "/logistic-regression",
            ModelKind::Gamlss => "/gamlss/prediction",
        }
    }

    pub fn next(self) -> ModelKind {
        match self {
            ModelKind::Gumbel => ModelKind::Linear,
            ModelKind::Linear => ModelKind::Logistic,
            ModelKind::Logistic => ModelKind::Gamlss,
            ModelKind::Gamlss => ModelKind::Gumbel,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gumbel" => Ok(ModelKind::Gumbel),
            "linear" => Ok(ModelKind::Linear),
            "logistic" => Ok(ModelKind::Logistic),
            "gamlss" => Ok(ModelKind::Gamlss),
            other => Err(format!(
                "unknown model '{other}' (expected gumbel, linear, logistic or gamlss)"
            )),
        }
    }
}

/// Distribution family for the GAMLSS endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamlssModel {
    #[default]
    Poisson,
    Linear,
}

impl GamlssModel {
    pub fn toggle(self) -> Self {
        match self {
            GamlssModel::Poisson => GamlssModel::Linear,
            GamlssModel::Linear => GamlssModel::Poisson,
        }
    }
}

impl fmt::Display for GamlssModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GamlssModel::Poisson => "Poisson",
            GamlssModel::Linear => "Linear",
        })
    }
}

impl FromStr for GamlssModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poisson" => Ok(GamlssModel::Poisson),
            "linear" => Ok(GamlssModel::Linear),
            other => Err(format!("unknown GAMLSS model '{other}' (expected poisson or linear)")),
        }
    }
}

/// Probability that `metric` lands above/below `x` under a Gumbel fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GumbelRequest {
    #[serde(rename = "variavel")]
    pub metric: Metric,
    pub x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearRegressionRequest {
    #[serde(rename = "variavel_dependente")]
    pub metric: Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogisticRegressionRequest {
    #[serde(rename = "variavel_dependente")]
    pub metric: Metric,
    #[serde(rename = "limite")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GamlssRequest {
    #[serde(rename = "variavel_dependente")]
    pub metric: Metric,
    #[serde(rename = "modelo")]
    pub model: GamlssModel,
}

/// Request body sent to every model endpoint: the team plus the model's own
/// fields, flattened.
#[derive(Debug, Serialize)]
pub struct ModelBody<'a, T: Serialize> {
    pub team_id: u64,
    #[serde(flatten)]
    pub params: &'a T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GumbelResult {
    #[serde(rename = "prob_acima", default, deserialize_with = "wire::opt_f64")]
    pub prob_above: Option<f64>,
    #[serde(rename = "prob_abaixo", default, deserialize_with = "wire::opt_f64")]
    pub prob_below: Option<f64>,
    /// Percentage of observed games at or below `x`.
    #[serde(rename = "prop_menores", default, deserialize_with = "wire::opt_f64")]
    pub share_at_or_below: Option<f64>,
    #[serde(rename = "valores_menores", default, deserialize_with = "wire::f64_vec")]
    pub values_at_or_below: Vec<f64>,
    #[serde(rename = "proporcao_menores", default, deserialize_with = "wire::opt_f64")]
    pub proportion_below: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearProbabilities {
    #[serde(rename = "acima_media", default, deserialize_with = "wire::opt_f64")]
    pub above_mean: Option<f64>,
    #[serde(rename = "acima_mediana", default, deserialize_with = "wire::opt_f64")]
    pub above_median: Option<f64>,
    #[serde(rename = "acima_minimo", default, deserialize_with = "wire::opt_f64")]
    pub above_min: Option<f64>,
    #[serde(rename = "acima_maximo", default, deserialize_with = "wire::opt_f64")]
    pub above_max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    #[serde(default, deserialize_with = "wire::f64_vec")]
    pub fpr: Vec<f64>,
    #[serde(default, deserialize_with = "wire::f64_vec")]
    pub tpr: Vec<f64>,
}

impl RocCurve {
    /// `(fpr, tpr)` pairs, truncated to the shorter axis.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.fpr.iter().copied().zip(self.tpr.iter().copied()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionResult {
    #[serde(rename = "min_previsto", default, deserialize_with = "wire::opt_f64")]
    pub predicted_min: Option<f64>,
    #[serde(rename = "mediana_prevista", default, deserialize_with = "wire::opt_f64")]
    pub predicted_median: Option<f64>,
    #[serde(rename = "media_prevista", default, deserialize_with = "wire::opt_f64")]
    pub predicted_mean: Option<f64>,
    #[serde(rename = "max_previsto", default, deserialize_with = "wire::opt_f64")]
    pub predicted_max: Option<f64>,
    #[serde(rename = "distribuicao_previsoes", default, deserialize_with = "prediction_series")]
    pub predictions: Vec<f64>,
    #[serde(rename = "probabilidades", default)]
    pub probabilities: Option<LinearProbabilities>,
    #[serde(rename = "matriz_confusao", default)]
    pub confusion_matrix: Option<ConfusionMatrix>,
    #[serde(rename = "curva_roc", default)]
    pub roc_curve: Option<RocCurve>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionResult {
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub prob_min: Option<f64>,
    #[serde(rename = "prob_media", default, deserialize_with = "wire::opt_f64")]
    pub prob_mean: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_f64")]
    pub prob_max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamlssResult {
    #[serde(rename = "modelo", default, deserialize_with = "wire::opt_string")]
    pub model: Option<String>,
    #[serde(rename = "min_previsto", default, deserialize_with = "wire::opt_f64")]
    pub predicted_min: Option<f64>,
    #[serde(rename = "media_prevista", default, deserialize_with = "wire::opt_f64")]
    pub predicted_mean: Option<f64>,
    #[serde(rename = "max_previsto", default, deserialize_with = "wire::opt_f64")]
    pub predicted_max: Option<f64>,
    /// Backend key → probability, in key order.
    #[serde(rename = "probabilidades", default)]
    pub probabilities: BTreeMap<String, f64>,
    #[serde(rename = "distribuicao_previsoes", default, deserialize_with = "prediction_series")]
    pub predictions: Vec<f64>,
    #[serde(rename = "matriz_confusao", default)]
    pub confusion_matrix: Option<ConfusionMatrix>,
}

/// 2×2 confusion matrix `[[tp, fn], [fp, tn]]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ConfusionMatrix {
    pub true_positive: f64,
    pub false_negative: f64,
    pub false_positive: f64,
    pub true_negative: f64,
}

impl From<Vec<Vec<f64>>> for ConfusionMatrix {
    fn from(m: Vec<Vec<f64>>) -> Self {
        let cell = |r: usize, c: usize| m.get(r).and_then(|row| row.get(c)).copied().unwrap_or(0.0);
        Self {
            true_positive: cell(0, 0),
            false_negative: cell(0, 1),
            false_positive: cell(1, 0),
            true_negative: cell(1, 1),
        }
    }
}

impl From<ConfusionMatrix> for Vec<Vec<f64>> {
    fn from(m: ConfusionMatrix) -> Self {
        vec![
            vec![m.true_positive, m.false_negative],
            vec![m.false_positive, m.true_negative],
        ]
    }
}

/// Any model's decoded result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum Prediction {
    Gumbel(GumbelResult),
    Linear(LinearRegressionResult),
    Logistic(LogisticRegressionResult),
    Gamlss(GamlssResult),
}

impl Prediction {
    pub fn kind(&self) -> ModelKind {
        match self {
            Prediction::Gumbel(_) => ModelKind::Gumbel,
            Prediction::Linear(_) => ModelKind::Linear,
            Prediction::Logistic(_) => ModelKind::Logistic,
            Prediction::Gamlss(_) => ModelKind::Gamlss,
        }
    }

    /// Headline `(label, value)` rows; missing numbers render as `N/A`.
    pub fn summary_rows(&self) -> Vec<(String, String)> {
        let num = |v: Option<f64>| v.map(fmt_num).unwrap_or_else(|| "N/A".to_string());
        let pct = |v: Option<f64>| {
            v.map(|p| format!("{}%", fmt_num(p)))
                .unwrap_or_else(|| "N/A".to_string())
        };
        let row = |label: &str, value: String| (label.to_string(), value);

        match self {
            Prediction::Gumbel(r) => vec![
                row("Probability above x", num(r.prob_above)),
                row("Probability below x", num(r.prob_below)),
                row("Games at or below x", pct(r.share_at_or_below)),
                row("Proportion below x", pct(r.proportion_below)),
            ],
            Prediction::Linear(r) => {
                let mut rows = vec![
                    row("Predicted min", num(r.predicted_min)),
                    row("Predicted median", num(r.predicted_median)),
                    row("Predicted mean", num(r.predicted_mean)),
                    row("Predicted max", num(r.predicted_max)),
                ];
                if let Some(p) = &r.probabilities {
                    rows.push(row("P(above mean)", num(p.above_mean)));
                    rows.push(row("P(above median)", num(p.above_median)));
                    rows.push(row("P(above min)", num(p.above_min)));
                    rows.push(row("P(above max)", num(p.above_max)));
                }
                rows
            }
            Prediction::Logistic(r) => vec![
                row("Min probability", num(r.prob_min)),
                row("Mean probability", num(r.prob_mean)),
                row("Max probability", num(r.prob_max)),
            ],
            Prediction::Gamlss(r) => {
                let mut rows = vec![
                    row(
                        "Model",
                        r.model
                            .as_deref()
                            .map(str::to_uppercase)
                            .unwrap_or_else(|| "N/A".to_string()),
                    ),
                    row("Predicted min", num(r.predicted_min)),
                    row("Predicted mean", num(r.predicted_mean)),
                    row("Predicted max", num(r.predicted_max)),
                ];
                for (key, p) in &r.probabilities {
                    rows.push((key.replace('_', " ").to_uppercase(), fmt_num(*p)));
                }
                rows
            }
        }
    }

    /// Predicted-value bars for the comparison chart.
    pub fn predicted_bars(&self) -> Vec<(&'static str, f64)> {
        let bars: Vec<(&'static str, Option<f64>)> = match self {
            Prediction::Gumbel(r) => vec![("Above", r.prob_above), ("Below", r.prob_below)],
            Prediction::Linear(r) => vec![
                ("Min", r.predicted_min),
                ("Median", r.predicted_median),
                ("Mean", r.predicted_mean),
                ("Max", r.predicted_max),
            ],
            Prediction::Logistic(r) => vec![
                ("Min", r.prob_min),
                ("Mean", r.prob_mean),
                ("Max", r.prob_max),
            ],
            Prediction::Gamlss(r) => vec![
                ("Min", r.predicted_min),
                ("Mean", r.predicted_mean),
                ("Max", r.predicted_max),
            ],
        };
        bars.into_iter()
            .map(|(label, v)| (label, v.unwrap_or(0.0)))
            .collect()
    }

    /// The per-game series the model returned, if any.
    pub fn series(&self) -> &[f64] {
        match self {
            Prediction::Gumbel(r) => &r.values_at_or_below,
            Prediction::Linear(r) => &r.predictions,
            Prediction::Logistic(_) => &[],
            Prediction::Gamlss(r) => &r.predictions,
        }
    }
}

/// Prediction series arrive either flat (`[1.2, 3.4]`) or as one-element
/// rows (`[[1.2], [3.4]]`); both flatten to the leading number per entry.
fn prediction_series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .iter()
        .map(|item| match item {
            Value::Array(inner) => inner.first().and_then(Value::as_f64).unwrap_or(0.0),
            other => other.as_f64().unwrap_or(0.0),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gumbel_body_flattens_team_id() {
        let params = GumbelRequest {
            metric: Metric::Points,
            x: 25.0,
        };
        let body = serde_json::to_value(ModelBody {
            team_id: 1_610_612_752,
            params: &params,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"team_id": 1610612752u64, "variavel": "points", "x": 25.0})
        );
    }

    #[test]
    fn gamlss_and_logistic_bodies_use_backend_names() {
        let body = serde_json::to_value(ModelBody {
            team_id: 7,
            params: &GamlssRequest {
                metric: Metric::Assists,
                model: GamlssModel::Poisson,
            },
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"team_id": 7, "variavel_dependente": "assists", "modelo": "poisson"})
        );

        let body = serde_json::to_value(ModelBody {
            team_id: 7,
            params: &LogisticRegressionRequest {
                metric: Metric::Rebounds,
                threshold: 10.0,
            },
        })
        .unwrap();
        assert_eq!(body["limite"], json!(10.0));
        assert_eq!(body["variavel_dependente"], json!("rebounds"));
    }

    #[test]
    fn linear_result_decodes_matrix_and_roc() {
        let r: LinearRegressionResult = serde_json::from_value(json!({
            "min_previsto": 12.0,
            "mediana_prevista": 24.5,
            "distribuicao_previsoes": [20.1, null, 22.3],
            "probabilidades": {"acima_media": 0.48},
            "matriz_confusao": [[30, 5], [4, 28]],
            "curva_roc": {"fpr": [0.0, 0.1, 1.0], "tpr": [0.0, 0.8]}
        }))
        .unwrap();
        assert_eq!(r.predictions, vec![20.1, 0.0, 22.3]);
        let m = r.confusion_matrix.unwrap();
        assert_eq!(m.true_positive, 30.0);
        assert_eq!(m.false_positive, 4.0);
        assert_eq!(r.roc_curve.as_ref().unwrap().points(), vec![(0.0, 0.0), (0.1, 0.8)]);

        let rows = Prediction::Linear(r).summary_rows();
        assert_eq!(rows[2].1, "N/A");
        assert_eq!(rows[4], ("P(above mean)".to_string(), "0.48".to_string()));
    }

    #[test]
    fn gamlss_series_accepts_nested_rows() {
        let r: GamlssResult = serde_json::from_value(json!({
            "modelo": "poisson",
            "media_prevista": 18.2,
            "probabilidades": {"acima_20": 0.41, "acima_10": 0.93},
            "distribuicao_previsoes": [[17.0], [19.5]]
        }))
        .unwrap();
        assert_eq!(r.predictions, vec![17.0, 19.5]);

        let prediction = Prediction::Gamlss(r);
        let rows = prediction.summary_rows();
        assert_eq!(rows[0].1, "POISSON");
        assert_eq!(rows[4].0, "ACIMA 10");
        assert_eq!(prediction.predicted_bars()[0], ("Min", 0.0));
        assert_eq!(prediction.series(), &[17.0, 19.5]);
    }

    #[test]
    fn empty_results_decode() {
        let r: LogisticRegressionResult = serde_json::from_value(json!({})).unwrap();
        assert!(r.prob_min.is_none());
        let r: GumbelResult = serde_json::from_value(json!({"valores_menores": null})).unwrap();
        assert!(r.values_at_or_below.is_empty());
    }

    #[test]
    fn model_kind_cycles_and_parses() {
        assert_eq!(ModelKind::Gamlss.next(), ModelKind::Gumbel);
        assert_eq!("Logistic".parse::<ModelKind>(), Ok(ModelKind::Logistic));
        assert_eq!("linear".parse::<GamlssModel>(), Ok(GamlssModel::Linear));
        assert_eq!(GamlssModel::Poisson.toggle(), GamlssModel::Linear);
    }
}
