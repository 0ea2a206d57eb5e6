//! Weighted complexity scoring.
//!
//! ```text
//! score = dims * w.dimensions + meas * w.measures + filters * w.filters + calcs * w.calculations
//!       + (w.table_calc_bonus if sheet-local table calc)
//!       + (w.lod_bonus if LOD anywhere in the workbook)
//!       + params * w.parameters
//!       + mean(mark bonus of each mark type)
//! ```
//!
//! The table-calc bonus uses the sheet-local flag while the LOD bonus and parameter term use
//! workbook-wide values. Both behaviors are deliberate and covered by tests.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Weight tables used by the scorer.
///
/// Deserializing a partial table keeps the defaults for every key it omits, including
/// individual `mark_bonus` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_dimensions")]
    pub dimensions: f64,
    #[serde(default = "default_measures")]
    pub measures: f64,
    #[serde(default = "default_filters")]
    pub filters: f64,
    #[serde(default = "default_calculations")]
    pub calculations: f64,
    /// Flat bonus, not per occurrence.
    #[serde(default = "default_bonus")]
    pub table_calc_bonus: f64,
    /// Flat bonus, not per occurrence.
    #[serde(default = "default_bonus")]
    pub lod_bonus: f64,
    #[serde(default = "default_parameters")]
    pub parameters: f64,
    #[serde(default = "default_mark_bonus", deserialize_with = "merge_mark_bonus")]
    pub mark_bonus: BTreeMap<String, f64>,
    /// Bonus for mark types missing from `mark_bonus`.
    #[serde(default = "default_unlisted_mark_bonus")]
    pub default_mark_bonus: f64,
}

fn default_dimensions() -> f64 {
    0.5
}
fn default_measures() -> f64 {
    0.7
}
fn default_filters() -> f64 {
    0.6
}
fn default_calculations() -> f64 {
    1.2
}
fn default_bonus() -> f64 {
    2.0
}
fn default_parameters() -> f64 {
    0.8
}
fn default_unlisted_mark_bonus() -> f64 {
    0.6
}

fn default_mark_bonus() -> BTreeMap<String, f64> {
    [
        ("text", 0.2),
        ("bar", 0.5),
        ("line", 0.7),
        ("area", 0.7),
        ("shape", 0.8),
        ("map", 1.0),
        ("gantt", 1.0),
        ("scatter", 1.2),
        ("histogram", 0.6),
        ("box-and-whisker", 1.3),
        ("heatmap", 1.0),
        ("density", 1.2),
        ("unknown", 0.4),
    ]
    .into_iter()
    .map(|(tag, bonus)| (tag.to_string(), bonus))
    .collect()
}

fn merge_mark_bonus<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut table = default_mark_bonus();
    table.extend(overrides);
    Ok(table)
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            measures: default_measures(),
            filters: default_filters(),
            calculations: default_calculations(),
            table_calc_bonus: default_bonus(),
            lod_bonus: default_bonus(),
            parameters: default_parameters(),
            mark_bonus: default_mark_bonus(),
            default_mark_bonus: default_unlisted_mark_bonus(),
        }
    }
}

impl ScoringWeights {
    pub fn mark_bonus_for(&self, mark_type: &str) -> f64 {
        self.mark_bonus.get(mark_type).copied().unwrap_or(self.default_mark_bonus)
    }

    /// Mean bonus over `mark_types`, 0.0 when empty.
    pub fn mean_mark_bonus<S: AsRef<str>>(&self, mark_types: &[S]) -> f64 {
        if mark_types.is_empty() {
            return 0.0;
        }
        let total: f64 = mark_types.iter().map(|m| self.mark_bonus_for(m.as_ref())).sum();
        total / mark_types.len() as f64
    }
}

/// Everything the scorer looks at for one sheet.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub dimension_count: usize,
    pub measure_count: usize,
    pub filter_count: usize,
    pub calculated_field_count: usize,
    /// Sheet-local table-calc flag.
    pub has_table_calc: bool,
    /// Workbook-wide LOD flag.
    pub has_lod: bool,
    /// Workbook-wide parameter count.
    pub parameter_count: usize,
    pub mark_types: &'a [String],
}

/// Round to `decimals` places from the exact binary value.
///
/// `0.825` is stored as `0.82499999...` and rounds to `0.82`. Exact ties round to even.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Compute the complexity score, rounded to 2 decimals.
pub fn score(inputs: &ScoreInputs<'_>, weights: &ScoringWeights) -> f64 {
    let table_calc_bonus = if inputs.has_table_calc { weights.table_calc_bonus } else { 0.0 };
    let lod_bonus = if inputs.has_lod { weights.lod_bonus } else { 0.0 };

    let mut total = inputs.dimension_count as f64 * weights.dimensions
        + inputs.measure_count as f64 * weights.measures
        + inputs.filter_count as f64 * weights.filters
        + inputs.calculated_field_count as f64 * weights.calculations
        + table_calc_bonus
        + lod_bonus
        + inputs.parameter_count as f64 * weights.parameters;

    total += weights.mean_mark_bonus(inputs.mark_types);

    round_to(total, 2)
}
