//! Expression signal scanning and workbook-wide signals.
//!
//! Calculation formulas are uppercased and matched by substring, never tokenized. Spacing
//! matters: `{FIXED` matches while `{ FIXED` does not.

use crate::extraction::xml::XmlNode;

/// Function-name fragments that identify table calculations.
pub const TABLE_CALC_MARKERS: &[&str] = &[
    "WINDOW_",
    "RUNNING_",
    "INDEX(",
    "RANK(",
    "RANK_DENSE(",
    "PERCENTILE(",
    "TOTAL(",
    "LOOKUP(",
    "FIRST(",
    "LAST(",
    "PREVIOUS_VALUE(",
    "MOVING_",
];

/// Opening fragments of level-of-detail expressions.
pub const LOD_MARKERS: &[&str] = &["{FIXED", "{INCLUDE", "{EXCLUDE"];

fn contains_any(text: &str, needles: &[&str]) -> bool {
    let upper = text.to_uppercase();
    needles.iter().any(|n| upper.contains(n))
}

pub fn is_table_calc_expression(expr: &str) -> bool {
    contains_any(expr, TABLE_CALC_MARKERS)
}

pub fn is_lod_expression(expr: &str) -> bool {
    contains_any(expr, LOD_MARKERS)
}

/// Signals derived from a set of calculation formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpressionSignals {
    pub has_table_calc: bool,
    pub has_lod: bool,
}

/// Scan formulas for table-calculation and LOD markers.
pub fn scan_expressions<I, S>(exprs: I) -> ExpressionSignals
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut signals = ExpressionSignals::default();
    for expr in exprs {
        let expr = expr.as_ref();
        signals.has_table_calc |= is_table_calc_expression(expr);
        signals.has_lod |= is_lod_expression(expr);
        if signals.has_table_calc && signals.has_lod {
            break;
        }
    }
    signals
}

/// Formula text of a `<calculation>` element: the `formula` attribute, else the element text.
pub fn calculation_formula<'a>(calc: XmlNode<'a, '_>) -> Option<&'a str> {
    calc.non_empty_attr("formula")
        .or_else(|| calc.text())
        .filter(|f| !f.is_empty())
}

/// Every calculation formula anywhere below `root`.
pub fn collect_calculation_expressions<'a>(root: XmlNode<'a, '_>) -> Vec<&'a str> {
    root.find_all("calculation").filter_map(calculation_formula).collect()
}

/// Distinct parameter names declared under `<parameters>` containers, sorted.
pub fn gather_parameters(root: XmlNode<'_, '_>) -> Vec<String> {
    let mut names: Vec<String> = root
        .find_path("parameters/parameter")
        .into_iter()
        .filter_map(|p| p.non_empty_attr("name"))
        .map(String::from)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Workbook-wide context computed once and handed read-only to every sheet.
///
/// `has_table_calc_anywhere` is reported for completeness but does not feed the score; the
/// scorer uses each sheet's local table-calc flag instead, while LOD presence and the
/// parameter count apply to every sheet of the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkbookSignals {
    pub has_table_calc_anywhere: bool,
    pub has_lod_anywhere: bool,
    pub parameters: Vec<String>,
}

impl WorkbookSignals {
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// Compute the workbook-wide signals for a document root.
pub fn workbook_signals(root: XmlNode<'_, '_>) -> WorkbookSignals {
    let exprs = collect_calculation_expressions(root);
    let scanned = scan_expressions(&exprs);
    let parameters = gather_parameters(root);

    tracing::debug!(
        "Workbook signals: {} calculations, table_calc={}, lod={}, {} parameters",
        exprs.len(),
        scanned.has_table_calc,
        scanned.has_lod,
        parameters.len()
    );

    WorkbookSignals {
        has_table_calc_anywhere: scanned.has_table_calc,
        has_lod_anywhere: scanned.has_lod,
        parameters,
    }
}
