//! Per-worksheet feature extraction.
//!
//! Every step here has a defined fallback, so extraction cannot fail once the document parsed.

use crate::analysis::marks::{MarkContext, infer_mark_types};
use crate::analysis::signals::{calculation_formula, is_table_calc_expression};
use crate::extraction::xml::XmlNode;
use crate::types::UNNAMED_SHEET;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static AGGREGATION_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(SUM|AVG|MIN|MAX|COUNT|MEDIAN|STDEV|VAR)\s*\(")
        .expect("Aggregation call regex pattern is valid and should compile")
});

/// Name fragments that mark a field as a measure.
const MEASURE_NAME_HINTS: &[&str] = &["#", "AMOUNT", "PRICE", "COST", "QUANTITY", "MEASURE"];

/// Sheet-local features, before workbook-wide signals and scoring are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFeatures {
    pub name: String,
    pub mark_types: Vec<String>,
    pub field_refs: BTreeSet<String>,
    pub dimension_count: usize,
    pub measure_count: usize,
    pub filter_count: usize,
    pub calculated_field_count: usize,
    pub has_local_table_calc: bool,
}

/// Worksheet elements of a workbook, in document order.
pub fn worksheet_nodes<'a, 'input>(root: XmlNode<'a, 'input>) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    root.find_all("worksheet")
}

/// Display name: `name`, else `caption`, else `"(unnamed)"`.
pub fn sheet_name(sheet: XmlNode<'_, '_>) -> String {
    sheet
        .non_empty_attr("name")
        .or_else(|| sheet.non_empty_attr("caption"))
        .unwrap_or(UNNAMED_SHEET)
        .to_string()
}

/// Distinct trimmed `field` (else `name`) values of every `<column>` below the sheet.
///
/// A whitespace-only value trims to `""` and is kept as a reference.
pub fn field_refs(sheet: XmlNode<'_, '_>) -> BTreeSet<String> {
    sheet
        .find_all("column")
        .filter_map(|col| col.non_empty_attr("field").or_else(|| col.non_empty_attr("name")))
        .map(|field| field.trim().to_string())
        .collect()
}

fn strip_brackets(field: &str) -> &str {
    let field = field.strip_prefix('[').unwrap_or(field);
    field.strip_suffix(']').unwrap_or(field)
}

/// Name-based guess at whether a field is a measure.
///
/// Only looks at the identifier text; real data-role metadata is not consulted.
pub fn is_measure(field: &str) -> bool {
    let inner = strip_brackets(field);
    if AGGREGATION_CALL.is_match(inner) {
        return true;
    }
    let upper = inner.to_uppercase();
    MEASURE_NAME_HINTS.iter().any(|hint| upper.contains(hint))
}

/// `(dimensions, measures)` for a set of field references. Always sums to `fields.len()`.
pub fn split_dimensions_measures(fields: &BTreeSet<String>) -> (usize, usize) {
    let measures = fields.iter().filter(|f| is_measure(f)).count();
    (fields.len() - measures, measures)
}

pub fn filter_count(sheet: XmlNode<'_, '_>) -> usize {
    sheet.find_all("filter").count()
}

/// Formulas attached to the sheet's columns.
///
/// Calculations below nested columns are reported once per enclosing column.
pub fn local_formulas<'a>(sheet: XmlNode<'a, '_>) -> Vec<&'a str> {
    let mut formulas = Vec::new();
    for col in sheet.find_all("column") {
        formulas.extend(col.find_all("calculation").filter_map(calculation_formula));
        if let Some(formula) = col.non_empty_attr("formula") {
            formulas.push(formula);
        }
    }
    formulas
}

/// Extract every sheet-local feature of one worksheet.
pub fn extract_sheet_features(sheet: XmlNode<'_, '_>) -> SheetFeatures {
    let name = sheet_name(sheet);
    let field_refs = field_refs(sheet);

    let mark_types = infer_mark_types(&MarkContext {
        sheet,
        name: &name,
        field_refs: &field_refs,
    });

    let (dimension_count, measure_count) = split_dimensions_measures(&field_refs);
    let formulas = local_formulas(sheet);
    let has_local_table_calc = formulas.iter().any(|f| is_table_calc_expression(f));

    tracing::debug!(
        "Sheet '{}': {} fields ({} dims, {} measures), {} calculations",
        name,
        field_refs.len(),
        dimension_count,
        measure_count,
        formulas.len()
    );

    SheetFeatures {
        filter_count: filter_count(sheet),
        calculated_field_count: formulas.len(),
        name,
        mark_types,
        field_refs,
        dimension_count,
        measure_count,
        has_local_table_calc,
    }
}
