//! Mark (chart) type inference.
//!
//! Mark types are not stored consistently across workbook versions, so inference runs an
//! ordered chain of strategies and stops at the first one that yields anything:
//!
//! 1. [`structural_marks`]: explicit `type`/`mark` attributes and map-related elements
//! 2. [`empty_axes_marks`]: sheets with nothing on rows or columns (KPI tiles, text tables)
//! 3. [`axes_present_marks`]: guesses from field names on populated shelves
//! 4. [`default_marks`]: `"unknown"`
//!
//! Strategies 2 and 3 are complementary, so the last layer only fires when a custom chain
//! omits one of them.

use crate::extraction::xml::XmlNode;
use crate::types::UNKNOWN_MARK_TYPE;
use std::collections::BTreeSet;

/// Inputs shared by every inference strategy for one sheet.
#[derive(Debug, Clone, Copy)]
pub struct MarkContext<'a, 'input> {
    pub sheet: XmlNode<'a, 'input>,
    /// Resolved sheet name (after the `(unnamed)` fallback).
    pub name: &'a str,
    pub field_refs: &'a BTreeSet<String>,
}

/// One inference layer. `None` means "no match, try the next layer".
pub type MarkStrategy = fn(&MarkContext<'_, '_>) -> Option<BTreeSet<String>>;

/// The inference chain, in evaluation order.
pub const MARK_STRATEGIES: &[(&str, MarkStrategy)] = &[
    ("structural", structural_marks),
    ("empty-axes", empty_axes_marks),
    ("axes-present", axes_present_marks),
    ("default", default_marks),
];

const MARK_ELEMENT_TAGS: &[&str] = &["mark", "marks", "style", "view"];
const MAP_ELEMENT_TAGS: &[&str] = &["map", "layers"];

const HISTOGRAM_HINTS: &[&str] = &["bin(", "hist", "bucket"];
const MAP_HINTS: &[&str] = &["lat", "longitude", "latitude"];
const LINE_HINTS: &[&str] = &["path", "index(", "running_", "window_"];

/// Run the full chain and return the sorted mark types. Never empty.
pub fn infer_mark_types(ctx: &MarkContext<'_, '_>) -> Vec<String> {
    infer_with(MARK_STRATEGIES, ctx)
}

/// Run a custom chain. Falls back to `["unknown"]` if every layer declines.
pub fn infer_with(strategies: &[(&str, MarkStrategy)], ctx: &MarkContext<'_, '_>) -> Vec<String> {
    for (layer, strategy) in strategies {
        if let Some(found) = strategy(ctx).filter(|types| !types.is_empty()) {
            tracing::debug!("Sheet '{}': mark types {:?} from {} layer", ctx.name, found, layer);
            return found.into_iter().collect();
        }
    }
    vec![UNKNOWN_MARK_TYPE.to_string()]
}

/// Normalize a raw mark token into a canonical tag.
///
/// Lowercases, turns `_` and spaces into `-`, drops anything but ASCII letters and `-`,
/// then applies the synonym table. A token with no letters normalizes to an empty tag, which
/// still counts as a structural result.
pub fn normalize_mark_token(raw: &str) -> String {
    let base: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || *c == '-')
        .collect();

    let canonical = match base.as_str() {
        "circle" | "square" => "scatter",
        "box" | "boxandwhisker" | "box-and-whisker" => "box-and-whisker",
        other => other,
    };
    canonical.to_string()
}

/// Layer 1: tags carried by the markup itself.
pub fn structural_marks(ctx: &MarkContext<'_, '_>) -> Option<BTreeSet<String>> {
    let mut raw: Vec<&str> = Vec::new();

    for el in ctx.sheet.descendants() {
        let tag = el.local_name().to_lowercase();

        if MARK_ELEMENT_TAGS.contains(&tag.as_str())
            && let Some(value) = el.non_empty_attr("type").or_else(|| el.non_empty_attr("mark"))
        {
            raw.push(value);
        }

        if let Some(mark) = el.non_empty_attr("mark") {
            raw.push(mark);
        }

        if MAP_ELEMENT_TAGS.contains(&tag.as_str()) || el.has_attr("map") {
            raw.push("map");
        }
    }

    let types: BTreeSet<String> = raw.into_iter().map(normalize_mark_token).collect();
    (!types.is_empty()).then_some(types)
}

fn shelf_column_count(sheet: XmlNode<'_, '_>, shelf: &str) -> usize {
    sheet
        .find_first(shelf)
        .map(|node| node.find_all("column").count())
        .unwrap_or(0)
}

fn single(tag: &str) -> Option<BTreeSet<String>> {
    Some(BTreeSet::from([tag.to_string()]))
}

/// Layer 2: nothing on rows or columns.
pub fn empty_axes_marks(ctx: &MarkContext<'_, '_>) -> Option<BTreeSet<String>> {
    let rows = shelf_column_count(ctx.sheet, "rows");
    let cols = shelf_column_count(ctx.sheet, "cols");
    if rows != 0 || cols != 0 {
        return None;
    }

    if ctx.name.to_lowercase().contains("text") {
        single("text")
    } else if ctx.sheet.has_descendant("shape") {
        single("shape")
    } else if ctx.sheet.has_descendant("color") && ctx.sheet.has_descendant("size") {
        single("scatter")
    } else {
        single("text")
    }
}

/// Layer 3: populated shelves, guess from field names.
pub fn axes_present_marks(ctx: &MarkContext<'_, '_>) -> Option<BTreeSet<String>> {
    let rows = shelf_column_count(ctx.sheet, "rows");
    let cols = shelf_column_count(ctx.sheet, "cols");
    if rows == 0 && cols == 0 {
        return None;
    }

    let tokens: Vec<String> = ctx.field_refs.iter().map(|f| f.to_lowercase()).collect();
    let any_hint = |hints: &[&str]| tokens.iter().any(|t| hints.iter().any(|h| t.contains(h)));

    if any_hint(HISTOGRAM_HINTS) {
        single("histogram")
    } else if any_hint(MAP_HINTS) {
        single("map")
    } else if any_hint(LINE_HINTS) {
        single("line")
    } else {
        single("bar")
    }
}

/// Layer 4: nothing matched.
pub fn default_marks(_ctx: &MarkContext<'_, '_>) -> Option<BTreeSet<String>> {
    single(UNKNOWN_MARK_TYPE)
}
