//! Workbook-level analysis and summary.

use crate::analysis::scoring::{ScoreInputs, ScoringWeights, round_to, score};
use crate::analysis::sheet::{SheetFeatures, extract_sheet_features, worksheet_nodes};
use crate::analysis::signals::{WorkbookSignals, workbook_signals};
use crate::extraction::xml::WorkbookDocument;
use crate::types::{SheetRecord, WorkbookAnalysis, WorkbookSummary};

/// Analyze every worksheet of a document with the default weights.
pub fn analyze(doc: &WorkbookDocument<'_>) -> Vec<SheetRecord> {
    analyze_with_weights(doc, &ScoringWeights::default())
}

/// Analyze every worksheet of a document, in document order.
///
/// Workbook-wide signals are computed once and shared read-only by every sheet.
pub fn analyze_with_weights(doc: &WorkbookDocument<'_>, weights: &ScoringWeights) -> Vec<SheetRecord> {
    let root = doc.root();
    let signals = workbook_signals(root);

    let records: Vec<SheetRecord> = worksheet_nodes(root)
        .map(|sheet| build_record(extract_sheet_features(sheet), &signals, weights))
        .collect();

    tracing::debug!("Analyzed {} worksheets", records.len());
    records
}

fn build_record(features: SheetFeatures, signals: &WorkbookSignals, weights: &ScoringWeights) -> SheetRecord {
    let parameter_count = signals.parameter_count();
    let complexity_score = score(
        &ScoreInputs {
            dimension_count: features.dimension_count,
            measure_count: features.measure_count,
            filter_count: features.filter_count,
            calculated_field_count: features.calculated_field_count,
            has_table_calc: features.has_local_table_calc,
            has_lod: signals.has_lod_anywhere,
            parameter_count,
            mark_types: &features.mark_types,
        },
        weights,
    );

    SheetRecord {
        name: features.name,
        mark_types: features.mark_types,
        field_refs: features.field_refs,
        dimension_count: features.dimension_count,
        measure_count: features.measure_count,
        filter_count: features.filter_count,
        calculated_field_count: features.calculated_field_count,
        has_local_table_calc: features.has_local_table_calc,
        has_lod_anywhere: signals.has_lod_anywhere,
        parameter_count,
        complexity_score,
    }
}

/// Roll sheet scores into a workbook summary.
///
/// `overall_score` is the mean rounded to 2 decimals; `max_score` and `min_score` are taken
/// from the sheet scores as-is. No sheets gives an all-zero summary.
pub fn summarize(records: &[SheetRecord]) -> WorkbookSummary {
    if records.is_empty() {
        return WorkbookSummary::default();
    }

    let scores = records.iter().map(|r| r.complexity_score);
    let total: f64 = scores.clone().sum();
    let max_score = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    let min_score = scores.fold(f64::INFINITY, f64::min);

    WorkbookSummary {
        overall_score: round_to(total / records.len() as f64, 2),
        sheet_count: records.len(),
        max_score,
        min_score,
    }
}

/// [`analyze`] followed by [`summarize`].
pub fn analyze_with_summary(doc: &WorkbookDocument<'_>) -> WorkbookAnalysis {
    analyze_with_summary_and_weights(doc, &ScoringWeights::default())
}

pub fn analyze_with_summary_and_weights(doc: &WorkbookDocument<'_>, weights: &ScoringWeights) -> WorkbookAnalysis {
    let worksheets = analyze_with_weights(doc, weights);
    WorkbookAnalysis {
        summary: summarize(&worksheets),
        worksheets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOD_WORKBOOK: &str = r#"<workbook>
        <datasources>
            <datasource name="Orders">
                <column name="[Regional Sales]">
                    <calculation class="tableau" formula="{FIXED [Region] : SUM([Sales])}"/>
                </column>
            </datasource>
        </datasources>
        <worksheets>
            <worksheet name="Sales by Region">
                <table><rows><column field="[Region]"/></rows></table>
            </worksheet>
            <worksheet name="KPI">
                <table/>
            </worksheet>
        </worksheets>
    </workbook>"#;

    fn record(score: f64) -> SheetRecord {
        SheetRecord {
            name: "s".to_string(),
            mark_types: vec!["bar".to_string()],
            field_refs: Default::default(),
            dimension_count: 0,
            measure_count: 0,
            filter_count: 0,
            calculated_field_count: 0,
            has_local_table_calc: false,
            has_lod_anywhere: false,
            parameter_count: 0,
            complexity_score: score,
        }
    }

    #[test]
    fn test_workbook_lod_reaches_every_sheet() {
        let doc = WorkbookDocument::parse(LOD_WORKBOOK).unwrap();
        let records = analyze(&doc);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.has_lod_anywhere));
        assert!(records.iter().all(|r| r.calculated_field_count == 0));
        // dim 0.5 + bar 0.5 + lod 2.0
        assert_eq!(records[0].complexity_score, 3.0);
        // text 0.2 + lod 2.0
        assert_eq!(records[1].complexity_score, 2.2);
    }

    #[test]
    fn test_workbook_table_calc_does_not_reach_sheets() {
        let xml = r#"<workbook>
            <datasource><column name="[Running]"><calculation formula="RUNNING_SUM(SUM([Sales]))"/></column></datasource>
            <worksheet name="Plain"><rows><column field="[Region]"/></rows></worksheet>
        </workbook>"#;
        let doc = WorkbookDocument::parse(xml).unwrap();
        let records = analyze(&doc);
        assert!(!records[0].has_local_table_calc);
        assert_eq!(records[0].complexity_score, 1.0);
    }

    #[test]
    fn test_parameters_apply_to_every_sheet() {
        let xml = r#"<workbook>
            <datasource name="Parameters">
                <parameters><parameter name="[Top N]"/><parameter name="[Threshold]"/></parameters>
            </datasource>
            <worksheet name="A"/>
            <worksheet name="B"/>
        </workbook>"#;
        let doc = WorkbookDocument::parse(xml).unwrap();
        let records = analyze(&doc);
        assert!(records.iter().all(|r| r.parameter_count == 2));
        // text 0.2 + 2 * 0.8
        assert!(records.iter().all(|r| r.complexity_score == 1.8));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let doc = WorkbookDocument::parse(LOD_WORKBOOK).unwrap();
        let first = serde_json::to_string(&analyze(&doc)).unwrap();
        let second = serde_json::to_string(&analyze(&doc)).unwrap();
        assert_eq!(first, second);

        let reparsed = WorkbookDocument::parse(LOD_WORKBOOK).unwrap();
        assert_eq!(analyze(&doc), analyze(&reparsed));
    }

    #[test]
    fn test_custom_weights() {
        let doc = WorkbookDocument::parse(LOD_WORKBOOK).unwrap();
        let weights = ScoringWeights {
            lod_bonus: 0.0,
            ..ScoringWeights::default()
        };
        let records = analyze_with_weights(&doc, &weights);
        assert_eq!(records[0].complexity_score, 1.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), WorkbookSummary::default());
    }

    #[test]
    fn test_summarize_single_sheet_matches_sheet_score() {
        let summary = summarize(&[record(4.37)]);
        assert_eq!(summary.overall_score, 4.37);
        assert_eq!(summary.sheet_count, 1);
        assert_eq!(summary.max_score, 4.37);
        assert_eq!(summary.min_score, 4.37);
    }

    #[test]
    fn test_summarize_mean_is_rounded() {
        let summary = summarize(&[record(1.0), record(2.0), record(2.0)]);
        assert_eq!(summary.overall_score, 1.67);
        assert_eq!(summary.max_score, 2.0);
        assert_eq!(summary.min_score, 1.0);
        assert_eq!(summary.sheet_count, 3);
    }

    #[test]
    fn test_analyze_with_summary() {
        let doc = WorkbookDocument::parse(LOD_WORKBOOK).unwrap();
        let analysis = analyze_with_summary(&doc);
        assert_eq!(analysis.worksheets.len(), 2);
        assert_eq!(analysis.summary.sheet_count, 2);
        assert_eq!(analysis.summary.overall_score, 2.6);
        assert_eq!(analysis.summary.max_score, 3.0);
        assert_eq!(analysis.summary.min_score, 2.2);
    }

    #[test]
    fn test_workbook_without_worksheets() {
        let doc = WorkbookDocument::parse("<workbook><datasources/></workbook>").unwrap();
        let analysis = analyze_with_summary(&doc);
        assert!(analysis.worksheets.is_empty());
        assert_eq!(analysis.summary, WorkbookSummary::default());
    }
}
