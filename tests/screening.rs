use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stock_screener::{ErrorKind, FormState, Metric, ScreeningEngine, WeightSpec, TOP_N};
use tempfile::TempDir;

const HEADER: &str =
    "Company Name,Ticker,ROIC,EBIT Margin,52-Week Price Low Relative,Revenue Growth Rate,EBIT Margin Improvement";

fn write_sheet(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    fs::write(&path, text).unwrap();
    path
}

fn roic_only_form() -> FormState {
    let weights: WeightSpec = Metric::ALL
        .iter()
        .map(|m| (*m, if *m == Metric::Roic { 1.0 } else { 0.0 }))
        .collect();
    FormState::with_weights(&weights)
}

#[test]
fn three_companies_rank_by_roic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(
        &dir,
        "Tickers.csv",
        &["A,AAA,5,1,1,1,1", "B,BBB,10,1,1,1,1", "C,CCC,15,1,1,1,1"],
    );

    let ranked = ScreeningEngine::default().run(&path, &roic_only_form()).unwrap();
    let rows = ranked.display_rows();

    let names: Vec<&str> = rows.iter().map(|r| r.company_name.as_str()).collect();
    let scores: Vec<&str> = rows.iter().map(|r| r.score_text.as_str()).collect();
    assert_eq!(names, ["C", "B", "A"]);
    assert_eq!(scores, ["3.00", "2.00", "1.00"]);
    assert!(rows[0].highlighted);
}

#[test]
fn max_only_filter_includes_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(
        &dir,
        "Tickers.csv",
        &["Low,L,40,1,1,1,1", "Edge,E,50,1,1,1,1", "High,H,50.01,1,1,1,1"],
    );

    let mut form = roic_only_form();
    form.field_mut(Metric::Roic).min = String::new();
    form.field_mut(Metric::Roic).max = "50".into();

    let ranked = ScreeningEngine::default().run(&path, &form).unwrap();
    assert_eq!(ranked.names(), ["Edge", "Low"]);
}

#[test]
fn results_never_exceed_ten() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<String> = (0..30)
        .map(|i| format!("Co{i},T{i},{i},{},1,1,1", 30 - i))
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let path = write_sheet(&dir, "Tickers.csv", &refs);

    let form = FormState::with_weights(&stock_screener::config::default_weights());
    let ranked = ScreeningEngine::default().run(&path, &form).unwrap();
    assert_eq!(ranked.len(), TOP_N);
    for pair in ranked.companies.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn empty_filter_result_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(&dir, "Tickers.csv", &["A,AAA,5,1,1,1,1"]);

    let mut form = roic_only_form();
    form.field_mut(Metric::EbitMargin).min = "100".into();

    let ranked = ScreeningEngine::default().run(&path, &form).unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn bad_weight_fails_before_reading_the_sheet() {
    let mut form = roic_only_form();
    form.field_mut(Metric::Roic).weight = "heavy".into();

    // The path does not exist: an input error proves the file was never opened.
    let err = ScreeningEngine::default()
        .run(&PathBuf::from("/no/such/Tickers.csv"), &form)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputParse);
}

#[test]
fn missing_metric_column_is_data_access_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Tickers.csv");
    fs::write(&path, "Company Name,ROIC\nA,5\n").unwrap();

    let err = ScreeningEngine::default()
        .run(&path, &roic_only_form())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataAccess);
    assert_eq!(err.to_string(), "missing required column 'EBIT Margin'");
}

#[test]
fn sheet_is_reread_on_every_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(&dir, "Tickers.csv", &["A,AAA,5,1,1,1,1", "B,BBB,10,1,1,1,1"]);
    let engine = ScreeningEngine::default();
    let form = roic_only_form();

    assert_eq!(engine.run(&path, &form).unwrap().names(), ["B", "A"]);

    write_sheet(&dir, "Tickers.csv", &["A,AAA,50,1,1,1,1", "B,BBB,10,1,1,1,1"]);
    assert_eq!(engine.run(&path, &form).unwrap().names(), ["A", "B"]);
}

#[test]
fn json_sheet_screens_like_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Tickers.json");
    fs::write(
        &path,
        r#"[
          {"Company Name": "A", "ROIC": 5, "EBIT Margin": 1, "52-Week Price Low Relative": 1,
           "Revenue Growth Rate": 1, "EBIT Margin Improvement": 1},
          {"Company Name": "B", "ROIC": 15, "EBIT Margin": 1, "52-Week Price Low Relative": 1,
           "Revenue Growth Rate": 1, "EBIT Margin Improvement": 1}
        ]"#,
    )
    .unwrap();

    let ranked = ScreeningEngine::default().run(&path, &roic_only_form()).unwrap();
    assert_eq!(ranked.names(), ["B", "A"]);
}
