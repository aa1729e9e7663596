// lib/src/report.rs

//! Views built from a disease history after each submission: the result
//! banner, a grouped previous-vs-current comparison, per-metric trends and
//! the full history table.

use serde::Serialize;

use models::{Disease, DiseaseHistory, HistoryEntry, PredictionResult};

pub const NEED_MORE_TESTS_MESSAGE: &str = "Complete another test to see comparison graphs and trends.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// Grouped bars of the previous test next to the current one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub title: String,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub metrics: Vec<&'static str>,
    pub series: [BarSeries; 2],
}

impl ComparisonChart {
    pub fn build(disease: Disease, previous: &HistoryEntry, current: &HistoryEntry) -> Self {
        let metrics = disease.comparison_metrics().to_vec();
        let values_of = |entry: &HistoryEntry| -> Vec<f64> {
            metrics.iter().map(|m| entry.metric(m)).collect()
        };
        Self {
            title: format!("{} - Comparison of Test Results", disease.name()),
            x_axis_title: "Metrics",
            y_axis_title: "Values",
            series: [
                BarSeries {
                    name: "Previous Test",
                    color: "lightblue",
                    values: values_of(previous),
                },
                BarSeries {
                    name: "Current Test",
                    color: "darkblue",
                    values: values_of(current),
                },
            ],
            metrics,
        }
    }

    pub fn previous(&self) -> &BarSeries {
        &self.series[0]
    }

    pub fn current(&self) -> &BarSeries {
        &self.series[1]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub metric: &'static str,
    /// One point per history entry, in submission order.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub title: &'static str,
    pub lines: Vec<TrendLine>,
}

impl TrendChart {
    pub fn build(disease: Disease, history: &DiseaseHistory) -> Self {
        let lines = disease
            .comparison_metrics()
            .iter()
            .map(|&metric| TrendLine {
                metric,
                values: history.entries().iter().map(|e| e.metric(metric)).collect(),
            })
            .collect();
        Self {
            title: "Trend Analysis",
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableCell {
    Number(f64),
    Text(String),
}

/// Every history entry as a row: summary metrics, then the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryTable {
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<TableCell>>,
}

impl HistoryTable {
    pub fn build(disease: Disease, history: &DiseaseHistory) -> Self {
        let summary = disease.summary_metrics();
        let mut columns: Vec<&'static str> = summary.iter().map(|m| m.name).collect();
        columns.push("Result");

        let rows = history
            .entries()
            .iter()
            .map(|entry| {
                summary
                    .iter()
                    .map(|m| TableCell::Number(entry.metric(m.name)))
                    .chain(std::iter::once(TableCell::Text(entry.result.clone())))
                    .collect()
            })
            .collect();

        Self {
            title: "Test History",
            columns,
            rows,
        }
    }
}

/// Everything a page shows for one disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub disease: Disease,
    pub title: String,
    /// Success banner of the submission that produced this report.
    pub message: Option<String>,
    pub present: Option<bool>,
    pub info: Option<&'static str>,
    pub comparison: Option<ComparisonChart>,
    pub trend: Option<TrendChart>,
    pub table: Option<HistoryTable>,
    pub tests: usize,
}

impl Report {
    /// Comparison, trend and table appear only once the history holds at
    /// least two entries; before that the report carries the info message.
    pub fn build(history: &DiseaseHistory, prediction: Option<&PredictionResult>) -> Self {
        let disease = history.disease;
        let mut report = Self {
            disease,
            title: disease.page_title(),
            message: prediction.map(|p| p.message.clone()),
            present: prediction.map(|p| p.present),
            info: None,
            comparison: None,
            trend: None,
            table: None,
            tests: history.len(),
        };

        match (history.previous(), history.latest()) {
            (Some(previous), Some(current)) => {
                report.comparison = Some(ComparisonChart::build(disease, previous, current));
                report.trend = Some(TrendChart::build(disease, history));
                report.table = Some(HistoryTable::build(disease, history));
            }
            _ => report.info = Some(NEED_MORE_TESTS_MESSAGE),
        }
        report
    }

    pub fn has_comparison(&self) -> bool {
        self.comparison.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::TestReading;

    fn append_diabetes(history: &mut DiseaseHistory, glucose: f64, label: i64) -> PredictionResult {
        let values = vec![1.0, glucose, 70.0, 20.0, 80.0, 30.0, 0.5, 40.0];
        let reading = TestReading::from_values(Disease::Diabetes, values).unwrap();
        let prediction = PredictionResult::from_label(Disease::Diabetes, label);
        history.append(HistoryEntry::new(&reading, &prediction, Utc::now()));
        prediction
    }

    #[test]
    fn single_entry_shows_info_only() {
        let mut history = DiseaseHistory::new(Disease::Diabetes);
        let prediction = append_diabetes(&mut history, 90.0, 0);
        let report = Report::build(&history, Some(&prediction));
        assert_eq!(report.message.as_deref(), Some("The person does not have diabetes"));
        assert_eq!(report.info, Some(NEED_MORE_TESTS_MESSAGE));
        assert!(!report.has_comparison());
        assert!(report.trend.is_none());
        assert!(report.table.is_none());
    }

    #[test]
    fn comparison_uses_preceding_entry_as_previous() {
        let mut history = DiseaseHistory::new(Disease::Diabetes);
        append_diabetes(&mut history, 90.0, 0);
        append_diabetes(&mut history, 110.0, 0);
        let prediction = append_diabetes(&mut history, 150.0, 1);

        let report = Report::build(&history, Some(&prediction));
        assert!(report.info.is_none());
        let comparison = report.comparison.unwrap();
        assert_eq!(comparison.title, "Diabetes - Comparison of Test Results");
        assert_eq!(comparison.metrics, vec!["Glucose", "BloodPressure", "BMI", "Age"]);
        assert_eq!(comparison.previous().name, "Previous Test");
        assert_eq!(comparison.previous().values, vec![110.0, 70.0, 30.0, 40.0]);
        assert_eq!(comparison.current().values, vec![150.0, 70.0, 30.0, 40.0]);
    }

    #[test]
    fn trend_covers_all_entries_in_order() {
        let mut history = DiseaseHistory::new(Disease::Diabetes);
        for glucose in [90.0, 110.0, 150.0] {
            append_diabetes(&mut history, glucose, 0);
        }
        let trend = Report::build(&history, None).trend.unwrap();
        assert_eq!(trend.lines.len(), 4);
        assert_eq!(trend.lines[0].metric, "Glucose");
        assert_eq!(trend.lines[0].values, vec![90.0, 110.0, 150.0]);
    }

    #[test]
    fn table_lists_summary_columns_and_result() {
        let mut history = DiseaseHistory::new(Disease::Diabetes);
        append_diabetes(&mut history, 90.0, 0);
        append_diabetes(&mut history, 150.0, 1);
        let table = Report::build(&history, None).table.unwrap();
        assert_eq!(table.columns, vec!["Pregnancies", "Glucose", "BloodPressure", "BMI", "Age", "Result"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][1], TableCell::Number(150.0));
        assert_eq!(table.rows[1][5], TableCell::Text("The person has diabetes".to_string()));
    }

    #[test]
    fn empty_history_has_no_message() {
        let report = Report::build(&DiseaseHistory::new(Disease::Kidney), None);
        assert!(report.message.is_none());
        assert_eq!(report.tests, 0);
        assert_eq!(report.title, "Kidney Disease Prediction Using Machine Learning");
    }
}
