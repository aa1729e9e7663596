// rest_api/src/pages.rs

//! Server-rendered dashboard pages.

use std::collections::HashMap;
use std::fmt::Write;

use dashboard_lib::models::{Disease, FieldError};
use dashboard_lib::{ComparisonChart, HistoryTable, Report, TableCell, TrendChart};

const APP_TITLE: &str = "Multiple Disease Prediction";

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;display:flex;min-height:100vh}\
nav{width:16rem;background:#f0f2f6;padding:1rem}\
nav a{display:block;padding:.5rem;color:#262730;text-decoration:none;border-radius:.3rem}\
nav a.active{background:#ff4b4b;color:#fff}\
main{flex:1;padding:1rem 2rem}\
.fields{display:grid;grid-template-columns:repeat(3,1fr);gap:.8rem 1.5rem}\
.field label{display:block;font-size:.9rem;margin-bottom:.2rem}\
.field input{width:100%;padding:.4rem}\
.field .error{color:#b00020;font-size:.8rem}\
.success{background:#dff0d8;padding:.8rem;margin:1rem 0}\
.info{background:#d9edf7;padding:.8rem;margin:1rem 0}\
.failure{background:#f8d7da;padding:.8rem;margin:1rem 0}\
table{border-collapse:collapse;margin:.5rem 0 1.5rem}\
th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:right}\
th:first-child,td:first-child{text-align:left}";

/// What to show under the form.
#[derive(Clone, Copy)]
pub enum PageOutcome<'a> {
    Blank,
    Report(&'a Report),
    Invalid(&'a [FieldError]),
    Failed(&'a str),
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_page(disease: Disease, values: &HashMap<String, String>, outcome: PageOutcome<'_>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{app}</title><style>{style}</style></head><body>",
        app = APP_TITLE,
        style = STYLE
    );
    render_nav(&mut html, Some(disease));

    html.push_str("<main>");
    let _ = write!(html, "<h1>{}</h1>", escape(&disease.page_title()));

    let field_errors: &[FieldError] = match outcome {
        PageOutcome::Invalid(errors) => errors,
        _ => &[],
    };
    render_form(&mut html, disease, values, field_errors);

    match outcome {
        PageOutcome::Blank => {}
        PageOutcome::Report(report) => render_report(&mut html, report),
        PageOutcome::Invalid(errors) => {
            let _ = write!(
                html,
                "<div class=\"failure\">Please correct {} field(s) before running the test.</div>",
                errors.len()
            );
        }
        PageOutcome::Failed(message) => {
            let _ = write!(html, "<div class=\"failure\">{}</div>", escape(message));
        }
    }
    html.push_str("</main></body></html>");
    html
}

pub fn render_not_found(slug: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{app}</title><style>{style}</style></head><body>",
        app = APP_TITLE,
        style = STYLE
    );
    render_nav(&mut html, None);
    let _ = write!(
        html,
        "<main><h1>Page not found</h1><div class=\"failure\">There is no prediction page called '{}'.</div></main></body></html>",
        escape(slug)
    );
    html
}

fn render_nav(html: &mut String, active: Option<Disease>) {
    let _ = write!(html, "<nav><h2>{}</h2>", APP_TITLE);
    for disease in Disease::ALL {
        let class = if Some(disease) == active { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<a href=\"/{slug}\"{class}>{label}</a>",
            slug = disease.slug(),
            class = class,
            label = escape(&disease.menu_label())
        );
    }
    html.push_str("</nav>");
}

fn render_form(html: &mut String, disease: Disease, values: &HashMap<String, String>, errors: &[FieldError]) {
    let _ = write!(html, "<form method=\"post\" action=\"/{}\"><div class=\"fields\">", disease.slug());
    for spec in disease.fields() {
        let value = values.get(spec.key).map(String::as_str).unwrap_or_default();
        let _ = write!(
            html,
            "<div class=\"field\"><label for=\"{key}\">{label}</label><input id=\"{key}\" name=\"{key}\" type=\"text\" value=\"{value}\">",
            key = spec.key,
            label = escape(spec.label),
            value = escape(value)
        );
        if let Some(error) = errors.iter().find(|e| e.field == spec.key) {
            let _ = write!(html, "<div class=\"error\">{}</div>", escape(&error.problem.to_string()));
        }
        html.push_str("</div>");
    }
    let _ = write!(
        html,
        "</div><p><button type=\"submit\">{}</button></p></form>",
        escape(&disease.button_label())
    );
}

fn render_report(html: &mut String, report: &Report) {
    if let Some(message) = &report.message {
        let _ = write!(html, "<div class=\"success\">{}</div>", escape(message));
    }
    if let Some(comparison) = &report.comparison {
        render_comparison(html, comparison);
    }
    if let Some(trend) = &report.trend {
        render_trend(html, trend);
    }
    if let Some(table) = &report.table {
        render_history(html, table);
    }
    if let Some(info) = report.info {
        let _ = write!(html, "<div class=\"info\">{}</div>", escape(info));
    }
}

fn render_comparison(html: &mut String, chart: &ComparisonChart) {
    let _ = write!(html, "<h3>{}</h3><table><tr><th>{}</th>", escape(&chart.title), chart.x_axis_title);
    for metric in &chart.metrics {
        let _ = write!(html, "<th>{}</th>", escape(metric));
    }
    html.push_str("</tr>");
    for series in &chart.series {
        let _ = write!(html, "<tr><td style=\"color:{}\">{}</td>", series.color, series.name);
        for value in &series.values {
            let _ = write!(html, "<td>{}</td>", value);
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
}

fn render_trend(html: &mut String, chart: &TrendChart) {
    let _ = write!(html, "<h2>{}</h2><table><tr><th>Test</th>", chart.title);
    for line in &chart.lines {
        let _ = write!(html, "<th>{}</th>", escape(line.metric));
    }
    html.push_str("</tr>");
    let points = chart.lines.first().map(|line| line.values.len()).unwrap_or(0);
    for idx in 0..points {
        let _ = write!(html, "<tr><td>{}</td>", idx + 1);
        for line in &chart.lines {
            let value = line.values.get(idx).copied().unwrap_or(0.0);
            let _ = write!(html, "<td>{}</td>", value);
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
}

fn render_history(html: &mut String, table: &HistoryTable) {
    let _ = write!(html, "<h2>{}</h2><table><tr>", table.title);
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            match cell {
                TableCell::Number(value) => {
                    let _ = write!(html, "<td>{}</td>", value);
                }
                TableCell::Text(text) => {
                    let _ = write!(html, "<td>{}</td>", escape(text));
                }
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
}
