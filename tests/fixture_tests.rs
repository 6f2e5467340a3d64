//! Fixture-driven conversion tests.
//!
//! Runs every case in tests/fixtures/cases.json with repair disabled and a
//! fixed clock and site name.

use chrono::NaiveDate;
use ferrowiki::{FixedClock, Options, StaticSite, WikiParser};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    input: String,
    #[serde(default)]
    title: String,
    html: String,
    #[serde(default)]
    redirect: Option<String>,
}

fn load_cases() -> Vec<Case> {
    serde_json::from_str(include_str!("fixtures/cases.json")).expect("Failed to parse cases.json")
}

fn parser() -> WikiParser {
    let at = NaiveDate::from_ymd_opt(2024, 3, 7)
        .and_then(|d| d.and_hms_opt(9, 5, 0))
        .expect("valid date");
    WikiParser::new(Options {
        clean_html: false,
        ..Options::default()
    })
    .with_clock(FixedClock(at))
    .with_site(StaticSite("wiki.example.org".into()))
}

#[test]
fn fixture_cases() {
    let cases = load_cases();
    assert!(!cases.is_empty());
    let parser = parser();

    for case in &cases {
        let rendered = parser.parse(&case.input, &case.title);
        assert_eq!(rendered.html(), case.html, "case: {}", case.name);
        assert_eq!(
            rendered.redirect_target(),
            case.redirect.as_deref(),
            "case: {}",
            case.name
        );
    }
}

#[test]
fn fixture_names_are_unique() {
    let cases = load_cases();
    let mut names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), cases.len());
}
