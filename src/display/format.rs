//! Pure formatting of headers and cell values. No I/O here; the localizer
//! and per-concept UI config are injected by the presenter.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::UiConfigSource;
use crate::locale::Localizer;
use crate::models::{ConceptDataType, ConceptMapping, ObsValue, Observation, PivotHeader};

/// Resolves the localized code mapped to `source`, when the concept carries
/// such a mapping.
pub fn source_code(
    mappings: &[ConceptMapping],
    source: Option<&str>,
    localizer: &dyn Localizer,
) -> Option<String> {
    let source = source?;
    mappings
        .iter()
        .find(|mapping| mapping.source == source)
        .map(|mapping| localizer.translate(&mapping.code))
}

/// Label for a column header: localized source code, else short name, else
/// full concept name.
pub fn header_label(
    header: &PivotHeader,
    heading_source: Option<&str>,
    localizer: &dyn Localizer,
) -> String {
    source_code(&header.mappings, heading_source, localizer)
        .or_else(|| header.short_name.clone().filter(|name| !name.is_empty()))
        .unwrap_or_else(|| header.name.clone())
}

/// Joins a cell's observation values into one display string, `", "`
/// separated, in input order.
///
/// Boolean observations render as Yes/No. Date observations render as month
/// and year when the concept's UI config asks for it, as a full date
/// otherwise. Everything else resolves through the source-mapping-then-name
/// fallback used for headers.
pub fn commafy(
    observations: &[Observation],
    data_source: Option<&str>,
    localizer: &dyn Localizer,
    ui_config: &dyn UiConfigSource,
) -> String {
    let tokens: Vec<String> = observations
        .iter()
        .map(|obs| {
            match (obs.concept.data_type, &obs.value) {
                (Some(ConceptDataType::Boolean), ObsValue::Boolean(value)) => {
                    un_boolean(*value).to_string()
                }
                (Some(ConceptDataType::Date), ObsValue::Text(raw)) => {
                    let month_and_year = ui_config
                        .concept_config(&obs.concept.name)
                        .is_some_and(|config| config.display_month_and_year);
                    format_date(raw, month_and_year)
                }
                _ => value_token(&obs.value, data_source, localizer).unwrap_or_default(),
            }
        })
        .collect();

    tokens.join(", ")
}

fn un_boolean(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn value_token(
    value: &ObsValue,
    data_source: Option<&str>,
    localizer: &dyn Localizer,
) -> Option<String> {
    match value {
        ObsValue::Coded(coded) => source_code(&coded.mappings, data_source, localizer)
            .or_else(|| coded.short_name.clone().filter(|name| !name.is_empty()))
            .or_else(|| Some(coded.name.clone())),
        ObsValue::Boolean(value) => Some(value.to_string()),
        ObsValue::Number(value) => Some(number_token(*value)),
        ObsValue::Text(value) => Some(value.clone()),
        ObsValue::Null => None,
    }
}

// Whole numbers display without a trailing ".0".
fn number_token(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Renders an ISO date or datetime string as "05 Feb 16", or "Feb 16" when
/// only month and year are wanted. Unparseable text passes through.
fn format_date(raw: &str, month_and_year: bool) -> String {
    let date = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|datetime| datetime.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) if month_and_year => date.format("%b %y").to_string(),
        Ok(date) => date.format("%d %b %y").to_string(),
        Err(_) => raw.to_string(),
    }
}
