use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::concept::ConceptMapping;

/// Name of the pivot column carrying the month bucket, when the template
/// pivots on a monthly axis.
pub const MONTH_COLUMN: &str = "Month";

/// The pivoted flow sheet projection: one column per observed concept, one
/// row per recorded instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotTable {
    #[serde(default)]
    pub headers: Vec<PivotHeader>,
    #[serde(default)]
    pub rows: Vec<PivotRow>,
}

/// A column header naming a concept, with enough metadata to label it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotHeader {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub mappings: Vec<ConceptMapping>,
}

/// One row of the pivot; a cell is a list of observation values, or null
/// when nothing was recorded for that column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRow {
    #[serde(default)]
    pub columns: HashMap<String, Option<Vec<Observation>>>,
}

/// A single recorded observation value inside a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub concept: ObsConcept,
    #[serde(default)]
    pub value: ObsValue,
    pub encounter_uuid: Uuid,
    #[serde(default)]
    pub obs_group_uuid: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObsConcept {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub data_type: Option<ConceptDataType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConceptDataType {
    Boolean,
    Coded,
    Date,
    Datetime,
    Numeric,
    Text,
    #[serde(other)]
    Other,
}

/// An observation value on the wire: a coded concept, a primitive, or null.
/// Dates and datetimes arrive as text and are interpreted per the concept's
/// data type at formatting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObsValue {
    Coded(CodedValue),
    Boolean(bool),
    Number(f64),
    Text(String),
    Null,
}

impl Default for ObsValue {
    fn default() -> Self {
        ObsValue::Null
    }
}

/// A coded answer concept, carrying its own names and source mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedValue {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub mappings: Vec<ConceptMapping>,
}

impl PivotTable {
    /// Pins the group-by concept's header to the first position, keeping
    /// the relative order of every other header. No-op when the table has
    /// no header by that name.
    pub fn promote_group_by(&mut self, group_by_concept: &str) {
        if let Some(position) = self.headers.iter().position(|h| h.name == group_by_concept) {
            let header = self.headers.remove(position);
            self.headers.insert(0, header);
        }
    }

    /// Whether the first row carries a non-null month cell. Layout hint
    /// only; an empty table has no month axis.
    pub fn month_available(&self) -> bool {
        self.rows
            .first()
            .and_then(|row| row.columns.get(MONTH_COLUMN))
            .and_then(Option::as_ref)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str) -> PivotHeader {
        PivotHeader {
            name: name.to_string(),
            short_name: None,
            mappings: Vec::new(),
        }
    }

    fn header_names(table: &PivotTable) -> Vec<&str> {
        table.headers.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn group_by_header_moves_to_front_preserving_other_order() {
        let mut table = PivotTable {
            headers: vec![header("Month"), header("Weight"), header("Height"), header("BMI")],
            rows: Vec::new(),
        };
        table.promote_group_by("Height");
        assert_eq!(header_names(&table), vec!["Height", "Month", "Weight", "BMI"]);
    }

    #[test]
    fn promoting_an_absent_group_by_leaves_headers_unchanged() {
        let mut table = PivotTable {
            headers: vec![header("Weight"), header("Height")],
            rows: Vec::new(),
        };
        table.promote_group_by("Pulse");
        assert_eq!(header_names(&table), vec!["Weight", "Height"]);
    }

    #[test]
    fn month_is_unavailable_for_an_empty_table() {
        assert!(!PivotTable::default().month_available());
    }

    #[test]
    fn month_availability_follows_the_first_row_cell() {
        let mut row = PivotRow::default();
        row.columns.insert(MONTH_COLUMN.to_string(), None);
        let mut table = PivotTable {
            headers: Vec::new(),
            rows: vec![row],
        };
        assert!(!table.month_available());

        table.rows[0]
            .columns
            .insert(MONTH_COLUMN.to_string(), Some(Vec::new()));
        assert!(table.month_available());
    }

    #[test]
    fn month_is_unavailable_when_the_first_row_has_no_month_cell() {
        let mut row = PivotRow::default();
        row.columns
            .insert("Weight".to_string(), Some(Vec::new()));
        let table = PivotTable {
            headers: Vec::new(),
            rows: vec![row],
        };
        assert!(!table.month_available());
    }

    #[test]
    fn parses_a_flow_sheet_payload() {
        let table: PivotTable = serde_json::from_value(serde_json::json!({
            "headers": [
                { "name": "Month", "shortName": null, "mappings": [] },
                {
                    "name": "Weight",
                    "shortName": "Wt",
                    "mappings": [ { "source": "CIEL", "code": "5089" } ]
                }
            ],
            "rows": [
                {
                    "columns": {
                        "Month": [ {
                            "concept": { "name": "Month", "dataType": "Text" },
                            "value": "February 2016",
                            "encounterUuid": "8d5a5e18-5caa-11e3-a4c0-0800271c1b75"
                        } ],
                        "Weight": null
                    }
                }
            ]
        }))
        .expect("flow sheet payload should parse");

        assert_eq!(table.headers.len(), 2);
        assert_eq!(table.headers[1].mappings[0].code, "5089");
        assert!(table.month_available());

        let month_cell = table.rows[0].columns["Month"].as_ref().unwrap();
        assert_eq!(month_cell[0].value, ObsValue::Text("February 2016".into()));
        assert_eq!(month_cell[0].obs_group_uuid, None);
    }

    #[test]
    fn observation_values_deserialize_by_shape() {
        let values: Vec<ObsValue> = serde_json::from_value(serde_json::json!([
            { "name": "Positive", "shortName": "+ve" },
            true,
            98.6,
            "2016-02-05",
            null
        ]))
        .expect("value shapes should parse");

        assert!(matches!(&values[0], ObsValue::Coded(c) if c.name == "Positive"));
        assert_eq!(values[1], ObsValue::Boolean(true));
        assert_eq!(values[2], ObsValue::Number(98.6));
        assert_eq!(values[3], ObsValue::Text("2016-02-05".into()));
        assert_eq!(values[4], ObsValue::Null);
    }
}
