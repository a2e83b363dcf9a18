//! Normalization of raw result rows into field-keyed records.

use crate::{Error, Result};
use indexmap::IndexMap;

/// A single cell of the results table. Cells that parse as base-10 integers
/// are coerced; everything else is kept verbatim as text, including
/// boolean-like flags such as `"True"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    fn parse(cell: &str) -> Value {
        match cell.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(cell.to_owned()),
        }
    }
}

/// One row of the results table, keyed by the header field names in column
/// order. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunRecord {
    fields: IndexMap<String, Value>,
}

impl RunRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Integer value of a field. Missing fields and non-integer cells are
    /// fatal lookup errors; callers do not validate ahead of time.
    pub fn int(&self, field: &str) -> Result<i64> {
        match self.fields.get(field) {
            Some(Value::Int(n)) => Ok(*n),
            Some(Value::Text(s)) => Err(Error::FieldType {
                field: field.to_owned(),
                value: s.clone(),
            }),
            None => Err(Error::MissingField {
                field: field.to_owned(),
            }),
        }
    }

    pub fn text(&self, field: &str) -> Result<&str> {
        match self.fields.get(field) {
            Some(Value::Text(s)) => Ok(s),
            Some(Value::Int(n)) => Err(Error::FieldType {
                field: field.to_owned(),
                value: n.to_string(),
            }),
            None => Err(Error::MissingField {
                field: field.to_owned(),
            }),
        }
    }

    pub fn map_name(&self) -> Result<&str> {
        self.text("map_name")
    }

    /// Scenario identifier. Harnesses write either a scenario index or a
    /// scenario file name, so the raw [Value] is the key material.
    pub fn scen(&self) -> Result<&Value> {
        self.fields.get("scen").ok_or_else(|| Error::MissingField {
            field: "scen".to_owned(),
        })
    }

    pub fn num_agents(&self) -> Result<i64> {
        self.int("num_agents")
    }

    /// Explicit boolean reading of the `solved` flag. The harness writes the
    /// flag as 0/1; string spellings of true are accepted as well. A missing
    /// field counts as unsolved.
    pub fn solved(&self) -> bool {
        match self.fields.get("solved") {
            Some(Value::Int(n)) => *n != 0,
            Some(Value::Text(s)) => matches!(s.as_str(), "True" | "true" | "1"),
            None => false,
        }
    }
}

/// Turns the raw header row and data rows into [RunRecord]s, coercing each
/// integer-looking cell and leaving all other cells untouched. Row order is
/// preserved and nothing is deduplicated. Short rows simply produce records
/// without the trailing fields.
pub fn normalize_rows(header: &[String], rows: &[Vec<String>]) -> Vec<RunRecord> {
    rows.iter()
        .map(|row| {
            let fields = header
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), Value::parse(cell)))
                .collect::<IndexMap<String, Value>>();
            RunRecord { fields }
        })
        .collect()
}
