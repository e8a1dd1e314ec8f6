//! Defensive navigation of raw report payloads.
//!
//! A payload is nominally `{response: {result: [{reportData: ...}]}}`, but
//! `reportData` is a map of named row lists for some reports and a bare row
//! list for others, and any level may be missing. Paths are described as
//! sequences of [`Step`]s; [`resolve`] tries several candidate paths in order
//! and returns the first that lands on a value.

use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

/// One hop through a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Member of an object.
    Key(&'static str),
    /// Element of an array.
    Index(usize),
    /// First element of an array.
    First,
    /// First non-empty array among an object's values, in document order.
    FirstListValue,
}

impl Step {
    fn apply<'a>(self, value: &'a Value) -> Option<&'a Value> {
        match self {
            Step::Key(key) => value.as_object()?.get(key),
            Step::Index(index) => value.as_array()?.get(index),
            Step::First => value.as_array()?.first(),
            Step::FirstListValue => value
                .as_object()?
                .values()
                .find(|entry| entry.as_array().is_some_and(|rows| !rows.is_empty())),
        }
    }
}

/// Follows `path` from `root`; `None` as soon as a hop fails. Explicit JSON
/// `null` counts as not found.
pub fn follow<'a>(root: &'a Value, path: &[Step]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, step| step.apply(current))
        .filter(|value| !value.is_null())
}

/// First candidate path that resolves.
pub fn resolve<'a>(root: &'a Value, candidates: &[&[Step]]) -> Option<&'a Value> {
    candidates.iter().find_map(|path| follow(root, path))
}

const REPORT_DATA: &[Step] = &[
    Step::Key("response"),
    Step::Key("result"),
    Step::First,
    Step::Key("reportData"),
];

/// `response.result[0].reportData`, or `None` when any level is absent.
pub fn report_data(payload: &Value) -> Option<&Value> {
    follow(payload, REPORT_DATA)
}

/// First row of the first named section present, e.g. `["property_pulse",
/// "pulse"]`. Sections that are missing or empty fall through to the next
/// name.
pub fn first_row_of<'a>(report: Option<&'a Value>, sections: &[&'static str]) -> Option<&'a Row> {
    let report = report?;
    sections
        .iter()
        .find_map(|section| follow(report, &[Step::Key(*section), Step::First]))
        .and_then(Value::as_object)
}

/// First row of a report whose data is either a bare row list or a map
/// holding row lists under arbitrary names.
pub fn first_row_any_shape(report: Option<&Value>) -> Option<&Row> {
    let report = report?;
    resolve(
        report,
        &[&[Step::First], &[Step::FirstListValue, Step::First]],
    )
    .and_then(Value::as_object)
}

/// Every row of a list-shaped report. Anything else reads as no rows.
pub fn all_rows(report: Option<&Value>) -> &[Value] {
    report
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Reads `key` from an optional row.
pub fn field<'a>(row: Option<&'a Row>, key: &str) -> Option<&'a Value> {
    row?.get(key).filter(|value| !value.is_null())
}
