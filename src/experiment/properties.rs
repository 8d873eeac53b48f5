//! Lab properties documents: a JSON object mapping run ids to run fields.

use super::{AttrValue, Run};
use crate::error::{ReportError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub(super) fn parse_runs(text: &str) -> Result<Vec<Run>> {
    let raw: BTreeMap<String, Map<String, Value>> = serde_json::from_str(text)?;
    let mut runs = Vec::with_capacity(raw.len());

    for (run_id, mut fields) in raw {
        let domain = take_string(&mut fields, "domain", &run_id)?;
        let problem = take_string(&mut fields, "problem", &run_id)?;
        let algorithm = take_string(&mut fields, "algorithm", &run_id)?;
        let mut run = Run::new(domain, problem, algorithm);

        for (name, value) in fields {
            if let Some(value) = attribute_value(&value) {
                run.attributes.insert(name, value);
            }
        }
        runs.push(run);
    }

    tracing::debug!(runs = runs.len(), "parsed properties");
    Ok(runs)
}

fn take_string(fields: &mut Map<String, Value>, field: &str, run_id: &str) -> Result<String> {
    match fields.remove(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ReportError::properties(format!(
            "run '{run_id}': field '{field}' must be a string, got {other}"
        ))),
        None => Err(ReportError::properties(format!(
            "run '{run_id}': missing field '{field}'"
        ))),
    }
}

/// `null`, arrays and objects count as unreported.
fn attribute_value(value: &Value) -> Option<AttrValue> {
    match value {
        Value::Bool(b) => Some(AttrValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(AttrValue::Int)
            .or_else(|| n.as_f64().map(AttrValue::Float)),
        Value::String(s) => Some(AttrValue::Text(s.clone())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
