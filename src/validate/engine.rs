//! Standard plan interpreter
//!
//! Walks a [`Plan`] against a wire value, collecting every failure rather
//! than stopping at the first. Regexes for the refined text predicates are
//! compiled once at construction.

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::validate::{ErrorMessage, Plan, Predicate, ValidationEngine, ValidationError};

/// Absence on the wire: a missing key or an explicit null.
fn absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// The built-in validation engine
pub struct StandardEngine {
    line_break: Regex,
    whitespace: Regex,
}

impl StandardEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            line_break: Regex::new(r"[\r\n]").map_err(|e| SchemaError::Engine(e.to_string()))?,
            whitespace: Regex::new(r"\s").map_err(|e| SchemaError::Engine(e.to_string()))?,
        })
    }

    fn exec(
        &self,
        plan: &Plan,
        value: Option<&Value>,
        path: &mut Vec<String>,
        out: &mut Vec<ValidationError>,
    ) -> Result<()> {
        match plan {
            Plan::Check(predicate) => {
                if let Some(message) = self.check(*predicate, value) {
                    out.push(ValidationError::new(path.clone(), message));
                }
            }

            Plan::Sequence(steps) => {
                for step in steps {
                    let mut step_errors = Vec::new();
                    self.exec(step, value, path, &mut step_errors)?;
                    if !step_errors.is_empty() {
                        out.append(&mut step_errors);
                        break;
                    }
                }
            }

            Plan::Either(branches) => {
                let mut failed = Vec::with_capacity(branches.len());
                for branch in branches {
                    let mut branch_errors = Vec::new();
                    self.exec(branch, value, path, &mut branch_errors)?;
                    if branch_errors.is_empty() {
                        return Ok(());
                    }
                    failed.push(branch_errors);
                }
                out.push(ValidationError::new(
                    path.clone(),
                    ErrorMessage::new("either", serde_json::to_value(&failed)?),
                ));
            }

            Plan::Catch(inner, message) => {
                let mut inner_errors = Vec::new();
                self.exec(inner, value, path, &mut inner_errors)?;
                if !inner_errors.is_empty() {
                    out.push(ValidationError::new(path.clone(), message.clone()));
                }
            }

            Plan::IsPresent => {
                if absent(value) {
                    out.push(ValidationError::new(
                        path.clone(),
                        ErrorMessage::new("required", Value::Null),
                    ));
                }
            }

            Plan::IsAbsent => {
                if !absent(value) {
                    out.push(ValidationError::new(
                        path.clone(),
                        ErrorMessage::new("absent", value.cloned().unwrap_or(Value::Null)),
                    ));
                }
            }

            // or(is_absent, inner), with the bundled-failure shaping applied:
            // when both branches would fail, the inner plan's failures are
            // surfaced and the trivial "not absent" failure is discarded.
            Plan::Optional(inner) => {
                if !absent(value) {
                    self.exec(inner, value, path, out)?;
                }
            }

            Plan::Array(item) => match value {
                Some(Value::Array(items)) => {
                    for (index, element) in items.iter().enumerate() {
                        path.push(index.to_string());
                        self.exec(item, Some(element), path, out)?;
                        path.pop();
                    }
                }
                other => out.push(ValidationError::new(
                    path.clone(),
                    ErrorMessage::new("array", other.cloned().unwrap_or(Value::Null)),
                )),
            },

            Plan::Object(fields) => match value {
                Some(Value::Object(map)) => {
                    for (key, plan) in fields {
                        path.push(key.clone());
                        self.exec(plan, map.get(key), path, out)?;
                        path.pop();
                    }
                }
                other => out.push(ValidationError::new(
                    path.clone(),
                    ErrorMessage::new("object", other.cloned().unwrap_or(Value::Null)),
                )),
            },

            Plan::StrictObject(fields) => match value {
                Some(Value::Object(map)) => {
                    for (key, plan) in fields {
                        path.push(key.clone());
                        self.exec(plan, map.get(key), path, out)?;
                        path.pop();
                    }
                    for key in map.keys() {
                        if !fields.iter().any(|(k, _)| k == key) {
                            path.push(key.clone());
                            out.push(ValidationError::new(
                                path.clone(),
                                ErrorMessage::new("unknown-key", Value::Null),
                            ));
                            path.pop();
                        }
                    }
                }
                other => out.push(ValidationError::new(
                    path.clone(),
                    ErrorMessage::new("object", other.cloned().unwrap_or(Value::Null)),
                )),
            },
        }
        Ok(())
    }

    fn check(&self, predicate: Predicate, value: Option<&Value>) -> Option<ErrorMessage> {
        let fail = |value: Option<&Value>| {
            Some(ErrorMessage::new(
                predicate.message_name(),
                value.cloned().unwrap_or(Value::Null),
            ))
        };
        match predicate {
            Predicate::Anything => None,

            Predicate::Text => match value {
                Some(Value::String(_)) => None,
                other => fail(other),
            },

            Predicate::SingleLine => match value {
                Some(Value::String(s)) if !self.line_break.is_match(s) => None,
                other => fail(other),
            },

            Predicate::SingleWord => match value {
                Some(Value::String(s)) if !self.whitespace.is_match(s) => None,
                other => fail(other),
            },

            Predicate::Number => match value {
                Some(v) if v.is_number() => None,
                other => fail(other),
            },

            Predicate::Integer => match value {
                Some(v) if v.is_i64() || v.is_u64() => None,
                other => fail(other),
            },

            Predicate::Boolean => match value {
                Some(Value::Bool(_)) => None,
                other => fail(other),
            },

            // Non-arrays are the array combinator's failure to report.
            Predicate::NonEmptyArray => match value {
                Some(Value::Array(items)) if items.is_empty() => fail(value),
                _ => None,
            },
        }
    }
}

impl ValidationEngine for StandardEngine {
    fn run(&self, plan: &Plan, value: Option<&Value>) -> Result<Vec<ValidationError>> {
        let mut out = Vec::new();
        self.exec(plan, value, &mut Vec::new(), &mut out)?;
        Ok(out)
    }
}
