//! Validation engine boundary
//!
//! The core composes validation as a [`Plan`] - a pure combinator tree built
//! from the builder surface (`and_then`, `or`, `catch`, presence checks and
//! the aggregate combinators). A [`ValidationEngine`] interprets plans; the
//! core never inspects how a predicate is implemented and engines are always
//! injected, never reached for through ambient state.
//!
//! Validation errors are collected, never thrown: a run completes with an
//! ordered, possibly empty error list, or fails outright with an engine-level
//! fault.

pub mod engine;

pub use engine::StandardEngine;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Unified message shape: a predicate name plus opaque details, so callers
/// can pattern-match without knowing individual predicate internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub name: String,
    #[serde(default)]
    pub details: Value,
}

impl ErrorMessage {
    pub fn new(name: impl Into<String>, details: Value) -> Self {
        Self {
            name: name.into(),
            details,
        }
    }
}

/// One validation failure with its segmented path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: Vec<String>,
    pub message: ErrorMessage,
}

impl ValidationError {
    pub fn new(path: Vec<String>, message: ErrorMessage) -> Self {
        Self { path, message }
    }

    /// Path segments joined with dots, e.g. `geo.lat`
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Leaf predicate identifiers. Implementations live behind the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Text,
    SingleLine,
    SingleWord,
    Number,
    Integer,
    Boolean,
    Anything,
    NonEmptyArray,
}

impl Predicate {
    /// The message name an engine reports when this predicate fails
    pub fn message_name(&self) -> &'static str {
        match self {
            Predicate::Text => "text",
            Predicate::SingleLine => "single-line",
            Predicate::SingleWord => "single-word",
            Predicate::Number => "number",
            Predicate::Integer => "integer",
            Predicate::Boolean => "boolean",
            Predicate::Anything => "anything",
            Predicate::NonEmptyArray => "non-empty",
        }
    }
}

/// A validation pipeline as data
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Check(Predicate),
    /// Run in order; stop at the first failing step
    Sequence(Vec<Plan>),
    /// Pass if any branch passes; when every branch fails the engine reports
    /// one bundled failure listing each branch's errors
    Either(Vec<Plan>),
    /// Replace the inner plan's failures with a single fixed message
    Catch(Box<Plan>, ErrorMessage),
    IsPresent,
    IsAbsent,
    /// Absent-or-inner. Behaviorally `or(is_absent, inner)`, with the
    /// bundled-failure shaping contract: when the value is present but
    /// invalid, the inner plan's failures are surfaced and the trivial
    /// "not absent" branch failure is discarded. Engines must honor this -
    /// getting it wrong causes spurious presence errors on
    /// present-but-invalid optional fields.
    Optional(Box<Plan>),
    /// The item plan runs against every element, with the index as a path
    /// segment
    Array(Box<Plan>),
    /// Each field plan runs against the member of the same key
    Object(Vec<(String, Plan)>),
    /// Like `Object`, but unknown keys are rejected
    StrictObject(Vec<(String, Plan)>),
}

impl Plan {
    pub fn check(predicate: Predicate) -> Plan {
        Plan::Check(predicate)
    }

    pub fn is_present() -> Plan {
        Plan::IsPresent
    }

    pub fn is_absent() -> Plan {
        Plan::IsAbsent
    }

    /// Sequence `self` then `next`, flattening nested sequences
    pub fn and_then(self, next: Plan) -> Plan {
        let mut steps = match self {
            Plan::Sequence(steps) => steps,
            other => vec![other],
        };
        match next {
            Plan::Sequence(mut rest) => steps.append(&mut rest),
            other => steps.push(other),
        }
        Plan::Sequence(steps)
    }

    /// Alternation: pass if either side passes
    pub fn or(self, alternative: Plan) -> Plan {
        let mut branches = match self {
            Plan::Either(branches) => branches,
            other => vec![other],
        };
        branches.push(alternative);
        Plan::Either(branches)
    }

    /// Map any failure of `self` to `message`
    pub fn catch(self, message: ErrorMessage) -> Plan {
        Plan::Catch(Box::new(self), message)
    }

    pub fn optional(inner: Plan) -> Plan {
        Plan::Optional(Box::new(inner))
    }

    pub fn array(item: Plan) -> Plan {
        Plan::Array(Box::new(item))
    }

    pub fn object(fields: Vec<(String, Plan)>) -> Plan {
        Plan::Object(fields)
    }

    pub fn strict_object(fields: Vec<(String, Plan)>) -> Plan {
        Plan::StrictObject(fields)
    }
}

/// Interprets validation plans.
///
/// `Ok` with an empty list means valid. `Err` is an engine-level fault and
/// carries no validation semantics. Result delivery is a single completed
/// value: no partial results, no cancellation, no internal retries.
pub trait ValidationEngine {
    fn run(&self, plan: &Plan, value: Option<&Value>) -> Result<Vec<ValidationError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{single_line, text};
    use serde_json::json;

    /// Scripted engine exercising the injected-capability seam.
    struct StubEngine {
        scripted: Vec<ValidationError>,
    }

    impl ValidationEngine for StubEngine {
        fn run(&self, _plan: &Plan, _value: Option<&Value>) -> Result<Vec<ValidationError>> {
            Ok(self.scripted.clone())
        }
    }

    #[test]
    fn test_validate_goes_through_injected_engine() {
        let engine = StubEngine {
            scripted: vec![ValidationError::new(
                vec!["hed".into()],
                ErrorMessage::new("single-line", Value::Null),
            )],
        };
        let node = single_line().required(true);
        let errors = node.validate(&engine, &json!("a\nb")).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].dotted_path(), "hed");
    }

    #[test]
    fn test_and_then_flattens() {
        let plan = Plan::is_present()
            .and_then(Plan::check(Predicate::Text))
            .and_then(Plan::check(Predicate::SingleLine));
        match plan {
            Plan::Sequence(steps) => assert_eq!(steps.len(), 3),
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_or_accumulates_branches() {
        let plan = Plan::is_absent()
            .or(Plan::check(Predicate::Text))
            .or(Plan::check(Predicate::Number));
        match plan {
            Plan::Either(branches) => assert_eq!(branches.len(), 3),
            other => panic!("expected either, got {:?}", other),
        }
    }

    #[test]
    fn test_required_node_plans_presence_first() {
        match text().required(true).validator() {
            Plan::Sequence(steps) => assert_eq!(steps[0], Plan::IsPresent),
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_node_plans_absent_or_inner() {
        assert!(matches!(text().validator(), Plan::Optional(_)));
    }
}
