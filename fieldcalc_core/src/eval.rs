//! # Evaluation
//!
//! Turns one input snapshot into a normalized, ordered list of labeled result
//! values - or into a wholly unavailable result with a human-readable message.
//!
//! Two guarantees hold here:
//!
//! - **All-or-nothing**: either every value in the batch is finite
//!   ([`EvalStatus::Complete`]), or the batch collapses to a single
//!   non-finite primary and a message. No mixed valid/invalid batches.
//! - **Never panics**: every failure mode of a compute strategy is a
//!   [`CalcError`](crate::errors::CalcError) converted into a status, local
//!   to this one evaluation.

use crate::template::{ComputeOutput, InputValues, ResultSpec, ResultValue, Template};

/// Outcome class of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalStatus {
    /// Every result value is finite; save/copy may be enabled
    Complete,
    /// A bounded-partial template has fewer inputs than it needs; not an error
    AwaitingInput { needed: usize },
    /// Evaluation failed; `message` is ready to surface to the user
    Failed { message: String },
}

/// The normalized result of evaluating one template against one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Ordered, non-empty; first element is the primary result
    pub values: Vec<ResultValue>,
    pub status: EvalStatus,
}

impl Evaluation {
    pub fn is_complete(&self) -> bool {
        self.status == EvalStatus::Complete
    }

    /// Message to surface, if any
    pub fn message(&self) -> Option<String> {
        match &self.status {
            EvalStatus::Complete => None,
            EvalStatus::AwaitingInput { needed } => {
                Some(format!("awaiting {needed} more input(s)"))
            }
            EvalStatus::Failed { message } => Some(message.clone()),
        }
    }

    /// An unavailable result: single non-finite primary with the default
    /// label and unit.
    fn unavailable(spec: &ResultSpec, status: EvalStatus) -> Self {
        Evaluation {
            values: vec![ResultValue::new(&spec.label, f64::NAN, &spec.unit)],
            status,
        }
    }
}

/// Normalize a raw compute output into the ordered result list.
///
/// Closed, ordered dispatch; `Invalid` becomes a one-element non-finite list,
/// which the caller then reports as a total failure.
pub fn normalize(output: ComputeOutput, spec: &ResultSpec) -> Vec<ResultValue> {
    match output {
        ComputeOutput::Number(n) => vec![ResultValue::new(&spec.label, n, &spec.unit)],
        ComputeOutput::PrimaryWithOthers { primary, others } => {
            let mut values = Vec::with_capacity(1 + others.len());
            values.push(primary);
            values.extend(others);
            values
        }
        ComputeOutput::ValueWithExtras { value, extras } => {
            let mut values = Vec::with_capacity(1 + extras.len());
            values.push(ResultValue::new(&spec.label, value, &spec.unit));
            values.extend(extras);
            values
        }
        ComputeOutput::Invalid => vec![ResultValue::new(&spec.label, f64::NAN, &spec.unit)],
    }
}

const MSG_BAD_RESULT: &str = "computed result is out of range (check inputs)";

/// Evaluate a template against one parsed input snapshot.
///
/// Input-sufficiency policy, selected per template:
///
/// - **Strict** (`partial` false): every declared numeric input must be
///   present, otherwise evaluation fails without invoking compute.
/// - **Partial** (`partial` true): compute receives the present/absent map
///   and decides sufficiency itself.
/// - **Bounded-partial** (`max_inputs` set): exactly that many numeric inputs
///   must be present; fewer is a non-error awaiting state, more still
///   attempts compute but reports oversupply on failure.
pub fn evaluate(template: &Template, values: &InputValues) -> Evaluation {
    if let Some(max) = template.max_inputs {
        let present = template
            .inputs
            .iter()
            .filter(|f| f.is_numeric() && values.num(f.key).is_some())
            .count();
        if present < max {
            return Evaluation::unavailable(
                &template.result,
                EvalStatus::AwaitingInput {
                    needed: max - present,
                },
            );
        }
        if present > max {
            return match run_compute(template, values) {
                Ok(eval) => eval,
                Err(_) => Evaluation::unavailable(
                    &template.result,
                    EvalStatus::Failed {
                        message: format!(
                            "too many inputs supplied (enter exactly {max} of {total})",
                            total = template.numeric_input_count()
                        ),
                    },
                ),
            };
        }
    } else if !template.partial {
        let missing: Vec<&str> = template
            .inputs
            .iter()
            .filter(|f| f.is_numeric() && values.num(f.key).is_none())
            .map(|f| f.key)
            .collect();
        if !missing.is_empty() {
            return Evaluation::unavailable(
                &template.result,
                EvalStatus::Failed {
                    message: format!("missing or non-numeric field(s): {}", missing.join(", ")),
                },
            );
        }
    }

    match run_compute(template, values) {
        Ok(eval) => eval,
        Err(eval) => eval,
    }
}

/// Invoke the compute strategy and enforce the all-or-nothing invariant.
///
/// `Err` carries a ready-made failed evaluation so bounded-partial callers
/// can substitute their own message.
fn run_compute(template: &Template, values: &InputValues) -> Result<Evaluation, Evaluation> {
    let output = match (template.compute)(values) {
        Ok(output) => output,
        Err(e) => {
            return Err(Evaluation::unavailable(
                &template.result,
                EvalStatus::Failed {
                    message: e.to_string(),
                },
            ));
        }
    };

    let normalized = normalize(output, &template.result);
    let primary_ok = normalized
        .first()
        .map(|v| v.value.is_finite())
        .unwrap_or(false);
    let all_ok = primary_ok && normalized.iter().all(|v| v.value.is_finite());

    if !all_ok {
        return Err(Evaluation::unavailable(
            &template.result,
            EvalStatus::Failed {
                message: MSG_BAD_RESULT.to_string(),
            },
        ));
    }

    Ok(Evaluation {
        values: normalized,
        status: EvalStatus::Complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::template::{ComputeFn, Group, InputField, InputValues, ResultSpec};

    fn template_with(
        inputs: Vec<InputField>,
        partial: bool,
        max_inputs: Option<usize>,
        compute: ComputeFn,
    ) -> Template {
        Template {
            id: "t_test",
            group: Group::Coordinates,
            title: "Test".to_string(),
            description: String::new(),
            tags: vec![],
            inputs,
            partial,
            max_inputs,
            result: ResultSpec::new("out", "mm"),
            compute,
        }
    }

    #[test]
    fn test_normalize_bare_number() {
        let spec = ResultSpec::new("weight", "kg");
        let values = normalize(ComputeOutput::Number(15.4), &spec);
        assert_eq!(values, vec![ResultValue::new("weight", 15.4, "kg")]);
    }

    #[test]
    fn test_normalize_primary_with_others() {
        let spec = ResultSpec::new("a", "mm");
        let values = normalize(
            ComputeOutput::PrimaryWithOthers {
                primary: ResultValue::new("a", 1.0, "mm"),
                others: vec![ResultValue::new("b", 2.0, "mm")],
            },
            &spec,
        );
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].label, "a");
        assert_eq!(values[1].value, 2.0);
    }

    #[test]
    fn test_normalize_value_with_extras_takes_default_label() {
        let spec = ResultSpec::new("x'", "mm");
        let values = normalize(
            ComputeOutput::ValueWithExtras {
                value: 3.0,
                extras: vec![ResultValue::new("y'", 4.0, "mm")],
            },
            &spec,
        );
        assert_eq!(values[0].label, "x'");
        assert_eq!(values[0].value, 3.0);
        assert_eq!(values[1].label, "y'");
    }

    #[test]
    fn test_normalize_invalid_is_nonfinite_primary() {
        let spec = ResultSpec::new("out", "mm");
        let values = normalize(ComputeOutput::Invalid, &spec);
        assert_eq!(values.len(), 1);
        assert!(!values[0].value.is_finite());
    }

    #[test]
    fn test_strict_missing_field_blocks_compute() {
        let t = template_with(
            vec![InputField::numeric("x", "x"), InputField::numeric("y", "y")],
            false,
            None,
            Box::new(|_| panic!("compute must not run on missing strict input")),
        );
        let values = InputValues::new().with_num("x", 1.0);
        let eval = evaluate(&t, &values);
        assert!(!eval.is_complete());
        assert_eq!(
            eval.message().unwrap(),
            "missing or non-numeric field(s): y"
        );
        assert!(!eval.values[0].value.is_finite());
    }

    #[test]
    fn test_partial_passes_absent_through() {
        let t = template_with(
            vec![InputField::numeric("x", "x"), InputField::numeric("y", "y")],
            true,
            None,
            Box::new(|v| match v.num("x") {
                Some(x) => Ok(ComputeOutput::Number(x * 2.0)),
                None => Err(CalcError::geometry("x is required")),
            }),
        );
        let eval = evaluate(&t, &InputValues::new().with_num("x", 4.0));
        assert!(eval.is_complete());
        assert_eq!(eval.values[0].value, 8.0);

        let eval = evaluate(&t, &InputValues::new().with_num("y", 4.0));
        assert_eq!(eval.message().unwrap(), "Geometry error: x is required");
    }

    #[test]
    fn test_bounded_partial_awaiting_is_not_an_error() {
        let t = template_with(
            vec![
                InputField::numeric("a", "a"),
                InputField::numeric("b", "b"),
                InputField::numeric("c", "c"),
            ],
            true,
            Some(2),
            Box::new(|_| Ok(ComputeOutput::Number(1.0))),
        );
        let eval = evaluate(&t, &InputValues::new().with_num("a", 1.0));
        assert_eq!(eval.status, EvalStatus::AwaitingInput { needed: 1 });
        assert!(!eval.values[0].value.is_finite());
    }

    #[test]
    fn test_bounded_partial_oversupply_reports_too_many() {
        let t = template_with(
            vec![
                InputField::numeric("a", "a"),
                InputField::numeric("b", "b"),
                InputField::numeric("c", "c"),
            ],
            true,
            Some(2),
            Box::new(|_| Err(CalcError::geometry("over-determined"))),
        );
        let values = InputValues::new()
            .with_num("a", 1.0)
            .with_num("b", 2.0)
            .with_num("c", 3.0);
        let eval = evaluate(&t, &values);
        assert_eq!(
            eval.message().unwrap(),
            "too many inputs supplied (enter exactly 2 of 3)"
        );
    }

    #[test]
    fn test_bounded_partial_oversupply_still_attempts_compute() {
        let t = template_with(
            vec![
                InputField::numeric("a", "a"),
                InputField::numeric("b", "b"),
                InputField::numeric("c", "c"),
            ],
            true,
            Some(2),
            Box::new(|_| Ok(ComputeOutput::Number(7.0))),
        );
        let values = InputValues::new()
            .with_num("a", 1.0)
            .with_num("b", 2.0)
            .with_num("c", 3.0);
        let eval = evaluate(&t, &values);
        assert!(eval.is_complete());
        assert_eq!(eval.values[0].value, 7.0);
    }

    #[test]
    fn test_all_or_nothing_on_nonfinite_secondary() {
        let t = template_with(
            vec![InputField::numeric("x", "x")],
            false,
            None,
            Box::new(|_| {
                Ok(ComputeOutput::PrimaryWithOthers {
                    primary: ResultValue::new("a", 1.0, "mm"),
                    others: vec![ResultValue::new("b", f64::NAN, "mm")],
                })
            }),
        );
        let eval = evaluate(&t, &InputValues::new().with_num("x", 1.0));
        assert!(!eval.is_complete());
        assert_eq!(eval.values.len(), 1);
        assert!(!eval.values[0].value.is_finite());
        assert_eq!(eval.message().unwrap(), MSG_BAD_RESULT);
    }

    #[test]
    fn test_invalid_output_reports_generic_failure_without_panicking() {
        let t = template_with(
            vec![InputField::numeric("x", "x")],
            false,
            None,
            Box::new(|_| Ok(ComputeOutput::Invalid)),
        );
        let eval = evaluate(&t, &InputValues::new().with_num("x", 1.0));
        assert!(!eval.is_complete());
        assert!(!eval.values[0].value.is_finite());
        assert_eq!(eval.message().unwrap(), MSG_BAD_RESULT);
    }
}
