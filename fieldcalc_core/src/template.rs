//! # Template Descriptors
//!
//! The declarative formula descriptor and the compute contract it carries.
//! A [`Template`] is pure data plus one pure compute strategy; the catalog
//! module builds the fixed set of them, and [`crate::eval`] runs them.
//!
//! The descriptor shape is the stable contract between formula authors and
//! the generic validation/normalization/display layers: once an `id` is
//! published it never changes, because it keys favorites, history, and
//! last-input records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::parse_number;

/// Fixed display groups, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Weight,
    Machining,
    Coordinates,
}

impl Group {
    /// All groups in display order
    pub const ALL: [Group; 3] = [Group::Weight, Group::Machining, Group::Coordinates];

    pub fn title(&self) -> &'static str {
        match self {
            Group::Weight => "Weight",
            Group::Machining => "Machining",
            Group::Coordinates => "Coordinates",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One choice in a selection input (e.g. a material code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stable choice code handed to the compute strategy (e.g. "SS")
    pub code: String,
    /// Display label (e.g. "SS (steel)")
    pub label: String,
}

impl SelectOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// What kind of field an input is.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    /// Free-text numeric entry
    Numeric,
    /// Enumerated choice from a fixed options list
    Select { options: Vec<SelectOption> },
}

/// Declarative descriptor for one input field.
///
/// `key` doubles as the form field name and the formula variable name; it is
/// unique within a template.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub key: &'static str,
    pub label: String,
    pub hint: Option<String>,
    /// Pre-filled raw text (numeric fields) or choice code (select fields)
    pub default: Option<String>,
    pub kind: InputKind,
}

impl InputField {
    /// A numeric free-text field
    pub fn numeric(key: &'static str, label: impl Into<String>) -> Self {
        InputField {
            key,
            label: label.into(),
            hint: None,
            default: None,
            kind: InputKind::Numeric,
        }
    }

    /// A fixed-choice field defaulting to `default_code`
    pub fn select(
        key: &'static str,
        label: impl Into<String>,
        options: Vec<SelectOption>,
        default_code: &str,
    ) -> Self {
        InputField {
            key,
            label: label.into(),
            hint: None,
            default: Some(default_code.to_string()),
            kind: InputKind::Select { options },
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, InputKind::Numeric)
    }
}

/// A parsed input value as seen by a compute strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// A successfully parsed number
    Number(f64),
    /// A selected option code
    Choice(String),
    /// No parseable value (empty or garbage text) - never coerced to zero
    Absent,
}

/// Snapshot of parsed inputs for one evaluation, keyed by field key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputValues(BTreeMap<String, InputValue>);

impl InputValues {
    pub fn new() -> Self {
        InputValues(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: InputValue) {
        self.0.insert(key.into(), value);
    }

    /// Builder-style numeric entry (mainly for tests and embedding callers)
    pub fn with_num(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, InputValue::Number(value));
        self
    }

    /// Builder-style choice entry
    pub fn with_choice(mut self, key: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(key, InputValue::Choice(code.into()));
        self
    }

    /// Numeric value of a field, or `None` when absent or a choice
    pub fn num(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(InputValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value of a field, erroring when absent
    pub fn require(&self, key: &str) -> CalcResult<f64> {
        self.num(key).ok_or_else(|| CalcError::missing_inputs([key]))
    }

    /// Selected option code of a field, or `None`
    pub fn choice(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(InputValue::Choice(c)) => Some(c.as_str()),
            _ => None,
        }
    }
}

/// One labeled, unit-tagged numeric result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultValue {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

impl ResultValue {
    pub fn new(label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        ResultValue {
            label: label.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Default label and unit used when a compute strategy returns a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSpec {
    pub label: String,
    pub unit: String,
}

impl ResultSpec {
    pub fn new(label: impl Into<String>, unit: impl Into<String>) -> Self {
        ResultSpec {
            label: label.into(),
            unit: unit.into(),
        }
    }
}

/// The raw output of a compute strategy, before normalization.
///
/// A closed tagged union instead of shape-sniffing: the normalization
/// dispatch in [`crate::eval::normalize`] matches it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeOutput {
    /// A single bare number; takes the template's default label/unit
    Number(f64),
    /// A named primary value plus supplementary labeled values
    PrimaryWithOthers {
        primary: ResultValue,
        others: Vec<ResultValue>,
    },
    /// A bare primary number (default label/unit) plus labeled extras
    ValueWithExtras { value: f64, extras: Vec<ResultValue> },
    /// Explicitly unusable output; normalizes to a non-finite primary
    Invalid,
}

/// A compute strategy: pure, deterministic, side-effect-free.
///
/// Boxed so catalog builders can capture settings (e.g. a default density)
/// at registry-construction time.
pub type ComputeFn = Box<dyn Fn(&InputValues) -> CalcResult<ComputeOutput> + Send + Sync>;

/// A declarative formula descriptor.
pub struct Template {
    /// Stable unique identifier; storage and lookup key
    pub id: &'static str,
    pub group: Group,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Ordered input field descriptors
    pub inputs: Vec<InputField>,
    /// When true, the generic layer skips field-presence checks and the
    /// compute strategy decides which supplied combinations are sufficient
    pub partial: bool,
    /// When set, the evaluation layer requires exactly this many numeric
    /// inputs to be present before compute is invoked
    pub max_inputs: Option<usize>,
    pub result: ResultSpec,
    pub compute: ComputeFn,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("group", &self.group)
            .field("title", &self.title)
            .field("partial", &self.partial)
            .field("max_inputs", &self.max_inputs)
            .finish_non_exhaustive()
    }
}

impl Template {
    /// Number of declared numeric (non-selection) inputs
    pub fn numeric_input_count(&self) -> usize {
        self.inputs.iter().filter(|f| f.is_numeric()).count()
    }

    /// Does the free-text search string match this template's metadata?
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        let hay = format!(
            "{} {} {} {}",
            self.title,
            self.description,
            self.group,
            self.tags.join(" ")
        )
        .to_lowercase();
        hay.contains(&q)
    }
}

/// Parse raw as-typed field text into the value snapshot a compute call gets.
///
/// Numeric fields go through [`parse_number`]; anything unparseable is
/// `Absent`. Select fields pass the raw choice code through, falling back to
/// the field default (then the first declared option) when blank.
pub fn parse_inputs(template: &Template, raw: &BTreeMap<String, String>) -> InputValues {
    let mut values = InputValues::new();
    for field in &template.inputs {
        let text = raw.get(field.key).map(String::as_str).unwrap_or("");
        match &field.kind {
            InputKind::Numeric => {
                let value = match parse_number(text) {
                    Some(v) => InputValue::Number(v),
                    None => InputValue::Absent,
                };
                values.insert(field.key, value);
            }
            InputKind::Select { options } => {
                let code = if !text.trim().is_empty() {
                    text.trim().to_string()
                } else if let Some(default) = &field.default {
                    default.clone()
                } else {
                    options.first().map(|o| o.code.clone()).unwrap_or_default()
                };
                values.insert(field.key, InputValue::Choice(code));
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_template() -> Template {
        Template {
            id: "t_sum",
            group: Group::Machining,
            title: "Sum".to_string(),
            description: "x + y".to_string(),
            tags: vec!["demo".to_string()],
            inputs: vec![
                InputField::numeric("x", "x").with_default("1"),
                InputField::numeric("y", "y"),
                InputField::select(
                    "mat",
                    "Material",
                    vec![
                        SelectOption::new("SS", "SS (steel)"),
                        SelectOption::new("AL", "AL (aluminum)"),
                    ],
                    "SS",
                ),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("sum", "mm"),
            compute: Box::new(|v| {
                Ok(ComputeOutput::Number(v.require("x")? + v.require("y")?))
            }),
        }
    }

    #[test]
    fn test_parse_inputs_numeric_and_absent() {
        let t = sample_template();
        let mut raw = BTreeMap::new();
        raw.insert("x".to_string(), "1,500".to_string());
        raw.insert("y".to_string(), "12abc".to_string());

        let values = parse_inputs(&t, &raw);
        assert_eq!(values.num("x"), Some(1500.0));
        assert_eq!(values.num("y"), None);
        assert!(values.require("y").is_err());
    }

    #[test]
    fn test_parse_inputs_select_default() {
        let t = sample_template();
        let raw = BTreeMap::new();
        let values = parse_inputs(&t, &raw);
        assert_eq!(values.choice("mat"), Some("SS"));

        let mut raw = BTreeMap::new();
        raw.insert("mat".to_string(), "AL".to_string());
        let values = parse_inputs(&t, &raw);
        assert_eq!(values.choice("mat"), Some("AL"));
    }

    #[test]
    fn test_numeric_input_count_excludes_selects() {
        let t = sample_template();
        assert_eq!(t.numeric_input_count(), 2);
    }

    #[test]
    fn test_matches_query() {
        let t = sample_template();
        assert!(t.matches_query("sum"));
        assert!(t.matches_query("DEMO"));
        assert!(t.matches_query(""));
        assert!(!t.matches_query("triangle"));
    }

    #[test]
    fn test_group_order_and_titles() {
        let titles: Vec<_> = Group::ALL.iter().map(|g| g.title()).collect();
        assert_eq!(titles, vec!["Weight", "Machining", "Coordinates"]);
    }
}
