//! Parameter vectors, UI control descriptors and part colors
//!
//! A project's settings are a map from key to a small closed [`ParamValue`]
//! variant. Projects declare their controls as grouped descriptors; the core
//! reads them only to validate value types at the boundary. Ranges are
//! metadata for the host UI and are not enforced, since a uniform model
//! scale legitimately pushes values past them.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::Color;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    /// Length in centimetres, angle in degrees, or any other number
    Number(f64),
    /// On/off flag
    Bool(bool),
    /// One option of a select control
    Choice(String),
}

impl ParamValue {
    /// Numeric payload, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "number",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Choice(_) => "choice",
        }
    }

    fn same_kind(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Choice(v.to_string())
    }
}

/// A parameter vector: key to value, in key order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Settings {
    values: BTreeMap<String, ParamValue>,
}

impl Settings {
    /// Empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a value
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric value for `key`
    pub fn number(&self, key: &str) -> Result<f64> {
        match self.values.get(key) {
            Some(ParamValue::Number(v)) => Ok(*v),
            Some(_) => Err(Error::parameter_type(key, "number")),
            None => Err(Error::MissingParameter(key.to_string())),
        }
    }

    /// Numeric value that must be finite and non-negative
    pub fn dimension(&self, key: &str) -> Result<f64> {
        Error::check_dimension(key, self.number(key)?)
    }

    /// Boolean value for `key`
    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.values.get(key) {
            Some(ParamValue::Bool(v)) => Ok(*v),
            Some(_) => Err(Error::parameter_type(key, "boolean")),
            None => Err(Error::MissingParameter(key.to_string())),
        }
    }

    /// Choice value for `key`
    pub fn choice(&self, key: &str) -> Result<&str> {
        match self.values.get(key) {
            Some(ParamValue::Choice(v)) => Ok(v),
            Some(_) => Err(Error::parameter_type(key, "choice")),
            None => Err(Error::MissingParameter(key.to_string())),
        }
    }

    /// Copy with every numeric entry multiplied by `factor`
    ///
    /// Booleans and choices are left untouched.
    pub fn scaled(&self, factor: f64) -> Settings {
        let values = self
            .values
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    ParamValue::Number(n) => ParamValue::Number(n * factor),
                    other => other.clone(),
                };
                (k.clone(), v)
            })
            .collect();
        Settings { values }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Settings {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One option of a select control
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    /// Stored value
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

/// What kind of widget a control is
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Numeric slider
    Range {
        /// Lower slider bound
        min: f64,
        /// Upper slider bound
        max: f64,
        /// Slider step
        step: f64,
        /// Display unit, if not centimetres
        unit: Option<&'static str>,
    },
    /// Boolean switch
    Toggle,
    /// Pick one of a fixed set of options
    Select {
        /// Available options
        options: Vec<SelectOption>,
    },
}

/// UI control bound to one settings key
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Settings key
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Widget kind
    pub kind: ControlKind,
    /// Disable the control while another key holds the given choice
    pub disabled_when: Option<(&'static str, &'static str)>,
}

impl Control {
    /// Numeric slider
    pub fn range(key: &'static str, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Range {
                min,
                max,
                step,
                unit: None,
            },
            disabled_when: None,
        }
    }

    /// Boolean switch
    pub fn toggle(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Toggle,
            disabled_when: None,
        }
    }

    /// Select from `(value, label)` pairs
    pub fn select(
        key: &'static str,
        label: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            key,
            label,
            kind: ControlKind::Select {
                options: options
                    .iter()
                    .map(|&(value, label)| SelectOption { value, label })
                    .collect(),
            },
            disabled_when: None,
        }
    }

    /// Set the display unit of a range control
    pub fn unit(mut self, unit: &'static str) -> Self {
        if let ControlKind::Range { unit: u, .. } = &mut self.kind {
            *u = Some(unit);
        }
        self
    }

    /// Disable this control while `key` equals `value`
    pub fn disabled_when(mut self, key: &'static str, value: &'static str) -> Self {
        self.disabled_when = Some((key, value));
        self
    }

    /// Whether the control is currently disabled
    pub fn is_disabled(&self, settings: &Settings) -> bool {
        match self.disabled_when {
            Some((key, value)) => matches!(
                settings.get(key),
                Some(ParamValue::Choice(c)) if c.as_str() == value
            ),
            None => false,
        }
    }

    /// Check that `value` has the type this control edits
    pub fn accepts(&self, value: &ParamValue) -> Result<()> {
        match (&self.kind, value) {
            (ControlKind::Range { .. }, ParamValue::Number(n)) if n.is_finite() => Ok(()),
            (ControlKind::Range { .. }, ParamValue::Number(n)) => Err(Error::invalid_parameter(
                self.key,
                format!("must be finite, got {}", n),
            )),
            (ControlKind::Toggle, ParamValue::Bool(_)) => Ok(()),
            (ControlKind::Select { options }, ParamValue::Choice(c)) => {
                if options.iter().any(|o| o.value == c.as_str()) {
                    Ok(())
                } else {
                    let names: Vec<&str> = options.iter().map(|o| o.value).collect();
                    Err(Error::parameter_type(
                        self.key,
                        format!("one of [{}]", names.join(", ")),
                    ))
                }
            }
            (ControlKind::Range { .. }, _) => Err(Error::parameter_type(self.key, "number")),
            (ControlKind::Toggle, _) => Err(Error::parameter_type(self.key, "boolean")),
            (ControlKind::Select { .. }, _) => Err(Error::parameter_type(self.key, "choice")),
        }
    }
}

/// A titled section of controls
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGroup {
    /// Section title
    pub name: &'static str,
    /// Controls in display order
    pub controls: Vec<Control>,
}

impl ControlGroup {
    /// Create a group
    pub fn new(name: &'static str, controls: Vec<Control>) -> Self {
        Self { name, controls }
    }
}

/// Find the control bound to `key`
pub fn find_control<'a>(groups: &'a [ControlGroup], key: &str) -> Option<&'a Control> {
    groups
        .iter()
        .flat_map(|g| g.controls.iter())
        .find(|c| c.key == key)
}

/// Validate one key/value pair against a project's defaults and controls
///
/// The key must exist in `defaults`, the value must have the same variant
/// as the default, and a control bound to the key must accept it.
pub fn validate_value(
    defaults: &Settings,
    groups: &[ControlGroup],
    key: &str,
    value: &ParamValue,
) -> Result<()> {
    let default = defaults
        .get(key)
        .ok_or_else(|| Error::UnknownParameter(key.to_string()))?;
    if let Some(control) = find_control(groups, key) {
        return control.accepts(value);
    }
    if !default.same_kind(value) {
        return Err(Error::parameter_type(key, default.kind()));
    }
    if let ParamValue::Number(n) = value {
        if !n.is_finite() {
            return Err(Error::invalid_parameter(key, format!("must be finite, got {}", n)));
        }
    }
    Ok(())
}

/// Validate a whole settings map
pub fn validate_settings(
    defaults: &Settings,
    groups: &[ControlGroup],
    settings: &Settings,
) -> Result<()> {
    for (key, value) in settings.iter() {
        validate_value(defaults, groups, key, value)?;
    }
    for (key, _) in defaults.iter() {
        if settings.get(key).is_none() {
            return Err(Error::MissingParameter(key.to_string()));
        }
    }
    Ok(())
}

/// Per-part color assignments
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PartColors {
    colors: BTreeMap<String, Color>,
}

impl PartColors {
    /// No colors assigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `(part, "#rrggbb")` pairs
    pub fn from_hex(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut colors = Self::new();
        for &(part, hex) in pairs {
            colors.set(part, Color::from_hex(hex)?);
        }
        Ok(colors)
    }

    /// Assign a color
    pub fn set(&mut self, part: &str, color: Color) {
        self.colors.insert(part.to_string(), color);
    }

    /// Color for a part
    pub fn get(&self, part: &str) -> Option<Color> {
        self.colors.get(part).copied()
    }

    /// Color for a part, or `fallback` when unassigned
    pub fn get_or(&self, part: &str, fallback: Color) -> Color {
        self.get(part).unwrap_or(fallback)
    }

    /// Assign one color to every known part
    pub fn set_all(&mut self, color: Color) {
        for c in self.colors.values_mut() {
            *c = color;
        }
    }

    /// Whether the part has an assignment
    pub fn contains(&self, part: &str) -> bool {
        self.colors.contains_key(part)
    }

    /// Iterate over assignments in part-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
