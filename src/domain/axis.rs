//! Viewport axis descriptor
//!
//! Independent of the node tree. Parsing is lenient: unknown option names and
//! unknown decoded fields are reported as warnings and ignored.

use serde_json::{json, Map, Value};
use tracing::instrument;

use crate::domain::diagnostics::{Diagnostics, Warning};
use crate::domain::error::DomainResult;
use crate::domain::fields::{normalize_fields, read_array, read_bool, read_string};
use crate::domain::params::Param;

const COMPONENT: &str = "SceneAxis";
const FIELDS: [&str; 3] = ["Limits", "Reverse", "Label"];

#[derive(Debug, Clone, PartialEq)]
pub struct SceneAxis {
    /// `(min, max)`, default `(0, 1)`
    pub limits: (f64, f64),
    pub reverse: bool,
    pub label: String,
}

impl Default for SceneAxis {
    fn default() -> Self {
        Self {
            limits: (0.0, 1.0),
            reverse: false,
            label: String::new(),
        }
    }
}

impl SceneAxis {
    /// Builds an axis from `limits`, `reverse` and `label` options.
    ///
    /// Unknown names are reported and skipped. A recognized name with a value
    /// of the wrong kind is still an argument error.
    pub fn new(params: &[(&str, Param)], diag: &mut Diagnostics) -> DomainResult<Self> {
        let mut axis = Self::default();
        for (name, value) in params {
            match name.to_ascii_lowercase().as_str() {
                "limits" => axis.limits = value.as_range(name)?,
                "reverse" => axis.reverse = value.as_flag(name)?,
                "label" => axis.label = value.as_text(name)?.to_string(),
                _ => diag.push(Warning::UnrecognizedOption {
                    component: COMPONENT,
                    name: name.to_string(),
                }),
            }
        }
        Ok(axis)
    }

    pub fn with_limits(min: f64, max: f64) -> Self {
        Self {
            limits: (min, max),
            ..Self::default()
        }
    }

    pub fn encode(&self) -> Map<String, Value> {
        let defaults = Self::default();
        let mut map = Map::new();
        if self.limits != defaults.limits {
            map.insert("Limits".to_string(), json!([self.limits.0, self.limits.1]));
        }
        if self.reverse {
            map.insert("Reverse".to_string(), Value::from(true));
        }
        if !self.label.is_empty() {
            map.insert("Label".to_string(), Value::from(self.label.as_str()));
        }
        map
    }

    pub fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        Self::decode_with(map, &mut Diagnostics::new())
    }

    #[instrument(level = "debug", skip_all)]
    pub fn decode_with(map: &Map<String, Value>, diag: &mut Diagnostics) -> DomainResult<Self> {
        let map = normalize_fields(map, &FIELDS, COMPONENT, diag);
        let mut axis = Self::default();
        if let Some([min, max]) = read_array::<2>(&map, "Limits")? {
            axis.limits = (min, max);
        }
        if let Some(reverse) = read_bool(&map, "Reverse")? {
            axis.reverse = reverse;
        }
        if let Some(label) = read_string(&map, "Label")? {
            axis.label = label;
        }
        Ok(axis)
    }
}
