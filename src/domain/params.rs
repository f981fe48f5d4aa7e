//! Name/value configuration pairs
//!
//! Constructors of `Style`, `ShapeNode` and `SceneAxis` accept a slice of
//! `(name, Param)` pairs. Each component decides how strict it is about
//! unknown names.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::style::Style;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Flag(bool),
    Number(f64),
    Range(f64, f64),
    Color([f64; 3]),
    Style(Style),
}

impl Param {
    fn type_name(&self) -> &'static str {
        match self {
            Param::Text(_) => "text",
            Param::Flag(_) => "flag",
            Param::Number(_) => "number",
            Param::Range(..) => "range",
            Param::Color(_) => "color",
            Param::Style(_) => "style",
        }
    }

    fn mismatch(&self, name: &str, expected: &str) -> DomainError {
        DomainError::argument(format!(
            "'{}' expects a {} value, got {}",
            name,
            expected,
            self.type_name()
        ))
    }

    pub fn as_text(&self, name: &str) -> DomainResult<&str> {
        match self {
            Param::Text(s) => Ok(s),
            other => Err(other.mismatch(name, "text")),
        }
    }

    pub fn as_flag(&self, name: &str) -> DomainResult<bool> {
        match self {
            Param::Flag(b) => Ok(*b),
            other => Err(other.mismatch(name, "flag")),
        }
    }

    pub fn as_number(&self, name: &str) -> DomainResult<f64> {
        match self {
            Param::Number(n) => Ok(*n),
            other => Err(other.mismatch(name, "number")),
        }
    }

    pub fn as_range(&self, name: &str) -> DomainResult<(f64, f64)> {
        match self {
            Param::Range(lo, hi) => Ok((*lo, *hi)),
            other => Err(other.mismatch(name, "range")),
        }
    }

    pub fn as_color(&self, name: &str) -> DomainResult<[f64; 3]> {
        match self {
            Param::Color(c) => Ok(*c),
            other => Err(other.mismatch(name, "color")),
        }
    }

    pub fn as_style(&self, name: &str) -> DomainResult<&Style> {
        match self {
            Param::Style(s) => Ok(s),
            other => Err(other.mismatch(name, "style")),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Flag(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(value)
    }
}

impl From<(f64, f64)> for Param {
    fn from((lo, hi): (f64, f64)) -> Self {
        Param::Range(lo, hi)
    }
}

impl From<[f64; 2]> for Param {
    fn from([lo, hi]: [f64; 2]) -> Self {
        Param::Range(lo, hi)
    }
}

impl From<[f64; 3]> for Param {
    fn from(value: [f64; 3]) -> Self {
        Param::Color(value)
    }
}

impl From<Style> for Param {
    fn from(value: Style) -> Self {
        Param::Style(value)
    }
}
