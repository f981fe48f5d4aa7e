//! Non-fatal diagnostics channel
//!
//! Lenient parsers push a `Warning` here instead of failing. Every warning is
//! also emitted through `tracing::warn!`, so a caller that passes a throw-away
//! sink still sees it in the logs.

use std::fmt;

use tracing::warn;

/// A tolerated irregularity in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A decoded map contained a field the component does not know.
    UnrecognizedField {
        component: &'static str,
        field: String,
    },
    /// A name/value configuration list contained an unknown name.
    UnrecognizedOption {
        component: &'static str,
        name: String,
    },
    /// A geometry encoder omitted its `Type` and one was derived from its kind.
    InjectedDiscriminator { kind: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognizedField { component, field } => {
                write!(f, "{}: ignoring unrecognized field '{}'", component, field)
            }
            Warning::UnrecognizedOption { component, name } => {
                write!(f, "{}: ignoring unrecognized option '{}'", component, name)
            }
            Warning::InjectedDiscriminator { kind } => write!(
                f,
                "geometry encoding has no Type, injected '{}' from its runtime kind",
                kind
            ),
        }
    }
}

/// Collects warnings emitted while building, encoding or decoding.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// True if an unrecognized field or option with this name was reported.
    pub fn mentions(&self, name: &str) -> bool {
        self.warnings.iter().any(|w| match w {
            Warning::UnrecognizedField { field, .. } => field == name,
            Warning::UnrecognizedOption { name: n, .. } => n == name,
            Warning::InjectedDiscriminator { kind } => kind == name,
        })
    }
}
