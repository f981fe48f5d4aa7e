//! JSON implementation of the structured-text codec.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::config::Settings;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::TextCodec;

/// Writes compact or indented JSON; reads any JSON document.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    pretty: bool,
    indent: usize,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl JsonCodec {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: 0,
        }
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            pretty: true,
            indent,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pretty: settings.pretty,
            indent: settings.indent,
        }
    }
}

impl TextCodec for JsonCodec {
    fn serialize(&self, value: &Value) -> InfraResult<String> {
        if !self.pretty {
            return serde_json::to_string(value).map_err(|e| InfraError::codec("serialize", e));
        }
        let indent = " ".repeat(self.indent);
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        value
            .serialize(&mut ser)
            .map_err(|e| InfraError::codec("serialize", e))?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| InfraError::Encoding(e.to_string()))
    }

    fn deserialize(&self, text: &str) -> InfraResult<Value> {
        serde_json::from_str(text).map_err(|e| InfraError::codec("deserialize", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_uses_configured_indent() {
        let codec = JsonCodec::pretty(4);
        let text = codec.serialize(&json!({"Type": "Group"})).unwrap();
        assert_eq!(text, "{\n    \"Type\": \"Group\"\n}\n");
    }

    #[test]
    fn test_compact_output() {
        let codec = JsonCodec::compact();
        let text = codec.serialize(&json!({"Label": "x"})).unwrap();
        assert_eq!(text, r#"{"Label":"x"}"#);
    }

    #[test]
    fn test_deserialize_reports_syntax_errors() {
        let codec = JsonCodec::default();
        assert!(matches!(
            codec.deserialize("{\"Type\": "),
            Err(InfraError::Codec { .. })
        ));
    }
}
