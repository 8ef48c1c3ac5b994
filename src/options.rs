//! Output form selection.
//!
//! Renderer choice is an explicit value passed to whatever produces output
//! (CLI dispatch, the tracing layer); there is no process-wide mutable
//! default. A process picks one form at startup and sticks with it.

use std::fmt;
use std::str::FromStr;

use crate::{output_json, output_plain, output_yaml, Error, Value};

/// The three output forms.
///
/// # Examples
///
/// ```rust
/// use serde_afd::{afd, OutputFormat};
///
/// let format: OutputFormat = "plain".parse().unwrap();
/// let value = afd!({"latency_ms": 42});
/// assert_eq!(format.render(&value), "latency=42ms");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Lossless single-line JSON for machine consumption.
    #[default]
    Json,
    /// Multi-line indented YAML for human reading.
    Yaml,
    /// Single-line logfmt for terminals and log scrapers.
    Plain,
}

impl OutputFormat {
    /// The flag spelling of this format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Plain => "plain",
        }
    }

    /// Renders a value in this format.
    #[must_use]
    pub fn render(&self, value: &Value) -> String {
        match self {
            OutputFormat::Json => output_json(value),
            OutputFormat::Yaml => output_yaml(value),
            OutputFormat::Plain => output_plain(value),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "plain" => Ok(OutputFormat::Plain),
            other => Err(Error::InvalidOutputFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afd;

    #[test]
    fn parse_known_formats() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(
            "plain".parse::<OutputFormat>().unwrap(),
            OutputFormat::Plain
        );
    }

    #[test]
    fn parse_rejects_unknown_and_mixed_case() {
        assert!("xml".parse::<OutputFormat>().is_err());
        assert!("JSON".parse::<OutputFormat>().is_err());
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("expected json, yaml, or plain"));
    }

    #[test]
    fn default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn render_dispatches() {
        let value = afd!({"n_ms": 42});
        assert_eq!(OutputFormat::Json.render(&value), r#"{"n_ms":42}"#);
        assert_eq!(OutputFormat::Yaml.render(&value), "---\nn: \"42ms\"");
        assert_eq!(OutputFormat::Plain.render(&value), "n=42ms");
    }
}
