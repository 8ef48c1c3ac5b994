//! # serde_afd
//!
//! Suffix-driven self-describing output rendering for agent-facing tools.
//!
//! ## The idea
//!
//! Field names carry their own display semantics as trailing suffixes:
//! `latency_ms` is a duration in milliseconds, `size_bytes` is a byte count,
//! `api_key_secret` is sensitive. The renderers read those suffixes and
//! produce human-friendly values (`1.28s`, `5.0MB`, `***`) without any
//! external schema, while the machine form keeps every original key and raw
//! value (secrets excepted) for lossless consumption.
//!
//! ## Three output forms
//!
//! - **JSON** ([`output_json`]): single-line, lossless, secrets redacted,
//!   original keys. For pipes and other programs.
//! - **YAML** ([`output_yaml`]): multi-line, indented, keys stripped, values
//!   formatted. For humans reading structured output.
//! - **Plain** ([`output_plain`]): single-line logfmt with dot-path keys.
//!   For terminals and log scrapers.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_afd::{afd, output_json, output_plain, output_yaml};
//!
//! let event = afd!({
//!     "request": {"path": "/checkout", "latency_ms": 1280},
//!     "price_usd_cents": 1999,
//!     "api_key_secret": "sk-live-abc",
//! });
//!
//! assert_eq!(
//!     output_plain(&event),
//!     "api_key=*** price=$19.99 request.latency=1.28s request.path=/checkout"
//! );
//!
//! // The machine form keeps original keys and redacts only the secret
//! assert!(output_json(&event).contains(r#""api_key_secret":"***""#));
//! assert!(output_json(&event).contains(r#""latency_ms":1280"#));
//!
//! assert_eq!(
//!     output_yaml(&event),
//!     "---\n\
//!      api_key: \"***\"\n\
//!      price: \"$19.99\"\n\
//!      request:\n\
//!     \x20 latency: \"1.28s\"\n\
//!     \x20 path: \"/checkout\""
//! );
//! ```
//!
//! ## Serde integration
//!
//! Any `#[derive(Serialize)]` type converts through [`to_value`]:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_afd::{output_plain, to_value};
//!
//! #[derive(Serialize)]
//! struct Health {
//!     status: String,
//!     uptime_s: u64,
//!     mem_bytes: u64,
//! }
//!
//! let report = Health {
//!     status: "ok".to_string(),
//!     uptime_s: 86400,
//!     mem_bytes: 456_789_000,
//! };
//! let value = to_value(&report).unwrap();
//! assert_eq!(output_plain(&value), "mem=435.6MB status=ok uptime=86400s");
//! ```
//!
//! ## Logging
//!
//! [`init_tracing`] installs a `tracing` subscriber that renders every log
//! event through one of the three forms, chosen once at startup:
//!
//! ```no_run
//! use serde_afd::{init_tracing, OutputFormat};
//! use tracing_subscriber::EnvFilter;
//!
//! init_tracing(OutputFormat::Plain, EnvFilter::new("info"));
//! tracing::info!(latency_ms = 42, path = "/health", "request served");
//! ```
//!
//! ## Determinism
//!
//! Both human forms order sibling keys by UTF-16 code units (the JCS rule
//! from RFC 8785), so output is byte-identical across runs and across
//! implementations in other languages. The machine form preserves insertion
//! order instead.

pub mod cli;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod protocol;
pub mod redact;
pub mod render;
pub mod ser;
pub mod size;
pub mod suffix;
pub mod trace;
pub mod value;

pub use cli::{build_cli_error, parse_log_filters, parse_output};
pub use error::{Error, Result};
pub use map::Map;
pub use options::OutputFormat;
pub use protocol::{build_envelope, build_error, build_ok, build_startup};
pub use redact::{redact, redact_in_place};
pub use render::{output_json, output_plain, output_yaml};
pub use ser::{to_value, ValueSerializer};
pub use size::parse_size;
pub use suffix::{compare_keys, process_field, REDACTION_TOKEN};
pub use trace::{init_tracing, AfdLayer};
pub use value::{Number, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Transfer {
        file: String,
        sent_bytes: u64,
        elapsed_ms: u64,
        checksum_secret: String,
    }

    fn sample() -> Transfer {
        Transfer {
            file: "backup.tar".to_string(),
            sent_bytes: 5_242_880,
            elapsed_ms: 2500,
            checksum_secret: "d41d8cd9".to_string(),
        }
    }

    #[test]
    fn end_to_end_plain() {
        let value = to_value(&sample()).unwrap();
        assert_eq!(
            output_plain(&value),
            "checksum=*** elapsed=2.5s file=backup.tar sent=5.0MB"
        );
    }

    #[test]
    fn end_to_end_json_keeps_raw_values() {
        let value = to_value(&sample()).unwrap();
        assert_eq!(
            output_json(&value),
            r#"{"file":"backup.tar","sent_bytes":5242880,"elapsed_ms":2500,"checksum_secret":"***"}"#
        );
    }

    #[test]
    fn end_to_end_yaml() {
        let value = to_value(&sample()).unwrap();
        assert_eq!(
            output_yaml(&value),
            "---\nchecksum: \"***\"\nelapsed: \"2.5s\"\nfile: \"backup.tar\"\nsent: \"5.0MB\""
        );
    }
}
