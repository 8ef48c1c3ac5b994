//! Tracing integration: a [`Layer`] that renders each log event through one
//! of the three output forms.
//!
//! Every event becomes one mapping with a millisecond timestamp, the macro's
//! message, the event target, the fields of every enclosing span (root to
//! leaf, children overriding parents), the event's own fields (overriding
//! span fields), and a `code` derived from the level unless the event set
//! one explicitly. The mapping then goes through the renderer chosen when
//! the layer was constructed; the format is fixed for the life of the layer
//! and never mixed within one process run.
//!
//! ```no_run
//! use serde_afd::{init_tracing, OutputFormat};
//! use tracing_subscriber::EnvFilter;
//!
//! init_tracing(OutputFormat::Plain, EnvFilter::new("info"));
//! tracing::info!(latency_ms = 42, "request served");
//! ```

use std::io::{self, Write};

use tracing::field::{Field, Visit};
use tracing::span;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::{Map, Number, OutputFormat, Value};

/// A tracing [`Layer`] that writes one rendered line (or YAML block) per
/// event to stdout.
pub struct AfdLayer {
    format: OutputFormat,
}

impl AfdLayer {
    /// Creates a layer rendering events in the given format.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        AfdLayer { format }
    }
}

/// Installs the global subscriber: an [`EnvFilter`] feeding an [`AfdLayer`]
/// in the given format.
///
/// [`EnvFilter`]: tracing_subscriber::EnvFilter
pub fn init_tracing(format: OutputFormat, filter: tracing_subscriber::EnvFilter) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(AfdLayer::new(format))
        .init();
}

/// Stored in span extensions to carry structured fields.
struct SpanFields(Vec<(String, Value)>);

impl<S> Layer<S> for AfdLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::new();
        attrs.record(&mut visitor);

        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(SpanFields(visitor.fields));
        }
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut visitor = FieldVisitor::new();
            values.record(&mut visitor);

            let mut extensions = span.extensions_mut();
            if let Some(existing) = extensions.get_mut::<SpanFields>() {
                existing.0.extend(visitor.fields);
            } else {
                extensions.insert(SpanFields(visitor.fields));
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let meta = event.metadata();

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let mut map = Map::with_capacity(4 + visitor.fields.len());
        map.insert(
            "timestamp_epoch_ms".to_string(),
            Value::from(chrono::Utc::now().timestamp_millis()),
        );
        if let Some(msg) = visitor.message.take() {
            map.insert("message".to_string(), Value::String(msg));
        }
        map.insert("target".to_string(), Value::from(meta.target()));

        // Span fields root to leaf; children override parents on collision.
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<SpanFields>() {
                    for (k, v) in &fields.0 {
                        map.insert(k.clone(), v.clone());
                    }
                }
            }
        }

        // Event fields override span fields.
        let mut has_code = false;
        for (k, v) in visitor.fields {
            if k == "code" {
                has_code = true;
            }
            map.insert(k, v);
        }
        if !has_code {
            map.insert(
                "code".to_string(),
                Value::from(level_code(meta.level())),
            );
        }

        let line = self.format.render(&Value::Object(map));

        let mut out = io::stdout().lock();
        let _ = out.write_all(line.as_bytes());
        let _ = out.write_all(b"\n");
    }
}

/// Status code derived from a level when the event carries no explicit
/// `code` field.
fn level_code(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Visitor collecting an event's fields into values.
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, Value)>,
}

impl FieldVisitor {
    fn new() -> Self {
        FieldVisitor {
            message: None,
            fields: Vec::new(),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let val = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(val);
        } else {
            self.fields.push((field.name().to_string(), Value::String(val)));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .push((field.name().to_string(), Value::from(value)));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.push((field.name().to_string(), Value::from(value)));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let number = if value <= i64::MAX as u64 {
            Number::Integer(value as i64)
        } else {
            Number::Float(value as f64)
        };
        self.fields
            .push((field.name().to_string(), Value::Number(number)));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.push((field.name().to_string(), Value::from(value)));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.push((field.name().to_string(), Value::from(value)));
    }
}
