use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt as tfmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Collects event fields into a JSON object, renaming our `event_*` fields to
/// their OpenTelemetry dotted names.
#[derive(Default)]
struct FieldCollector(Map<String, Value>);

impl FieldCollector {
    fn put(&mut self, field: &Field, value: Value) {
        let key = match field.name() {
            "event_name" => "event.name",
            "event_domain" => "event.domain",
            other => other,
        };
        self.0.insert(key.to_string(), value);
    }
}

impl Visit for FieldCollector {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.put(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.into());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value).into());
    }
}

/// One JSON object per event, shaped after the OTel log data model.
struct OtelJsonFormat {
    resource: Value,
}

impl OtelJsonFormat {
    fn new(config: &LoggingConfig) -> Self {
        let mut resource = Map::new();
        resource.insert("service.name".into(), config.service_name.clone().into());
        resource.insert(
            "service.version".into(),
            config.service_version.clone().into(),
        );
        Self {
            resource: Value::Object(resource),
        }
    }
}

fn severity_number(level: &Level) -> u64 {
    match *level {
        Level::TRACE => 1,
        Level::DEBUG => 5,
        Level::INFO => 9,
        Level::WARN => 13,
        Level::ERROR => 17,
    }
}

impl<S, N> FormatEvent<S, N> for OtelJsonFormat
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        let mut attributes = fields.0;

        let body = match attributes.remove("message") {
            Some(Value::String(message)) => message,
            _ => meta.name().to_string(),
        };
        attributes.insert("code.target".into(), meta.target().into());
        if let Some(file) = meta.file() {
            attributes.insert("code.filepath".into(), file.into());
        }
        if let Some(line) = meta.line() {
            attributes.insert("code.lineno".into(), line.into());
        }

        let record = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "severity_text": meta.level().as_str(),
            "severity_number": severity_number(meta.level()),
            "body": body,
            "resource": self.resource,
            "attributes": attributes,
        });
        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    match raw.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(format!(
            "Invalid logging.level '{}'. Valid values: trace, debug, info, warn, error",
            raw
        )),
    }
}

/// Installs the global tracing subscriber described by `logging`.
///
/// `format: json` gives OTel-aligned JSON lines; anything else gives the
/// pretty console output.
pub fn init_logging(logging: &LoggingConfig) -> Result<(), String> {
    let level = parse_level(&logging.level)?;
    let filter = EnvFilter::default().add_directive(level.into());

    let result = if logging.format.eq_ignore_ascii_case("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tfmt::layer().event_format(OtelJsonFormat::new(logging)))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tfmt::layer().pretty())
            .try_init()
    };
    result.map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}
