//! Tracer provider that writes spans to a local JSON-lines file.
//!
//! The plugin has no network access worth relying on, so instead of an OTLP
//! network exporter the provider gets a [`JsonLinesExporter`]: every exported
//! batch is encoded by [`span_formatter`](super::span_formatter) and appended
//! as one line to a [`RotatingFile`].

use std::path::PathBuf;

use futures_util::future::{self, BoxFuture};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};

use super::file_writer::RotatingFile;
use super::span_formatter;

/// Span exporter appending OTLP JSON documents to a file.
#[derive(Debug)]
pub struct JsonLinesExporter {
    file: Option<RotatingFile>,
    resource: Resource,
}

impl JsonLinesExporter {
    #[must_use]
    pub fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            file: Some(RotatingFile::new(path)),
            resource,
        }
    }

    fn write_batch(&mut self, batch: &[SpanData]) -> ExportResult {
        let Some(file) = self.file.as_mut() else {
            return Err(TraceError::from("exporter is shut down"));
        };
        let line = span_formatter::encode_batch(&self.resource, batch).to_string();
        file.append_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        if let Some(mut file) = self.file.take() {
            file.close();
        }
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider exporting every finished span to `path` immediately.
#[must_use]
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(path, resource.clone());

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
