//! Tracer provider backed by the OTLP/JSON file exporter.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::span_formatter::OtlpEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one OTLP/JSON line.
#[derive(Debug)]
struct OtlpFileExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    shut_down: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down {
            Err(TraceError::from("exporter already shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(format!("failed to write {}: {e}", self.file.path().display())))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.encoder.set_resource(resource.clone());
    }
}

/// A provider exporting every finished span synchronously to `path`.
///
/// The simple (unbatched) processor is used because the plugin runs on a
/// single thread with no async runtime to drive a batch processor.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(path, RotationPolicy::default()),
        encoder: OtlpEncoder::new(resource.clone()),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
