//! Tracing export to a local OTLP/JSON file.
//!
//! ```text
//! tracing spans ─▶ tracing-opentelemetry ─▶ SDK provider ─▶ OtlpFileExporter ─▶ termfolio-otlp.json
//! ```
//!
//! The file lives in the plugin data directory (`/data/termfolio` in the
//! sandbox) and rotates at 10 MB, keeping three backups. The filter directive
//! comes from the `trace_level` configuration key.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
