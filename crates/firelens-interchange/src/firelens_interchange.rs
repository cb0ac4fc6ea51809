//! Firelens Interchange - exporting documents and batch field updates
//!
//! Documents export as JSON (one file per document or one combined array)
//! or as CSV with a header derived from the exported documents. Every
//! exported object carries `id` first followed by its fields sorted by name.
//!
//! ```rust,ignore
//! let payloads = build_payloads("users", &selected, ExportFormat::Json, ExportMode::PerDocument)?;
//! let paths = write_payloads(&downloads, &payloads).await?;
//! ```

mod batch;
mod csv_export;
mod error;
mod json_export;
mod payload;

pub use batch::BatchUpdate;
pub use csv_export::{csv_header, to_csv};
pub use error::ExportError;
pub use json_export::{to_json, to_json_combined, to_json_value};
pub use payload::{
    ExportFormat, ExportMode, ExportOptions, ExportPayload, build_payloads, build_payloads_with,
    sanitize_file_name, write_payloads,
};
