//! Result tables written after a run.
//!
//! File names and column headers are fixed so downstream tools (spreadsheets,
//! the dashboard) can find them:
//!
//! | file                      | columns                                   |
//! |---------------------------|-------------------------------------------|
//! | `errores_completos.csv`   | Fecha, Estado, Caja, Modulo, Flujo, Mensaje |
//! | `advertencias.csv`        | same as above, `WRN` records              |
//! | `estadistica_estados.csv` | Estado, Cantidad, Porcentaje              |
//! | `cantidad_por_caja.csv`   | Caja, Cantidad                            |
//! | `errores_por_caja.csv`    | Caja, Modulo, Flujo                       |
//! | `resumen.json`            | run summary                               |

mod json;
mod tables;

pub use self::tables::{
    write_box_counts, write_error_locations, write_records, write_state_table, BOX_COUNT_HEADER,
    LOCATION_HEADER, RECORD_HEADER, STATE_HEADER,
};
pub use self::json::{summary_json, SummaryDocument};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::ingest::RunSummary;

pub const ERRORS_FILE: &str = "errores_completos";
pub const WARNINGS_FILE: &str = "advertencias";
pub const STATES_FILE: &str = "estadistica_estados";
pub const BOX_COUNTS_FILE: &str = "cantidad_por_caja";
pub const LOCATIONS_FILE: &str = "errores_por_caja";
pub const SUMMARY_FILE: &str = "resumen";

/// Where and how to write result files.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub directory: PathBuf,
    /// Suffix appended to every file stem, e.g. `20250703_085512`.
    pub suffix: Option<String>,
    pub json: bool,
    pub generated_at: DateTime<Local>,
}

impl ExportOptions {
    pub fn new(directory: impl Into<PathBuf>, generated_at: DateTime<Local>) -> Self {
        Self {
            directory: directory.into(),
            suffix: None,
            json: true,
            generated_at,
        }
    }

    /// Build options from the `[output]` config section.
    pub fn from_config(
        output: &OutputConfig,
        directory: PathBuf,
        generated_at: DateTime<Local>,
    ) -> Self {
        let suffix = output
            .timestamped
            .then(|| generated_at.format("%Y%m%d_%H%M%S").to_string());
        Self {
            directory,
            suffix,
            json: output.json,
            generated_at,
        }
    }

    /// Full path for a result file.
    pub fn path_for(&self, stem: &str, extension: &str) -> PathBuf {
        let name = match &self.suffix {
            Some(suffix) => format!("{}_{}.{}", stem, suffix, extension),
            None => format!("{}.{}", stem, extension),
        };
        self.directory.join(name)
    }
}

/// Write every result file, returning the paths written.
pub fn write_all(summary: &RunSummary, options: &ExportOptions) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&options.directory).with_context(|| {
        format!(
            "Failed to create output directory: {:?}",
            options.directory
        )
    })?;

    let mut written = Vec::new();

    let path = options.path_for(ERRORS_FILE, "csv");
    write_file(&path, |w| write_records(w, summary.error_records()))?;
    written.push(path);

    let path = options.path_for(WARNINGS_FILE, "csv");
    write_file(&path, |w| write_records(w, summary.warning_records()))?;
    written.push(path);

    let path = options.path_for(STATES_FILE, "csv");
    write_file(&path, |w| write_state_table(w, &summary.states))?;
    written.push(path);

    let path = options.path_for(BOX_COUNTS_FILE, "csv");
    write_file(&path, |w| write_box_counts(w, &summary.errors_by_box_ranked()))?;
    written.push(path);

    let path = options.path_for(LOCATIONS_FILE, "csv");
    write_file(&path, |w| write_error_locations(w, &summary.error_locations()))?;
    written.push(path);

    if options.json {
        let path = options.path_for(SUMMARY_FILE, "json");
        let json = summary_json(summary, options.generated_at)?;
        write_file(&path, |w| {
            w.write_all(json.as_bytes())?;
            Ok(())
        })?;
        written.push(path);
    }

    for path in &written {
        tracing::info!(path = %path.display(), "wrote result file");
    }
    Ok(written)
}

fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).with_context(|| format!("Failed to write file: {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write file: {:?}", path))?;
    Ok(())
}
