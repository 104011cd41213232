//! Analyze command handler
//!
//! 1. Load config and apply command-line overrides
//! 2. Discover log files in the input folder
//! 3. Reassemble, classify and extract every file
//! 4. Print the text report (or the JSON summary)
//! 5. Write the result files

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::Local;

use pipelog::export::{self, summary_json, ExportOptions};
use pipelog::{discover_log_files, report, Config, Extractor, LogAnalyzer};

use super::load_config;

/// Command-line arguments of `pipelog analyze`.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    pub dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub out: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub states: Option<Vec<String>>,
    pub no_export: bool,
    pub json: bool,
    pub quiet: bool,
}

/// Analyze the log files of one folder.
///
/// A missing input folder or a folder without log files is an error; files
/// that fail to read are reported and skipped.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>, args: AnalyzeArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, &args);
    config
        .validate()
        .map_err(|e| anyhow!("Invalid options: {}", e))?;

    let input_dir = args.dir.clone().unwrap_or_else(|| config.input_directory());
    let output_dir = args.out.clone().unwrap_or_else(|| config.output_directory());

    let files = discover_log_files(&input_dir, &config.input.extension)?;

    let analyzer =
        LogAnalyzer::new(Extractor::new(config.states_of_interest())).workers(config.workers());
    let summary = analyzer.run(&files);
    let generated_at = Local::now();

    if args.json {
        println!("{}", summary_json(&summary, generated_at)?);
    } else if !args.quiet {
        print!("{}", report::render(&summary));
    }

    if args.no_export {
        return Ok(());
    }

    let options = ExportOptions::from_config(&config.output, output_dir, generated_at);
    let written = export::write_all(&summary, &options)?;
    if !args.quiet {
        let message = format!(
            "Wrote {} result file(s) to {}",
            written.len(),
            options.directory.display()
        );
        // Keep stdout parseable in JSON mode.
        if args.json {
            eprintln!("{}", message);
        } else {
            println!("\n{}", message);
        }
    }
    Ok(())
}

/// Fold command-line options over the loaded config.
pub(crate) fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(ext) = &args.extension {
        config.input.extension = ext.clone();
    }
    if let Some(states) = &args.states {
        config.analysis.states = states.clone();
    }
    if let Some(jobs) = args.jobs {
        config.analysis.workers = Some(jobs);
    }
}
