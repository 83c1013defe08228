use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use csvjoin_core::{MergeOptions, MergeReport, merge_files, resolve_from_folder};

use crate::cli::Cli;

pub fn run_join(cli: &Cli) -> Result<MergeReport> {
    if let Some(column) = &cli.dump_file_column {
        warn!(
            column = %column,
            "--dump_file_column is not applied; rows are written without a source column"
        );
    }

    let options = MergeOptions::new()
        .with_delimiter(cli.delimiter)
        .with_comma_decimal(cli.comma_decimal);

    let inputs = resolve_inputs(cli)?;

    let join_span = info_span!("join", output = %cli.output_file.display());
    let _join_guard = join_span.enter();
    let start = Instant::now();

    let report = merge_files(&inputs, &cli.output_file, &options)
        .with_context(|| format!("join into {}", cli.output_file.display()))?;

    info!(
        files = report.files.len(),
        rows = report.rows_written,
        fields_rewritten = report.fields_rewritten,
        duration_ms = start.elapsed().as_millis(),
        "join complete"
    );

    Ok(report)
}

fn resolve_inputs(cli: &Cli) -> Result<Vec<PathBuf>> {
    match &cli.input_dir {
        Some(dir) => resolve_from_folder(dir)
            .with_context(|| format!("list csv files in {}", dir.display())),
        None => Ok(cli.input_files.clone()),
    }
}
