//! Header-aware merging of CSV files into a single output.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, Writer, WriterBuilder};
use tracing::{debug, info, info_span, trace};

use crate::error::{JoinError, Result};
use crate::resolve::{resolve_from_folder, validate_inputs, validate_output};
use crate::transform::transform_row;

/// Settings shared by every file in one merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Field separator used for reading and writing.
    pub delimiter: u8,
    /// Rewrite decimal points in numeric fields to commas.
    pub comma_decimal: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            comma_decimal: false,
        }
    }
}

impl MergeOptions {
    /// Comma-delimited, no decimal rewrite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable or disable the decimal-comma rewrite.
    #[must_use]
    pub fn with_comma_decimal(mut self, enable: bool) -> Self {
        self.comma_decimal = enable;
        self
    }
}

/// Per-input row accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub path: PathBuf,
    /// Rows parsed from the file, header included.
    pub rows_read: usize,
    /// Rows that made it into the output.
    pub rows_written: usize,
    /// Whether the first row was dropped as a duplicate header.
    pub header_skipped: bool,
}

impl FileStats {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            rows_read: 0,
            rows_written: 0,
            header_skipped: false,
        }
    }
}

/// Outcome of a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Output file, when the merge wrote to the file system.
    pub output: Option<PathBuf>,
    /// One entry per input, in merge order.
    pub files: Vec<FileStats>,
    /// Total rows written, header included.
    pub rows_written: usize,
    /// Fields changed by the decimal-comma rewrite.
    pub fields_rewritten: usize,
}

/// Merges every `*.csv` file in `input_dir` into a new file at `output`.
///
/// Files are merged in filename order.
pub fn resolve_and_merge(
    input_dir: &Path,
    output: &Path,
    options: &MergeOptions,
) -> Result<MergeReport> {
    let inputs = resolve_from_folder(input_dir)?;
    merge_files(&inputs, output, options)
}

/// Merges `inputs` into a new file at `output`.
///
/// All paths are validated before the output is created. The output is
/// opened with exclusive creation and is never overwritten. If a read fails
/// part way through, the partially written output is left in place.
pub fn merge_files(
    inputs: &[PathBuf],
    output: &Path,
    options: &MergeOptions,
) -> Result<MergeReport> {
    validate_output(output)?;
    validate_inputs(inputs)?;

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                JoinError::OutputExists {
                    path: output.to_path_buf(),
                }
            } else {
                JoinError::OutputCreate {
                    path: output.to_path_buf(),
                    source: e,
                }
            }
        })?;

    let mut report = merge_into(inputs, file, options)?;
    report.output = Some(output.to_path_buf());

    info!(
        output = %output.display(),
        files = report.files.len(),
        rows = report.rows_written,
        "merge complete"
    );

    Ok(report)
}

/// Streams `inputs` into `writer`, keeping only the first file's header.
///
/// The writer is flushed before returning and dropped afterwards. Input
/// handles are opened one at a time and closed before the next file.
pub fn merge_into<W: Write>(
    inputs: &[PathBuf],
    writer: W,
    options: &MergeOptions,
) -> Result<MergeReport> {
    let span = info_span!(
        "merge",
        files = inputs.len(),
        delimiter = %char::from(options.delimiter).escape_default(),
        comma_decimal = options.comma_decimal
    );
    let _guard = span.enter();

    let mut out = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(writer);

    let mut report = MergeReport::default();
    let mut header_written = false;

    for path in inputs {
        let (stats, rewritten) = append_file(path, &mut out, options, &mut header_written)?;
        report.rows_written += stats.rows_written;
        report.fields_rewritten += rewritten;
        report.files.push(stats);
    }

    out.flush().map_err(|e| JoinError::CsvWrite { source: e.into() })?;

    Ok(report)
}

/// Copies one input into `out`. Returns its stats and the rewritten field count.
///
/// Blank lines are not rows: the reader skips them, so they neither reach the
/// output nor count as the header position. A UTF-8 BOM at the start of a
/// file is stripped by the reader.
fn append_file<W: Write>(
    path: &Path,
    out: &mut Writer<W>,
    options: &MergeOptions,
    header_written: &mut bool,
) -> Result<(FileStats, usize)> {
    debug!(path = %path.display(), "opening input");

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| JoinError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;

    let mut stats = FileStats::new(path);
    let mut rewritten = 0usize;
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|source| JoinError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?
    {
        let index = stats.rows_read;
        stats.rows_read += 1;

        if index == 0 {
            if *header_written {
                stats.header_skipped = true;
                trace!(path = %path.display(), "skipping duplicate header");
                continue;
            }
            debug!(path = %path.display(), columns = record.len(), "using header");
        }
        *header_written = true;

        let written = if options.comma_decimal {
            let (row, count) = transform_row(&record);
            rewritten += count;
            out.write_record(&row)
        } else {
            out.write_record(&record)
        };
        written.map_err(|source| JoinError::CsvWrite { source })?;
        stats.rows_written += 1;
    }

    info!(
        path = %path.display(),
        rows_read = stats.rows_read,
        rows_written = stats.rows_written,
        "appended input"
    );

    Ok((stats, rewritten))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_inputs(dir: &TempDir, files: &[(&str, &str)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                std::fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    fn merge_to_string(inputs: &[PathBuf], options: &MergeOptions) -> (String, MergeReport) {
        let mut buffer = Vec::new();
        let report = merge_into(inputs, &mut buffer, options).unwrap();
        (String::from_utf8(buffer).unwrap(), report)
    }

    #[test]
    fn test_merge_keeps_first_header_only() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(&dir, &[("A.csv", "h1,h2\n1,2\n"), ("B.csv", "h1,h2\n3,4\n")]);

        let (output, report) = merge_to_string(&inputs, &MergeOptions::default());

        assert_eq!(output, "h1,h2\n1,2\n3,4\n");
        assert_eq!(report.rows_written, 3);
        assert!(!report.files[0].header_skipped);
        assert!(report.files[1].header_skipped);
        assert_eq!(report.output, None);
    }

    #[test]
    fn test_empty_first_file_does_not_consume_header() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(
            &dir,
            &[("a.csv", ""), ("b.csv", "h1,h2\n1,2\n"), ("c.csv", "h1,h2\n3,4\n")],
        );

        let (output, report) = merge_to_string(&inputs, &MergeOptions::default());

        assert_eq!(output, "h1,h2\n1,2\n3,4\n");
        assert_eq!(report.files[0].rows_read, 0);
        assert!(!report.files[1].header_skipped);
        assert!(report.files[2].header_skipped);
    }

    #[test]
    fn test_ragged_rows_pass_through() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(&dir, &[("a.csv", "h1,h2,h3\n1\n2,3,4,5\n")]);

        let (output, _) = merge_to_string(&inputs, &MergeOptions::default());

        assert_eq!(output, "h1,h2,h3\n1\n2,3,4,5\n");
    }

    #[test]
    fn test_comma_decimal_with_semicolon_delimiter() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(
            &dir,
            &[
                ("a.csv", "name;value;exp\nx;3.55;1.2E10\n"),
                ("b.csv", "name;value;exp\ny;42;abc\n"),
            ],
        );
        let options = MergeOptions::new()
            .with_delimiter(b';')
            .with_comma_decimal(true);

        let (output, report) = merge_to_string(&inputs, &options);

        assert_eq!(output, "name;value;exp\nx;3,55;1,2E10\ny;42;abc\n");
        assert_eq!(report.fields_rewritten, 2);
    }

    #[test]
    fn test_comma_decimal_quotes_when_delimiter_is_comma() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(&dir, &[("a.csv", "h\n3.55\n")]);
        let options = MergeOptions::new().with_comma_decimal(true);

        let (output, _) = merge_to_string(&inputs, &options);

        assert_eq!(output, "h\n\"3,55\"\n");
    }

    #[test]
    fn test_blank_lines_are_not_rows() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(
            &dir,
            &[("a.csv", "h1,h2\n\n1,2\n"), ("b.csv", "\nh1,h2\n3,4\n")],
        );

        let (output, report) = merge_to_string(&inputs, &MergeOptions::default());

        assert_eq!(output, "h1,h2\n1,2\n3,4\n");
        assert_eq!(report.files[0].rows_read, 2);
        assert_eq!(report.files[1].rows_read, 2);
        assert!(report.files[1].header_skipped);
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        std::fs::write(&a, b"\xEF\xBB\xBFh1,h2\n1,2\n").unwrap();
        let b = dir.path().join("b.csv");
        std::fs::write(&b, "h1,h2\n3,4\n").unwrap();

        let (output, _) = merge_to_string(&[a, b], &MergeOptions::default());

        assert_eq!(output, "h1,h2\n1,2\n3,4\n");
    }

    #[test]
    fn test_quoted_fields_survive() {
        let dir = TempDir::new().unwrap();
        let inputs = write_inputs(
            &dir,
            &[("a.csv", "id,note\n1,\"line one\nline two\"\n2,\"a, b\"\n")],
        );

        let (output, report) = merge_to_string(&inputs, &MergeOptions::default());

        assert_eq!(output, "id,note\n1,\"line one\nline two\"\n2,\"a, b\"\n");
        assert_eq!(report.files[0].rows_read, 3);
    }
}
