use log::{debug, info, warn};

use psqi_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::scorer::columns::ColumnMapping;
use crate::scorer::config_reader::*;
use crate::scorer::export::OutputFormat;
use crate::scorer::io_common::Table;

mod columns;
mod config_reader;
mod export;
mod io_common;
mod io_csv;
mod io_xlsx;
mod name_order;

#[derive(Debug, Snafu)]
pub enum ScorerError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Cannot find the worksheet {name:?} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The workbook {path} does not contain any worksheet"))]
    NoWorksheet { path: String },
    #[snafu(display("The input {path} is empty, a header row is expected"))]
    EmptyInput { path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error reading the name order file {path}"))]
    ReadingNameOrder {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No input file: use --input or the inputSettings of the configuration"))]
    MissingInput {},
    #[snafu(display("Unknown input type {input_type:?}, expected xlsx or csv"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown output type {output_type:?}, expected csv or json"))]
    UnknownOutputType { output_type: String },
    #[snafu(display("Unknown column key {key:?} in the configuration"))]
    UnknownColumnKey { key: String },
    #[snafu(display("Cannot find the column {column:?} in the header"))]
    ColumnNotFound { column: String },
    #[snafu(display("No question column found in the header {header:?}"))]
    NoQuestionColumns { header: Vec<String> },
    #[snafu(display("Error encoding the results in CSV"))]
    EncodingCsv { source: csv::Error },
    #[snafu(display("Error encoding the results in JSON"))]
    EncodingJson { source: serde_json::Error },
    #[snafu(display("Error writing the results to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the reference file {path}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the computed results and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ScorerResult<T> = Result<T, ScorerError>;

/// The scores of one respondent, with the identity fields copied from the input.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoredRecord {
    pub name: String,
    pub age: String,
    pub scores: PsqiScores,
}

fn read_table(job: &ScoringJob) -> ScorerResult<Table> {
    let path = job.input_path.display().to_string();
    info!("Attempting to read input file {:?}", path);
    match job.provider {
        InputProvider::Xlsx => io_xlsx::read_xlsx_table(&path, job.worksheet_name.as_deref()),
        InputProvider::Csv => io_csv::read_csv_table(&path),
    }
}

fn score_table(table: &Table, mapping: &ColumnMapping) -> Vec<ScoredRecord> {
    let mut res: Vec<ScoredRecord> = Vec::new();
    for (idx, row) in table.rows.iter().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        if row.iter().all(|c| c.trim().is_empty()) {
            debug!("score_table: skipping empty line {}", lineno);
            continue;
        }
        let response = mapping.response(row);
        if response.is_empty() {
            warn!(
                "score_table: line {}: no answer found, all the components use their default",
                lineno
            );
        }
        let scores = score_response(&response);
        let record = ScoredRecord {
            name: mapping.name(row),
            age: mapping.age(row),
            scores,
        };
        debug!("score_table: line {}: {:?}", lineno, record);
        res.push(record);
    }
    res
}

fn write_output(target: &OutputTarget, bytes: &[u8]) -> ScorerResult<()> {
    match target {
        OutputTarget::Stdout => std::io::stdout()
            .write_all(bytes)
            .context(WritingOutputSnafu { path: "stdout" }),
        OutputTarget::File(p) => {
            info!("Writing results to {:?}", p);
            fs::write(p, bytes).context(WritingOutputSnafu {
                path: p.display().to_string(),
            })
        }
    }
}

// Brings an output to a canonical text form so that two outputs can be compared.
fn canonical_output(bytes: &[u8], format: OutputFormat, path: &str) -> ScorerResult<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{feff}');
    match format {
        OutputFormat::Csv => Ok(text.replace("\r\n", "\n").trim_end().to_string()),
        OutputFormat::Json => {
            let js: ScorerResult<JSValue> = serde_json::from_str(text)
                .with_whatever_context(|_| format!("{} is not a valid JSON file", path));
            serde_json::to_string_pretty(&js?).context(EncodingJsonSnafu {})
        }
    }
}

fn check_reference(path: &str, format: OutputFormat, output: &[u8]) -> ScorerResult<()> {
    let reference = fs::read(path).context(ReadingReferenceSnafu { path })?;
    let expected = canonical_output(&reference, format, path)?;
    let computed = canonical_output(output, format, path)?;
    if expected != computed {
        warn!("Found differences with the reference {}", path);
        print_diff(expected.as_str(), computed.as_str(), "\n");
        return ReferenceMismatchSnafu { path }.fail();
    }
    info!("The results match the reference {}", path);
    Ok(())
}

pub fn run_scoring(args: &Args) -> ScorerResult<()> {
    let job = ScoringJob::from_args(args)?;
    info!("job: {:?}", job);

    let table = read_table(&job)?;
    debug!("run_scoring: header: {:?}", table.header);
    let mapping = ColumnMapping::from_header(&table.header, &job.columns)?;

    let mut records = score_table(&table, &mapping);
    if let Some(order) = &job.name_order {
        name_order::sort_by_name_order(&mut records, order);
    }
    info!("Processed {} records", records.len());

    let output = export::encode(&records, job.output_format)?;
    write_output(&job.output, &output)?;

    // The reference output, if provided for comparison
    if let Some(reference) = &job.reference {
        check_reference(reference, job.output_format, &output)?;
    }

    Ok(())
}

#[cfg(test)]
fn test_wrapper(test_name: &str, reference_lpath: &str) -> ScorerResult<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join(reference_lpath);
    info!("Running test {}", test_name);
    let args = Args {
        config: Some(format!("{}/config.json", test_dir)),
        reference: Some(format!("{}/{}", test_dir, reference_lpath)),
        out: Some(out_path.display().to_string()),
        ..Default::default()
    };
    run_scoring(&args)?;
    // The written file is the one that was checked.
    let written = fs::read(&out_path).unwrap();
    if reference_lpath.ends_with(".csv") {
        assert!(written.starts_with(export::UTF8_BOM));
    }
    Ok(())
}
