// Encoding of the results.

use serde_json::{json, Map as JSMap, Value as JSValue};
use snafu::prelude::*;

use psqi_scoring::{Component, TOTAL_LABEL};

use crate::scorer::*;

/// Spreadsheet programs need it to detect UTF-8 in CSV files.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(output_type: &str) -> ScorerResult<OutputFormat> {
        match output_type.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => UnknownOutputTypeSnafu { output_type }.fail(),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

fn header() -> Vec<&'static str> {
    let mut res = vec!["Name", "Age"];
    res.extend(Component::ALL.iter().map(|c| c.label()));
    res.push(TOTAL_LABEL);
    res
}

pub fn encode(records: &[ScoredRecord], format: OutputFormat) -> ScorerResult<Vec<u8>> {
    match format {
        OutputFormat::Csv => encode_csv(records),
        OutputFormat::Json => encode_json(records),
    }
}

fn encode_csv(records: &[ScoredRecord]) -> ScorerResult<Vec<u8>> {
    let mut buffer: Vec<u8> = UTF8_BOM.to_vec();
    {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut buffer);
        wtr.write_record(header()).context(EncodingCsvSnafu {})?;
        for r in records.iter() {
            let mut line: Vec<String> = vec![r.name.clone(), r.age.clone()];
            line.extend(r.scores.iter().map(|(_, s)| s.value().to_string()));
            line.push(r.scores.total().to_string());
            wtr.write_record(&line).context(EncodingCsvSnafu {})?;
        }
        wtr.flush()
            .map_err(csv::Error::from)
            .context(EncodingCsvSnafu {})?;
    }
    Ok(buffer)
}

fn encode_json(records: &[ScoredRecord]) -> ScorerResult<Vec<u8>> {
    let rows: Vec<JSValue> = records
        .iter()
        .map(|r| {
            let mut m = JSMap::new();
            m.insert("Name".to_string(), json!(r.name));
            m.insert("Age".to_string(), json!(r.age));
            for (c, s) in r.scores.iter() {
                m.insert(c.label().to_string(), json!(s.value()));
            }
            m.insert(TOTAL_LABEL.to_string(), json!(r.scores.total()));
            JSValue::Object(m)
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&rows).context(EncodingJsonSnafu {})?;
    text.push('\n');
    Ok(text.into_bytes())
}
