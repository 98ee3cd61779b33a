// Primitives for reading CSV files.

use log::debug;
use snafu::prelude::*;

use crate::scorer::io_common::Table;
use crate::scorer::*;

pub fn read_csv_table(path: &str) -> ScorerResult<Table> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    let header: Vec<String> = records
        .next()
        .context(EmptyInputSnafu { path })?
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|s| s.trim_start_matches('\u{feff}').to_string())
        .collect();
    debug!("read_csv_table: header: {:?}", header);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    debug!("read_csv_table: {} rows", rows.len());
    Ok(Table { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn read_with_bom_and_short_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "\u{feff}姓名,4\n张三,7小时\n李四\n").unwrap();
        let table = read_csv_table(&path.display().to_string()).unwrap();
        assert_eq!(table.header, vec!["姓名".to_string(), "4".to_string()]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["李四".to_string()]);
    }

    #[test]
    fn empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "").unwrap();
        let res = read_csv_table(&path.display().to_string());
        assert!(matches!(res, Err(ScorerError::EmptyInput { .. })));
    }

    #[test]
    fn fixture() {
        let path = format!("{}/tests/data/csv_basic/input.csv", env!("CARGO_MANIFEST_DIR"));
        let table = read_csv_table(&path).unwrap();
        assert_eq!(table.header.len(), 23);
        assert_eq!(table.header[3], "姓名：");
        assert_eq!(table.rows[0][3], "尹珅");
    }
}
