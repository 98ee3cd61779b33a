// Reading the answers from an Excel workbook.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::scorer::io_common::{cell_to_text, Table};
use crate::scorer::*;

pub fn read_xlsx_table(path: &str, worksheet_name: Option<&str>) -> ScorerResult<Table> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyInputSnafu { path })?
        .iter()
        .map(cell_to_text)
        .collect();
    debug!("read_xlsx_table: header: {:?}", header);

    let rows: Vec<Vec<String>> = iter
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();
    debug!("read_xlsx_table: {} rows", rows.len());
    Ok(Table { header, rows })
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> ScorerResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    match worksheet_name {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path }),
        None => workbook
            .worksheet_range_at(0)
            .context(NoWorksheetSnafu { path })?
            .context(OpeningExcelSnafu { path }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> String {
        format!(
            "{}/tests/data/xlsx_basic/input.xlsx",
            env!("CARGO_MANIFEST_DIR")
        )
    }

    #[test]
    fn read_named_and_first_sheet() {
        let named = read_xlsx_table(&fixture(), Some("Sheet1")).unwrap();
        let first = read_xlsx_table(&fixture(), None).unwrap();
        assert_eq!(named, first);
        assert_eq!(named.header[3], "姓名：");
        assert_eq!(named.rows.len(), 3);
        assert_eq!(named.rows[0][3], "尹珅");
        // Numeric cells are rendered without decimals.
        assert_eq!(named.rows[0][0], "1");
    }

    #[test]
    fn missing_sheet() {
        let res = read_xlsx_table(&fixture(), Some("Form1"));
        assert!(matches!(res, Err(ScorerError::MissingWorksheet { .. })));
    }
}
