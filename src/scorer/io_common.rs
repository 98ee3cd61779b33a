use calamine::DataType;
use log::warn;

/// The content of a spreadsheet, as text.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<String>,
    // Rows may be shorter than the header.
    pub rows: Vec<Vec<String>>,
}

/// The text of the cell at the given position, empty when the row is too short.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.as_str()).unwrap_or("")
}

/// Renders an Excel cell in the way it would be typed in the spreadsheet.
pub fn cell_to_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => float_to_text(*f),
        DataType::Bool(b) => b.to_string(),
        // Times of the day are stored as a fraction of a day, without a date.
        DataType::DateTime(f) if *f >= 0.0 && *f < 1.0 => excel_time_to_text(*f),
        DataType::DateTime(f) => float_to_text(*f),
        DataType::Error(e) => {
            warn!("cell_to_text: error in cell: {:?}", e);
            String::new()
        }
        DataType::Empty => String::new(),
    }
}

fn float_to_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn excel_time_to_text(day_fraction: f64) -> String {
    let minutes = ((day_fraction * 1440.0).round() as i64).rem_euclid(1440);
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
