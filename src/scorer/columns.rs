// Maps the columns of a spreadsheet to the questions of the questionnaire.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use psqi_scoring::builder::Builder;
use psqi_scoring::{Question, RawResponse};
use snafu::prelude::*;

use crate::scorer::io_common::cell;
use crate::scorer::*;

const NAME_HEADERS: [&str; 3] = ["姓名", "name", "您的姓名"];
const AGE_HEADERS: [&str; 3] = ["您的年龄", "年龄", "age"];

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Field {
    Answer(Question),
    Name,
    Age,
}

impl Field {
    fn from_key(key: &str) -> ScorerResult<Field> {
        match key.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "age" => Ok(Field::Age),
            k => Question::from_key(k)
                .map(Field::Answer)
                .context(UnknownColumnKeySnafu { key }),
        }
    }
}

/// The position of each field in the rows of a table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnMapping {
    questions: HashMap<Question, usize>,
    name_idx: Option<usize>,
    age_idx: Option<usize>,
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_end_matches(|c: char| ".．。:：".contains(c) || c.is_whitespace())
        .to_lowercase()
}

fn header_to_field(header: &str) -> Option<Field> {
    let h = normalize_header(header);
    if NAME_HEADERS.contains(&h.as_str()) {
        return Some(Field::Name);
    }
    if AGE_HEADERS.contains(&h.as_str()) {
        return Some(Field::Age);
    }
    if h.is_empty() {
        return None;
    }
    let key = if h.starts_with('q') {
        h
    } else {
        format!("q{}", h)
    };
    Question::from_key(&key).map(Field::Answer)
}

impl ColumnMapping {
    /// Builds the mapping from the header row. The explicit columns (field key
    /// to header text) take precedence over the recognized headers.
    pub fn from_header(
        header: &[String],
        columns: &BTreeMap<String, String>,
    ) -> ScorerResult<ColumnMapping> {
        let mut mapping = ColumnMapping {
            questions: HashMap::new(),
            name_idx: None,
            age_idx: None,
        };

        // The first matching column wins.
        for (idx, h) in header.iter().enumerate() {
            match header_to_field(h) {
                Some(Field::Answer(q)) => {
                    mapping.questions.entry(q).or_insert(idx);
                }
                Some(Field::Name) => {
                    mapping.name_idx.get_or_insert(idx);
                }
                Some(Field::Age) => {
                    mapping.age_idx.get_or_insert(idx);
                }
                None => {}
            }
        }

        for (key, column) in columns.iter() {
            let field = Field::from_key(key)?;
            let idx = header
                .iter()
                .position(|h| h.trim() == column.trim())
                .context(ColumnNotFoundSnafu { column })?;
            debug!("from_header: column {:?} -> {:?}", column, field);
            match field {
                Field::Answer(q) => {
                    mapping.questions.insert(q, idx);
                }
                Field::Name => mapping.name_idx = Some(idx),
                Field::Age => mapping.age_idx = Some(idx),
            }
        }

        ensure!(
            !mapping.questions.is_empty(),
            NoQuestionColumnsSnafu {
                header: header.to_vec()
            }
        );
        for q in Question::ALL.iter() {
            if !mapping.questions.contains_key(q) {
                warn!("No column found for question {}, it will read as empty", q);
            }
        }
        if mapping.name_idx.is_none() {
            warn!("No name column found");
        }
        debug!("from_header: {:?}", mapping);
        Ok(mapping)
    }

    pub fn response(&self, row: &[String]) -> RawResponse {
        let mut builder = Builder::new();
        for q in Question::ALL.iter() {
            if let Some(idx) = self.questions.get(q) {
                builder = builder.answer(*q, cell(row, *idx));
            }
        }
        builder.build()
    }

    pub fn name(&self, row: &[String]) -> String {
        self.name_idx
            .map(|idx| cell(row, idx).trim().to_string())
            .unwrap_or_default()
    }

    pub fn age(&self, row: &[String]) -> String {
        self.age_idx
            .map(|idx| cell(row, idx).trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_header(" 5a. "), "5a");
        assert_eq!(normalize_header("姓名："), "姓名");
        assert_eq!(normalize_header("Q9。"), "q9");
        assert_eq!(header_to_field("5B"), Some(Field::Answer(Question::Q5b)));
        assert_eq!(header_to_field("q1"), Some(Field::Answer(Question::Q1)));
        assert_eq!(header_to_field("Name"), Some(Field::Name));
        assert_eq!(header_to_field("序号"), None);
        assert_eq!(header_to_field("10"), None);
        assert_eq!(header_to_field(""), None);
    }

    #[test]
    fn recognized_headers() {
        let header = strings(&["序号", "姓名：", "您的年龄", "1", "3", "5a.", "6", "5c"]);
        let mapping = ColumnMapping::from_header(&header, &BTreeMap::new()).unwrap();
        let row = strings(&[" 1", " 张三 ", "20", "23点", "7点", "无", "很好"]);
        let response = mapping.response(&row);
        assert_eq!(mapping.name(&row), "张三");
        assert_eq!(mapping.age(&row), "20");
        assert_eq!(response.get(Question::Q1), "23点");
        assert_eq!(response.get(Question::Q6), "很好");
        // The row is shorter than the header.
        assert_eq!(response.get(Question::Q5c), "");
        assert_eq!(response.get(Question::Q9), "");
    }

    #[test]
    fn explicit_columns() {
        let header = strings(&["Respondent", "Bed time", "4"]);
        let mut columns = BTreeMap::new();
        columns.insert("name".to_string(), "Respondent".to_string());
        columns.insert("Q1".to_string(), "Bed time".to_string());
        let mapping = ColumnMapping::from_header(&header, &columns).unwrap();
        let row = strings(&["Alice", "11 pm", "8"]);
        assert_eq!(mapping.name(&row), "Alice");
        assert_eq!(mapping.age(&row), "");
        assert_eq!(mapping.response(&row).get(Question::Q1), "11 pm");
        assert_eq!(mapping.response(&row).get(Question::Q4), "8");
    }

    #[test]
    fn bad_columns() {
        let header = strings(&["姓名", "1"]);
        let mut columns = BTreeMap::new();
        columns.insert("q10".to_string(), "1".to_string());
        assert!(matches!(
            ColumnMapping::from_header(&header, &columns),
            Err(ScorerError::UnknownColumnKey { .. })
        ));

        let mut columns = BTreeMap::new();
        columns.insert("q2".to_string(), "2".to_string());
        assert!(matches!(
            ColumnMapping::from_header(&header, &columns),
            Err(ScorerError::ColumnNotFound { .. })
        ));

        let header = strings(&["姓名", "年龄"]);
        assert!(matches!(
            ColumnMapping::from_header(&header, &BTreeMap::new()),
            Err(ScorerError::NoQuestionColumns { .. })
        ));
    }
}
