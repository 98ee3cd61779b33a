//! Parsers for the free-text answers of the questionnaire.
//!
//! All the parsers are total: they never fail, and any input that cannot be
//! understood maps to a fixed default (0, 0.0 or midnight).

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ClockTime, Frequency};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9０-９]+").unwrap());
static DECIMAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9０-９]+(?:\.[0-9０-９]+)?").unwrap());

/// Equivalent spellings of each frequency answer, checked in order.
/// The answers are lowercased and stripped of slashes before matching.
pub const FREQUENCY_TOKENS: &[(Frequency, &[&str])] = &[
    (Frequency::NotDuringPastMonth, &["无", "none"]),
    (
        Frequency::LessThanOnceAWeek,
        &["<1", "＜1", "less than once"],
    ),
    (Frequency::OnceOrTwiceAWeek, &["1-2", "1–2"]),
    (
        Frequency::ThreeOrMoreTimesAWeek,
        &[">=3", ">或=3", "≥3", "3 or more"],
    ),
];

/// Marker of the hour in times like "23点30分".
const HOUR_MARKER: char = '点';
/// Marker of the minute in times like "23点30分".
const MINUTE_MARKER: char = '分';

/// Finds the first category of a token table that has a token contained in `text`.
pub(crate) fn match_tokens<T: Copy>(text: &str, table: &[(T, &[&str])]) -> Option<T> {
    table
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|tok| text.contains(tok)))
        .map(|(value, _)| *value)
}

/// Reads a frequency answer ("无", "<1", "1-2", ">=3", ...).
///
/// Empty and unrecognized answers are treated as "not during the past month".
pub fn parse_frequency(text: &str) -> Frequency {
    let s: String = text
        .to_lowercase()
        .chars()
        .filter(|c| *c != '/' && *c != '／')
        .collect();
    if s.is_empty() {
        return Frequency::NotDuringPastMonth;
    }
    match match_tokens(&s, FREQUENCY_TOKENS) {
        Some(f) => f,
        None => {
            debug!("parse_frequency: unrecognized answer {:?}", text);
            Frequency::NotDuringPastMonth
        }
    }
}

/// The first run of digits in the text, as a number of minutes. 0 if there is none.
pub fn parse_minutes(text: &str) -> u32 {
    DIGIT_RUN
        .find(text)
        .map(|m| digits_to_u32(m.as_str()))
        .unwrap_or(0)
}

/// The first decimal number in the text, as a number of hours. 0.0 if there is none.
pub fn parse_hours(text: &str) -> f64 {
    DECIMAL_NUMBER
        .find(text)
        .and_then(|m| to_ascii_digits(m.as_str()).parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Reads a time of the day such as "23点", "6点30分" or "22:45".
///
/// The hour (resp. minute) defaults to 0 when the corresponding part is not
/// made of digits only. Out of range values are kept as they are.
pub fn parse_time_of_day(text: &str) -> ClockTime {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != MINUTE_MARKER && !c.is_whitespace())
        .map(|c| if c == HOUR_MARKER { ':' } else { c })
        .collect();
    let mut parts = cleaned.split(':');
    let hour = parts.next().and_then(all_digits).unwrap_or(0);
    let minute = parts.next().and_then(all_digits).unwrap_or(0);
    ClockTime { hour, minute }
}

fn all_digits(segment: &str) -> Option<u32> {
    if !segment.is_empty() && segment.chars().all(|c| ascii_digit(c).is_some()) {
        Some(digits_to_u32(segment))
    } else {
        None
    }
}

fn ascii_digit(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '０'..='９' => Some(c as u32 - '０' as u32),
        _ => None,
    }
}

// Saturates on very long runs of digits.
fn digits_to_u32(s: &str) -> u32 {
    s.chars()
        .filter_map(ascii_digit)
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d))
}

fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match ascii_digit(c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}
