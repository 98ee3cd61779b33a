// Custom ordering of the results, following a list of names.

use std::collections::HashMap;
use std::fs;

use log::{debug, info};
use pinyin::ToPinyin;
use snafu::prelude::*;

use crate::scorer::*;

/// The key used to compare names: Chinese characters are replaced by their
/// pinyin without tones, everything else is kept.
pub fn pinyin_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c.to_pinyin() {
            Some(p) => p.plain().to_string(),
            None => c.to_string(),
        })
        .collect()
}

/// Trims the names and drops the blank ones.
pub fn clean_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Reads a name order file: one name per line.
pub fn read_name_order(path: &str) -> ScorerResult<Vec<String>> {
    let contents = fs::read_to_string(path).context(ReadingNameOrderSnafu { path })?;
    let lines: Vec<String> = contents
        .lines()
        .map(|l| l.trim_start_matches('\u{feff}').to_string())
        .collect();
    let names = clean_names(&lines);
    info!("Read {} names from {}", names.len(), path);
    Ok(names)
}

/// Sorts the records by the position of their name in the given order.
/// Records with a name that is not listed come last, in their original order.
pub fn sort_by_name_order(records: &mut [ScoredRecord], order: &[String]) {
    // For duplicated names, the last position is used.
    let positions: HashMap<String, usize> = order
        .iter()
        .enumerate()
        .map(|(idx, name)| (pinyin_key(name), idx))
        .collect();
    debug!("sort_by_name_order: positions: {:?}", positions);
    records.sort_by_key(|r| {
        positions
            .get(&pinyin_key(&r.name))
            .cloned()
            .unwrap_or(usize::MAX)
    });
}
