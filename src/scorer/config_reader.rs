use crate::args::Args;
use crate::scorer::export::OutputFormat;
use crate::scorer::name_order::{clean_names, read_name_order};
use crate::scorer::*;

use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    pub provider: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    pub format: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(rename = "inputSettings")]
    pub input_settings: Option<InputSettings>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    /// Field key (q1 ... q9, name, age) to the exact name of its column.
    pub columns: Option<BTreeMap<String, String>>,
    #[serde(rename = "nameOrder")]
    pub name_order: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Xlsx,
    Csv,
}

impl InputProvider {
    /// Uses the explicit type if any, then the extension of the file. Excel is the default.
    fn resolve(input_type: Option<&str>, path: &Path) -> ScorerResult<InputProvider> {
        match input_type.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "xlsx" || s == "excel" => Ok(InputProvider::Xlsx),
            Some(s) if s == "csv" => Ok(InputProvider::Csv),
            Some(s) => UnknownInputTypeSnafu { input_type: s }.fail(),
            None => {
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase());
                match ext.as_deref() {
                    Some("csv") => Ok(InputProvider::Csv),
                    _ => Ok(InputProvider::Xlsx),
                }
            }
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Everything needed for one run, once the command line and the configuration
/// file have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoringJob {
    pub input_path: PathBuf,
    pub provider: InputProvider,
    pub worksheet_name: Option<String>,
    pub output: OutputTarget,
    pub output_format: OutputFormat,
    pub columns: BTreeMap<String, String>,
    pub name_order: Option<Vec<String>>,
    pub reference: Option<String>,
}

impl ScoringJob {
    pub fn from_args(args: &Args) -> ScorerResult<ScoringJob> {
        let (config, root_p) = match &args.config {
            Some(config_path) => {
                let config = read_config(config_path)?;
                let root_p = Path::new(config_path)
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_default();
                (config, root_p)
            }
            None => (ScorerConfig::default(), PathBuf::new()),
        };
        debug!("from_args: config: {:?}", config);

        let input_settings = config.input_settings.clone().unwrap_or_default();
        let input_path = match (&args.input, &input_settings.file_path) {
            (Some(p), _) => PathBuf::from(p),
            (None, Some(p)) => root_p.join(p),
            (None, None) => return MissingInputSnafu {}.fail(),
        };
        let provider = InputProvider::resolve(
            args.input_type
                .as_deref()
                .or(input_settings.provider.as_deref()),
            &input_path,
        )?;
        let worksheet_name = args
            .excel_worksheet_name
            .clone()
            .or(input_settings.excel_worksheet_name);

        let output_settings = config.output_settings.clone().unwrap_or_default();
        let output_format = OutputFormat::parse(
            args.output_type
                .as_deref()
                .or(output_settings.format.as_deref())
                .unwrap_or("csv"),
        )?;
        let output = match (&args.out, &output_settings.output_path) {
            (Some(s), _) if s == "stdout" => OutputTarget::Stdout,
            (Some(s), _) => OutputTarget::File(PathBuf::from(s)),
            (None, Some(s)) if s == "stdout" => OutputTarget::Stdout,
            (None, Some(s)) => OutputTarget::File(root_p.join(s)),
            (None, None) => OutputTarget::File(
                input_path.with_file_name(format!("psqi_results.{}", output_format.extension())),
            ),
        };

        let name_order = match &args.name_order {
            Some(p) => Some(read_name_order(p)?),
            None => config.name_order.as_deref().map(clean_names),
        };

        Ok(ScoringJob {
            input_path,
            provider,
            worksheet_name,
            output,
            output_format,
            columns: config.columns.unwrap_or_default(),
            name_order,
            reference: args.reference.clone(),
        })
    }
}

pub fn read_config(path: &str) -> ScorerResult<ScorerConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ScorerConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(config)
}
