use clap::Parser;

/// This is a scoring program for the Pittsburgh Sleep Quality Index (PSQI) questionnaire.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the input, the output and the columns.
    /// For more information about the file format, read the manual of the psqi_scoring crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected output. If provided, psqi will
    /// check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the results will be written to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default csv) The format of the output: csv or json.
    #[clap(long, value_parser)]
    pub output_type: Option<String>,

    /// (file path or empty) The spreadsheet containing the answers. Setting this option overrides
    /// the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default xlsx) The type of the input: xlsx or csv. When not provided, it is guessed from
    /// the extension of the input file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, optional) A text file with one name per line. The results will be sorted
    /// following this order, the respondents not listed coming last.
    #[clap(long, value_parser)]
    pub name_order: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on debug logging on the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
