use clap::Parser;

/// Normalizes raw assembly polling-station exports and assembles a JSON
/// analytics report from them.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON report configuration describing the export
    /// sources, the optional user document the report is scoped to, and the
    /// output settings. Paths inside the configuration are relative to its
    /// own directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) A raw polling-station export to read directly
    /// with the form20 provider. Setting this option overrides the export
    /// sources that may be listed in --config.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (assembly id, optional) Restrict the report to one assembly. Ids with
    /// float formatting artifacts ("108.0") are accepted.
    #[clap(short, long, value_parser)]
    pub assembly: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in
    /// JSON format to the given location. Setting this option overrides the path
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A reference report in JSON format. If provided,
    /// acdash will check that the generated report matches the reference and
    /// fail on any difference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
