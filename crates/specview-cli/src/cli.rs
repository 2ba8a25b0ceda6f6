//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use specview_model::PRODUCT_GROUP_HEADER;

#[derive(Parser)]
#[command(
    name = "specview",
    version,
    about = "Spec view comparison tables for product catalogs",
    long_about = "Resolve spec view configurations and render product catalogs as \
                  grouped, optionally pivoted comparison tables.\n\n\
                  The configuration document defaults to $SPECVIEW_CONFIG, else \
                  spec_view_configs/spec_view_configs.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the comparison table for a category and optional series.
    Render(RenderArgs),

    /// List configured categories and their series configs.
    Categories(ConfigArgs),

    /// Check the configuration document for unusable or ambiguous entries.
    Doctor(DoctorArgs),

    /// List the typed spec columns of a catalog.
    Columns(ColumnsArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Spec view configuration document.
    #[arg(long = "config", value_name = "JSON")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Product catalog export (CSV).
    #[arg(long = "catalog", value_name = "CSV")]
    pub catalog: PathBuf,

    /// Product category to render.
    #[arg(long = "category")]
    pub category: String,

    /// Product series within the category.
    #[arg(long = "series")]
    pub series: Option<String>,

    /// Catalog column whose values name the configured categories.
    #[arg(long = "group-column", value_name = "HEADER", default_value = PRODUCT_GROUP_HEADER)]
    pub group_column: String,

    /// Spec filter `<column spec>=<value>`, e.g. `"Output type ;LOV=PNP,NPN"`
    /// or `"Sensing distance ;number=10..200"`. Repeatable.
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Product catalog export (CSV).
    #[arg(long = "catalog", value_name = "CSV")]
    pub catalog: PathBuf,

    /// Only consider rows of this category.
    #[arg(long = "category")]
    pub category: Option<String>,

    /// Catalog column matched against `--category`.
    #[arg(long = "group-column", value_name = "HEADER", default_value = PRODUCT_GROUP_HEADER)]
    pub group_column: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
