use clap::Parser;
use log::LevelFilter;

/// Command-line settings. With no arguments the tool starts straight at the
/// menu, logging warnings only.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "simple-interest",
    version,
    about = "Record simple-interest loans and show the interest they accrue each day"
)]
pub struct Settings {
    /// Ask for a first loan before showing the menu
    #[arg(long)]
    pub add_first: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,

    /// Currency label offered when adding a loan
    #[arg(long)]
    pub currency: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            add_first: false,
            log_level: LevelFilter::Warn,
            currency: None,
        }
    }
}
