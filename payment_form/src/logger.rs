use log::LevelFilter;
use simplelog::{ConfigBuilder, SimpleLogger};

/// Installs the process wide logger; only records of the portal crates pass
pub fn setup_simple_logger(verbose: bool) -> anyhow::Result<()> {
    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("payment_form")
        .add_filter_allow_str("portal_cli")
        .build();

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Ok(SimpleLogger::init(level, logger_config)?)
}
