use crate::error::AppError;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub fn parse_level(raw: &str) -> Result<LevelFilter, AppError> {
    raw.trim().parse::<LevelFilter>().map_err(|_| {
        AppError::invalid_data(format!(
            "unknown log level '{}'; expected off, error, warn, info, debug or trace",
            raw.trim()
        ))
    })
}

/// Sends log records to stderr. Only the first call installs a logger.
pub fn init_logging(level: &str) -> Result<(), AppError> {
    let filter = parse_level(level)?;
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();

    if WriteLogger::init(filter, config, std::io::stderr()).is_err() {
        log::debug!("logger already installed; keeping it");
    }
    Ok(())
}
