use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::Level;

use crate::config::LogSettings;

/// Install the global subscriber writing to `log.file`.
///
/// Without a file nothing is installed: stdout and stderr belong to the
/// terminal interface while it runs.
pub fn init(settings: &LogSettings) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };
    let level: Level = settings.level.parse()?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(true)
}
