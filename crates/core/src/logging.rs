use tracing::Level;

use crate::errors::CoreError;

/// Map a verbosity string (TRACE, DEBUG, INFO, WARN, ERROR; any case) to a level.
pub fn parse_level(verbosity: &str) -> Result<Level, CoreError> {
    match verbosity.trim().to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        other => Err(CoreError::ValidationError(format!(
            "Invalid verbosity level '{other}': expected TRACE, DEBUG, INFO, WARN or ERROR"
        ))),
    }
}

/// Install a global fmt subscriber at the given verbosity.
///
/// Fails if the verbosity is unknown or a global subscriber is already set
/// (the embedding application may have installed its own).
pub fn init_logger(verbosity: &str) -> Result<(), CoreError> {
    let level = parse_level(verbosity)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .map_err(|e| CoreError::ValidationError(format!("Logger already initialized: {e}")))
}
