use std::path::Path;

use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger,
    LoggerHandle, Naming,
};

/// Starts the global logger. The level comes from `RUST_LOG`, falling back
/// to `default_spec`. With a directory, logs go to rotated files there
/// instead of stderr.
///
/// The returned handle must stay alive for file output to be flushed.
pub fn setup_logging(
    default_spec: &str,
    log_dir: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(default_spec)?;
    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // Rotate logs after they reach 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(1),
            )
            .start(),
        None => logger.format(colored_default_format).start(),
    }
}
