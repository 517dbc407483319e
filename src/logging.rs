use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialise logging. `debug` selects the `debug` level and lets `RUST_LOG`
/// override it; otherwise `info` is forced. When `file` is given, output is
/// appended to that file instead of stdout.
pub fn init(debug: bool, file: Option<&Path>) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match file.and_then(|p| Some((p.parent()?, p.file_name()?))) {
        Some((dir, name)) => {
            let dir = if dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                dir
            };
            let appender = tracing_appender::rolling::never(dir, name);
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        None => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("logger already initialised");
    }
}
