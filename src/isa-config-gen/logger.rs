use std::io::IsTerminal;
use time::{format_description::FormatItem, macros::format_description};

const TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

fn timestamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(TIMESTAMP)
        .unwrap_or_default()
}

/// Whether output to `stream` should be colored when the user didn't say
#[inline]
pub(crate) fn should_colorize(stream: &impl IsTerminal) -> bool {
    stream.is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Routes all log messages at or above `level` to stderr
pub(crate) fn setup(level: log::LevelFilter, color: bool) -> Result<(), fern::InitError> {
    use log::Level::{Debug, Error, Info, Trace, Warn};
    use nu_ansi_term::Color::{Blue, Green, Purple, Red, Yellow};

    if color {
        fern::Dispatch::new()
            .level(level)
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "{date} [{level}] {message}\x1B[0m",
                    date = timestamp(),
                    level = match record.level() {
                        Error => Red.paint("ERROR"),
                        Warn => Yellow.paint("WARN"),
                        Info => Green.paint("INFO"),
                        Debug => Blue.paint("DEBUG"),
                        Trace => Purple.paint("TRACE"),
                    },
                    message = message,
                ));
            })
            .chain(std::io::stderr())
            .apply()?;
    } else {
        fern::Dispatch::new()
            .level(level)
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "{date} [{level}] {message}",
                    date = timestamp(),
                    level = record.level(),
                    message = message,
                ));
            })
            .chain(std::io::stderr())
            .apply()?;
    }

    Ok(())
}
