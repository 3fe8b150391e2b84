use {
    anyhow::Result,
    flexi_logger::{
        DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Record,
        WriteMode,
    },
    regex::Regex,
    std::{fmt::Write as FmtWrite, sync::OnceLock},
    textwrap::{termwidth, Options},
};

/// A global handle to the initialized flexi_logger. The logger stops when
/// the handle is dropped so it lives for the rest of the process.
static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Matches the final line of a wrapped log entry.
static LAST_LINE_MATCHER: OnceLock<Regex> = OnceLock::new();

/// Setup pretty console and file logging.
///
/// The level is read from RUST_LOG and defaults to `info`. Calling this more
/// than once is harmless.
pub fn setup() -> Result<()> {
    if LOGGER_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory("logs"))
        .format(multiline_format)
        .duplicate_to_stdout(Duplicate::Debug)
        .write_mode(WriteMode::Async)
        .start()?;
    let _ = LOGGER_HANDLE.set(handle);

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );
    Ok(())
}

/// A multiline log format for flexi_logger.
///
/// Logs are automatically wrapped at terminal width and prefixed with unicode
/// so it's easy to tell where a big log statement begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let size = termwidth().min(74);
    let wrap_options = Options::new(size)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");

    let mut full_line = String::new();
    writeln!(
        full_line,
        "{} [{}] [{}:{}]",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    )
    .expect("unable to format first log line");

    write!(&mut full_line, "{}", &record.args())
        .expect("unable to format log!");

    let wrapped = textwrap::fill(&full_line, wrap_options);
    writeln!(w, "{}", close_last_line(&wrapped))
}

/// Swap the gutter on the final line of a wrapped entry for a closing
/// corner.
fn close_last_line(wrapped: &str) -> String {
    let matcher = LAST_LINE_MATCHER.get_or_init(|| {
        Regex::new(r"(┃)(.*)$").expect("the gutter pattern is valid")
    });
    matcher.replace(wrapped, "┗$2").into_owned()
}
