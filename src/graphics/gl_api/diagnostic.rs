//! Helpers for making driver compile and link logs readable.
//!
//! Every driver formats its info log a little differently, but they all
//! reference the offending line of the source string. The common formats
//! are:
//!
//! - Mesa: `0:3(12): error: syntax error, unexpected ...`
//! - NVIDIA: `0(3) : error C0000: syntax error, unexpected ...`
//! - AMD, Intel, ANGLE: `ERROR: 0:3: '' : syntax error`

use {regex::Regex, std::sync::OnceLock};

/// Used when a failed compile or link reports an empty log.
pub const MISSING_DIAGNOSTIC: &str =
    "the driver reported a failure without a diagnostic message";

fn line_reference() -> &'static Regex {
    static MATCHER: OnceLock<Regex> = OnceLock::new();
    MATCHER.get_or_init(|| {
        Regex::new(concat!(
            r"^\s*(?:",
            r"\d+:(?P<mesa>\d+)\(\d+\)",
            r"|\d+\((?P<nv>\d+)\)\s*:",
            r"|(?:ERROR|WARNING):\s*\d+:(?P<amd>\d+):",
            r")"
        ))
        .expect("the line reference pattern is valid")
    })
}

/// The 1-based source line referenced by a single line of a driver log.
pub fn referenced_line(log_line: &str) -> Option<usize> {
    let captures = line_reference().captures(log_line)?;
    ["mesa", "nv", "amd"]
        .iter()
        .find_map(|group| captures.name(group))
        .and_then(|m| m.as_str().parse().ok())
}

/// Interleave a driver log with the source lines it complains about.
///
/// Each log line which references a line of `source` is followed by that
/// line, prefixed with its number. Log lines without a reference, or with a
/// reference past the end of the source, are passed through unchanged.
pub fn annotate(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let mut annotated = String::with_capacity(log.len());
    for log_line in log.lines().filter(|line| !line.trim().is_empty()) {
        annotated.push_str(log_line.trim_end());
        annotated.push('\n');

        let referenced = referenced_line(log_line)
            .filter(|&line| line >= 1 && line <= source_lines.len());
        if let Some(line) = referenced {
            annotated.push_str(&format!(
                "  {:>4} | {}\n",
                line,
                source_lines[line - 1].trim_end()
            ));
        }
    }
    annotated
}

/// The trimmed driver log, or a placeholder when the driver gave nothing.
pub fn or_placeholder(log: String) -> String {
    let trimmed = log.trim_end_matches(['\0', '\n', ' ']);
    if trimmed.trim().is_empty() {
        MISSING_DIAGNOSTIC.to_owned()
    } else {
        trimmed.to_owned()
    }
}
