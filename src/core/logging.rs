//! Logging setup for the proqueue binary
//!
//! The library only talks to the `log` facade. Hosts that want the same
//! output as the demo binary call [`init_logging`], which installs a
//! `flexi_logger` backend with one of three formats:
//!
//! - `text`: `2026-10-16 12:00:00.000 INF message`
//! - `ext`:  `2026-10-16 12:00:00.000 INF message (queue/worker.rs:42)`
//! - `json`: one compact JSON object per line

use colored::{ColoredString, Colorize};
use flexi_logger::LoggerHandle;
use std::path::Path;

/// Install the global logger
///
/// The returned handle must be kept alive for as long as output is wanted;
/// dropping it flushes and closes any log file. Fails if a logger is
/// already installed or the level spec is invalid.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&Path>,
    color_enabled: bool,
) -> Result<LoggerHandle, Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or("info");
    let format_type = log_format.unwrap_or("text");

    let mut logger = Logger::try_with_str(level_str)?;

    logger = match (format_type, color_enabled) {
        ("json", _) => logger.format(json_format),
        ("ext", true) => logger.format(extended_color_format),
        ("ext", false) => logger.format(extended_format),
        (_, true) => logger.format(simple_color_format),
        (_, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(file_path)?;
        logger = logger.log_to_file(file_spec);
    }

    Ok(logger.start()?)
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        colored_level(record.level()),
        record.args()
    )
}

fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let target_formatted = format_target_as_path(record.target(), record.line());
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        colored_level(record.level()),
        record.args(),
        target_formatted.dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use serde_json::{json, to_string};

    // Ordered: timestamp, level, message, metadata
    let json_obj = json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line())
    });

    match to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

fn colored_level(level: log::Level) -> ColoredString {
    let abbr = level_abbr(level);
    match level {
        log::Level::Error => abbr.red().bold(),
        log::Level::Warn => abbr.yellow(),
        log::Level::Info => abbr.green(),
        log::Level::Debug => abbr.blue(),
        log::Level::Trace => abbr.magenta(),
    }
}

// proqueue::queue::worker -> queue/worker.rs:42
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("proqueue::") {
        Some(without_prefix) => without_prefix.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;
    use serial_test::serial;

    fn render(
        format: fn(
            &mut dyn std::io::Write,
            &mut DeferredNow,
            &log::Record,
        ) -> Result<(), std::io::Error>,
        level: log::Level,
        target: &str,
        line: Option<u32>,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(level)
            .target(target)
            .line(line)
            .args(format_args!("Test message"))
            .build();
        format(&mut buffer, &mut now, &record).unwrap();
        String::from_utf8(buffer).expect("Output should be valid UTF-8")
    }

    #[test]
    fn test_simple_format_layout() {
        let output = render(simple_format, log::Level::Info, "proqueue::queue", None);
        assert!(output.contains(" INF Test message"), "got: {}", output);
        assert!(!output.contains("queue.rs"));
    }

    #[test]
    fn test_extended_format_includes_path() {
        let output = render(
            extended_format,
            log::Level::Warn,
            "proqueue::queue::worker",
            Some(42),
        );
        assert!(
            output.ends_with("WRN Test message (queue/worker.rs:42)"),
            "got: {}",
            output
        );
    }

    #[test]
    fn test_json_format_fields() {
        let output = render(json_format, log::Level::Error, "other_crate::module", Some(7));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["level"], "ERR");
        assert_eq!(value["message"], "Test message");
        assert_eq!(value["target"], "other_crate/module:7");
    }

    #[test]
    fn test_format_target_as_path() {
        assert_eq!(
            format_target_as_path("proqueue::queue::proqueue", None),
            "queue/proqueue.rs"
        );
        assert_eq!(format_target_as_path("std::thread", Some(3)), "std/thread:3");
    }

    #[test]
    #[serial]
    fn test_init_logging_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("proqueue.log");

        // Only one logger per process; skip the checks if one is already up
        if let Ok(handle) = init_logging(Some("debug"), Some("ext"), Some(&log_path), false) {
            log::debug!("written to file");
            handle.flush();
            drop(handle);

            let written: String = std::fs::read_dir(dir.path())
                .unwrap()
                .filter_map(|entry| std::fs::read_to_string(entry.unwrap().path()).ok())
                .collect();
            assert!(written.contains("DBG written to file"), "got: {}", written);
        }
    }
}
