//! Application startup for the proqueue demo binary

use super::cli::args::Args;
use super::cli::config::Settings;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use crate::core::sync::lock_or_recover;
use crate::queue::{ConfigError, ProQueue, QueueError, QueueStats};
use clap::Parser;
use std::io::Write;
use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Queue(e) => e.is_user_actionable(),
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Queue(e) => e.user_message(),
        }
    }
}

/// Parse arguments, set up logging and run; returns the process exit code
pub fn startup() -> i32 {
    let args = Args::parse();

    // Logging is not up yet, so configuration problems go to stderr
    let settings = match args.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    // Held until return so a log file is flushed on exit
    let _logger = match init_logging(
        settings.log_level.as_deref(),
        settings.log_format.as_deref(),
        settings.log_file.as_deref(),
        settings.color,
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: Failed to initialise logging: {}", e);
            return 1;
        }
    };

    log::info!("proqueue {} starting", env!("CARGO_PKG_VERSION"));
    log::debug!("Resolved settings: {:?}", settings);

    let stdout = Arc::new(Mutex::new(std::io::stdout()));
    match run(&settings, stdout) {
        Ok(stats) => {
            log::info!(
                "Queue '{}' processed {} of {} values",
                settings.queue.name,
                stats.processed,
                stats.pushed
            );
            0
        }
        Err(e) => {
            log_error_with_context(&e, "Running queue");
            1
        }
    }
}

/// Push `0..count` through a queue whose only callback writes each value
/// on its own line to `out`, then stop the queue
pub fn run<W>(settings: &Settings, out: Arc<Mutex<W>>) -> Result<QueueStats, AppError>
where
    W: Write + Send + 'static,
{
    let queue = ProQueue::builder()
        .config(settings.queue.clone())
        .callback(move |value: &mut u64| {
            let mut out = lock_or_recover(&out);
            if let Err(e) = writeln!(out, "{}", value) {
                log::warn!("Failed to write value {}: {}", value, e);
            }
        })
        .spawn()?;

    let count = settings.count;
    let producers = u64::from(settings.producers.max(1));

    thread::scope(|scope| {
        for producer in 0..producers {
            let queue = &queue;
            scope.spawn(move || {
                for value in producer_range(producer, producers, count) {
                    queue.push(value);
                }
            });
        }
    });

    queue.stop()?;
    Ok(queue.stats())
}

/// Contiguous slice of `0..count` pushed by one producer
pub(crate) fn producer_range(producer: u64, producers: u64, count: u64) -> Range<u64> {
    let chunk = count.div_ceil(producers.max(1));
    let start = producer.saturating_mul(chunk).min(count);
    let end = start.saturating_add(chunk).min(count);
    start..end
}
