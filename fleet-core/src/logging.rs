use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
};

use compact_str::CompactString;
use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, daily};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    prelude::*,
};

use crate::{
    config::LoggingConfig,
    error::{FleetError, FleetResult},
};

pub struct Logger;

impl Logger {
    /// Call **once** near the start of `main`.
    ///
    /// Daily rolling file under `log_dir` plus an optional stderr mirror,
    /// both filtered by `RUST_LOG` or, when unset, `config.level`.
    pub fn try_init_tracing(config: &LoggingConfig) -> FleetResult<()> {
        fs::create_dir_all(&config.log_dir).map_err(|e| {
            FleetError::Logging(CompactString::from(format!(
                "cannot create {}: {e}",
                config.log_dir.display()
            )))
        })?;

        // logs/<prefix>.YYYY-MM-DD
        let file: RollingFileAppender = daily(&config.log_dir, config.file_prefix.as_str());

        let file_layer = fmt::layer()
            .event_format(SeqFileMod)
            .with_writer(file)
            .with_ansi(false)
            .with_filter(env_filter(&config.level)?);

        let stderr_layer = config.stderr.then(|| {
            fmt::layer()
                .event_format(SeqFileMod)
                .with_writer(std::io::stderr)
                .with_ansi(true)
        });

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer.with_filter(env_filter(&config.level)?))
            .try_init()
            .map_err(|e| FleetError::Logging(CompactString::from(e.to_string())))
    }
}

fn env_filter(default_level: &str) -> FleetResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| FleetError::Logging(CompactString::from(e.to_string())))
}

static SEQ: AtomicUsize = AtomicUsize::new(1);

/// Custom formatter: `[SEQ] LEVEL [file:line mod::path] message`
struct SeqFileMod;

impl<S, N> FormatEvent<S, N> for SeqFileMod
where
    S: tracing::Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut w: Writer<'_>,
        ev: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        // monotonically‑increasing sequence number
        let seq: usize = SEQ.fetch_add(1, Ordering::Relaxed);

        let meta: &'static Metadata<'static> = ev.metadata();
        write!(
            w,
            "{seq:06} {:5} [{}:{} {}] ",
            meta.level(),
            meta.file().unwrap_or("??"),
            meta.line().unwrap_or(0),
            meta.module_path().unwrap_or("???"),
        )?;

        ctx.field_format().format_fields(w.by_ref(), ev)?;
        writeln!(w)
    }
}
