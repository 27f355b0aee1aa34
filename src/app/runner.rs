use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ResolvedConfig, load_config, load_data_rows};
use crate::dispatch::Dispatcher;
use crate::error::{AppError, AppResult, OutputError};
use crate::http::{HttpExecutor, build_client};
use crate::metrics::{FileLogSink, MetricsState};
use crate::plan::build_plan;
use crate::report::write_summary;

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub metrics: MetricsState,
}

/// Loads, resolves and runs a single config file.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the run cannot be set up.
pub async fn run_config_file(path: &Path) -> AppResult<RunOutcome> {
    let resolved = load_config(path)?;
    run_test(&resolved).await
}

/// Runs one resolved test and writes its log and summary.
///
/// Setup failures (unreadable data file, uncreatable output file, client
/// construction) abort before any request is sent. Individual request
/// failures never do.
///
/// # Errors
///
/// Returns an error if the run cannot be set up or the summary cannot be written.
pub async fn run_test(resolved: &ResolvedConfig) -> AppResult<RunOutcome> {
    let config = &resolved.run;
    let rows = load_data_rows(&resolved.data)?;
    let plan = build_plan(&config.url, &rows, config.repeats);
    debug!(
        "Planned {} requests from {} data rows x {} repeats",
        plan.len(),
        rows.len(),
        config.repeats
    );

    let sink = FileLogSink::create(&config.output_path, config.capture)
        .await
        .map_err(|source| {
            AppError::output(OutputError::CreateFile {
                path: config.output_path.clone(),
                source,
            })
        })?;
    let sink = Arc::new(sink);
    let executor = Arc::new(HttpExecutor::new(build_client()?, config));

    info!(
        "Sending {} {} requests to {} with concurrency {}",
        plan.len(),
        config.method,
        config.url,
        config.concurrency.get()
    );
    let metrics = Dispatcher::new(config.concurrency, config.delay)
        .run(plan, executor, Arc::clone(&sink))
        .await;

    write_summary(&sink, &metrics, config).await?;
    info!(
        "Completed {} requests; results written to {}",
        metrics.request_count,
        config.output_path.display()
    );

    Ok(RunOutcome {
        output_path: config.output_path.clone(),
        metrics,
    })
}
