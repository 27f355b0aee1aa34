use std::path::Path;

use clap::{CommandFactory, FromArgMatches};
use tracing::{error, info};

use crate::app::run_config_file;
use crate::args::TesterArgs;
use crate::config::discover_config_files;
use crate::error::{AppError, AppResult, ConfigError};

/// Binary entry point: parses the CLI, installs logging and runs the path.
///
/// # Errors
///
/// Returns an error when the path cannot be accessed or, for a single config
/// file, when its run fails.
pub fn run() -> AppResult<()> {
    let matches = TesterArgs::command().get_matches();
    let args = TesterArgs::from_arg_matches(&matches)?;

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&args))
}

async fn run_async(args: &TesterArgs) -> AppResult<()> {
    let metadata = tokio::fs::metadata(&args.path).await.map_err(|err| {
        AppError::config(ConfigError::AccessPath {
            path: args.path.clone(),
            source: err,
        })
    })?;

    if metadata.is_dir() {
        info!("Provided path is a directory. Processing all config files...");
        run_directory(&args.path).await?;
    } else {
        info!("Provided path is a file. Processing single config...");
        run_config_file(&args.path).await?;
    }

    info!("All tasks completed.");
    Ok(())
}

// Each config runs on its own; a failure is logged and the walk continues.
async fn run_directory(root: &Path) -> AppResult<()> {
    for path in discover_config_files(root)? {
        info!("Processing config file: {}", path.display());
        match run_config_file(&path).await {
            Ok(_) => info!("Finished processing {} successfully.", path.display()),
            Err(err) => error!("Error running test for {}: {}", path.display(), err),
        }
    }
    Ok(())
}
