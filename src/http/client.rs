use reqwest::Client;

use crate::error::{AppError, AppResult, HttpError};

/// Builds the client shared by every request of a run.
///
/// Default settings only: no request timeout is applied, so a stalled server
/// holds its slot until the connection gives up.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_client() -> AppResult<Client> {
    Client::builder()
        .build()
        .map_err(|source| AppError::http(HttpError::BuildClientFailed { source }))
}
