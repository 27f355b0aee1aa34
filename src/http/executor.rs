use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use tokio::time::Instant;

use crate::args::BodyFormat;
use crate::config::RunConfig;
use crate::metrics::RequestOutcome;
use crate::plan::RequestDescriptor;

use super::body::render_body;

/// Executes one planned request. Implementations never fail: transport
/// problems are folded into the returned outcome.
#[async_trait]
pub trait Execute: Send + Sync {
    async fn execute(&self, descriptor: &RequestDescriptor) -> RequestOutcome;
}

/// Executor backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    method: Method,
    headers: HeaderMap,
    body_template: String,
    body_format: BodyFormat,
}

impl HttpExecutor {
    #[must_use]
    pub fn new(client: Client, config: &RunConfig) -> Self {
        Self {
            client,
            method: config.method.clone(),
            headers: config.headers.clone(),
            body_template: config.body_template.clone(),
            body_format: config.body_format,
        }
    }

    // Configured headers win over the computed content type.
    fn request_headers(&self, content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.headers.len().saturating_add(1));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

#[async_trait]
impl Execute for HttpExecutor {
    async fn execute(&self, descriptor: &RequestDescriptor) -> RequestOutcome {
        let started_at = Local::now();
        let body = render_body(self.body_format, &self.body_template, &descriptor.data_parts);
        let request = match self
            .client
            .request(self.method.clone(), &descriptor.url)
            .headers(self.request_headers(body.content_type))
            .body(body.content)
            .build()
        {
            Ok(request) => request,
            Err(err) => {
                return RequestOutcome::transport_failure(
                    started_at,
                    Duration::ZERO,
                    describe_error(&err),
                );
            }
        };

        let start = Instant::now();
        let result = match self.client.execute(request).await {
            Ok(response) => {
                let status_code = response.status().as_u16();
                read_body(response).await.map(|text| (status_code, text))
            }
            Err(err) => Err(err),
        };
        let elapsed = start.elapsed();

        match result {
            Ok((status_code, text)) => RequestOutcome {
                status_code,
                elapsed,
                message: flatten_message(&text),
                started_at,
            },
            Err(err) => RequestOutcome::transport_failure(started_at, elapsed, describe_error(&err)),
        }
    }
}

async fn read_body(response: Response) -> Result<String, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Trims the body and collapses line breaks so it fits on one log line.
pub(super) fn flatten_message(body: &str) -> String {
    body.trim().replace("\r\n", " ").replace('\n', " ")
}

pub(super) fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let chain: Vec<String> = std::iter::successors(Some(err), |cause| (*cause).source())
        .map(ToString::to_string)
        .collect();
    format!("error: {}", chain.join(": "))
}
