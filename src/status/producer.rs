use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};

use crate::errors::RoundelError;

use super::{Line, decode_lines};

/// The public TfL endpoint listing the status of every Underground line.
pub const DEFAULT_ENDPOINT: &str = "https://api.tfl.gov.uk/line/mode/tube/status";
pub const DEFAULT_TIMEOUT_S: u64 = 10;

/// A trait for producing line-status snapshots.
///
/// This trait abstracts the status data source so the collector and the
/// board can be exercised against scripted data in tests and offline runs.
///
/// # Lifecycle
///
/// 1. Call `start()` once to initialize the producer (for the live producer
///    this builds the HTTP client and its runtime)
/// 2. Call `fetch()` for every refresh cycle to get a full snapshot
pub trait StatusProducer {
    /// Initialize the producer and prepare its connection to the data source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or its runtime cannot be built.
    fn start(&mut self) -> Result<(), RoundelError>;

    /// Fetch one complete snapshot of all line statuses.
    ///
    /// Each call issues exactly one request; the returned records replace
    /// whatever snapshot came before. There is no retry and no partial
    /// result: any transport, HTTP or decode failure fails the whole fetch.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer is not started, the request fails,
    /// the response status is not a success, or the body does not decode.
    fn fetch(&mut self) -> Result<Vec<Line>, RoundelError>;
}

/// Live producer polling the TfL API over HTTPS.
///
/// reqwest's async client is driven from the collector thread through a
/// small current-thread runtime owned by the producer, so the rest of the
/// application stays free of async plumbing.
pub struct TflStatusProducer {
    endpoint: String,
    timeout: Duration,
    runtime: Option<tokio::runtime::Runtime>,
    client: Option<reqwest::Client>,
}

impl Default for TflStatusProducer {
    fn default() -> Self {
        TflStatusProducer::new(
            DEFAULT_ENDPOINT.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_S),
        )
    }
}

impl TflStatusProducer {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            endpoint,
            timeout,
            runtime: None,
            client: None,
        }
    }
}

impl StatusProducer for TflStatusProducer {
    fn start(&mut self) -> Result<(), RoundelError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RoundelError::RuntimeStartError { source: e })?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("roundel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoundelError::StatusRequestError { source: e })?;

        self.runtime = Some(runtime);
        self.client = Some(client);
        info!("TfL: status client ready for {}", self.endpoint);
        Ok(())
    }

    fn fetch(&mut self) -> Result<Vec<Line>, RoundelError> {
        let (Some(runtime), Some(client)) = (self.runtime.as_ref(), self.client.as_ref()) else {
            return Err(RoundelError::StatusProducerError {
                description: "The TfL client is not initialized, call start() first.".to_string(),
            });
        };

        let response = runtime
            .block_on(client.get(&self.endpoint).send())
            .map_err(|e| RoundelError::StatusRequestError { source: e })?;

        let code = response.status();
        if !code.is_success() {
            return Err(RoundelError::StatusHttpError {
                code: code.as_u16(),
            });
        }

        let body = runtime
            .block_on(response.text())
            .map_err(|e| RoundelError::StatusRequestError { source: e })?;
        let lines = decode_lines(&body)?;
        debug!("TfL: decoded {} line records", lines.len());
        Ok(lines)
    }
}

/// A mock status producer for tests and offline runs.
///
/// Replays a scripted sequence of fetch outcomes, one per `fetch()` call,
/// then reports exhaustion as a producer error. This enables:
/// - Unit testing of the collector loop without a network
/// - Reproducing failure sequences (HTTP errors, malformed bodies)
pub struct MockStatusProducer {
    outcomes: VecDeque<Result<Vec<Line>, RoundelError>>,
}

impl MockStatusProducer {
    /// Create a producer that replays the given outcomes in order.
    pub fn from_outcomes(outcomes: Vec<Result<Vec<Line>, RoundelError>>) -> Self {
        Self {
            outcomes: outcomes.into(),
        }
    }

    /// Shorthand for a producer whose every fetch succeeds with the given
    /// snapshots, in order.
    pub fn from_snapshots(snapshots: Vec<Vec<Line>>) -> Self {
        Self::from_outcomes(snapshots.into_iter().map(Ok).collect())
    }
}

impl StatusProducer for MockStatusProducer {
    fn start(&mut self) -> Result<(), RoundelError> {
        // Mock producer doesn't need to connect to anything
        Ok(())
    }

    fn fetch(&mut self) -> Result<Vec<Line>, RoundelError> {
        self.outcomes
            .pop_front()
            .unwrap_or_else(|| {
                Err(RoundelError::StatusProducerError {
                    description: "End of scripted outcomes".to_string(),
                })
            })
    }
}
