// Error types for roundel

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum RoundelError {
    // Errors for the TfL status client
    #[snafu(display("Error requesting line status from the TfL API"))]
    StatusRequestError { source: reqwest::Error },
    #[snafu(display("TfL API answered with HTTP {code}"))]
    StatusHttpError { code: u16 },
    #[snafu(display("TfL API answered with a body that is not a line-status array"))]
    MalformedStatusError { source: serde_json::Error },
    #[snafu(display("Status producer error"))]
    StatusProducerError { description: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Runtime bootstrap errors
    #[snafu(display("Could not start the tokio runtime for the HTTP client"))]
    RuntimeStartError { source: io::Error },
}
