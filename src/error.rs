use thiserror::Error;

/// Faults that can be rejected before synthesis ever starts.
///
/// Synthesis itself never returns an error: a broken or incomplete type graph
/// degrades locally to placeholder/warning literals inside the output.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-side misconfiguration, caught by `SynthConfig::validate`.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A model file could not be read or parsed.
    #[error("failed to load type model from {path}: {detail}")]
    Model { path: String, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;
