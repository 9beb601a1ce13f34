use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisclosureError {
    /// A required credential is absent. Names the missing variable(s).
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    /// Transport or parse failure talking to the disclosure API.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The disclosure API answered with a non-success status code in its body.
    #[error("Upstream rejected request (status {status}): {message}")]
    UpstreamRejected { status: String, message: String },

    #[error("Unparseable receipt timestamp: {0:?}")]
    TimestampUnparseable(String),

    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}
