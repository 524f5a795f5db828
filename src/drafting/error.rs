use thiserror::Error;

/// Every way a drafting request can fail. None of these reach the user as
/// errors: [`super::resolve_draft`] turns them into fallback content.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("no API key configured for the drafting service")]
    MissingCredential,
    #[error("failed to start the drafting runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("request to the drafting service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("drafting service answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("drafting service returned no content")]
    EmptyResponse,
    #[error("drafting reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("drafting reply has no usable `{0}` field")]
    MissingField(&'static str),
}
