use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("health provider is not installed on this device")]
    Unavailable,
    #[error("health provider must be updated to the latest version")]
    UpdateRequired,
    #[error("read permissions have not been granted")]
    PermissionDenied,
    #[error("health query failed: {0}")]
    Query(String),
}

impl ProviderError {
    /// True for the errors raised while acquiring the client.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProviderError::Unavailable | ProviderError::UpdateRequired)
    }
}
