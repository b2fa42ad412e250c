/// Errors that can occur across branchscope.
///
/// Each variant wraps a specific failure domain. Library crates use this
/// type directly; the binary crate converts to `miette` diagnostics at the
/// boundary.
///
/// # Examples
///
/// ```
/// use branchscope_core::ScopeError;
///
/// let err = ScopeError::Validation("pull request #7 is not merged".into());
/// assert!(err.to_string().contains("not merged"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote platform (GitHub API) failure.
    #[error("GitHub API error: {0}")]
    Api(String),

    /// A precondition violated by the caller, e.g. an unmerged pull request
    /// or a branch name that does not match the pull request.
    #[error("validation error: {0}")]
    Validation(String),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScopeError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn api_error_displays_message() {
        let err = ScopeError::Api("rate limited".into());
        assert_eq!(err.to_string(), "GitHub API error: rate limited");
    }

    #[test]
    fn validation_error_displays_message() {
        let err = ScopeError::Validation("branch mismatch".into());
        assert_eq!(err.to_string(), "validation error: branch mismatch");
    }
}
