//! Crate error type

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SphereError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No usable rendering surface. Callers treat this as "disable quietly".
    #[error("rendering surface unavailable: {0}")]
    Surface(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SphereError::ConfigNotFound(PathBuf::from("/tmp/sphere.json"));
        assert_eq!(err.to_string(), "config file not found: /tmp/sphere.json");

        let err = SphereError::Surface("missing #canvas-container".into());
        assert_eq!(
            err.to_string(),
            "rendering surface unavailable: missing #canvas-container"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SphereError = json_err.into();
        assert!(matches!(err, SphereError::Config(_)));
        assert!(err.to_string().starts_with("config parse error:"));
    }
}
