//! Crate-level error types.
//!
//! Only the crate boundary can fail: reading files, importing meshes and
//! parsing option presets. Numerical degeneracies inside the kernel are
//! guarded locally and surface as `None`, never as an error.

/// Errors produced by the orrery crate.
#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The OBJ importer rejected the file.
    #[error("OBJ load error: {0}")]
    ObjLoad(#[from] tobj::LoadError),
    /// Mesh data is structurally invalid (dangling index, partial triangle).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// TOML options parsing/serialization failure.
    #[error("options parse error: {0}")]
    OptionsParse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_keep_source() {
        let err: OrreryError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, OrreryError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn geometry_error_message() {
        let err = OrreryError::InvalidGeometry("index 9 out of range".into());
        assert_eq!(err.to_string(), "invalid geometry: index 9 out of range");
    }
}
