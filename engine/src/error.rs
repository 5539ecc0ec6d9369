//! Error Types
//!
//! Failures the sandbox can report. Placement and removal errors are expected
//! outcomes of user input and are logged then ignored by [`crate::Sandbox`];
//! configuration errors surface to the binary.

use glam::IVec3;

/// Block type lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("block type {id} is out of range (registry holds {len} types)")]
    OutOfRange { id: usize, len: usize },
    #[error("registry holds {count} block types, at most {max} hotbar slots exist")]
    TooManyTypes { count: usize, max: usize },
    #[error("registry must hold at least one block type")]
    Empty,
}

/// Reasons a placement request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("cell {cell} overlaps the player")]
    Blocked { cell: IVec3 },
    #[error("unknown block type: {0}")]
    UnknownType(#[from] RegistryError),
}

/// Reasons a removal request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RemovalError {
    #[error("floor tiles cannot be removed")]
    NotRemovable,
    #[error("voxel no longer exists")]
    NotFound,
}

/// Configuration loading and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegistryError::OutOfRange { id: 7, len: 6 };
        assert_eq!(
            err.to_string(),
            "block type 7 is out of range (registry holds 6 types)"
        );

        let blocked = PlacementError::Blocked { cell: IVec3::new(0, 1, 0) };
        assert!(blocked.to_string().contains("overlaps the player"));
    }

    #[test]
    fn test_registry_error_converts_into_placement_error() {
        let err: PlacementError = RegistryError::OutOfRange { id: 9, len: 6 }.into();
        assert!(matches!(err, PlacementError::UnknownType(_)));
    }
}
