//! Error taxonomy for the geometry kernel.
//!
//! A single [KernelError] enum covers every fallible boundary; recoverable
//! conditions (placement collisions, layout conflicts) remain plain return
//! values and are never represented here.

use thiserror::Error as ThisError;

/// Errors that can be returned from the kernel's fallible operations.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum KernelError {
    /// A snap mode name did not match any canonical mode or known alias.
    #[error("invalid snap mode: {name}")]
    InvalidSnapMode { name: String },

    /// [crate::geometry::robust_union] was called with no rooms.
    #[error("cannot union an empty room list")]
    EmptyLayout,

    /// The union fallback chain failed to produce a polygonal result.
    #[error("union failed: resulting geometry type was {geom_type}")]
    UnionFailed { geom_type: String },

    /// [crate::scene_grid::SceneGrid::place] was called with a name already in the scene.
    #[error("object '{name}' already exists in scene")]
    DuplicateName { name: String },

    /// Mesh validation found one or more error-level issues; generation aborted.
    #[error("generation gate failed for '{spec_id}':\n{report}")]
    GenerationError { spec_id: String, report: String },

    /// A [crate::floorplan::BuildingSpec] had a non-positive dimension or zero floors.
    #[error("invalid building spec: {reason}")]
    InvalidSpec { reason: String },

    /// Propagated I/O failure (e.g. writing the export manifest).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Propagated JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Any error not represented by a more specific variant.
    #[error("unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}

/// Convenience alias used throughout the crate.
pub type KernelResult<T> = Result<T, KernelError>;
