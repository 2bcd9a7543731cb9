use thiserror::Error;

/// Why a candidate mutation was refused by validity checking. These are
/// ordinary outcomes of editing, surfaced to the user as a transient
/// notice; the mesh is left untouched.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("Invalid triangle: Edges would cross.")]
    EdgeCross,

    #[error("Invalid triangle: New vertex is inside an existing triangle.")]
    VertexInsideTriangle,

    #[error("Invalid triangle: Engulfs an existing vertex.")]
    Engulfs,

    #[error("Invalid triangle: Duplicate of an existing triangle.")]
    Duplicate,
}

/// Hard errors on the import/export surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error loading mesh: {0}")]
    ImportFormat(String),

    #[error("{0}")]
    Precondition(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
