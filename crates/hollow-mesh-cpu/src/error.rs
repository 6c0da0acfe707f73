use std::error::Error;
use std::fmt;

use crate::face::FaceDir;

/// Precondition violations caught before generation starts. The pipeline has
/// no recoverable external failures; anything else is a debug assertion.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MeshError {
    /// The chunk's voxel buffer does not hold `chunk_size^3` cells.
    GridSizeMismatch { expected: usize, actual: usize },
    /// The chunk edge length exceeds what the merge counters can span.
    ChunkTooLarge { size: usize, max: usize },
    /// A supplied neighbor grid does not match the chunk's edge length.
    NeighborSizeMismatch {
        dir: FaceDir,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::GridSizeMismatch { expected, actual } => write!(
                f,
                "chunk voxel buffer holds {actual} cells, expected {expected}"
            ),
            MeshError::ChunkTooLarge { size, max } => {
                write!(f, "chunk edge length {size} exceeds the supported maximum {max}")
            }
            MeshError::NeighborSizeMismatch {
                dir,
                expected,
                actual,
            } => write!(
                f,
                "{dir:?} neighbor grid has edge length {actual}, expected {expected}"
            ),
        }
    }
}

impl Error for MeshError {}
