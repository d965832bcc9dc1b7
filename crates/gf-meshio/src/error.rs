use gf_core::KernelError;
use thiserror::Error;

pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unsupported mesh format: {0}")]
    Format(String),

    #[error("Missing section ${0}")]
    MissingSection(&'static str),

    #[error("{coordinates} coordinates do not fill {space_dim}-D vertices")]
    Coordinates { coordinates: usize, space_dim: usize },

    #[error("{entries} connectivity entries do not fill cells of {corners} corners")]
    Connectivity { entries: usize, corners: usize },

    #[error("Cell {cell} references vertex {vertex}, but the mesh has {num_vertices}")]
    VertexOutOfRange {
        cell: usize,
        vertex: usize,
        num_vertices: usize,
    },

    #[error("{ids} material ids for {cells} cells")]
    MaterialIds { ids: usize, cells: usize },

    #[error("Group '{group}' references vertex {vertex}, but the mesh has {num_vertices}")]
    GroupOutOfRange {
        group: String,
        vertex: usize,
        num_vertices: usize,
    },

    #[error("Mesh writing is not supported by {0}")]
    WriteUnsupported(&'static str),
}

impl From<MeshError> for KernelError {
    fn from(err: MeshError) -> Self {
        KernelError::new(err.to_string())
    }
}
