//! Finite-element mesh as handed over by a mesh-I/O kernel.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{MeshError, MeshResult};

/// Unstructured mesh with a single cell type.
///
/// Coordinates are stored flat (`space_dim` values per vertex, meters) and
/// connectivity is flat and zero-based (`corners` vertices per cell).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    pub cell_dim: usize,
    pub space_dim: usize,
    pub corners: usize,
    pub coordinates: Vec<f64>,
    pub cells: Vec<usize>,
    pub material_ids: Vec<i64>,
    /// Named vertex groups (boundary conditions, faults). Sorted, unique.
    pub groups: BTreeMap<String, Vec<usize>>,
}

impl Mesh {
    pub fn num_vertices(&self) -> usize {
        if self.space_dim == 0 {
            0
        } else {
            self.coordinates.len() / self.space_dim
        }
    }

    pub fn num_cells(&self) -> usize {
        if self.corners == 0 {
            0
        } else {
            self.cells.len() / self.corners
        }
    }

    pub fn vertex(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.space_dim)?;
        self.coordinates.get(start..start + self.space_dim)
    }

    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        let start = index.checked_mul(self.corners)?;
        self.cells.get(start..start + self.corners)
    }

    /// Verify the flat arrays agree with each other.
    pub fn check(&self) -> MeshResult<()> {
        if self.space_dim == 0 || self.coordinates.len() % self.space_dim != 0 {
            return Err(MeshError::Coordinates {
                coordinates: self.coordinates.len(),
                space_dim: self.space_dim,
            });
        }
        if self.corners == 0 || self.cells.len() % self.corners != 0 {
            return Err(MeshError::Connectivity {
                entries: self.cells.len(),
                corners: self.corners,
            });
        }

        let num_vertices = self.num_vertices();
        for (i, &v) in self.cells.iter().enumerate() {
            if v >= num_vertices {
                return Err(MeshError::VertexOutOfRange {
                    cell: i / self.corners,
                    vertex: v,
                    num_vertices,
                });
            }
        }

        if self.material_ids.len() != self.num_cells() {
            return Err(MeshError::MaterialIds {
                ids: self.material_ids.len(),
                cells: self.num_cells(),
            });
        }

        for (name, vertices) in &self.groups {
            if let Some(&v) = vertices.iter().find(|&&v| v >= num_vertices) {
                return Err(MeshError::GroupOutOfRange {
                    group: name.clone(),
                    vertex: v,
                    num_vertices,
                });
            }
        }
        Ok(())
    }
}
