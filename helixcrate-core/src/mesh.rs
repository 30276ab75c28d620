//! Helix mesh: generated vertices plus the triangle list that joins the strands

use serde::{Deserialize, Serialize};

use crate::{generate, Error, HelixParams, HelixVertex, Result};

/// Triangle-list indices for the ribbon between the two strands.
///
/// Step `i` joins the slot pair `(2i, 2i + 1)` to the next pair with two
/// triangles, `[v, v+3, v+1]` and `[v, v+2, v+3]` where `v = 2i`.
pub fn helix_indices(num_steps: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(6 * num_steps as usize);
    for step in 0..num_steps {
        let v = 2 * step;
        indices.extend_from_slice(&[v, v + 3, v + 1, v, v + 2, v + 3]);
    }
    indices
}

/// A double helix ribbon with interleaved inner/outer vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelixMesh {
    pub vertices: Vec<HelixVertex>,
    pub indices: Vec<u32>,
}

impl HelixMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Wrap vertices produced by a dispatch with the matching topology.
    ///
    /// Fails with [`Error::BufferTooSmall`] when `vertices` has fewer than
    /// `params.vertex_count()` entries, since the indices would point past it.
    pub fn from_vertices(params: &HelixParams, vertices: Vec<HelixVertex>) -> Result<Self> {
        let required = params.vertex_count();
        if vertices.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: vertices.len(),
            });
        }
        Ok(Self {
            vertices,
            indices: helix_indices(params.num_steps),
        })
    }

    /// Generate the vertices on the CPU and build the topology
    pub fn generate(params: &HelixParams) -> Result<Self> {
        let vertices = generate(params)?;
        Self::from_vertices(params, vertices)
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Iterate over triangles as index triples
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Inner strand vertices (even slots)
    pub fn inner_strand(&self) -> impl Iterator<Item = &HelixVertex> {
        self.vertices.iter().step_by(2)
    }

    /// Outer strand vertices (odd slots)
    pub fn outer_strand(&self) -> impl Iterator<Item = &HelixVertex> {
        self.vertices.iter().skip(1).step_by(2)
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl Default for HelixMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_indices_for_one_step() {
        assert_eq!(helix_indices(1), vec![0, 3, 1, 0, 2, 3]);
        assert!(helix_indices(0).is_empty());
    }

    #[test]
    fn test_indices_stay_in_range() {
        let params = HelixParams::default();
        let indices = helix_indices(params.num_steps);
        assert_eq!(indices.len(), params.index_count());
        assert!(indices.iter().all(|&i| (i as usize) < params.vertex_count()));
        assert_eq!(indices.iter().copied().max(), Some(params.vertex_count() as u32 - 1));
    }

    #[test]
    fn test_generate_mesh() {
        let params = HelixParams::default().with_radii(2.0, 6.0).with_steps(32);
        let mesh = HelixMesh::generate(&params).unwrap();

        assert_eq!(mesh.vertex_count(), 66);
        assert_eq!(mesh.face_count(), 64);
        assert!(!mesh.is_empty());

        assert_eq!(mesh.inner_strand().count(), 33);
        assert_eq!(mesh.outer_strand().count(), 33);
        for vertex in mesh.inner_strand() {
            assert_relative_eq!(vertex.axial_radius(), 2.0, epsilon = 1e-4);
        }
        for vertex in mesh.outer_strand() {
            assert_relative_eq!(vertex.axial_radius(), 6.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_faces_are_non_degenerate() {
        let mesh = HelixMesh::generate(&HelixParams::default().with_steps(16)).unwrap();
        for [a, b, c] in mesh.faces() {
            assert!(a != b && b != c && a != c);
        }
    }

    #[test]
    fn test_from_vertices_rejects_short_list() {
        let params = HelixParams::default().with_steps(8);
        let mut vertices = generate(&params).unwrap();
        vertices.truncate(10);

        match HelixMesh::from_vertices(&params, vertices) {
            Err(Error::BufferTooSmall { required, actual }) => {
                assert_eq!(required, 18);
                assert_eq!(actual, 10);
            }
            other => panic!("expected BufferTooSmall, got {:?}", other),
        }
    }

    #[test]
    fn test_from_vertices_indices_in_range() {
        let params = HelixParams::default().with_steps(8);
        let mesh = HelixMesh::from_vertices(&params, generate(&params).unwrap()).unwrap();
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_clear() {
        let mut mesh = HelixMesh::generate(&HelixParams::default().with_steps(4)).unwrap();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh, HelixMesh::default());
    }
}
