//! De-indexing of an [`ObjDocument`] into GPU-ready vertices.
//!
//! [`flatten`] emits one vertex per triangle corner, face by face, so every
//! three consecutive vertices form one triangle of a non-indexed draw.
//! [`weld`] is the indexed alternative and is only used when asked for.

use std::collections::HashMap;

use crate::{
    document::{FaceVertex, ObjDocument},
    error::{ObjError, ObjResult},
    mesh::{FlatVertex, MeshData},
};

/// How corners are turned into vertices.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum VertexMode {
    /// One vertex per corner, no index buffer.
    #[default]
    Duplicate,
    /// Identical corners share a vertex; emits an index buffer.
    Weld,
}

/// Non-zero face indices that pointed past their sequence and were replaced
/// by defaults.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FlattenReport {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
}

impl FlattenReport {
    pub fn total(&self) -> usize {
        self.positions + self.texcoords + self.normals
    }
}

/// Resolve every corner of every face, in face-then-corner order.
pub fn flatten(doc: &ObjDocument) -> Vec<FlatVertex> {
    flatten_with_report(doc).0
}

pub fn flatten_with_report(doc: &ObjDocument) -> (Vec<FlatVertex>, FlattenReport) {
    let mut report = FlattenReport::default();
    let mut vertices = Vec::with_capacity(doc.faces.len() * 3);

    for face in &doc.faces {
        for corner in &face.corners {
            vertices.push(resolve(doc, corner, &mut report));
        }
    }

    log::debug!("Built {} vertices from OBJ.", vertices.len());
    (vertices, report)
}

/// Deduplicate corners with the same index triple and build an index buffer.
/// Expanding the result through its indices gives exactly [`flatten`]'s output.
pub fn weld(doc: &ObjDocument) -> ObjResult<MeshData> {
    let mut report = FlattenReport::default();
    let mut unique: HashMap<FaceVertex, u32> = HashMap::new();
    let mut vertices: Vec<FlatVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::with_capacity(doc.faces.len() * 3);

    for face in &doc.faces {
        for corner in &face.corners {
            let index = match unique.get(corner) {
                Some(&idx) => idx,
                None => {
                    let idx =
                        u32::try_from(vertices.len()).map_err(|_| ObjError::TooManyVertices)?;
                    vertices.push(resolve(doc, corner, &mut report));
                    unique.insert(*corner, idx);
                    idx
                }
            };
            indices.push(index);
        }
    }

    log::debug!(
        "Welded {} corners into {} vertices.",
        indices.len(),
        vertices.len()
    );
    Ok(MeshData::new(vertices, indices))
}

fn resolve(doc: &ObjDocument, corner: &FaceVertex, report: &mut FlattenReport) -> FlatVertex {
    FlatVertex::new(
        lookup(
            &doc.positions,
            corner.position,
            FlatVertex::DEFAULT_POSITION,
            &mut report.positions,
        ),
        lookup(
            &doc.texcoords,
            corner.texcoord,
            FlatVertex::DEFAULT_UV,
            &mut report.texcoords,
        ),
        lookup(
            &doc.normals,
            corner.normal,
            FlatVertex::DEFAULT_NORMAL,
            &mut report.normals,
        ),
    )
}

/// 1-based lookup; `0` and out-of-range indices yield `default`.
fn lookup<T: Copy>(items: &[T], index: u32, default: T, misses: &mut usize) -> T {
    let Some(zero_based) = (index as usize).checked_sub(1) else {
        return default;
    };
    match items.get(zero_based) {
        Some(&item) => item,
        None => {
            *misses += 1;
            default
        }
    }
}
