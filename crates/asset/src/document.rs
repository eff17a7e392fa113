//! Indexed OBJ document as read from disk, before any de-indexing.

use std::fmt;

use crate::error::{Attribute, ObjError, ObjResult};

pub type Position = [f32; 3];
pub type TexCoord = [f32; 2];
pub type Normal = [f32; 3];

/// One triangle corner as written in the file. Indices are 1-based; `0` means
/// the component was not given.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct FaceVertex {
    pub position: u32,
    pub texcoord: u32,
    pub normal: u32,
}

impl FaceVertex {
    pub const fn new(position: u32, texcoord: u32, normal: u32) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Face {
    pub corners: [FaceVertex; 3],
}

impl Face {
    pub const fn new(corners: [FaceVertex; 3]) -> Self {
        Self { corners }
    }
}

/// Records in file order. Face indices are not checked against the
/// sequence lengths; see [`ObjDocument::validate`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjDocument {
    pub positions: Vec<Position>,
    pub texcoords: Vec<TexCoord>,
    pub normals: Vec<Normal>,
    pub faces: Vec<Face>,
}

/// Element counts of a document, for diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ObjStats {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub faces: usize,
}

impl fmt::Display for ObjStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "positions={} texcoords={} normals={} faces={}",
            self.positions, self.texcoords, self.normals, self.faces
        )
    }
}

impl ObjDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ObjStats {
        ObjStats {
            positions: self.positions.len(),
            texcoords: self.texcoords.len(),
            normals: self.normals.len(),
            faces: self.faces.len(),
        }
    }

    /// `true` when the document has no faces to draw.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Check that every non-zero face index refers to an existing record.
    /// Returns the first offending reference in face-then-corner order.
    pub fn validate(&self) -> ObjResult<()> {
        for (face_no, face) in self.faces.iter().enumerate() {
            for (corner_no, corner) in face.corners.iter().enumerate() {
                let refs = [
                    (Attribute::Position, corner.position, self.positions.len()),
                    (Attribute::TexCoord, corner.texcoord, self.texcoords.len()),
                    (Attribute::Normal, corner.normal, self.normals.len()),
                ];
                for (attribute, index, len) in refs {
                    if index != 0 && index as usize > len {
                        return Err(ObjError::IndexOutOfRange {
                            face: face_no,
                            corner: corner_no,
                            attribute,
                            index,
                            len,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_doc() -> ObjDocument {
        ObjDocument {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            texcoords: vec![[0.5, 0.5]],
            normals: vec![],
            faces: vec![Face::new([
                FaceVertex::new(1, 1, 0),
                FaceVertex::new(2, 1, 0),
                FaceVertex::new(3, 0, 0),
            ])],
        }
    }

    #[test]
    fn stats_count_each_sequence() {
        let stats = triangle_doc().stats();
        assert_eq!(
            stats,
            ObjStats {
                positions: 3,
                texcoords: 1,
                normals: 0,
                faces: 1
            }
        );
        assert_eq!(
            stats.to_string(),
            "positions=3 texcoords=1 normals=0 faces=1"
        );
    }

    #[test]
    fn absent_indices_pass_validation() {
        assert!(triangle_doc().validate().is_ok());
    }

    #[test]
    fn validate_reports_first_bad_reference() {
        let mut doc = triangle_doc();
        doc.faces[0].corners[1].normal = 4;
        doc.faces[0].corners[2].position = 999;
        match doc.validate() {
            Err(ObjError::IndexOutOfRange {
                face,
                corner,
                attribute,
                index,
                len,
            }) => {
                assert_eq!((face, corner), (0, 1));
                assert_eq!(attribute, Attribute::Normal);
                assert_eq!((index, len), (4, 0));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_document() {
        let doc = ObjDocument::new();
        assert!(doc.is_empty());
        assert!(doc.validate().is_ok());
    }
}
