//! Minimal OBJ parser for `v`, `vt`, `vn` and triangular `f` records.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use crate::{
    document::{Face, FaceVertex, ObjDocument},
    error::{ObjError, ObjResult},
};

/// Parser behaviour switches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ParseOptions {
    /// Fan-triangulate `f` lines with more than three corners instead of
    /// rejecting them.
    pub triangulate_polygons: bool,
}

/// Load an OBJ document from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<ObjDocument> {
    load_obj_from_path_with_options(path, &ParseOptions::default())
}

pub fn load_obj_from_path_with_options(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> ObjResult<ObjDocument> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ObjError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ObjError::Open {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let is_dir = file
        .metadata()
        .map_err(|source| ObjError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .is_dir();
    if is_dir {
        return Err(ObjError::Open {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::IsADirectory, "path is a directory"),
        });
    }

    let doc = parse_obj(BufReader::new(file), options)?;
    log::info!("Loaded OBJ: {}", path.display());
    log::info!("  {}", doc.stats());
    Ok(doc)
}

/// Load an OBJ document from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<ObjDocument> {
    parse_obj(reader, &ParseOptions::default())
}

pub fn load_obj_from_reader_with_options<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> ObjResult<ObjDocument> {
    parse_obj(reader, options)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<ObjDocument> {
    parse_obj(io::Cursor::new(contents), &ParseOptions::default())
}

pub fn load_obj_from_str_with_options(
    contents: &str,
    options: &ParseOptions,
) -> ObjResult<ObjDocument> {
    parse_obj(io::Cursor::new(contents), options)
}

fn parse_obj<R: BufRead>(reader: R, options: &ParseOptions) -> ObjResult<ObjDocument> {
    let mut doc = ObjDocument::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ObjError::Io {
            line: line_no,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };
        let mut fields = LineFields {
            parts,
            line_no,
            text: trimmed,
        };

        match tag {
            "v" => {
                let x = fields.coord("x coordinate")?;
                let y = fields.coord("y coordinate")?;
                let z = fields.coord("z coordinate")?;
                fields.finish()?;
                doc.positions.push([x, y, z]);
            }
            "vt" => {
                let u = fields.coord("u coordinate")?;
                let v = fields.coord("v coordinate")?;
                fields.finish()?;
                doc.texcoords.push([u, v]);
            }
            "vn" => {
                let nx = fields.coord("nx coordinate")?;
                let ny = fields.coord("ny coordinate")?;
                let nz = fields.coord("nz coordinate")?;
                fields.finish()?;
                doc.normals.push([nx, ny, nz]);
            }
            "f" => fields.faces(options, &mut doc.faces)?,
            other => {
                log::trace!("Ignoring OBJ directive '{}' on line {}", other, line_no);
            }
        }
    }

    Ok(doc)
}

/// Remaining tokens of one record line plus what is needed to report errors.
struct LineFields<'a> {
    parts: SplitWhitespace<'a>,
    line_no: usize,
    text: &'a str,
}

impl LineFields<'_> {
    fn malformed(&self, reason: impl Into<String>) -> ObjError {
        ObjError::malformed(self.line_no, self.text, reason)
    }

    fn coord(&mut self, what: &str) -> ObjResult<f32> {
        let token = self
            .parts
            .next()
            .ok_or_else(|| self.malformed(format!("missing {what}")))?;
        token
            .parse::<f32>()
            .map_err(|_| self.malformed(format!("invalid {what} '{token}'")))
    }

    fn finish(&mut self) -> ObjResult<()> {
        match self.parts.next() {
            Some(extra) => Err(self.malformed(format!("unexpected trailing field '{extra}'"))),
            None => Ok(()),
        }
    }

    fn faces(&mut self, options: &ParseOptions, out: &mut Vec<Face>) -> ObjResult<()> {
        let mut corners = Vec::with_capacity(3);
        while let Some(token) = self.parts.next() {
            corners.push(self.face_vertex(token)?);
        }

        match corners.len() {
            n if n < 3 => Err(self.malformed(format!("face needs 3 corners, found {n}"))),
            3 => {
                out.push(Face::new([corners[0], corners[1], corners[2]]));
                Ok(())
            }
            _ if options.triangulate_polygons => {
                // Triangulate fan
                for i in 1..(corners.len() - 1) {
                    out.push(Face::new([corners[0], corners[i], corners[i + 1]]));
                }
                Ok(())
            }
            n => Err(self.malformed(format!("face has {n} corners, only triangles are supported"))),
        }
    }

    /// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn`. Empty sub-fields become `0`.
    fn face_vertex(&self, token: &str) -> ObjResult<FaceVertex> {
        let mut indices = [0u32; 3];
        for (slot, field) in token.split('/').enumerate() {
            if slot >= indices.len() {
                return Err(self.malformed(format!("face element '{token}' has too many fields")));
            }
            indices[slot] = self.index(field, token)?;
        }
        Ok(FaceVertex::new(indices[0], indices[1], indices[2]))
    }

    fn index(&self, field: &str, token: &str) -> ObjResult<u32> {
        if field.is_empty() {
            return Ok(0);
        }
        // Relative indices, including `-0`, are never resolved.
        if field.starts_with('-') {
            return Err(ObjError::UnsupportedIndexForm {
                line: self.line_no,
                token: token.to_owned(),
            });
        }
        let raw = field
            .parse::<u64>()
            .map_err(|_| self.malformed(format!("invalid index '{field}' in '{token}'")))?;
        u32::try_from(raw).map_err(|_| self.malformed(format!("index {raw} too large")))
    }
}
