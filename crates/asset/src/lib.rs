//! OBJ loading and de-indexing.
//! Parses `v`/`vt`/`vn`/`f` records into an [`ObjDocument`] and flattens it
//! into interleaved [`FlatVertex`] data for a non-indexed triangle-list draw.

pub mod document;
pub mod error;
pub mod flatten;
pub mod mesh;
pub mod obj;

pub use document::{Face, FaceVertex, ObjDocument, ObjStats};
pub use error::{Attribute, ObjError, ObjResult};
pub use flatten::{FlattenReport, VertexMode, flatten, flatten_with_report, weld};
pub use mesh::{FlatVertex, MeshData};
pub use obj::{ParseOptions, load_obj_from_path, load_obj_from_path_with_options};
