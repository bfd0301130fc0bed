//! Wavefront OBJ/MTL loading into indexed triangle meshes.

pub mod error;
pub mod face;
pub mod index;
pub mod indexed;
pub mod parse_mtl;
pub mod parse_obj;
pub mod source;
pub mod tokenize;
pub mod types;

pub use error::{ObjError, ObjResult};
pub use indexed::{to_indexed_mesh, MeshIndexer};
pub use parse_mtl::load_materials;
pub use parse_obj::{load_mesh, ObjLoader};
pub use source::{folder_of, FileOpener, LineSource, MemoryOpener, ReaderLines, SourceOpener};
pub use types::{
    AttributePresence, IndexedMesh, MaterialLibrary, MaterialRecord, ObjLoadOptions, RawIndex,
    RawSubMesh,
};
