pub mod app;
pub mod loaders;
pub mod math;

pub use loaders::obj::{
    load_mesh, IndexedMesh, MaterialRecord, ObjError, ObjLoadOptions, ObjLoader,
};
