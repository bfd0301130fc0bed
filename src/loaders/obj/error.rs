use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems found while loading an OBJ file. None of these abort a whole
/// load; they are logged and kept as diagnostics on the loader.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("{attribute} index {index} is out of range (count={len})")]
    IndexOutOfRange {
        attribute: &'static str,
        index: i64,
        len: usize,
    },
    #[error("{}:{line}: malformed numeric token '{token}'", .file.display())]
    MalformedToken {
        file: PathBuf,
        line: usize,
        token: String,
    },
    #[error("{}:{line}: read failed: {source}", .file.display())]
    ReadFailed {
        file: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("unable to open '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{path}' is not a .mtl material library")]
    NotMaterialLibrary { path: String },
}

pub type ObjResult<T> = Result<T, ObjError>;
