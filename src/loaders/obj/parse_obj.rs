use std::path::{Path, PathBuf};

use super::error::ObjError;
use super::face::FaceAccumulator;
use super::index::NumericReader;
use super::indexed::MeshIndexer;
use super::parse_mtl::try_load_materials;
use super::source::{folder_of, FileOpener, LineSource, SourceOpener};
use super::tokenize::{first_token, tail};
use super::types::{IndexedMesh, MaterialLibrary, ObjLoadOptions, RawSubMesh};
use crate::math::{Vector2, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjDirective {
    Object,
    Group,
    Position,
    TexCoord,
    Normal,
    Face,
    UseMaterial,
    MaterialLib,
}

impl ObjDirective {
    fn from_token(token: &str) -> Option<Self> {
        let directive = match token {
            "o" => ObjDirective::Object,
            "g" => ObjDirective::Group,
            "v" => ObjDirective::Position,
            "vt" => ObjDirective::TexCoord,
            "vn" => ObjDirective::Normal,
            "f" => ObjDirective::Face,
            "usemtl" => ObjDirective::UseMaterial,
            "mtllib" => ObjDirective::MaterialLib,
            _ => return None,
        };
        Some(directive)
    }
}

/// Reads Wavefront OBJ files into indexed meshes, one per `o`/`g` block.
///
/// Loading never fails as a whole: problems are logged, kept in
/// [`ObjLoader::diagnostics`], and whatever could be built is returned.
/// A loader holds all of its parsing state, so independent loaders can run
/// on separate threads.
pub struct ObjLoader<O = FileOpener> {
    opener: O,
    options: ObjLoadOptions,
    folder: PathBuf,
    numbers: NumericReader,
    materials: MaterialLibrary,
    loading: RawSubMesh,
    faces: FaceAccumulator,
    loaded: Vec<IndexedMesh>,
    diagnostics: Vec<ObjError>,
}

impl ObjLoader<FileOpener> {
    pub fn new() -> Self {
        Self::with_opener(FileOpener)
    }
}

impl Default for ObjLoader<FileOpener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SourceOpener> ObjLoader<O> {
    pub fn with_opener(opener: O) -> Self {
        Self {
            opener,
            options: ObjLoadOptions::default(),
            folder: PathBuf::new(),
            numbers: NumericReader::default(),
            materials: MaterialLibrary::new(),
            loading: RawSubMesh::default(),
            faces: FaceAccumulator::new(),
            loaded: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn options(mut self, options: ObjLoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Problems reported by the most recent load.
    pub fn diagnostics(&self) -> &[ObjError] {
        &self.diagnostics
    }

    /// Materials from the most recent `mtllib` of the last load.
    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn load(&mut self, path: &Path) -> Vec<IndexedMesh> {
        self.reset(path.to_path_buf(), folder_of(path));

        let mut source = match self.opener.open(path) {
            Ok(source) => source,
            Err(source) => {
                let error = ObjError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                };
                log::warn!("unable to load mesh: {}", error);
                self.diagnostics.push(error);
                return Vec::new();
            }
        };

        log::info!("loading mesh: {}", path.display());
        self.read(source.as_mut())
    }

    /// Parses an already opened source. `folder` is where `mtllib` paths and
    /// texture paths are resolved from. Diagnostics for the source itself
    /// carry an empty file name.
    pub fn load_from(&mut self, source: &mut dyn LineSource, folder: &Path) -> Vec<IndexedMesh> {
        self.reset(PathBuf::new(), folder.to_path_buf());
        self.read(source)
    }

    fn reset(&mut self, file: PathBuf, folder: PathBuf) {
        self.folder = folder;
        self.numbers = NumericReader::for_file(file, self.options.report_malformed_tokens);
        self.materials = MaterialLibrary::new();
        self.loading = RawSubMesh::default();
        self.faces.clear();
        self.loaded.clear();
        self.diagnostics.clear();
    }

    fn read(&mut self, source: &mut dyn LineSource) -> Vec<IndexedMesh> {
        let mut line_number = 0;
        while let Some(line) = source.next_line() {
            line_number += 1;
            match line {
                Ok(line) => self.process_line(&line, line_number),
                Err(e) => {
                    self.numbers.read_failed(line_number, e);
                    break;
                }
            }
        }

        self.flush();
        self.diagnostics.extend(self.numbers.take_reports());

        match self.loaded.last() {
            Some(last) => log::info!(
                "loaded {} mesh(es), last one with {} vertices",
                self.loaded.len(),
                last.vertex_count()
            ),
            None => log::info!("no meshes loaded"),
        }
        std::mem::take(&mut self.loaded)
    }

    fn process_line(&mut self, line: &str, line_number: usize) {
        if line.len() < 2 {
            return;
        }
        let Some(directive) = ObjDirective::from_token(first_token(line)) else {
            return;
        };
        let rest = tail(line);

        match directive {
            ObjDirective::Object | ObjDirective::Group => {
                self.flush();
                self.loading.name = rest.to_string();
            }
            ObjDirective::Position => {
                let [x, y, z] = self.numbers.floats::<3>(rest, line_number);
                self.loading.positions.push(Vector3::new(x, y, z));
            }
            ObjDirective::TexCoord => {
                let [u, v] = self.numbers.floats::<2>(rest, line_number);
                self.loading.textures.push(Vector2::new(u, v));
            }
            ObjDirective::Normal => {
                let [x, y, z] = self.numbers.floats::<3>(rest, line_number);
                self.loading.normals.push(Vector3::new(x, y, z));
            }
            ObjDirective::Face => self.faces.create_face(line, &mut self.numbers, line_number),
            ObjDirective::UseMaterial => self.loading.material = self.materials.resolve(rest),
            ObjDirective::MaterialLib => {
                if !self.materials.is_empty() {
                    log::debug!("mtllib '{}' replaces previously loaded materials", rest);
                }
                let mut numbers = NumericReader::for_file(
                    self.folder.join(rest),
                    self.options.report_malformed_tokens,
                );
                self.materials =
                    match try_load_materials(&self.opener, &self.folder, rest, &mut numbers) {
                        Ok(materials) => materials,
                        Err(error) => {
                            log::warn!("unable to load materials: {}", error);
                            self.diagnostics.push(error);
                            MaterialLibrary::new()
                        }
                    };
                self.diagnostics.extend(numbers.take_reports());
            }
        }
    }

    /// Turns the pending faces into a mesh. Attribute arrays are kept since
    /// OBJ indices count from the start of the file.
    fn flush(&mut self) {
        if self.faces.is_empty() {
            return;
        }

        if self.loading.positions.is_empty() {
            let error = ObjError::IndexOutOfRange {
                attribute: "position",
                index: self.faces.corners()[0].position,
                len: 0,
            };
            log::error!("dropping mesh '{}': {}", self.loading.name, error);
            self.diagnostics.push(error);
            self.faces.clear();
            return;
        }

        let built = MeshIndexer::new(&self.loading, self.faces.corners())
            .smooth_normals(self.options.smooth_normals)
            .build();
        match built {
            Ok(mesh) => {
                log::info!(
                    "loaded mesh '{}' with {} vertices",
                    mesh.name,
                    mesh.vertex_count()
                );
                self.loaded.push(mesh);
            }
            Err(error) => {
                log::error!("dropping mesh '{}': {}", self.loading.name, error);
                self.diagnostics.push(error);
            }
        }
        self.faces.clear();
    }
}

/// Loads every mesh of the OBJ file at `path` with default options.
pub fn load_mesh(path: &Path) -> Vec<IndexedMesh> {
    ObjLoader::new().load(path)
}
