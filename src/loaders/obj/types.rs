use std::collections::HashMap;

use crate::math::{Vector2, Vector3};

#[derive(Debug, Clone)]
pub struct ObjLoadOptions {
    /// Record every numeric token that only parses leniently.
    pub report_malformed_tokens: bool,
    /// Synthesize smooth normals for sub-meshes whose faces lack them.
    pub smooth_normals: bool,
}

impl Default for ObjLoadOptions {
    fn default() -> Self {
        Self {
            report_malformed_tokens: false,
            smooth_normals: true,
        }
    }
}

/// One face corner as written in the file: a 0-based position index plus
/// optional texture-coordinate and normal indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawIndex {
    pub position: i64,
    pub uv: Option<i64>,
    pub normal: Option<i64>,
}

impl RawIndex {
    pub fn new(position: i64, uv: Option<i64>, normal: Option<i64>) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// How many corners of a sub-mesh reference a given attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributePresence {
    Absent,
    Partial,
    Complete,
}

impl AttributePresence {
    pub fn scan<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let (mut with, mut without) = (false, false);
        for present in flags {
            if present {
                with = true;
            } else {
                without = true;
            }
        }

        match (with, without) {
            (true, false) => AttributePresence::Complete,
            (true, true) => AttributePresence::Partial,
            (false, _) => AttributePresence::Absent,
        }
    }

    pub fn any(self) -> bool {
        self != AttributePresence::Absent
    }
}

/// Raw attribute streams and naming state for the object being read.
#[derive(Debug, Clone, Default)]
pub struct RawSubMesh {
    pub name: String,
    pub material: MaterialRecord,
    pub positions: Vec<Vector3>,
    pub textures: Vec<Vector2>,
    pub normals: Vec<Vector3>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    pub name: String,

    pub ambient_color: Vector3,
    pub diffuse_color: Vector3,
    pub specular_color: Vector3,

    pub specular_exponent: f32,
    pub optical_density: f32,
    pub dissolve: f32,
    pub illumination: i32,

    pub ambient_texture: String,
    pub diffuse_texture: String,
    pub specular_texture: String,
    pub specular_highlight_texture: String,
    pub alpha_texture: String,
    pub bump_texture: String,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient_color: Vector3::new(1.0, 1.0, 1.0),
            diffuse_color: Vector3::new(1.0, 1.0, 1.0),
            specular_color: Vector3::new(1.0, 1.0, 1.0),
            specular_exponent: 0.0,
            optical_density: 0.0,
            dissolve: 0.0,
            illumination: 0,
            ambient_texture: String::new(),
            diffuse_texture: String::new(),
            specular_texture: String::new(),
            specular_highlight_texture: String::new(),
            alpha_texture: String::new(),
            bump_texture: String::new(),
        }
    }
}

/// Materials read from a `.mtl` file, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, MaterialRecord>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, material: MaterialRecord) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get(&self, name: &str) -> Option<&MaterialRecord> {
        self.materials.get(name)
    }

    /// The named material, or a default record when the name is unknown.
    pub fn resolve(&self, name: &str) -> MaterialRecord {
        match self.materials.get(name) {
            Some(material) => material.clone(),
            None => {
                log::debug!("unknown material '{}', using defaults", name);
                MaterialRecord::default()
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Render-ready mesh: parallel vertex attribute arrays plus a triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    pub name: String,
    pub material: MaterialRecord,
    pub positions: Vec<Vector3>,
    pub textures: Vec<Vector2>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|triangle| [triangle[0], triangle[1], triangle[2]])
    }

    /// Adds a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vector3, texture: Vector2, normal: Vector3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.textures.push(texture);
        self.normals.push(normal);
        index
    }

    /// Replaces every normal with the normalized sum of the unit face
    /// normals of the triangles touching it. Face normals follow
    /// `(v1 - v0) x (v2 - v0)`.
    pub fn calc_normals(&mut self) {
        for normal in &mut self.normals {
            *normal = Vector3::zero();
        }

        for chunk in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (chunk[0] as usize, chunk[1] as usize, chunk[2] as usize);

            let edge1 = self.positions[i1] - self.positions[i0];
            let edge2 = self.positions[i2] - self.positions[i0];
            let normal = edge1.cross(edge2).normalize();

            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize();
        }
    }

    /// Axis-aligned bounds of the positions, `None` for an empty mesh.
    pub fn aabb(&self) -> Option<(Vector3, Vector3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }
}
