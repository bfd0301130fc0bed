//! Conversion of raw face corners into a deduplicated, render-ready mesh.
//!
//! Two meshes are built side by side. The result mesh merges every corner
//! whose position, texture coordinate and normal *values* agree. The normal
//! mesh keeps one vertex per distinct raw index triple and is only used to
//! accumulate smooth normals when the file supplied none; those normals are
//! then copied back onto the result vertices.

use std::collections::HashMap;

use super::error::{ObjError, ObjResult};
use super::types::{AttributePresence, IndexedMesh, RawIndex, RawSubMesh};
use crate::math::{Vector2, Vector3};

fn fetch<T: Copy>(values: &[T], index: i64, attribute: &'static str) -> ObjResult<T> {
    usize::try_from(index)
        .ok()
        .and_then(|i| values.get(i))
        .copied()
        .ok_or(ObjError::IndexOutOfRange {
            attribute,
            index,
            len: values.len(),
        })
}

struct Corner {
    position: Vector3,
    texture: Vector2,
    normal: Vector3,
}

pub struct MeshIndexer<'a> {
    raw: &'a RawSubMesh,
    corners: &'a [RawIndex],
    uvs: AttributePresence,
    normals: AttributePresence,
    smooth_normals: bool,
}

impl<'a> MeshIndexer<'a> {
    pub fn new(raw: &'a RawSubMesh, corners: &'a [RawIndex]) -> Self {
        Self {
            raw,
            corners,
            uvs: AttributePresence::scan(corners.iter().map(|c| c.uv.is_some())),
            normals: AttributePresence::scan(corners.iter().map(|c| c.normal.is_some())),
            smooth_normals: true,
        }
    }

    pub fn smooth_normals(mut self, enabled: bool) -> Self {
        self.smooth_normals = enabled;
        self
    }

    /// Normals come from the file only when every corner references one.
    pub fn synthesizes_normals(&self) -> bool {
        self.smooth_normals && self.normals != AttributePresence::Complete
    }

    fn corner_values(&self, corner: &RawIndex) -> ObjResult<Corner> {
        let position = fetch(&self.raw.positions, corner.position, "position")?;

        let texture = match corner.uv {
            Some(index) if self.uvs.any() => fetch(&self.raw.textures, index, "texture coordinate")?,
            _ => Vector2::zero(),
        };
        let normal = match corner.normal {
            Some(index) if self.normals.any() => fetch(&self.raw.normals, index, "normal")?,
            _ => Vector3::zero(),
        };

        Ok(Corner {
            position,
            texture,
            normal,
        })
    }

    /// Looks for an already emitted result vertex equal to `values` among the
    /// corners that share `corner`'s position index.
    fn find_vertex(
        &self,
        lookup: &[usize],
        placed: &[Option<u32>],
        corner: &RawIndex,
        values: &Corner,
        result: &IndexedMesh,
    ) -> Option<u32> {
        let start = lookup.partition_point(|&i| self.corners[i].position < corner.position);

        lookup[start..]
            .iter()
            .take_while(|&&i| self.corners[i].position == corner.position)
            .filter_map(|&i| placed[i])
            .find(|&candidate| {
                let v = candidate as usize;
                result.positions[v] == values.position
                    && (!self.uvs.any() || result.textures[v] == values.texture)
                    && (!self.normals.any() || result.normals[v] == values.normal)
            })
    }

    pub fn build(&self) -> ObjResult<IndexedMesh> {
        let mut result = IndexedMesh::default();
        let mut normal_mesh = IndexedMesh::default();

        let mut lookup: Vec<usize> = (0..self.corners.len()).collect();
        lookup.sort_by_key(|&i| self.corners[i].position);

        let mut placed: Vec<Option<u32>> = vec![None; self.corners.len()];
        let mut normal_keys: HashMap<RawIndex, u32> = HashMap::new();
        // result vertex -> normal mesh vertex
        let mut index_map: Vec<u32> = Vec::new();

        for (i, corner) in self.corners.iter().enumerate() {
            let values = self.corner_values(corner)?;

            let normal_index = *normal_keys.entry(*corner).or_insert_with(|| {
                normal_mesh.push_vertex(values.position, values.texture, values.normal)
            });

            let result_index = match self.find_vertex(&lookup, &placed, corner, &values, &result) {
                Some(existing) => existing,
                None => {
                    index_map.push(0);
                    result.push_vertex(values.position, values.texture, values.normal)
                }
            };

            placed[i] = Some(result_index);
            normal_mesh.indices.push(normal_index);
            result.indices.push(result_index);
            index_map[result_index as usize] = normal_index;
        }

        if self.synthesizes_normals() {
            normal_mesh.calc_normals();
            for (normal, &source) in result.normals.iter_mut().zip(&index_map) {
                *normal = normal_mesh.normals[source as usize];
            }
        }

        result.name = self.raw.name.clone();
        result.material = self.raw.material.clone();
        Ok(result)
    }
}

/// Builds the indexed mesh for `corners`, synthesizing smooth normals when
/// the corners do not all reference one.
pub fn to_indexed_mesh(raw: &RawSubMesh, corners: &[RawIndex]) -> ObjResult<IndexedMesh> {
    MeshIndexer::new(raw, corners).build()
}
