use std::path::Path;

use super::error::{ObjError, ObjResult};
use super::index::NumericReader;
use super::source::{LineSource, SourceOpener};
use super::tokenize::{first_token, tail};
use super::types::{MaterialLibrary, MaterialRecord};
use crate::math::Vector3;

const MTL_EXTENSION: &str = ".mtl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MtlDirective {
    NewMaterial,
    Ambient,
    Diffuse,
    Specular,
    SpecularExponent,
    OpticalDensity,
    Dissolve,
    Illumination,
    AmbientMap,
    DiffuseMap,
    SpecularMap,
    SpecularHighlightMap,
    AlphaMap,
    BumpMap,
}

impl MtlDirective {
    fn from_token(token: &str) -> Option<Self> {
        let directive = match token {
            "newmtl" => MtlDirective::NewMaterial,
            "Ka" => MtlDirective::Ambient,
            "Kd" => MtlDirective::Diffuse,
            "Ks" => MtlDirective::Specular,
            "Ns" => MtlDirective::SpecularExponent,
            "Ni" => MtlDirective::OpticalDensity,
            "d" => MtlDirective::Dissolve,
            "illum" => MtlDirective::Illumination,
            "map_Ka" => MtlDirective::AmbientMap,
            "map_Kd" => MtlDirective::DiffuseMap,
            "map_Ks" => MtlDirective::SpecularMap,
            "map_Ns" => MtlDirective::SpecularHighlightMap,
            "map_d" => MtlDirective::AlphaMap,
            "map_Bump" | "map_bump" | "bump" => MtlDirective::BumpMap,
            _ => return None,
        };
        Some(directive)
    }
}

/// Loads `folder/relative_path` as a material library. Never fails: a path
/// without the `.mtl` extension or an unopenable file yields an empty library.
pub fn load_materials(
    opener: &dyn SourceOpener,
    folder: &Path,
    relative_path: &str,
) -> MaterialLibrary {
    let mut numbers = NumericReader::for_file(folder.join(relative_path), false);
    try_load_materials(opener, folder, relative_path, &mut numbers).unwrap_or_else(|e| {
        log::warn!("{}", e);
        MaterialLibrary::new()
    })
}

/// Like [`load_materials`] but hands failures back. Numeric and read
/// problems inside the library end up in `numbers`, which should be a reader
/// for this library's own file.
pub fn try_load_materials(
    opener: &dyn SourceOpener,
    folder: &Path,
    relative_path: &str,
    numbers: &mut NumericReader,
) -> ObjResult<MaterialLibrary> {
    if !relative_path.ends_with(MTL_EXTENSION) {
        return Err(ObjError::NotMaterialLibrary {
            path: relative_path.to_string(),
        });
    }

    let path = folder.join(relative_path);
    let mut source = opener.open(&path).map_err(|source| ObjError::Unreadable {
        path: path.clone(),
        source,
    })?;

    log::info!("loading materials: {}", path.display());
    Ok(parse_materials(source.as_mut(), folder, numbers))
}

pub fn parse_materials(
    source: &mut dyn LineSource,
    folder: &Path,
    numbers: &mut NumericReader,
) -> MaterialLibrary {
    let mut materials = MaterialLibrary::new();
    let mut current = MaterialRecord::default();
    let mut listening = false;
    let mut line_number = 0;

    while let Some(line) = source.next_line() {
        line_number += 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                numbers.read_failed(line_number, e);
                break;
            }
        };

        let Some(directive) = MtlDirective::from_token(first_token(&line)) else {
            continue;
        };
        let rest = tail(&line);

        match directive {
            MtlDirective::NewMaterial => {
                if listening {
                    materials.insert(std::mem::take(&mut current));
                } else {
                    listening = true;
                }
                current.name = if rest.is_empty() {
                    "none".to_string()
                } else {
                    rest.to_string()
                };
            }
            MtlDirective::Ambient => current.ambient_color = color(numbers, rest, line_number),
            MtlDirective::Diffuse => current.diffuse_color = color(numbers, rest, line_number),
            MtlDirective::Specular => current.specular_color = color(numbers, rest, line_number),
            MtlDirective::SpecularExponent => {
                current.specular_exponent = numbers.float(rest, line_number)
            }
            MtlDirective::OpticalDensity => {
                current.optical_density = numbers.float(rest, line_number)
            }
            MtlDirective::Dissolve => current.dissolve = numbers.float(rest, line_number),
            MtlDirective::Illumination => {
                current.illumination = numbers.int(rest, line_number) as i32
            }
            MtlDirective::AmbientMap => current.ambient_texture = texture_path(folder, rest),
            MtlDirective::DiffuseMap => current.diffuse_texture = texture_path(folder, rest),
            MtlDirective::SpecularMap => current.specular_texture = texture_path(folder, rest),
            MtlDirective::SpecularHighlightMap => {
                current.specular_highlight_texture = texture_path(folder, rest)
            }
            MtlDirective::AlphaMap => current.alpha_texture = texture_path(folder, rest),
            MtlDirective::BumpMap => current.bump_texture = texture_path(folder, rest),
        }
    }

    materials.insert(current);
    materials
}

fn color(numbers: &mut NumericReader, rest: &str, line_number: usize) -> Vector3 {
    let [r, g, b] = numbers.floats::<3>(rest, line_number);
    Vector3::new(r, g, b)
}

fn texture_path(folder: &Path, relative_path: &str) -> String {
    folder.join(relative_path).to_string_lossy().into_owned()
}
