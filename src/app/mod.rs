pub mod cli;
pub mod error;

use std::path::Path;

use crate::loaders::obj::{IndexedMesh, ObjLoader};

use cli::AppConfig;
use error::AppError;

pub fn run_from_env() -> Result<(), AppError> {
    let config = cli::parse_from_env().map_err(AppError::Cli)?;
    run(config)
}

pub fn run(config: AppConfig) -> Result<(), AppError> {
    let mut loader = ObjLoader::new().options(config.options);
    let meshes = loader.load(Path::new(&config.model_path));

    for diagnostic in loader.diagnostics() {
        println!("warning: {}", diagnostic);
    }
    if meshes.is_empty() && !loader.diagnostics().is_empty() {
        return Err(AppError::Load(format!(
            "no meshes could be loaded from {}",
            config.model_path
        )));
    }

    println!("{}: {} mesh(es)", config.model_path, meshes.len());
    for mesh in &meshes {
        println!("{}", summarize(mesh));
    }
    Ok(())
}

fn summarize(mesh: &IndexedMesh) -> String {
    let name = if mesh.name.is_empty() {
        "<unnamed>"
    } else {
        mesh.name.as_str()
    };
    let material = if mesh.material.name.is_empty() {
        "<default>"
    } else {
        mesh.material.name.as_str()
    };

    let mut line = format!(
        "  {}: {} vertices, {} triangles, material {}",
        name,
        mesh.vertex_count(),
        mesh.triangle_count(),
        material
    );
    if let Some((min, max)) = mesh.aabb() {
        line.push_str(&format!(
            ", bounds ({:.3}, {:.3}, {:.3})..({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        ));
    }
    line
}
