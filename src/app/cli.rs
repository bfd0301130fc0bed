use std::fs::File;
use std::path::Path;

use crate::loaders::obj::ObjLoadOptions;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: String,
    pub options: ObjLoadOptions,
}

pub fn parse_from_env() -> Result<AppConfig, String> {
    let args = std::env::args().collect::<Vec<String>>();
    let config = parse_args(&args)?;
    validate_path(&config.model_path, "obj", "model")?;
    Ok(config)
}

/// Parses `objmesh [--strict] [--flat] <path_to_model>`; `args[0]` is the
/// program name.
pub fn parse_args(args: &[String]) -> Result<AppConfig, String> {
    let program = args.first().map(|s| s.as_str()).unwrap_or("objmesh");
    let usage = || {
        format!(
            "Usage: {} [--strict] [--flat] <path_to_model>\nExample: cargo run -- resources/models/teapot.obj",
            program
        )
    };

    let mut options = ObjLoadOptions::default();
    let mut model_path = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--strict" => options.report_malformed_tokens = true,
            "--flat" => options.smooth_normals = false,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{}'\n{}", flag, usage()));
            }
            path if model_path.is_none() => model_path = Some(path.to_string()),
            _ => return Err(usage()),
        }
    }

    let model_path = model_path.ok_or_else(usage)?;
    Ok(AppConfig {
        model_path,
        options,
    })
}

fn validate_path(path: &str, expected_extension: &str, label: &str) -> Result<(), String> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(format!("{} file does not exist: {}", label, path));
    }
    if !file_path.is_file() {
        return Err(format!("{} path is not a file: {}", label, path));
    }

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("{} file has no extension: {}", label, path))?;
    if !extension.eq_ignore_ascii_case(expected_extension) {
        return Err(format!(
            "{} file must have .{} extension: {}",
            label, expected_extension, path
        ));
    }

    File::open(file_path)
        .map(|_| ())
        .map_err(|error| format!("Failed to open {} file '{}': {}", label, path, error))
}
