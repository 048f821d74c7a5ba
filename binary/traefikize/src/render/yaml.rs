use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use traefikize_convert::ConvertResult;
use traefikize_model::BoxResult;

/// Write the three artifact documents plus the warnings listing for one
/// Ingress. Empty document sets produce no file.
pub fn write_yaml(result: &ConvertResult, out_dir: &Path) -> BoxResult<()> {
    fs::create_dir_all(out_dir)?;

    write_objects(&out_dir.join("middlewares.yaml"), &result.middlewares)?;
    write_objects(&out_dir.join("ingressroutes.yaml"), &result.ingress_routes)?;
    write_objects(&out_dir.join("tlsoptions.yaml"), &result.tls_options)?;

    if !result.warnings.is_empty() {
        write_warnings(&out_dir.join("warnings.txt"), &result.warnings)?;
    }

    Ok(())
}

fn write_objects<T: Serialize>(path: &Path, objects: &[T]) -> BoxResult<()> {
    if objects.is_empty() {
        return Ok(());
    }

    let mut file = fs::File::create(path)?;
    for (index, object) in objects.iter().enumerate() {
        if index > 0 {
            writeln!(file, "---")?;
        }
        file.write_all(serde_yaml::to_string(object)?.as_bytes())?;
    }

    Ok(())
}

fn write_warnings(path: &Path, warnings: &[String]) -> BoxResult<()> {
    let mut file = fs::File::create(path)?;
    for warning in warnings {
        writeln!(file, "- {}", warning)?;
    }
    Ok(())
}
