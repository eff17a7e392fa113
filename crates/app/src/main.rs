//! Entry point for objflat.
//! Loads an OBJ file, resolves it into GPU-ready vertices and logs a summary.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use asset::{FlatVertex, ObjDocument, ParseOptions, VertexMode};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// One vertex per triangle corner (non-indexed draw).
    Duplicate,
    /// Share identical corners and emit an index buffer.
    Weld,
}

impl From<Mode> for VertexMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Duplicate => VertexMode::Duplicate,
            Mode::Weld => VertexMode::Weld,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "objflat")]
#[command(about = "Load a Wavefront OBJ mesh and flatten it into interleaved vertices")]
#[command(version)]
struct Cli {
    /// Path to the .obj file
    #[arg(value_name = "OBJ_PATH")]
    path: PathBuf,

    /// Vertex building mode
    #[arg(long, value_enum, default_value_t = Mode::Duplicate)]
    mode: Mode,

    /// Fan-triangulate polygon faces instead of rejecting them
    #[arg(long)]
    triangulate: bool,

    /// Fail on face indices that point past the parsed records
    #[arg(long = "strict-indices")]
    strict_indices: bool,

    /// Log the first N built vertices
    #[arg(long, value_name = "N")]
    dump: Option<usize>,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            triangulate_polygons: self.triangulate,
        }
    }
}

/// Vertex buffer contents plus the optional index buffer.
struct BuiltMesh {
    vertices: Vec<FlatVertex>,
    indices: Option<Vec<u32>>,
}

fn build(doc: &ObjDocument, mode: VertexMode) -> Result<BuiltMesh> {
    match mode {
        VertexMode::Duplicate => {
            let (vertices, report) = asset::flatten_with_report(doc);
            if report.total() > 0 {
                log::warn!(
                    "Substituted defaults for out-of-range indices: positions={} texcoords={} normals={}",
                    report.positions,
                    report.texcoords,
                    report.normals
                );
            }
            Ok(BuiltMesh {
                vertices,
                indices: None,
            })
        }
        VertexMode::Weld => {
            let mesh = asset::weld(doc).context("Failed to weld OBJ vertices")?;
            Ok(BuiltMesh {
                vertices: mesh.vertices,
                indices: Some(mesh.indices),
            })
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let doc = asset::load_obj_from_path_with_options(&cli.path, &cli.parse_options())
        .with_context(|| format!("Could not load {}", cli.path.display()))?;

    if cli.strict_indices {
        doc.validate()
            .with_context(|| format!("Invalid face indices in {}", cli.path.display()))?;
    }

    let mode = VertexMode::from(cli.mode);
    let mesh = build(&doc, mode)?;
    if mesh.vertices.is_empty() {
        bail!("OBJ has no vertices after conversion");
    }

    let bytes = FlatVertex::as_bytes(&mesh.vertices);
    log::info!(
        "Vertex buffer: {} vertices, {} bytes, stride {} ({:?})",
        mesh.vertices.len(),
        bytes.len(),
        FlatVertex::STRIDE,
        mode
    );
    for attr in FlatVertex::ATTRIBUTES {
        log::debug!(
            "  location {}: {} x f32 at offset {}",
            attr.location,
            attr.components,
            attr.offset
        );
    }
    if let Some(indices) = &mesh.indices {
        log::info!("Index buffer: {} indices (u32)", indices.len());
    }

    if let Some(n) = cli.dump {
        for (i, v) in mesh.vertices.iter().take(n).enumerate() {
            log::info!(
                "  [{}] pos={:?} uv={:?} normal={:?}",
                i,
                v.position,
                v.uv,
                v.normal
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!(
        "Starting objflat. Input: {}, mode={:?}, triangulate={}, strict_indices={}",
        cli.path.display(),
        cli.mode,
        cli.triangulate,
        cli.strict_indices
    );

    run(&cli)?;

    log::info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_obj(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("mesh.obj");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn cli_for(path: &std::path::Path, extra: &[&str]) -> Cli {
        let mut args = vec!["objflat".to_string(), path.display().to_string()];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["objflat", "plane.obj"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("plane.obj"));
        assert_eq!(cli.mode, Mode::Duplicate);
        assert!(!cli.triangulate);
        assert!(!cli.strict_indices);
        assert_eq!(cli.dump, None);
        assert_eq!(cli.parse_options(), ParseOptions::default());
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "objflat",
            "Bird.obj",
            "--mode",
            "weld",
            "--triangulate",
            "--strict-indices",
            "--dump",
            "4",
        ])
        .unwrap();
        assert_eq!(VertexMode::from(cli.mode), VertexMode::Weld);
        assert!(cli.parse_options().triangulate_polygons);
        assert!(cli.strict_indices);
        assert_eq!(cli.dump, Some(4));
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["objflat"]).is_err());
        assert!(Cli::try_parse_from(["objflat", "a.obj", "--mode", "indexed"]).is_err());
    }

    #[test]
    fn run_flattens_triangle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(&dir, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/1/1 3/1/1\n");
        assert!(run(&cli_for(&path, &[])).is_ok());
        assert!(run(&cli_for(&path, &["--mode", "weld", "--dump", "2"])).is_ok());
    }

    #[test]
    fn strict_indices_rejects_dangling_references() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(&dir, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 999\n");
        assert!(run(&cli_for(&path, &[])).is_ok());
        let err = run(&cli_for(&path, &["--strict-indices"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<asset::ObjError>(),
            Some(asset::ObjError::IndexOutOfRange { index: 999, .. })
        ));
    }

    #[test]
    fn empty_mesh_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(&dir, "# nothing here\nv 0 0 0\n");
        let err = run(&cli_for(&path, &[])).unwrap_err();
        assert!(err.to_string().contains("no vertices"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&cli_for(&dir.path().join("nope.obj"), &[])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<asset::ObjError>(),
            Some(asset::ObjError::FileNotFound { .. })
        ));
    }
}
