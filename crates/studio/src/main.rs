use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use archscene_lib::cad::try_import_cad_document;
use archscene_lib::command::{execute_json, CommandResponse};
use archscene_lib::harness::TestHarness;
use archscene_lib::state::StudioSettings;

/// Command-line options
#[derive(Debug, Default)]
struct Args {
    scene: Option<PathBuf>,
    config: Option<PathBuf>,
    dxf: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "archscene=info,archscene_lib=info".into()),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let settings = match &args.config {
        Some(path) => StudioSettings::load_from(path)?,
        None => StudioSettings::load(),
    };
    let mut harness = TestHarness::with_settings(settings);

    if let Some(path) = &args.scene {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        if harness.load_scene_json(&json) {
            tracing::info!(
                "Loaded scene from {} ({} objects)",
                path.display(),
                harness.object_count()
            );
        }
    }

    if !args.dxf.is_empty() {
        import_plans(&mut harness, &args.dxf)?;
    }

    run_commands(&mut harness)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .map(PathBuf::from)
                .with_context(|| format!("{arg} expects a file path"))
        };
        match arg.as_str() {
            "--scene" => parsed.scene = Some(value()?),
            "--config" => parsed.config = Some(value()?),
            "--import-dxf" => parsed.dxf.push(value()?),
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }
    Ok(parsed)
}

/// Import every DXF file as a plan object, admitted in chunks
fn import_plans(harness: &mut TestHarness, paths: &[PathBuf]) -> anyhow::Result<()> {
    let mut inits = Vec::with_capacity(paths.len());
    for path in paths {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read DXF file {}", path.display()))?;
        match try_import_cad_document(&text, &harness.store.settings().cad) {
            Ok(import) => inits.push(import.object),
            Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start import runtime")?;
    let admitted = runtime.block_on(harness.store.import_objects_chunked(inits));
    tracing::info!("Imported {} plan(s)", admitted.len());
    Ok(())
}

/// Read one JSON command per stdin line and answer with one JSON line each
fn run_commands(harness: &mut TestHarness) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = execute_json(harness, &line).unwrap_or_else(CommandResponse::err);
        serde_json::to_writer(&mut stdout, &response)?;
        writeln!(stdout)?;
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--scene", "a.json", "--import-dxf", "p1.dxf", "--import-dxf", "p2.dxf"])
            .unwrap();
        assert_eq!(parsed.scene, Some(PathBuf::from("a.json")));
        assert_eq!(parsed.dxf.len(), 2);
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_args_missing_value() {
        assert!(args(&["--scene"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }
}
