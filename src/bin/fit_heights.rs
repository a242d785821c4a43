//! Height fitting tool: fits raw heights onto a terrain grid.
//!
//! Usage: cargo run --release --bin fit_heights -- [OPTIONS]
//!
//! Options:
//!   --input <PATH>     Raw heights JSON: { "samples_x", "samples_y", "samples": [...] }
//!                      (omit to generate heights from noise)
//!   --seed <SEED>      Noise seed when generating (default: 12345)
//!   --samples <N>      Generated samples per side (default: 257)
//!   --length <M>       Terrain length in meters (default: 100)
//!   --breadth <M>      Terrain width in meters (default: 100)
//!   --height <M>       Terrain height in meters (default: 64)
//!   --output <PATH>    Fitted grid JSON (default: fitted_heights.json)
//!   --preview <PATH>   Optional 8-bit grayscale PNG of the fitted grid

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use serde::Deserialize;
use serde_json::json;

use hybrid_terrain::terrain::generator::{BaseHeightGenerator, BaseHeightParams};
use hybrid_terrain::terrain::heightfield::{HeightField, TerrainSize};
use hybrid_terrain::terrain::resample::{self, FittedHeights};

#[derive(Deserialize)]
struct RawHeights {
    samples_x: usize,
    samples_y: usize,
    samples: Vec<f32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();
    let input = parse_str_arg(&args, "--input").map(PathBuf::from);
    let seed = parse_u32_arg(&args, "--seed").unwrap_or(12345);
    let samples = parse_usize_arg(&args, "--samples").unwrap_or(257);
    let length = parse_f32_arg(&args, "--length").unwrap_or(100.0);
    let breadth = parse_f32_arg(&args, "--breadth").unwrap_or(100.0);
    let height = parse_f32_arg(&args, "--height").unwrap_or(64.0);
    let output = parse_str_arg(&args, "--output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fitted_heights.json"));
    let preview = parse_str_arg(&args, "--preview").map(PathBuf::from);

    let size = TerrainSize::new(length, breadth, height);

    let field = match &input {
        Some(path) => load_heights(path, size),
        None => BaseHeightGenerator::new(BaseHeightParams {
            seed,
            height_scale: height,
            ..Default::default()
        })
        .generate(samples, samples, size)
        .map_err(|e| e.to_string()),
    };
    let field = match field {
        Ok(field) => field,
        Err(e) => {
            log::error!("Cannot build height field: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let fitted = resample::fit(&field);
    log::info!(
        "Fitted {}x{} samples onto {}x{} grid in {:.1}ms",
        field.samples_x(),
        field.samples_y(),
        fitted.resolution(),
        fitted.resolution(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let doc = json!({
        "resolution": fitted.resolution(),
        "length": size.length,
        "width": size.width,
        "height": size.height,
        "samples": fitted.samples(),
    });
    let text = match serde_json::to_string(&doc) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to encode fitted grid: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&output, text) {
        log::error!("Failed to write {}: {}", output.display(), e);
        return ExitCode::FAILURE;
    }
    log::info!("Wrote {}", output.display());

    if let Some(path) = preview {
        if let Err(e) = write_preview(&fitted, &path) {
            log::error!("Failed to write preview {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        log::info!("Wrote preview {}", path.display());
    }

    ExitCode::SUCCESS
}

fn load_heights(path: &PathBuf, size: TerrainSize) -> Result<HeightField, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let raw: RawHeights = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    HeightField::new(raw.samples, raw.samples_x, raw.samples_y, size).map_err(|e| e.to_string())
}

fn write_preview(fitted: &FittedHeights, path: &PathBuf) -> image::ImageResult<()> {
    let res = fitted.resolution();
    let pixels: Vec<u8> = fitted
        .samples()
        .iter()
        .map(|&h| (h.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    image::save_buffer(path, &pixels, res, res, image::ExtendedColorType::L8)
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
