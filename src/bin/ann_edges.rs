use pixel_filters::ann::{FsWeightProvider, NetworkWeights};
use pixel_filters::image::io::{load_grayscale_image, save_gray_buffer, write_json_file};
use pixel_filters::{AnnEdgeDetector, AnnParams};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AnnToolConfig {
    pub input: PathBuf,
    pub weights: PathBuf,
    #[serde(default)]
    pub threshold_override: Option<u8>,
    pub output: AnnOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnnOutputConfig {
    pub edges_image: PathBuf,
    pub trace_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<AnnToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    // Weights must parse before the detector can exist at all.
    let provider = FsWeightProvider::new(&config.weights);
    let weights = NetworkWeights::from_provider(&provider).map_err(|e| e.to_string())?;

    let gray = load_grayscale_image(&config.input)?;
    let detector = AnnEdgeDetector::new(
        weights,
        AnnParams {
            threshold_override: config.threshold_override,
        },
    );
    let detection = detector
        .process_with_trace(gray.as_view())
        .map_err(|e| e.to_string())?;

    save_gray_buffer(&detection.edges, &config.output.edges_image)?;
    write_json_file(&config.output.trace_json, &detection.trace)?;

    println!(
        "Saved {} edge pixels to {} (threshold {})",
        detection.trace.edge_pixels,
        config.output.edges_image.display(),
        detection.trace.threshold
    );
    println!("Saved trace to {}", config.output.trace_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: ann_edges <config.json>".to_string()
}
