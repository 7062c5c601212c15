use pixel_filters::image::io::{load_grayscale_image, save_gray_buffer, write_json_file};
use pixel_filters::{FuzzyEdgeDetector, FuzzyParams};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FuzzyToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: FuzzyParamsConfig,
    pub output: FuzzyOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FuzzyParamsConfig {
    pub low: i32,
    pub high: i32,
    pub weight: i32,
}

impl Default for FuzzyParamsConfig {
    fn default() -> Self {
        let defaults = FuzzyParams::default();
        Self {
            low: defaults.low,
            high: defaults.high,
            weight: defaults.weight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FuzzyOutputConfig {
    pub edges_image: PathBuf,
    pub trace_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<FuzzyToolConfig, String> {
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

    let gray = load_grayscale_image(&config.input)?;
    let detector = FuzzyEdgeDetector::new(FuzzyParams {
        low: config.params.low,
        high: config.params.high,
        weight: config.params.weight,
    });
    let detection = detector
        .process_with_trace(gray.as_view())
        .map_err(|e| e.to_string())?;

    save_gray_buffer(&detection.edges, &config.output.edges_image)?;
    write_json_file(&config.output.trace_json, &detection.trace)?;

    println!(
        "Saved {} edge pixels to {}",
        detection.trace.edge_pixels,
        config.output.edges_image.display()
    );
    println!("Saved trace to {}", config.output.trace_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: fuzzy_edges <config.json>".to_string()
}
