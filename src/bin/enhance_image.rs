use pixel_filters::image::io::{load_grayscale_image, save_i32_clamped, write_json_file};
use pixel_filters::{ContrastEnhancer, EnhanceParams};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EnhanceToolConfig {
    pub input: PathBuf,
    #[serde(default = "default_exponent")]
    pub exponent: f64,
    pub output: EnhanceOutputConfig,
}

fn default_exponent() -> f64 {
    EnhanceParams::default().exponent
}

#[derive(Debug, Deserialize)]
pub struct EnhanceOutputConfig {
    pub enhanced_image: PathBuf,
    pub trace_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<EnhanceToolConfig, String> {
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
    if !(config.exponent.is_finite() && config.exponent > 0.0) {
        return Err(format!(
            "fuzzy exponent must be positive, got {}",
            config.exponent
        ));
    }

    let gray = load_grayscale_image(&config.input)?;
    let enhancer = ContrastEnhancer::new(EnhanceParams {
        exponent: config.exponent,
    });
    let result = enhancer
        .enhance_with_trace(gray.as_view())
        .map_err(|e| e.to_string())?;

    save_i32_clamped(&result.enhanced, &config.output.enhanced_image)?;
    write_json_file(&config.output.trace_json, &result.trace)?;

    println!(
        "Saved enhanced image to {} ({} samples out of range)",
        config.output.enhanced_image.display(),
        result.trace.out_of_range
    );
    println!("Saved trace to {}", config.output.trace_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: enhance_image <config.json>".to_string()
}
