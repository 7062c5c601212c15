//! Trained weight matrices for the block-edge network.
//!
//! The topology is fixed at 4 → 12 → 4. Each layer matrix carries one extra
//! bias row appended below the per-unit rows, so the input-layer matrix is
//! 5 × 12 and the hidden-layer matrix is 13 × 4; both shapes are encoded in
//! the `SMatrix` types and cannot drift at runtime.
//!
//! Weights arrive as a text resource: two blocks separated by a blank line,
//! each block one whitespace-separated row of decimals per line. Both `.` and
//! `,` decimal separators are accepted. Where the resource lives is the
//! caller's concern; the core consumes any [`WeightProvider`].
use nalgebra::SMatrix;
use std::fs;
use std::path::{Path, PathBuf};

/// Units in the block input vector (one per 2×2 cell).
pub const INPUT_UNITS: usize = 4;
/// Units in the single hidden layer.
pub const HIDDEN_UNITS: usize = 12;
/// Units in the output vector (one per 2×2 cell).
pub const OUTPUT_UNITS: usize = 4;

/// Input-layer matrix: 4 input rows + 1 bias row × 12 hidden columns.
pub type InputLayerMatrix = SMatrix<f64, 5, 12>;
/// Hidden-layer matrix: 12 hidden rows + 1 bias row × 4 output columns.
pub type HiddenLayerMatrix = SMatrix<f64, 13, 4>;

/// Immutable weight configuration for the 4→12→4 network.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkWeights {
    pub input_layer: InputLayerMatrix,
    pub hidden_layer: HiddenLayerMatrix,
}

/// Reasons why a weight resource cannot be turned into matrices.
#[derive(Clone, Debug, PartialEq)]
pub enum WeightError {
    /// The resource itself could not be obtained.
    Resource { message: String },
    /// A block (input or hidden) is absent from the text.
    MissingBlock { block: &'static str },
    /// A block has the wrong number of rows.
    RowCount {
        block: &'static str,
        found: usize,
        expected: usize,
    },
    /// A row has the wrong number of columns.
    ColumnCount {
        block: &'static str,
        row: usize,
        found: usize,
        expected: usize,
    },
    /// A token did not parse as a decimal number.
    BadNumber { token: String },
}

impl std::fmt::Display for WeightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightError::Resource { message } => write!(f, "weight resource error: {message}"),
            WeightError::MissingBlock { block } => write!(f, "missing {block} weight block"),
            WeightError::RowCount {
                block,
                found,
                expected,
            } => write!(f, "{block} block has {found} rows, expected {expected}"),
            WeightError::ColumnCount {
                block,
                row,
                found,
                expected,
            } => write!(
                f,
                "{block} block row {row} has {found} columns, expected {expected}"
            ),
            WeightError::BadNumber { token } => write!(f, "malformed weight token {token:?}"),
        }
    }
}

impl std::error::Error for WeightError {}

/// Abstract source of the weight text resource.
///
/// Decouples the network from any particular storage; the demo tools inject a
/// filesystem provider, tests inject strings.
pub trait WeightProvider {
    fn fetch(&self) -> Result<String, WeightError>;
}

/// Reads the weight text from a file on disk.
#[derive(Clone, Debug)]
pub struct FsWeightProvider {
    path: PathBuf,
}

impl FsWeightProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WeightProvider for FsWeightProvider {
    fn fetch(&self) -> Result<String, WeightError> {
        fs::read_to_string(&self.path).map_err(|e| WeightError::Resource {
            message: format!("failed to read {}: {e}", self.path.display()),
        })
    }
}

impl NetworkWeights {
    /// Assemble from pre-built matrices.
    pub fn new(input_layer: InputLayerMatrix, hidden_layer: HiddenLayerMatrix) -> Self {
        Self {
            input_layer,
            hidden_layer,
        }
    }

    /// Fetch and parse the text resource of a provider.
    pub fn from_provider(provider: &impl WeightProvider) -> Result<Self, WeightError> {
        Self::parse(&provider.fetch()?)
    }

    /// Parse the two-block text format.
    pub fn parse(text: &str) -> Result<Self, WeightError> {
        let mut blocks = text
            .split("\n\n")
            .map(|b| b.trim())
            .filter(|b| !b.is_empty());

        let input_block = blocks
            .next()
            .ok_or(WeightError::MissingBlock { block: "input" })?;
        let hidden_block = blocks
            .next()
            .ok_or(WeightError::MissingBlock { block: "hidden" })?;

        let input_values =
            parse_block(input_block, "input", INPUT_UNITS + 1, HIDDEN_UNITS)?;
        let hidden_values =
            parse_block(hidden_block, "hidden", HIDDEN_UNITS + 1, OUTPUT_UNITS)?;

        Ok(Self {
            input_layer: InputLayerMatrix::from_row_slice(&input_values),
            hidden_layer: HiddenLayerMatrix::from_row_slice(&hidden_values),
        })
    }
}

/// Parse one text block into row-major values of an exact shape.
fn parse_block(
    block: &str,
    name: &'static str,
    rows: usize,
    cols: usize,
) -> Result<Vec<f64>, WeightError> {
    let lines: Vec<&str> = block.lines().map(|l| l.trim()).collect();
    if lines.len() != rows {
        return Err(WeightError::RowCount {
            block: name,
            found: lines.len(),
            expected: rows,
        });
    }

    let mut values = Vec::with_capacity(rows * cols);
    for (row, line) in lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != cols {
            return Err(WeightError::ColumnCount {
                block: name,
                row,
                found: tokens.len(),
                expected: cols,
            });
        }
        for token in tokens {
            let normalized = token.replace(',', ".");
            let value: f64 = normalized.parse().map_err(|_| WeightError::BadNumber {
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}
