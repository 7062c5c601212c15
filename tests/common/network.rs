use pixel_filters::ann::weights::{HiddenLayerMatrix, InputLayerMatrix, HIDDEN_UNITS, INPUT_UNITS};
use pixel_filters::NetworkWeights;

/// Weights for a network that fires all four outputs iff the 2×2 block mixes
/// both binary levels: hidden unit 0 approximates an OR of the inputs, hidden
/// unit 1 an AND, and every output reads `OR and not AND`.
pub fn mixed_block_weights() -> NetworkWeights {
    let mut input_layer = InputLayerMatrix::zeros();
    for j in 0..INPUT_UNITS {
        input_layer[(j, 0)] = 20.0;
        input_layer[(j, 1)] = 20.0;
    }
    input_layer[(INPUT_UNITS, 0)] = -10.0;
    input_layer[(INPUT_UNITS, 1)] = -70.0;

    let mut hidden_layer = HiddenLayerMatrix::zeros();
    for k in 0..4 {
        hidden_layer[(0, k)] = 20.0;
        hidden_layer[(1, k)] = -20.0;
        hidden_layer[(HIDDEN_UNITS, k)] = -10.0;
    }
    NetworkWeights::new(input_layer, hidden_layer)
}

/// The same network serialized in the two-block text format.
pub fn mixed_block_weight_text() -> String {
    let weights = mixed_block_weights();
    let mut text = String::new();
    for row in 0..=INPUT_UNITS {
        let line: Vec<String> = (0..HIDDEN_UNITS)
            .map(|col| format!("{}", weights.input_layer[(row, col)]))
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text.push('\n');
    for row in 0..=HIDDEN_UNITS {
        let line: Vec<String> = (0..4)
            .map(|col| format!("{}", weights.hidden_layer[(row, col)]))
            .collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}
