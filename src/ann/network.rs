//! Fixed feedforward evaluation for 2×2 block classification.
use super::weights::{NetworkWeights, HIDDEN_UNITS, INPUT_UNITS, OUTPUT_UNITS};

/// Logistic sigmoid, the activation of both layers.
#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// The 4→12→4 network with externally trained, immutable weights.
///
/// Evaluation appends an implicit bias input of 1.0 to each layer: the last
/// row of every layer matrix holds the bias weights.
#[derive(Clone, Debug)]
pub struct EdgeNetwork {
    weights: NetworkWeights,
}

impl EdgeNetwork {
    pub fn new(weights: NetworkWeights) -> Self {
        Self { weights }
    }

    /// Run one normalized block vector through both layers.
    ///
    /// Inputs are expected in [0, 1]; outputs land in (0, 1).
    pub fn compute(&self, input: [f64; INPUT_UNITS]) -> [f64; OUTPUT_UNITS] {
        let mut hidden = [0.0f64; HIDDEN_UNITS];
        for (i, unit) in hidden.iter_mut().enumerate() {
            let mut sum = self.weights.input_layer[(INPUT_UNITS, i)];
            for (j, &v) in input.iter().enumerate() {
                sum += v * self.weights.input_layer[(j, i)];
            }
            *unit = sigmoid(sum);
        }

        let mut output = [0.0f64; OUTPUT_UNITS];
        for (k, unit) in output.iter_mut().enumerate() {
            let mut sum = self.weights.hidden_layer[(HIDDEN_UNITS, k)];
            for (i, &v) in hidden.iter().enumerate() {
                sum += v * self.weights.hidden_layer[(i, k)];
            }
            *unit = sigmoid(sum);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::super::weights::{HiddenLayerMatrix, InputLayerMatrix};
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sigmoid_midpoint_and_limits() {
        assert!(approx_eq(sigmoid(0.0), 0.5));
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        assert!(sigmoid(1.0) > sigmoid(0.5));
    }

    #[test]
    fn zero_weights_give_half_everywhere() {
        let network = EdgeNetwork::new(NetworkWeights::new(
            InputLayerMatrix::zeros(),
            HiddenLayerMatrix::zeros(),
        ));
        let out = network.compute([0.0, 1.0, 0.0, 1.0]);
        for v in out {
            assert!(approx_eq(v, 0.5));
        }
    }

    #[test]
    fn bias_row_shifts_the_output() {
        let mut hidden_layer = HiddenLayerMatrix::zeros();
        // Large positive bias on output 0, large negative on output 3.
        hidden_layer[(HIDDEN_UNITS, 0)] = 10.0;
        hidden_layer[(HIDDEN_UNITS, 3)] = -10.0;
        let network =
            EdgeNetwork::new(NetworkWeights::new(InputLayerMatrix::zeros(), hidden_layer));
        let out = network.compute([0.0; 4]);
        assert!(out[0] > 0.99);
        assert!(approx_eq(out[1], 0.5));
        assert!(out[3] < 0.01);
    }

    #[test]
    fn input_weights_propagate_through_hidden_layer() {
        let mut input_layer = InputLayerMatrix::zeros();
        // Hidden unit 0 fires iff input 2 is high.
        input_layer[(2, 0)] = 20.0;
        input_layer[(INPUT_UNITS, 0)] = -10.0;
        let mut hidden_layer = HiddenLayerMatrix::zeros();
        // Output 1 mirrors hidden unit 0; other hidden units are weighted out.
        hidden_layer[(0, 1)] = 20.0;
        hidden_layer[(HIDDEN_UNITS, 1)] = -10.0;
        let network = EdgeNetwork::new(NetworkWeights::new(input_layer, hidden_layer));

        let high = network.compute([0.0, 0.0, 1.0, 0.0]);
        let low = network.compute([0.0, 0.0, 0.0, 0.0]);
        assert!(high[1].round() == 1.0);
        assert!(low[1].round() == 0.0);
    }
}
