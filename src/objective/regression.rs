//! Neural regression objective
//!
//! This module fits a small feed-forward network to a labeled dataset: each
//! candidate vector is the network's full parameter set, and its cost is the
//! mean squared prediction error over the dataset.

use std::io;
use std::path::Path;

use crate::error::{DatasetError, SwarmResult};
use crate::objective::bounds::{Bounds, MultiBounds};
use crate::objective::traits::Objective;

/// Units in the hidden layer
pub const HIDDEN_LAYER_SIZE: usize = 2;

/// Per-parameter search range
pub const PARAMETER_BOUND: f64 = 10.0;

/// A table of numeric feature rows, each labeled with one target value
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from feature rows and their targets
    ///
    /// Every row must have the same, non-zero width and there must be one
    /// target per row.
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self, DatasetError> {
        let width = features.first().map(Vec::len).ok_or(DatasetError::Empty)?;
        if width == 0 {
            return Err(DatasetError::RowLength {
                row: 0,
                expected: 1,
                actual: 0,
            });
        }
        for (row, values) in features.iter().enumerate() {
            if values.len() != width {
                return Err(DatasetError::RowLength {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
        }
        if targets.len() != features.len() {
            return Err(DatasetError::RowLength {
                row: targets.len().min(features.len()),
                expected: features.len(),
                actual: targets.len(),
            });
        }
        Ok(Self { features, targets })
    }

    /// Load a header-less CSV file whose last column is the target
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse header-less CSV from any reader; the last column is the target
    ///
    /// The width of the first row fixes the width of every other row.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut features = Vec::new();
        let mut targets = Vec::new();
        let mut width = None;

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let expected = *width.get_or_insert(record.len().max(2));
            if record.len() != expected {
                return Err(DatasetError::RowLength {
                    row,
                    expected,
                    actual: record.len(),
                });
            }

            let mut values = record
                .iter()
                .enumerate()
                .map(|(column, field)| {
                    field.parse::<f64>().map_err(|_| DatasetError::Parse {
                        row,
                        column,
                        value: field.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, _>>()?;

            // `values` has at least two entries here
            if let Some(target) = values.pop() {
                targets.push(target);
            }
            features.push(values);
        }

        Self::new(features, targets)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the dataset holds no rows (never true for a constructed dataset)
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of features per row
    pub fn n_inputs(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Feature rows
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Target values, one per row
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Iterate over `(features, target)` rows
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], f64)> {
        self.features
            .iter()
            .map(Vec::as_slice)
            .zip(self.targets.iter().copied())
    }
}

/// One-hidden-layer ReLU network scored by mean squared error on a dataset
///
/// Parameter layout: the hidden weights (`n_inputs` per hidden unit, unit
/// after unit), then the output weights, then the hidden biases, then the
/// output bias.
#[derive(Clone, Debug)]
pub struct RegressionNetwork {
    dataset: Dataset,
    bounds: MultiBounds,
}

impl RegressionNetwork {
    /// Create a network sized for the dataset's feature count
    pub fn new(dataset: Dataset) -> Self {
        let n_parameters = Self::parameter_count(dataset.n_inputs());
        Self {
            dataset,
            bounds: MultiBounds::uniform(Bounds::symmetric(PARAMETER_BOUND), n_parameters),
        }
    }

    /// Load the dataset from CSV and size the network for it
    pub fn from_csv(path: impl AsRef<Path>) -> SwarmResult<Self> {
        Ok(Self::new(Dataset::from_csv(path)?))
    }

    /// Number of weights for `n_inputs` features
    pub fn weight_count(n_inputs: usize) -> usize {
        n_inputs * HIDDEN_LAYER_SIZE + HIDDEN_LAYER_SIZE
    }

    /// Number of parameters (weights and biases) for `n_inputs` features
    pub fn parameter_count(n_inputs: usize) -> usize {
        Self::weight_count(n_inputs) + HIDDEN_LAYER_SIZE + 1
    }

    /// The dataset being fitted
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Network output for one feature row under a parameter vector
    ///
    /// `input` must be non-empty and `params` must hold
    /// [`RegressionNetwork::parameter_count`] values for its width.
    pub fn predict(input: &[f64], params: &[f64]) -> f64 {
        let n_weights = Self::weight_count(input.len());
        let (weights, biases) = params.split_at(n_weights);
        let (hidden_weights, output_weights) = weights.split_at(input.len() * HIDDEN_LAYER_SIZE);

        let hidden = hidden_weights
            .chunks(input.len())
            .zip(biases.iter())
            .map(|(unit, &bias)| {
                let sum = bias
                    + unit
                        .iter()
                        .zip(input.iter())
                        .map(|(w, x)| w * x)
                        .sum::<f64>();
                relu(sum)
            });

        biases[HIDDEN_LAYER_SIZE]
            + hidden
                .zip(output_weights.iter())
                .map(|(h, w)| h * w)
                .sum::<f64>()
    }
}

fn relu(value: f64) -> f64 {
    value.max(0.0)
}

impl Objective for RegressionNetwork {
    fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn dimensions(&self) -> usize {
        self.bounds.dimension()
    }

    fn evaluate(&self, params: &[f64]) -> f64 {
        if params.len() != self.dimensions() {
            return f64::INFINITY;
        }
        let total: f64 = self
            .dataset
            .rows()
            .map(|(input, target)| {
                let error = target - Self::predict(input, params);
                error * error
            })
            .sum();
        total / self.dataset.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn toy_dataset() -> Dataset {
        Dataset::from_reader("1,2,3\n0,1,1\n2,0,4\n".as_bytes()).unwrap()
    }

    #[test]
    fn test_dataset_from_reader() {
        let data = toy_dataset();
        assert_eq!(data.len(), 3);
        assert_eq!(data.n_inputs(), 2);
        assert_eq!(data.features()[0], vec![1.0, 2.0]);
        assert_eq!(data.targets(), &[3.0, 1.0, 4.0]);
    }

    #[test]
    fn test_dataset_trims_whitespace() {
        let data = Dataset::from_reader(" 1.5 , -2 ,0.25\n".as_bytes()).unwrap();
        assert_eq!(data.features()[0], vec![1.5, -2.0]);
        assert_eq!(data.targets(), &[0.25]);
    }

    #[test]
    fn test_dataset_rejects_ragged_rows() {
        let err = Dataset::from_reader("1,2,3\n4,5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RowLength {
                row: 1,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_dataset_rejects_single_column() {
        let err = Dataset::from_reader("1\n2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::RowLength { expected: 2, .. }));
    }

    #[test]
    fn test_dataset_rejects_non_numeric() {
        let err = Dataset::from_reader("1,abc,3\n".as_bytes()).unwrap_err();
        match err {
            DatasetError::Parse { row, column, value } => {
                assert_eq!((row, column), (0, 1));
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dataset_rejects_empty() {
        assert!(matches!(
            Dataset::from_reader("".as_bytes()),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(
            Dataset::new(vec![], vec![]),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_dataset_from_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1,2,3").unwrap();
        writeln!(file, "4,5,6").unwrap();
        let data = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.targets(), &[3.0, 6.0]);

        assert!(matches!(
            Dataset::from_csv("/nonexistent/train.csv"),
            Err(DatasetError::Io(_))
        ));
    }

    #[test]
    fn test_parameter_count() {
        assert_eq!(RegressionNetwork::parameter_count(21), 47);
        assert_eq!(RegressionNetwork::weight_count(21), 44);
        let network = RegressionNetwork::new(toy_dataset());
        assert_eq!(network.dimensions(), 2 * 2 + 2 + 2 + 1);
        assert_eq!(network.bounds().get(0), Some(&Bounds::new(-10.0, 10.0)));
    }

    #[test]
    fn test_predict_layout() {
        // inputs (x0, x1); hidden unit 0 weights (1, 0), unit 1 weights (0, 1)
        // output weights (2, 3), hidden biases (0.5, -10), output bias 1
        let params = [1.0, 0.0, 0.0, 1.0, 2.0, 3.0, 0.5, -10.0, 1.0];
        // h0 = relu(0.5 + 4) = 4.5, h1 = relu(-10 + 5) = 0
        let output = RegressionNetwork::predict(&[4.0, 5.0], &params);
        assert_relative_eq!(output, 1.0 + 2.0 * 4.5);
    }

    #[test]
    fn test_evaluate_is_mse() {
        let network = RegressionNetwork::new(toy_dataset());
        // All zero weights: every prediction is the output bias
        let mut params = vec![0.0; network.dimensions()];
        *params.last_mut().unwrap() = 2.0;
        let expected = (1.0 + 1.0 + 4.0) / 3.0;
        assert_relative_eq!(network.evaluate(&params), expected);
    }

    #[test]
    fn test_evaluate_wrong_length_is_infinite() {
        let network = RegressionNetwork::new(toy_dataset());
        assert!(network.evaluate(&[0.0; 3]).is_infinite());
    }

    #[test]
    fn test_generate_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let network = RegressionNetwork::new(toy_dataset());
        for _ in 0..50 {
            let params = network.generate(&mut rng).unwrap();
            assert_eq!(params.len(), network.dimensions());
            assert!(network.validate(&params));
        }
    }
}
