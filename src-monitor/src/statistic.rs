//! Online per-dimension statistics over a stream of sample vectors

use ndarray::Array1;
use serde::Serialize;

use crate::error::MonitorError;

/// Largest number of samples that is still represented exactly by an `f64`
pub const MAXIMAL_NUMBER_OF_SAMPLES: u64 = 1 << 53;

/// Running minimum, maximum, mean and variance per dimension.
///
/// The number of dimensions is fixed by the first [`Statistic::update`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statistic {
    number_of_samples: u64,
    minimum: Array1<f64>,
    maximum: Array1<f64>,
    mean: Array1<f64>,
    variance: Array1<f64>,
}

impl Statistic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sample.
    ///
    /// The variance is updated before the mean and uses the previous mean:
    ///
    /// `variance' = (n - 1) / n * variance + (value - mean)^2 / (n + 1)`
    /// `mean' = mean + (value - mean) / (n + 1)`
    pub fn update(&mut self, values: &Array1<f64>) -> Result<(), MonitorError> {
        if self.number_of_samples == 0 {
            self.minimum = values.clone();
            self.maximum = values.clone();
            self.mean = values.clone();
            self.variance = Array1::zeros(values.len());
            self.number_of_samples = 1;
            return Ok(());
        }

        if values.len() != self.mean.len() {
            return Err(MonitorError::DimensionMismatch {
                expected: self.mean.len(),
                actual: values.len(),
            });
        }
        if self.number_of_samples + 1 >= MAXIMAL_NUMBER_OF_SAMPLES {
            return Err(MonitorError::PrecisionOverflow { limit: MAXIMAL_NUMBER_OF_SAMPLES });
        }

        let n = self.number_of_samples as f64;
        for (i, &value) in values.iter().enumerate() {
            let deviation = value - self.mean[i];
            self.variance[i] = (n - 1.0) / n * self.variance[i] + deviation * deviation / (n + 1.0);
            self.mean[i] += deviation / (n + 1.0);
            self.minimum[i] = self.minimum[i].min(value);
            self.maximum[i] = self.maximum[i].max(value);
        }
        self.number_of_samples += 1;

        Ok(())
    }

    pub fn number_of_samples(&self) -> u64 {
        self.number_of_samples
    }

    pub fn number_of_dimensions(&self) -> usize {
        self.mean.len()
    }

    pub fn get_minimum(&self) -> &Array1<f64> {
        &self.minimum
    }

    pub fn get_maximum(&self) -> &Array1<f64> {
        &self.maximum
    }

    pub fn get_mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn get_variance(&self) -> &Array1<f64> {
        &self.variance
    }

    pub fn get_standard_deviation(&self) -> Array1<f64> {
        self.variance.mapv(f64::sqrt)
    }

    #[cfg(test)]
    fn set_number_of_samples(&mut self, number_of_samples: u64) {
        self.number_of_samples = number_of_samples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_first_update_seeds() {
        let mut statistic = Statistic::new();
        statistic.update(&array![1.0, -2.0]).unwrap();
        assert_eq!(statistic.number_of_samples(), 1);
        assert_eq!(statistic.get_mean(), &array![1.0, -2.0]);
        assert_eq!(statistic.get_minimum(), &array![1.0, -2.0]);
        assert_eq!(statistic.get_maximum(), &array![1.0, -2.0]);
        assert_eq!(statistic.get_variance(), &array![0.0, 0.0]);
    }

    #[test]
    fn test_update_order() {
        let mut statistic = Statistic::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            statistic.update(&array![v]).unwrap();
        }
        assert!((statistic.get_mean()[0] - 2.5).abs() < 1e-12);
        // sample variance of 1..=4
        assert!((statistic.get_variance()[0] - 5.0 / 3.0).abs() < 1e-12);
        assert!((statistic.get_standard_deviation()[0] - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(statistic.get_minimum()[0], 1.0);
        assert_eq!(statistic.get_maximum()[0], 4.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut statistic = Statistic::new();
        statistic.update(&array![1.0, 2.0]).unwrap();
        assert_eq!(
            statistic.update(&array![1.0]),
            Err(MonitorError::DimensionMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(statistic.number_of_samples(), 1);
    }

    #[test]
    fn test_precision_overflow() {
        let mut statistic = Statistic::new();
        statistic.update(&array![3.0]).unwrap();

        statistic.set_number_of_samples(MAXIMAL_NUMBER_OF_SAMPLES - 2);
        statistic.update(&array![3.0]).unwrap();
        assert_eq!(statistic.number_of_samples(), MAXIMAL_NUMBER_OF_SAMPLES - 1);
        assert_eq!(statistic.get_variance()[0], 0.0);
        assert_eq!(statistic.get_mean()[0], 3.0);

        assert!(matches!(
            statistic.update(&array![3.0]),
            Err(MonitorError::PrecisionOverflow { .. })
        ));
    }
}
