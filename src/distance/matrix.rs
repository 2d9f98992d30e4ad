//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::InstanceError;
use crate::models::Customer;

/// A dense n×n matrix stored in row-major order.
///
/// Used for both pairwise distances and pairwise travel times.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::Customer;
/// use vrptw_solution::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 10, 5.0),
///     Customer::new(2, 6.0, 8.0, 20, 5.0),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawMatrix {
    size: usize,
    data: Vec<f64>,
}

impl TryFrom<RawMatrix> for DistanceMatrix {
    type Error = InstanceError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Self::from_data(raw.size, raw.data)
    }
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if `size * size` values cannot be
    /// allocated.
    pub fn new(size: usize) -> Self {
        let len = size.checked_mul(size).unwrap_or(usize::MAX);
        Self {
            size,
            data: vec![0.0; len],
        }
    }

    /// Computes a Euclidean distance matrix from customer coordinates.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let n = customers.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = customers[i].distance_to(&customers[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a matrix from an explicit row-major n×n grid.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, InstanceError> {
        if size.checked_mul(size) != Some(data.len()) {
            return Err(InstanceError::InvalidMatrixData {
                size,
                len: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Returns the value from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the value from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customers() -> Vec<Customer> {
        vec![
            Customer::depot(0.0, 0.0),
            Customer::new(1, 3.0, 4.0, 10, 5.0),
            Customer::new(2, 0.0, 8.0, 20, 5.0),
        ]
    }

    #[test]
    fn test_from_customers() {
        let dm = DistanceMatrix::from_customers(&sample_customers());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(2, 0) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert_eq!(
            DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]),
            Err(InstanceError::InvalidMatrixData { size: 2, len: 3 })
        );
    }

    #[test]
    fn test_from_data_size_overflow() {
        let size = 1usize << (usize::BITS / 2);
        assert_eq!(
            DistanceMatrix::from_data(size, Vec::new()),
            Err(InstanceError::InvalidMatrixData { size, len: 0 })
        );
        assert!(DistanceMatrix::from_data(usize::MAX, Vec::new()).is_err());
    }

    #[test]
    fn test_deserialize_rejects_overflowing_size() {
        let json = format!(r#"{{"size":{},"data":[]}}"#, 1usize << (usize::BITS / 2));
        assert!(serde_json::from_str::<DistanceMatrix>(&json).is_err());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let dm: DistanceMatrix =
            serde_json::from_str(r#"{"size":2,"data":[0.0,1.0,1.0,0.0]}"#).expect("valid");
        assert_eq!(dm.get(1, 0), 1.0);
        assert!(serde_json::from_str::<DistanceMatrix>(r#"{"size":2,"data":[0.0]}"#).is_err());
    }
}
