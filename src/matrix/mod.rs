use crate::prelude::*;
use rand::{distributions::Distribution, Rng};
use std::ops::{Index, IndexMut};

pub mod ops;

/// Dense row-major matrix. In a layer, each row is one entry of a batch.
#[derive(Debug, PartialEq, Clone)]
pub struct Matrix2<T> {
    data: Vec<T>,
    dim: (usize, usize),
}

impl<T: Default + Clone> Matrix2<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            dim: (rows, cols),
        }
    }
}

impl<T> Matrix2<T> {
    pub fn from_array<const R: usize, const C: usize>(arr: [[T; C]; R]) -> Self {
        let mut data = Vec::with_capacity(R * C);

        for row in arr {
            data.extend(row);
        }

        Self { data, dim: (R, C) }
    }

    /// Builds a matrix from row-major `data`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::Dimension {
                op: "from_flat",
                lhs: (rows, cols),
                rhs: (1, data.len()),
            });
        }
        Ok(Self {
            data,
            dim: (rows, cols),
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn rows(&self) -> usize {
        self.dim.0
    }

    pub fn cols(&self) -> usize {
        self.dim.1
    }

    pub fn row(&self, row: usize) -> &[T] {
        let cols = self.cols();
        &self.data[row * cols..(row + 1) * cols]
    }

    /// The elements in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn to_vec(self) -> Vec<Vec<T>> {
        let cols = self.cols();
        let mut res = Vec::with_capacity(self.rows());
        let mut it = self.data.into_iter();
        for _ in 0..self.dim.0 {
            res.push(it.by_ref().take(cols).collect());
        }
        res
    }

    /// Returns a new matrix with `f` applied to every element.
    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> Matrix2<U> {
        Matrix2 {
            data: self.data.iter().map(f).collect(),
            dim: self.dim,
        }
    }
}

impl<T> Matrix2<T>
where
    T: Default,
{
    /// Applies a function to every element of the matrix
    pub fn apply<F: Fn(T) -> T>(&mut self, f: F) {
        for x in &mut self.data {
            let old = std::mem::take(x);
            *x = f(old);
        }
    }
}

impl Matrix2<f64> {
    /// Fills a `rows x cols` matrix with samples from `dist`.
    pub fn random<D, R>(rows: usize, cols: usize, dist: &D, rng: &mut R) -> Self
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        Self {
            data: (0..rows * cols).map(|_| dist.sample(&mut *rng)).collect(),
            dim: (rows, cols),
        }
    }

    /// Copy of the matrix with a trailing column of ones.
    pub fn add_bias(&self) -> Self {
        let (rows, cols) = self.dim;
        let mut data = Vec::with_capacity(rows * (cols + 1));
        for row in 0..rows {
            data.extend_from_slice(self.row(row));
            data.push(1.0);
        }
        Self {
            data,
            dim: (rows, cols + 1),
        }
    }

    /// Copy of the matrix without its last column.
    pub fn remove_bias(&self) -> Result<Self> {
        let (rows, cols) = self.dim;
        if cols == 0 {
            return Err(Error::Dimension {
                op: "remove_bias",
                lhs: self.dim,
                rhs: (rows, 1),
            });
        }

        let mut data = Vec::with_capacity(rows * (cols - 1));
        for row in 0..rows {
            data.extend_from_slice(&self.row(row)[..cols - 1]);
        }
        Ok(Self {
            data,
            dim: (rows, cols - 1),
        })
    }
}

impl<T> Index<(usize, usize)> for Matrix2<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.cols() + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix2<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        let idx = i * self.cols() + j;
        &mut self.data[idx]
    }
}

impl From<Matrix2<i32>> for Matrix2<f64> {
    fn from(value: Matrix2<i32>) -> Self {
        value.map(|&x| x as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{distributions::Uniform, rngs::StdRng, SeedableRng};

    #[test]
    fn access_matrix2_from_array() {
        let matrix = Matrix2::from_array([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(matrix[(0, 1)], 2);
        assert_eq!(matrix[(1, 2)], 6);
        assert_eq!(matrix[(0, 0)], 1);
        assert_eq!(matrix[(1, 1)], 5);
        assert_eq!(matrix.row(1), &[4, 5, 6]);
    }

    #[test]
    fn matrix2_from_flat() {
        let matrix = Matrix2::from_flat(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(matrix, Matrix2::from_array([[1, 2, 3], [4, 5, 6]]));

        assert!(Matrix2::from_flat(2, 2, vec![1, 2, 3]).is_err());
    }

    #[test]
    fn matrix2_apply() {
        let mut matrix = Matrix2::from_array([[1, 2], [2, 2], [4, 8]]);

        matrix.apply(|x| x / 2);

        assert_eq!(matrix.to_vec(), [[0, 1], [1, 1], [2, 4]]);
    }

    #[test]
    fn bias_column_round_trip() {
        let m: Matrix2<f64> = Matrix2::from_array([[0.5, -1.25], [3.0, 7.5], [0.0, 2.0]]);

        let with_bias = m.add_bias();
        assert_eq!(with_bias.dim(), (3, 3));
        assert!((0..3).all(|row| with_bias[(row, 2)] == 1.0));

        assert_eq!(with_bias.remove_bias().unwrap(), m);
    }

    #[test]
    fn remove_bias_from_empty_is_err() {
        let m = Matrix2::<f64>::new(2, 0);
        assert!(m.remove_bias().is_err());
    }

    #[test]
    fn random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = Matrix2::random(4, 5, &Uniform::new(-0.5, 0.25), &mut rng);

        assert_eq!(m.dim(), (4, 5));
        assert!(m.as_slice().iter().all(|&x| (-0.5..0.25).contains(&x)));
    }
}
