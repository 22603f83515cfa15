use super::Matrix2;
use crate::prelude::*;
use std::ops::{Add, AddAssign, Mul, Sub};

pub trait Dot<I> {
    type Output;
    fn dot(self, rhs: I) -> Result<Self::Output>;
}

pub trait Transpose {
    fn transpose(&self) -> Self;
}

impl<T: Default + Copy> Transpose for Matrix2<T> {
    fn transpose(&self) -> Self {
        let mut transposed = Matrix2::new(self.cols(), self.rows());

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                transposed[(col, row)] = self[(row, col)];
            }
        }
        transposed
    }
}

impl<'a, T> Dot<&Matrix2<T>> for &'a Matrix2<T>
where
    T: Mul<Output = T> + Default + AddAssign + Copy,
{
    type Output = Matrix2<T>;
    fn dot(self, rhs: &Matrix2<T>) -> Result<Self::Output> {
        if self.cols() != rhs.rows() {
            return Err(Error::Dimension {
                op: "dot",
                lhs: self.dim,
                rhs: rhs.dim,
            });
        }

        let mut data = Vec::with_capacity(self.rows() * rhs.cols());

        for lhs_row in 0..self.rows() {
            for rhs_col in 0..rhs.cols() {
                let mut sum = T::default();
                for n in 0..self.cols() {
                    sum += self[(lhs_row, n)] * rhs[(n, rhs_col)]
                }
                data.push(sum);
            }
        }

        Ok(Matrix2 {
            data,
            dim: (self.rows(), rhs.cols()),
        })
    }
}

impl<T> Matrix2<T> {
    /// Combines two equally shaped matrices element by element.
    fn zip_with<'a, F>(&'a self, rhs: &'a Matrix2<T>, op: &'static str, f: F) -> Result<Matrix2<T>>
    where
        F: Fn(&'a T, &'a T) -> T,
    {
        if self.dim != rhs.dim {
            return Err(Error::Dimension {
                op,
                lhs: self.dim,
                rhs: rhs.dim,
            });
        }

        Ok(Matrix2 {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| f(a, b))
                .collect(),
            dim: self.dim,
        })
    }
}

impl<T: Mul<Output = T> + Copy> Matrix2<T> {
    /// Element-wise product.
    pub fn hadamard(&self, rhs: &Matrix2<T>) -> Result<Matrix2<T>> {
        self.zip_with(rhs, "hadamard", |&a, &b| a * b)
    }

    pub fn scale(&self, k: T) -> Matrix2<T> {
        self.map(|&x| x * k)
    }
}

/// Adds two Matrix2s element-wise.
impl<'a, T> Add for &'a Matrix2<T>
where
    &'a T: Add<Output = T>,
{
    type Output = Result<Matrix2<T>>;
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, "add", |a, b| a + b)
    }
}

/// Subs two Matrix2s element-wise.
impl<'a, T> Sub for &'a Matrix2<T>
where
    &'a T: Sub<Output = T>,
{
    type Output = Result<Matrix2<T>>;
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, "sub", |a, b| a - b)
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::{
        ops::{Dot, Transpose},
        Matrix2,
    };
    use crate::prelude::*;

    #[test]
    fn matrix2_transpose() {
        let matrix = Matrix2::from_array([[1, 2, 3], [4, 5, 6]]).transpose();

        assert_eq!(matrix.dim(), (3, 2));
        assert_eq!(matrix.to_vec(), [[1, 4], [2, 5], [3, 6]]);
    }

    #[test]
    fn non_square_matrix_multiplication() {
        let m1 = Matrix2::from_array([[1, 2], [3, 4], [5, 6]]);
        let m2 = Matrix2::from_array([[1, 2], [3, 4]]);

        let m3 = m1.dot(&m2).unwrap();
        assert_eq!(m3.dim(), (3, 2));
        assert_eq!(m3.to_vec(), [[7, 10], [15, 22], [23, 34]]);
    }

    #[test]
    fn matrix_multiplication_error() {
        let m1 = Matrix2::from_array([[1, 2], [3, 4], [5, 6]]).transpose();
        let m2 = Matrix2::from_array([[1, 2], [3, 4]]);

        assert_eq!(
            m1.dot(&m2),
            Err(Error::Dimension {
                op: "dot",
                lhs: (2, 3),
                rhs: (2, 2),
            })
        );
    }

    #[test]
    fn matrix2_addition_and_subtraction() {
        let m1 = Matrix2::from_array([[1, 2], [3, 4], [5, 6]]);
        let m2 = Matrix2::from_array([[1, 2], [3, 4], [2, 1]]);

        assert_eq!((&m1 + &m2).unwrap().to_vec(), [[2, 4], [6, 8], [7, 7]]);
        assert_eq!((&m1 - &m2).unwrap().to_vec(), [[0, 0], [0, 0], [3, 5]]);
    }

    #[test]
    fn elementwise_ops_reject_mismatched_shapes() {
        // same element count, different shape
        let m1 = Matrix2::from_array([[1, 2], [3, 4], [5, 6]]).transpose();
        let m2 = Matrix2::from_array([[1, 2], [3, 4], [5, 6]]);

        assert!((&m1 + &m2).is_err());
        assert!((&m1 - &m2).is_err());
        assert!(m1.hadamard(&m2).is_err());
    }

    #[test]
    fn hadamard_and_scale() {
        let m1 = Matrix2::from_array([[1.0, 2.0], [3.0, 4.0]]);
        let m2 = Matrix2::from_array([[0.5, 0.0], [-1.0, 2.0]]);

        assert_eq!(m1.hadamard(&m2).unwrap().to_vec(), [[0.5, 0.0], [-3.0, 8.0]]);
        assert_eq!(m1.scale(2.0).to_vec(), [[2.0, 4.0], [6.0, 8.0]]);
    }
}
