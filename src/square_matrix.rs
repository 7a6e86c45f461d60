use std::{
    fmt::Debug,
    ops::{Index, IndexMut},
};

/// Dense square matrix with a fixed side length.
///
/// Entries are stored in a single row-major vector and indexed by
/// `row * size + col`.  The side length is chosen at construction and never
/// changes afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct SquareMatrix<T> {
    size: usize,
    data: Vec<T>,
}

impl<T> SquareMatrix<T> {
    /// Creates a `size × size` matrix with every entry set to `value`.
    pub fn with_size(size: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            size,
            data: vec![value; size * size],
        }
    }

    /// Creates a `size × size` matrix whose entries are produced by `f(row, col)`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                data.push(f(row, col));
            }
        }
        Self { size, data }
    }

    /// Returns the side length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets a reference to the entry at `row` and `col`, or `None` if either
    /// index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.data_index(row, col).map(|index| &self.data[index])
    }

    /// Replaces the entry at `row` and `col`, returning the previous value.
    /// Returns `None` and leaves the matrix untouched if either index is out
    /// of range.
    pub fn insert(&mut self, row: usize, col: usize, value: T) -> Option<T> {
        let index = self.data_index(row, col)?;
        Some(std::mem::replace(&mut self.data[index], value))
    }

    /// Returns the entries of one row, in column order.
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.size, "row {row} out of range for size {}", self.size);
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Iterates over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // `chunks` panics on a zero chunk size, so an empty matrix yields nothing.
        self.data.chunks(self.size.max(1))
    }

    /// Iterates over all entries as `(row, col, value)` tuples in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(index, value)| (index / size, index % size, value))
    }

    fn data_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }
}

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        self.get(row, col).unwrap_or_else(|| {
            panic!(
                "index ({row}, {col}) out of range for matrix of size {}",
                self.size
            )
        })
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let size = self.size;
        match self.data_index(row, col) {
            Some(index) => &mut self.data[index],
            None => panic!("index ({row}, {col}) out of range for matrix of size {size}"),
        }
    }
}

impl<T: Debug> Debug for SquareMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquareMatrix")
            .field("size", &self.size)
            .field("rows", &self.rows().collect::<Vec<_>>())
            .finish()
    }
}
