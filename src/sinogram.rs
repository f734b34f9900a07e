//! Accumulator of line-of-response crossings: one row per distance bin, one
//! column per angle bin.

use ndarray::{Array2, ArrayView1};

use crate::discrete::Bin;

pub type Count = u32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sinogram {
    data: Array2<Count>,
}

impl Sinogram {

    /// All-zero sinogram with `n_distance` rows and `n_theta` columns
    pub fn new((n_distance, n_theta): (usize, usize)) -> Self {
        Self { data: Array2::zeros((n_distance, n_theta)) }
    }

    /// Build from rows of equal length. `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Count>>) -> Option<Self> {
        let n_distance = rows.len();
        let n_theta = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_theta) { return None }
        let flat = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((n_distance, n_theta), flat).ok().map(|data| Self { data })
    }

    /// `(distance bins, angle bins)`
    pub fn shape(&self) -> (usize, usize) { self.data.dim() }

    pub fn n_distance(&self) -> usize { self.data.nrows() }
    pub fn n_theta   (&self) -> usize { self.data.ncols() }

    /// Record one crossing. Bins must come from a `Binning` of the same shape.
    #[inline]
    pub fn increment(&mut self, (d, t): Bin) { self.data[[d, t]] += 1; }

    pub fn get(&self, (d, t): Bin) -> Option<Count> { self.data.get((d, t)).copied() }

    /// Sum of all cells
    pub fn total(&self) -> u64 { self.data.iter().map(|&c| c as u64).sum() }

    /// Largest cell value
    pub fn max(&self) -> Count { self.data.iter().copied().max().unwrap_or(0) }

    /// Distance rows, from most negative distance to most positive
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Count>> { self.data.rows().into_iter() }

    /// Cell-wise sum of `other` into `self`
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub(crate) fn merge(&mut self, other: &Self) {
        assert_eq!(self.shape(), other.shape(), "Cannot merge sinograms of different shapes");
        self.data += &other.data;
    }
}
