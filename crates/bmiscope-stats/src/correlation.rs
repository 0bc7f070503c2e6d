//! Pearson correlation between continuous columns
//!
//! Missing values are handled by pairwise deletion: a row takes part in the
//! correlation of two columns only if both of its values are valid.

use crate::{
    distribution,
    error::{StatsError, VarianceScope},
    sample::{self, valid_value},
};

/// Pearson correlation of two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    /// Rows where both values were valid.
    pub n: usize,
    /// Correlation coefficient in `[-1, 1]`.
    pub r: f64,
    /// Two-tailed p-value of `H0: r = 0`; undefined for `n < 3`.
    pub p_value: Result<f64, StatsError>,
}

/// Computes the Pearson correlation coefficient of `x` and `y`.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::correlation::pearson;
///
/// let age = [Some(45.0), Some(34.0), Some(67.0), None, Some(50.0)];
/// let bmi = [Some(27.9), Some(23.4), Some(31.1), Some(22.7), Some(30.4)];
/// let corr = pearson(&age, &bmi).unwrap();
/// assert_eq!(corr.n, 4);
/// assert!(corr.r > 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Result<Correlation, StatsError> {
    let (xs, ys) = complete_pairs(x, y)?;
    StatsError::check_count(2, xs.len())?;

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (sxy, sxx, syy) = xs
        .iter()
        .zip(&ys)
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (&xi, &yi)| {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        });

    if sample::is_constant(&xs) || sxx == 0.0 {
        return Err(StatsError::ZeroVariance(VarianceScope::X));
    }
    if sample::is_constant(&ys) || syy == 0.0 {
        return Err(StatsError::ZeroVariance(VarianceScope::Y));
    }

    let mut scale = (sxx * syy).sqrt();
    if scale.is_infinite() {
        scale = sxx.sqrt() * syy.sqrt();
    }
    let r = StatsError::check_finite(sxy / scale)?.clamp(-1.0, 1.0);
    Ok(Correlation {
        n: xs.len(),
        r,
        p_value: correlation_p_value(r, xs.len()),
    })
}

/// Two-tailed p-value of a correlation coefficient from `n` pairs,
/// via `t = r * sqrt((n - 2) / (1 - r²))` with `n - 2` degrees of freedom.
#[expect(clippy::cast_precision_loss)]
fn correlation_p_value(r: f64, n: usize) -> Result<f64, StatsError> {
    StatsError::check_count(3, n)?;
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Ok(0.0);
    }
    let t = r * (df / denom).sqrt();
    distribution::two_tailed_p_value(t, df)
}

/// Valid `(x, y)` pairs in row order.
pub(crate) fn complete_pairs(
    x: &[Option<f64>],
    y: &[Option<f64>],
) -> Result<(Vec<f64>, Vec<f64>), StatsError> {
    StatsError::check_aligned(x.len(), y.len())?;
    Ok(x.iter()
        .zip(y)
        .filter_map(|(xi, yi)| Some((valid_value(*xi)?, valid_value(*yi)?)))
        .unzip())
}

/// Symmetric matrix of pairwise Pearson correlations between named columns.
///
/// # Examples
///
/// ```
/// use bmiscope_stats::correlation::CorrelationMatrix;
///
/// let a = [Some(1.0), Some(2.0), Some(3.0)];
/// let b = [Some(2.0), Some(4.0), Some(7.0)];
/// let matrix = CorrelationMatrix::new(&[("a", &a[..]), ("b", &b[..])]).unwrap();
///
/// assert!((matrix.get(0, 0).unwrap().r - 1.0).abs() < 1e-12);
/// assert_eq!(matrix.get(0, 1).unwrap().r, matrix.get(1, 0).unwrap().r);
/// ```
#[derive(Debug, Clone)]
pub struct CorrelationMatrix<K> {
    names: Vec<K>,
    cells: Vec<Result<Correlation, StatsError>>,
}

impl<K> CorrelationMatrix<K>
where
    K: Clone,
{
    /// Computes all pairwise correlations. Columns must share one length.
    pub fn new(columns: &[(K, &[Option<f64>])]) -> Result<Self, StatsError> {
        let size = columns.len();
        if let Some((_, first)) = columns.first() {
            for (_, column) in columns {
                StatsError::check_aligned(first.len(), column.len())?;
            }
        }

        let mut cells = vec![Err(StatsError::InsufficientData { required: 2, found: 0 }); size * size];
        for i in 0..size {
            for j in i..size {
                let cell = pearson(columns[i].1, columns[j].1);
                cells[i * size + j] = cell.clone();
                cells[j * size + i] = cell;
            }
        }

        Ok(Self {
            names: columns.iter().map(|(name, _)| name.clone()).collect(),
            cells,
        })
    }

    /// Column names in input order.
    #[must_use]
    pub fn names(&self) -> &[K] {
        &self.names
    }

    /// Correlation between column `i` and column `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> Result<&Correlation, &StatsError> {
        let size = self.names.len();
        assert!(i < size && j < size, "index out of range");
        self.cells[i * size + j].as_ref()
    }

    /// All cells as `(row name, column name, correlation)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &K, Result<&Correlation, &StatsError>)> + '_ {
        let size = self.names.len();
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (&self.names[idx / size], &self.names[idx % size], cell.as_ref())
        })
    }
}
