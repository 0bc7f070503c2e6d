use std::fmt;

/// Why a statistic could not be computed.
///
/// Every operation in this crate reports degenerate input through this type
/// instead of panicking or producing `NaN`/infinite values, so callers can
/// render an explicit "undefined" marker next to the affected group.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum StatsError {
    /// Fewer valid observations than the computation needs.
    #[display("insufficient data: need at least {required} valid observations, found {found}")]
    InsufficientData { required: usize, found: usize },
    /// The series is constant, so a division by its spread is undefined.
    #[display("zero variance in {_0} series")]
    ZeroVariance(#[error(not(source))] VarianceScope),
    /// Two columns that must be index-aligned have different lengths.
    #[display("length mismatch: {left} values vs {right} values")]
    LengthMismatch { left: usize, right: usize },
    /// Student's t distribution rejected the degrees of freedom.
    #[display("invalid degrees of freedom: {df}")]
    InvalidDegreesOfFreedom { df: f64 },
    /// The values are too large in magnitude for the result to be represented.
    #[display("numeric overflow: result is not finite")]
    NonFinite,
}

impl StatsError {
    /// Short label suitable for a table cell.
    #[must_use]
    pub fn short_label(&self) -> &'static str {
        match self {
            StatsError::InsufficientData { .. } => "insufficient data",
            StatsError::ZeroVariance(_) => "zero variance",
            StatsError::LengthMismatch { .. } => "length mismatch",
            StatsError::InvalidDegreesOfFreedom { .. } => "invalid df",
            StatsError::NonFinite => "overflow",
        }
    }

    pub(crate) fn check_aligned(left: usize, right: usize) -> Result<(), Self> {
        if left == right {
            Ok(())
        } else {
            Err(StatsError::LengthMismatch { left, right })
        }
    }

    pub(crate) fn check_finite(value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(StatsError::NonFinite)
        }
    }

    pub(crate) fn check_count(required: usize, found: usize) -> Result<(), Self> {
        if found >= required {
            Ok(())
        } else {
            Err(StatsError::InsufficientData { required, found })
        }
    }
}

/// Which series turned out to be constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceScope {
    /// All valid measurements combined.
    Overall,
    /// Pooled within-group spread of a two-group split.
    Pooled,
    /// Explanatory variable of a correlation or regression.
    X,
    /// Response variable of a correlation or regression.
    Y,
}

impl fmt::Display for VarianceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VarianceScope::Overall => "overall",
            VarianceScope::Pooled => "pooled",
            VarianceScope::X => "x",
            VarianceScope::Y => "y",
        };
        f.write_str(s)
    }
}

/// Result of a single statistic.
pub type Statistic = Result<f64, StatsError>;
