//! Marginal-utility curves
//!
//! One estimator's opinion of one organization is a piecewise-linear curve
//! mapping a cumulative dollar amount to the utility of the *next* dollar at
//! that level (marginal utility, not cumulative utility). Each knot of the
//! curve is a [`UtilityGraphPoint`]; a validated ordered sequence of knots is
//! a [`UtilityCurve`].
//!
//! # Critical Invariants
//!
//! 1. A curve holds at least one point
//! 2. Points are strictly increasing in `usd_amount` (duplicates rejected)
//! 3. All coordinates are finite
//! 4. `utility_at` is pure: identical inputs give identical outputs
//!
//! # Example
//!
//! ```
//! use allocation_simulator_core_rs::models::curve::{UtilityCurve, UtilityGraphPoint};
//!
//! let curve = UtilityCurve::new(vec![
//!     UtilityGraphPoint::new(0.0, 100.0),
//!     UtilityGraphPoint::new(500_000.0, 50.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(curve.utility_at(0.0).unwrap(), 100.0);
//! assert_eq!(curve.utility_at(250_000.0).unwrap(), 75.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or evaluating a utility curve
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// A curve was missing or empty where at least one point is required
    #[error("utility curve must contain at least one point")]
    EmptyCurve,

    /// Two knots share (or invert) a dollar amount after sorting
    #[error("curve points must be strictly increasing in usd_amount: {prev} is followed by {next}")]
    UnsortedPoints { prev: f64, next: f64 },

    /// A NaN or infinite value where a real dollar/utility number is required
    #[error("expected a finite number, got {0}")]
    NonFiniteAmount(f64),
}

/// One knot of a piecewise-linear marginal-utility curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilityGraphPoint {
    /// Cumulative dollars already allocated to the organization
    pub usd_amount: f64,

    /// Utility of the next dollar at that cumulative level
    pub marginal_utility: f64,
}

impl UtilityGraphPoint {
    /// Create a new point
    pub fn new(usd_amount: f64, marginal_utility: f64) -> Self {
        Self {
            usd_amount,
            marginal_utility,
        }
    }
}

/// A validated marginal-utility curve for one (estimator, organization) pair
///
/// Construction sorts the points by ascending `usd_amount` and then rejects
/// empty input, non-finite coordinates, and duplicate knots. Once built, the
/// point sequence is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UtilityGraphPoint>", into = "Vec<UtilityGraphPoint>")]
pub struct UtilityCurve {
    points: Vec<UtilityGraphPoint>,
}

impl UtilityCurve {
    /// Build a curve from raw points
    ///
    /// Points may arrive in any order; they are sorted by ascending
    /// `usd_amount` before validation. Duplicate amounts are a hard error,
    /// never repaired.
    ///
    /// # Errors
    ///
    /// * [`CurveError::EmptyCurve`] - `points` is empty
    /// * [`CurveError::NonFiniteAmount`] - a coordinate is NaN or infinite
    /// * [`CurveError::UnsortedPoints`] - two points share a `usd_amount`
    pub fn new(points: Vec<UtilityGraphPoint>) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::EmptyCurve);
        }

        for point in &points {
            if !point.usd_amount.is_finite() {
                return Err(CurveError::NonFiniteAmount(point.usd_amount));
            }
            if !point.marginal_utility.is_finite() {
                return Err(CurveError::NonFiniteAmount(point.marginal_utility));
            }
        }

        let mut points = points;
        points.sort_by(|a, b| a.usd_amount.total_cmp(&b.usd_amount));

        for pair in points.windows(2) {
            if pair[0].usd_amount >= pair[1].usd_amount {
                return Err(CurveError::UnsortedPoints {
                    prev: pair[0].usd_amount,
                    next: pair[1].usd_amount,
                });
            }
        }

        Ok(Self { points })
    }

    /// Marginal utility at a cumulative allocation level
    ///
    /// Exact knot amounts return the knot's value with no interpolation
    /// arithmetic. Amounts between two knots are linearly interpolated.
    /// Amounts past the last knot plateau at the last knot's value.
    ///
    /// Amounts below a first knot that is not anchored at `usd_amount = 0`
    /// fall through every bracket and also take the last knot's value;
    /// callers that want low-end extrapolation must anchor their curves at
    /// zero.
    ///
    /// # Errors
    ///
    /// * [`CurveError::NonFiniteAmount`] - `usd_amount` is NaN or infinite
    ///
    /// # Example
    ///
    /// ```
    /// use allocation_simulator_core_rs::models::curve::{UtilityCurve, UtilityGraphPoint};
    ///
    /// let curve = UtilityCurve::new(vec![
    ///     UtilityGraphPoint::new(0.0, 100.0),
    ///     UtilityGraphPoint::new(500_000.0, 50.0),
    ///     UtilityGraphPoint::new(1_000_000.0, 20.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(curve.utility_at(750_000.0).unwrap(), 35.0);
    /// assert_eq!(curve.utility_at(1_500_000.0).unwrap(), 20.0);
    /// ```
    pub fn utility_at(&self, usd_amount: f64) -> Result<f64, CurveError> {
        if !usd_amount.is_finite() {
            return Err(CurveError::NonFiniteAmount(usd_amount));
        }

        if let Some(point) = self.points.iter().find(|p| p.usd_amount == usd_amount) {
            return Ok(point.marginal_utility);
        }

        for pair in self.points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            if usd_amount >= p1.usd_amount && usd_amount <= p2.usd_amount {
                let ratio = (usd_amount - p1.usd_amount) / (p2.usd_amount - p1.usd_amount);
                return Ok(p1.marginal_utility + ratio * (p2.marginal_utility - p1.marginal_utility));
            }
        }

        // No bracket matched: past the last knot, or below an unanchored
        // first knot. Both plateau at the final knot's value.
        Ok(self.points[self.points.len() - 1].marginal_utility)
    }

    /// The validated points, ascending in `usd_amount`
    pub fn points(&self) -> &[UtilityGraphPoint] {
        &self.points
    }

    /// Number of knots
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a successfully built curve; present for the
    /// conventional `len`/`is_empty` pairing
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<Vec<UtilityGraphPoint>> for UtilityCurve {
    type Error = CurveError;

    fn try_from(points: Vec<UtilityGraphPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<UtilityCurve> for Vec<UtilityGraphPoint> {
    fn from(curve: UtilityCurve) -> Self {
        curve.points
    }
}
