use std::{
    cmp::Ordering,
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Deref},
};

use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude at which every whole number is still exactly representable.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Amount of usage in seconds, as recorded in the log.
///
/// Any JSON number is accepted, including fractions and negatives. Sums never panic: they are
/// plain float additions, so huge totals lose precision instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Seconds(f64);

impl Seconds {
    pub const ZERO: Seconds = Seconds(0.);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.
    }

    /// Seconds with the fractional part dropped towards negative infinity.
    pub fn whole(&self) -> f64 {
        self.0.floor()
    }

    fn is_exact_integer(&self) -> bool {
        self.0.fract() == 0. && self.0.abs() <= EXACT_INTEGER_LIMIT
    }

    /// Total ordering, largest first when used as `b.total_cmp(a)`.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<i64> for Seconds {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl Deref for Seconds {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Whole numbers are written back as JSON integers so that `120` doesn't turn into `120.0`.
impl Serialize for Seconds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_exact_integer() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Add for Seconds {
    type Output = Seconds;

    fn add(self, rhs: Self) -> Self::Output {
        Seconds(self.0 + rhs.0)
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Seconds {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Seconds::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Seconds> for Seconds {
    fn sum<I: Iterator<Item = &'a Seconds>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
