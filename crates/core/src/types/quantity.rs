//! Purchase quantity with a floor of one.

use serde::{Deserialize, Serialize};

/// A purchase quantity, always at least 1.
///
/// The decrement control on the product page clamps at 1 rather than letting
/// a line reach zero; the increment is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest representable quantity.
    pub const MIN: Self = Self(1);

    /// Create a quantity, clamping zero up to 1.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self(1) } else { Self(value) }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Apply a signed delta, clamping the result at 1.
    #[must_use]
    pub fn adjust(self, delta: i32) -> Self {
        let next = i64::from(self.0) + i64::from(delta);
        let clamped = next.clamp(1, i64::from(u32::MAX));
        Self(u32::try_from(clamped).unwrap_or(u32::MAX))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
