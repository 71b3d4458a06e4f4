use std::fmt;

use trestle_core::PreconditionViolation;

/// One axis of a size query.
///
/// `Exact` pins the axis: whatever the widget would prefer, the answer on
/// that axis is the hint itself. `Unconstrained` asks for the preferred
/// extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeHint {
    #[default]
    Unconstrained,
    Exact(i32),
}

impl SizeHint {
    pub const fn exact(value: i32) -> Self {
        SizeHint::Exact(value)
    }

    pub fn is_exact(self) -> bool {
        matches!(self, SizeHint::Exact(_))
    }

    pub fn value(self) -> Option<i32> {
        match self {
            SizeHint::Exact(value) => Some(value),
            SizeHint::Unconstrained => None,
        }
    }

    /// Removes `amount` from an exact hint, saturating at zero.
    pub fn shrink(self, amount: i32) -> Self {
        match self {
            SizeHint::Exact(value) => SizeHint::Exact((value - amount).max(0)),
            SizeHint::Unconstrained => SizeHint::Unconstrained,
        }
    }

    /// The exact value if pinned, otherwise `computed`.
    pub fn resolve(self, computed: i32) -> i32 {
        self.value().unwrap_or(computed)
    }

    /// Rejects negative exact hints.
    pub fn validate(self, axis: &'static str) -> Result<Self, PreconditionViolation> {
        match self {
            SizeHint::Exact(value) if value < 0 => {
                Err(PreconditionViolation::NegativeHint { axis, value })
            }
            hint => Ok(hint),
        }
    }
}

impl From<Option<i32>> for SizeHint {
    fn from(value: Option<i32>) -> Self {
        match value {
            Some(value) => SizeHint::Exact(value),
            None => SizeHint::Unconstrained,
        }
    }
}

impl fmt::Display for SizeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeHint::Exact(value) => write!(f, "{value}"),
            SizeHint::Unconstrained => f.write_str("*"),
        }
    }
}

#[cfg(test)]
#[path = "tests/hint_tests.rs"]
mod tests;
