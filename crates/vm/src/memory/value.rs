//! Defines the [`Value`] type.

use std::fmt;

use starknet_types_core::felt::Felt;

use crate::error::Error;

use super::{felt_to_offset, Relocatable};

/// A value that may be stored in a [`Memory`](super::Memory) cell or held by a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// A scalar with no provenance information.
    ///
    /// In that case, the value simply carries a field element without any more information.
    Scalar(Felt),
    /// An address within a specific segment.
    Relocatable(Relocatable),
}

impl Value {
    /// Attempts to add two [`Value`]s.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        match (self, other) {
            (Self::Scalar(left), Self::Scalar(right)) => Ok(Self::Scalar(left + right)),
            (Self::Scalar(left), Self::Relocatable(right)) => {
                Ok(right.add_offset(felt_to_offset(left)?)?.into())
            }
            (Self::Relocatable(left), right) => Ok(left.add_value(right)?.into()),
        }
    }

    /// Attempts to subtract two [`Value`]s.
    ///
    /// Subtracting two addresses of the same segment yields their distance as a scalar.
    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        match (self, other) {
            (Self::Scalar(left), Self::Scalar(right)) => Ok(Self::Scalar(left - right)),
            (Self::Scalar(left), Self::Relocatable(right)) => Err(Error::SubtractRelocatable {
                scalar: *left,
                relocatable: *right,
            }),
            (Self::Relocatable(left), Self::Scalar(right)) => {
                Ok(left.sub_offset(felt_to_offset(right)?)?.into())
            }
            (Self::Relocatable(left), Self::Relocatable(right)) => {
                Ok(Self::Scalar(Felt::from(left.distance(*right)?)))
            }
        }
    }

    /// Returns the field element held by this value, if any.
    #[inline(always)]
    pub const fn scalar(&self) -> Option<&Felt> {
        match self {
            Self::Scalar(felt) => Some(felt),
            Self::Relocatable(_) => None,
        }
    }

    /// Returns the address held by this value, if any.
    #[inline(always)]
    pub const fn relocatable(&self) -> Option<Relocatable> {
        match self {
            Self::Scalar(_) => None,
            Self::Relocatable(r) => Some(*r),
        }
    }
}

impl From<Felt> for Value {
    #[inline(always)]
    fn from(value: Felt) -> Self {
        Self::Scalar(value)
    }
}

impl From<Relocatable> for Value {
    #[inline(always)]
    fn from(value: Relocatable) -> Self {
        Self::Relocatable(value)
    }
}

impl PartialEq<Relocatable> for Value {
    fn eq(&self, other: &Relocatable) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::Relocatable(r) => r == other,
        }
    }
}

impl PartialEq<Felt> for Value {
    fn eq(&self, other: &Felt) -> bool {
        match self {
            Self::Scalar(value) => value == other,
            Self::Relocatable(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(felt) => write!(f, "{felt}"),
            Self::Relocatable(r) => write!(f, "{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn felt(v: u64) -> Value {
        Value::Scalar(Felt::from(v))
    }

    #[test]
    fn scalar_arithmetic() {
        assert_eq!(felt(2).add(&felt(3)), Ok(felt(5)));
        assert_eq!(felt(5).sub(&felt(3)), Ok(felt(2)));
    }

    #[test]
    fn relocatable_plus_scalar_commutes() {
        let r: Value = Relocatable::new(1, 4).into();
        assert_eq!(r.add(&felt(2)), Ok(Relocatable::new(1, 6).into()));
        assert_eq!(felt(2).add(&r), Ok(Relocatable::new(1, 6).into()));
    }

    #[test]
    fn relocatable_plus_relocatable_fails() {
        let a = Relocatable::new(1, 4);
        let b = Relocatable::new(2, 0);
        assert_eq!(
            Value::from(a).add(&b.into()),
            Err(Error::AddRelocatables { left: a, right: b })
        );
    }

    #[test]
    fn relocatable_difference_is_scalar() {
        let a: Value = Relocatable::new(1, 9).into();
        let b: Value = Relocatable::new(1, 4).into();
        assert_eq!(a.sub(&b), Ok(felt(5)));
    }

    #[test]
    fn relocatable_minus_scalar() {
        let r = Relocatable::new(2, 5);
        assert_eq!(
            Value::from(r).sub(&felt(5)),
            Ok(Relocatable::new(2, 0).into())
        );
        assert_eq!(
            Value::from(r).sub(&felt(6)),
            Err(Error::OffsetUnderflow {
                address: r,
                delta: 6
            })
        );

        let huge = Felt::from(u128::MAX);
        assert_eq!(
            Value::from(r).sub(&Value::Scalar(huge)),
            Err(Error::OffsetTooLarge(huge))
        );
    }

    #[test]
    fn relocatable_difference_across_segments_fails() {
        let left = Relocatable::new(1, 9);
        let right = Relocatable::new(2, 4);
        assert_eq!(
            Value::from(left).sub(&right.into()),
            Err(Error::SegmentMismatch { left, right })
        );
    }

    #[test]
    fn scalar_minus_relocatable_fails() {
        let r = Relocatable::new(0, 1);
        assert!(matches!(
            felt(3).sub(&r.into()),
            Err(Error::SubtractRelocatable { relocatable, .. }) if relocatable == r
        ));
    }

    #[test]
    fn accessors() {
        let r = Relocatable::new(0, 1);
        assert_eq!(Value::from(r).relocatable(), Some(r));
        assert_eq!(Value::from(r).scalar(), None);
        assert_eq!(felt(1).scalar(), Some(&Felt::ONE));
        assert_eq!(felt(1), Felt::ONE);
        assert_eq!(Value::from(r), r);
    }
}
