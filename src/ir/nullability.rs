//! Nullability resolution for type references.
//!
//! Nullability is layered: an explicit value on the reference wins, otherwise the per-kind default
//! computed at construction applies. Requesting a differently-nullable view never mutates the
//! original; it derives a new reference and memoizes it per requested nullability, so repeated
//! requests hand out the same `Arc`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::types::{TypeRef, TypeReference};

/// Whether (and how) a type reference may hold an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullability {
    /// Defer to the kind's default.
    #[default]
    Default,
    NotNullable,
    /// Nullable; access does not need a syntactic unwrap (implicitly unwrapped optionals).
    NullableUnwrapped,
    /// Nullable; access must be unwrapped explicitly.
    NullableNotUnwrapped,
    /// Could not be determined. Backends render a marker rather than a concrete annotation.
    Unknown,
}

impl Nullability {
    pub const ALL: [Nullability; 5] = [
        Nullability::Default,
        Nullability::NotNullable,
        Nullability::NullableUnwrapped,
        Nullability::NullableNotUnwrapped,
        Nullability::Unknown,
    ];

    pub fn is_nullable(self) -> bool {
        matches!(self, Nullability::NullableUnwrapped | Nullability::NullableNotUnwrapped)
    }

    fn slot(self) -> usize {
        match self {
            Nullability::Default => 0,
            Nullability::NotNullable => 1,
            Nullability::NullableUnwrapped => 2,
            Nullability::NullableNotUnwrapped => 3,
            Nullability::Unknown => 4,
        }
    }
}

/// Memoized nullability variants of one reference, one slot per requested nullability.
///
/// Cloning yields an empty cache and equality always holds: the cache is not part of a
/// reference's structure.
#[derive(Default)]
pub(crate) struct NullabilityVariants {
    slots: [OnceLock<TypeRef>; 5],
}

impl Clone for NullabilityVariants {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl PartialEq for NullabilityVariants {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for NullabilityVariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.slots.iter().filter(|slot| slot.get().is_some()).count();
        f.debug_struct("NullabilityVariants").field("cached", &cached).finish()
    }
}

impl TypeReference {
    /// Resolve the nullability that applies to this reference.
    ///
    /// ## Returns
    /// - the explicit nullability if one was set, otherwise the kind's default.
    pub fn effective_nullability(&self) -> Nullability {
        match self.explicit_nullability() {
            Nullability::Default => self.default_nullability(),
            explicit => explicit,
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.effective_nullability().is_nullable()
    }

    /// Return a view of this reference with the given nullability.
    ///
    /// ## Parameters
    /// - `nullability`: the requested nullability. `Default` requests the kind's default.
    ///
    /// ## Returns
    /// - `self` (the same `Arc`) when the request is already satisfied.
    /// - otherwise a derived reference, identical except for nullability. The derived reference is
    ///   memoized: asking again for the same nullability returns the same `Arc`.
    pub fn with_nullability(self: &Arc<Self>, nullability: Nullability) -> TypeRef {
        let satisfied = match nullability {
            Nullability::Default => self.explicit_nullability() == Nullability::Default,
            requested => requested == self.effective_nullability(),
        };
        if satisfied {
            return Arc::clone(self);
        }
        let slot = &self.variants.slots[nullability.slot()];
        Arc::clone(slot.get_or_init(|| Arc::new(self.derive_with(nullability))))
    }

    /// Shorthand for a nullable view that requires explicit unwrapping.
    pub fn as_nullable(self: &Arc<Self>) -> TypeRef {
        self.with_nullability(Nullability::NullableNotUnwrapped)
    }

    pub fn as_not_nullable(self: &Arc<Self>) -> TypeRef {
        self.with_nullability(Nullability::NotNullable)
    }
}
