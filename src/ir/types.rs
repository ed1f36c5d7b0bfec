//! Type references.
//!
//! A [`TypeReference`] names a type at a use site (a field's type, a cast target, a generic
//! argument). Type references are shared by `Arc` ([`TypeRef`]) because the same reference is
//! commonly used in many places of a tree and because nullability variants are derived and
//! memoized per instance (see [`super::nullability`]).
//!
//! ## Notes
//! - Fields are private: the per-kind defaults (`default_nullability`, `is_class_type`,
//!   `default_value`) are computed at construction and kept consistent by the builder methods.
//! - Structural equality (`==`) ignores the memoized variants.

use std::sync::Arc;

use super::expr::Expression;
use super::nullability::{Nullability, NullabilityVariants};

/// Shared handle to a type reference.
pub type TypeRef = Arc<TypeReference>;

/// Primitive types every backend has a spelling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    IntPtr,
    UIntPtr,
    Single,
    Double,
    Boolean,
    Char,
    String,
    Object,
    Dynamic,
    Void,
}

impl PredefinedType {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PredefinedType::Int8
                | PredefinedType::UInt8
                | PredefinedType::Int16
                | PredefinedType::UInt16
                | PredefinedType::Int32
                | PredefinedType::UInt32
                | PredefinedType::Int64
                | PredefinedType::UInt64
                | PredefinedType::IntPtr
                | PredefinedType::UIntPtr
        )
    }

    pub fn is_floating_point(self) -> bool {
        matches!(self, PredefinedType::Single | PredefinedType::Double)
    }

    /// Value types hold their data inline and are not nullable by default.
    pub fn is_value_type(self) -> bool {
        !matches!(
            self,
            PredefinedType::String | PredefinedType::Object | PredefinedType::Dynamic | PredefinedType::Void
        )
    }

    fn default_value(self) -> Option<Expression> {
        match self {
            p if p.is_integer() => Some(Expression::integer(0)),
            p if p.is_floating_point() => Some(Expression::float(0.0)),
            PredefinedType::Boolean => Some(Expression::BooleanLiteral(false)),
            PredefinedType::Char => Some(Expression::CharacterLiteral('\0')),
            PredefinedType::String | PredefinedType::Object | PredefinedType::Dynamic => Some(Expression::Nil),
            _ => None,
        }
    }
}

/// A type referred to by name, optionally namespaced and generic.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub namespace: Option<String>,
    pub generic_arguments: Vec<TypeRef>,
}

impl NamedType {
    /// The dotted name including the namespace, if any.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Pointer,
    Reference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerType {
    pub target: TypeRef,
    pub kind: PointerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayKind {
    /// Fixed bounds, value semantics.
    Static,
    /// Growable reference-type array.
    #[default]
    Dynamic,
    /// Fixed bounds stored inline in the enclosing record.
    Inline,
}

/// Bounds of one array dimension. An open upper bound means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayBounds {
    pub start: i64,
    pub end: Option<i64>,
}

impl ArrayBounds {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end: Some(end) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub element: TypeRef,
    pub bounds: Vec<ArrayBounds>,
    pub kind: ArrayKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryType {
    pub key: TypeRef,
    pub value: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    pub members: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceType {
    pub element: TypeRef,
}

/// Flavour of an inline callable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InlineBlockKind {
    /// Closure with captured state.
    #[default]
    Block,
    /// Plain function pointer without captures.
    FunctionPointer,
    /// Bound method reference.
    Method,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineBlockType {
    pub parameters: Vec<TypeRef>,
    pub return_type: Option<TypeRef>,
    pub kind: InlineBlockKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeType {
    pub start: Box<Expression>,
    pub end: Box<Expression>,
}

/// The closed set of type-reference kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Named(NamedType),
    Predefined(PredefinedType),
    Pointer(PointerType),
    Array(ArrayType),
    Dictionary(DictionaryType),
    Tuple(TupleType),
    Sequence(SequenceType),
    /// Covariant "kind of T" reference (any subtype of `T`).
    KindOf(TypeRef),
    /// Read-only view of another type.
    Constant(TypeRef),
    InlineBlock(InlineBlockType),
    Range(RangeType),
    Unknown,
}

/// A reference to a type at a use site.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    kind: TypeKind,
    nullability: Nullability,
    default_nullability: Nullability,
    is_class_type: bool,
    default_value: Option<Box<Expression>>,
    pub(super) variants: NullabilityVariants,
}

impl TypeReference {
    /// Create a reference of the given kind with that kind's defaults.
    pub fn new(kind: TypeKind) -> Self {
        let is_class_type = match &kind {
            TypeKind::Named(_) => true,
            TypeKind::Predefined(p) => !p.is_value_type(),
            TypeKind::Array(a) => a.kind == ArrayKind::Dynamic,
            TypeKind::Pointer(_)
            | TypeKind::Dictionary(_)
            | TypeKind::Sequence(_)
            | TypeKind::KindOf(_)
            | TypeKind::InlineBlock(_) => true,
            TypeKind::Constant(inner) => inner.is_class_type(),
            TypeKind::Tuple(_) | TypeKind::Range(_) | TypeKind::Unknown => false,
        };
        let default_value = match &kind {
            TypeKind::Predefined(p) => p.default_value(),
            TypeKind::Range(range) => Some((*range.start).clone()),
            _ if is_class_type => Some(Expression::Nil),
            _ => None,
        };
        let default_nullability = Self::kind_default_nullability(&kind, is_class_type);
        Self {
            kind,
            nullability: Nullability::Default,
            default_nullability,
            is_class_type,
            default_value: default_value.map(Box::new),
            variants: NullabilityVariants::default(),
        }
    }

    fn kind_default_nullability(kind: &TypeKind, is_class_type: bool) -> Nullability {
        match kind {
            TypeKind::Unknown => Nullability::Unknown,
            TypeKind::Constant(inner) => inner.effective_nullability(),
            _ if is_class_type => Nullability::NullableUnwrapped,
            _ => Nullability::NotNullable,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Named(NamedType {
            name: name.into(),
            namespace: None,
            generic_arguments: Vec::new(),
        }))
    }

    pub fn named_in(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeKind::Named(NamedType {
            name: name.into(),
            namespace: Some(namespace.into()),
            generic_arguments: Vec::new(),
        }))
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        Self::new(TypeKind::Named(NamedType {
            name: name.into(),
            namespace: None,
            generic_arguments: arguments,
        }))
    }

    pub fn predefined(kind: PredefinedType) -> Self {
        Self::new(TypeKind::Predefined(kind))
    }

    pub fn pointer(target: TypeRef) -> Self {
        Self::new(TypeKind::Pointer(PointerType {
            target,
            kind: PointerKind::Pointer,
        }))
    }

    pub fn reference(target: TypeRef) -> Self {
        Self::new(TypeKind::Pointer(PointerType {
            target,
            kind: PointerKind::Reference,
        }))
    }

    pub fn array(element: TypeRef) -> Self {
        Self::new(TypeKind::Array(ArrayType {
            element,
            bounds: Vec::new(),
            kind: ArrayKind::Dynamic,
        }))
    }

    pub fn static_array(element: TypeRef, bounds: Vec<ArrayBounds>) -> Self {
        Self::new(TypeKind::Array(ArrayType {
            element,
            bounds,
            kind: ArrayKind::Static,
        }))
    }

    pub fn dictionary(key: TypeRef, value: TypeRef) -> Self {
        Self::new(TypeKind::Dictionary(DictionaryType { key, value }))
    }

    pub fn tuple(members: Vec<TypeRef>) -> Self {
        Self::new(TypeKind::Tuple(TupleType { members }))
    }

    pub fn sequence(element: TypeRef) -> Self {
        Self::new(TypeKind::Sequence(SequenceType { element }))
    }

    pub fn kind_of(target: TypeRef) -> Self {
        Self::new(TypeKind::KindOf(target))
    }

    pub fn constant(target: TypeRef) -> Self {
        Self::new(TypeKind::Constant(target))
    }

    pub fn inline_block(parameters: Vec<TypeRef>, return_type: Option<TypeRef>, kind: InlineBlockKind) -> Self {
        Self::new(TypeKind::InlineBlock(InlineBlockType {
            parameters,
            return_type,
            kind,
        }))
    }

    pub fn range(start: Expression, end: Expression) -> Self {
        Self::new(TypeKind::Range(RangeType {
            start: Box::new(start),
            end: Box::new(end),
        }))
    }

    pub fn unknown() -> Self {
        Self::new(TypeKind::Unknown)
    }

    /// Override the reference/value semantics hint (recomputes the kind's default nullability).
    pub fn with_class_type(mut self, is_class_type: bool) -> Self {
        self.is_class_type = is_class_type;
        self.default_nullability = Self::kind_default_nullability(&self.kind, is_class_type);
        self.variants = NullabilityVariants::default();
        self
    }

    /// Set the explicit nullability of this reference.
    pub fn with_explicit_nullability(mut self, nullability: Nullability) -> Self {
        self.nullability = nullability;
        self.variants = NullabilityVariants::default();
        self
    }

    /// Set (or clear) the expression used when a slot of this type is left uninitialized.
    pub fn with_default_value(mut self, value: Option<Expression>) -> Self {
        self.default_value = value.map(Box::new);
        self.variants = NullabilityVariants::default();
        self
    }

    pub fn into_ref(self) -> TypeRef {
        Arc::new(self)
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The explicitly requested nullability (`Default` when unset).
    pub fn explicit_nullability(&self) -> Nullability {
        self.nullability
    }

    /// The per-kind fallback used when no nullability was set explicitly.
    pub fn default_nullability(&self) -> Nullability {
        self.default_nullability
    }

    pub fn is_class_type(&self) -> bool {
        self.is_class_type
    }

    pub fn default_value(&self) -> Option<&Expression> {
        self.default_value.as_deref()
    }

    /// The named payload, if this is a named reference.
    pub fn as_named(&self) -> Option<&NamedType> {
        match &self.kind {
            TypeKind::Named(named) => Some(named),
            _ => None,
        }
    }

    pub fn is_predefined(&self, kind: PredefinedType) -> bool {
        matches!(self.kind, TypeKind::Predefined(p) if p == kind)
    }

    /// Copy every field except nullability, with fresh memoization.
    pub(super) fn derive_with(&self, nullability: Nullability) -> Self {
        Self {
            kind: self.kind.clone(),
            nullability,
            default_nullability: self.default_nullability,
            is_class_type: self.is_class_type,
            default_value: self.default_value.clone(),
            variants: NullabilityVariants::default(),
        }
    }
}

impl From<PredefinedType> for TypeReference {
    fn from(kind: PredefinedType) -> Self {
        TypeReference::predefined(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeRef {
        TypeReference::predefined(PredefinedType::Int32).into_ref()
    }

    #[test]
    fn test_predefined_value_type_defaults() {
        let t = TypeReference::predefined(PredefinedType::Int32);
        assert!(!t.is_class_type());
        assert_eq!(t.default_nullability(), Nullability::NotNullable);
        assert_eq!(t.default_value(), Some(&Expression::integer(0)));
    }

    #[test]
    fn test_predefined_string_defaults() {
        let t = TypeReference::predefined(PredefinedType::String);
        assert!(t.is_class_type());
        assert_eq!(t.default_nullability(), Nullability::NullableUnwrapped);
        assert_eq!(t.default_value(), Some(&Expression::Nil));
    }

    #[test]
    fn test_void_has_no_default_value() {
        assert_eq!(TypeReference::predefined(PredefinedType::Void).default_value(), None);
    }

    #[test]
    fn test_named_is_class_by_default() {
        let t = TypeReference::named("Widget");
        assert!(t.is_class_type());
        assert_eq!(t.default_nullability(), Nullability::NullableUnwrapped);
    }

    #[test]
    fn test_with_class_type_recomputes_default_nullability() {
        let t = TypeReference::named("Point").with_class_type(false);
        assert_eq!(t.default_nullability(), Nullability::NotNullable);
    }

    #[test]
    fn test_static_array_is_value_type() {
        let t = TypeReference::static_array(int(), vec![ArrayBounds::new(0, 9)]);
        assert!(!t.is_class_type());
        assert_eq!(t.default_value(), None);
        let dynamic = TypeReference::array(int());
        assert!(dynamic.is_class_type());
    }

    #[test]
    fn test_unknown_kind_defaults_to_unknown_nullability() {
        assert_eq!(TypeReference::unknown().default_nullability(), Nullability::Unknown);
    }

    #[test]
    fn test_constant_follows_inner_nullability() {
        let inner = TypeReference::named("Foo")
            .with_explicit_nullability(Nullability::NullableNotUnwrapped)
            .into_ref();
        let t = TypeReference::constant(inner);
        assert_eq!(t.default_nullability(), Nullability::NullableNotUnwrapped);
    }

    #[test]
    fn test_named_full_name() {
        let t = TypeReference::named_in("System.Collections", "List");
        assert_eq!(t.as_named().map(|n| n.full_name()), Some("System.Collections.List".to_string()));
        assert_eq!(
            TypeReference::named("List").as_named().map(|n| n.full_name()),
            Some("List".to_string())
        );
    }

    #[test]
    fn test_structural_equality_ignores_memoized_variants() {
        let a = TypeReference::named("Foo").into_ref();
        let b = TypeReference::named("Foo").into_ref();
        let _ = a.with_nullability(Nullability::NotNullable);
        assert_eq!(*a, *b);
    }
}
