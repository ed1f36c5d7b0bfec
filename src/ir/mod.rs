//! Language-agnostic intermediate representation of source code.
//!
//! The IR is a tree built by the caller and only read by the generation engine:
//!
//! ```text
//! CodeUnit → TypeDefinition → Member → Statement → Expression
//!                                     ↘ TypeReference (shared by Arc)
//! ```
//!
//! ## Notes
//! - Composite nodes own their children exclusively (`Box`/`Vec`). The only sharing is of type
//!   references, which are immutable once wrapped in an `Arc`.
//! - Nodes do not store their rendered positions; the engine records them per pass in a span
//!   table keyed by node identity (see [`location::Entity`]).

pub mod decl;
pub mod expr;
pub mod location;
pub mod nullability;
pub mod stmt;
pub mod types;
pub mod unit;

pub use decl::{
    AliasType, Attribute, BlockType, ClassType, CustomOperatorMember, DeclarationInfo, EnumType, EnumValue,
    EventMember, FieldMember, GenericParameter, Member, MemberKind, MethodBody, OverloadableOperator,
    ParameterDefinition, PropertyMember, TypeDefinition, TypeDefinitionKind, Virtuality, Visibility,
};
pub use expr::{
    AnonymousMethod, ArrayElementAccess, ArrayLiteral, BinaryOperator, BinaryOperatorExpression, CallParameter,
    DictionaryLiteral, EnumValueAccess, Expression, FieldAccess, FloatLiteral, IfThenElseExpression, IntegerLiteral,
    MethodCall, NewInstance, ParameterModifier, PropertyAccess, RangeExpression, TypeCast, TypeCheck, UnaryOperator,
    UnaryOperatorExpression,
};
pub use location::{Entity, EntityCategory, Location, NodeKey, Span};
pub use nullability::Nullability;
pub use stmt::{
    Assignment, CatchBlock, DoWhileLoop, ForEachLoop, ForToLoop, IfStatement, LockingStatement, LoopDirection,
    Statement, SwitchCase, SwitchStatement, TryStatement, UsingStatement, VariableDeclaration, WhileLoop,
};
pub use types::{
    ArrayBounds, ArrayKind, ArrayType, DictionaryType, InlineBlockKind, InlineBlockType, NamedType, PointerKind,
    PointerType, PredefinedType, RangeType, SequenceType, TupleType, TypeKind, TypeRef, TypeReference,
};
pub use unit::{CodeUnit, Global, Import};

/// A comment attached to a declaration or standing as a statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    pub lines: Vec<String>,
}

impl Comment {
    /// Create a comment from text; embedded newlines split it into lines.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            lines: text.into().lines().map(str::to_string).collect(),
        }
    }
}

impl Entity for CodeUnit {
    const CATEGORY: EntityCategory = EntityCategory::CodeUnit;
}

impl Entity for TypeDefinition {
    const CATEGORY: EntityCategory = EntityCategory::TypeDefinition;
}

impl Entity for Member {
    const CATEGORY: EntityCategory = EntityCategory::Member;
}

impl Entity for ParameterDefinition {
    const CATEGORY: EntityCategory = EntityCategory::Parameter;
}

impl Entity for Statement {
    const CATEGORY: EntityCategory = EntityCategory::Statement;
}

impl Entity for Expression {
    const CATEGORY: EntityCategory = EntityCategory::Expression;
}

impl Entity for TypeReference {
    const CATEGORY: EntityCategory = EntityCategory::TypeReference;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_splits_lines() {
        assert_eq!(Comment::new("one\ntwo").lines, ["one", "two"]);
        assert!(Comment::new("").lines.is_empty());
    }

    #[test]
    fn test_keys_distinguish_categories_at_same_address() {
        let stmt = Statement::Expression(Expression::Nil);
        let Statement::Expression(inner) = &stmt else {
            unreachable!()
        };
        assert_ne!(stmt.key(), inner.key());
        assert_eq!(inner.key().category(), EntityCategory::Expression);
    }

    #[test]
    fn test_keys_are_stable_for_a_borrow() {
        let unit = CodeUnit::new("Demo");
        assert_eq!(unit.key(), unit.key());
    }
}
