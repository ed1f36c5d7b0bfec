//! Expressions.
//!
//! ## Enum-based dispatch
//!
//! Every expression kind is a variant of [`Expression`]; composite kinds carry a payload struct
//! that owns its operands. The dispatch engine matches exhaustively on this enum, so adding a kind
//! is a compile error in every place that has to learn about it.

use super::decl::ParameterDefinition;
use super::stmt::Statement;
use super::types::TypeRef;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Modulus,

    // Comparison
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Logical
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Implies,

    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,

    // Identity
    Is,
    IsNot,

    // Events
    AddEvent,
    RemoveEvent,

    NullCoalesce,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitwiseNot,
}

/// How an argument is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterModifier {
    #[default]
    In,
    Out,
    /// By reference, readable and writable.
    Var,
    Const,
    /// Variadic tail.
    Params,
}

/// One argument at a call site.
#[derive(Debug, Clone, PartialEq)]
pub struct CallParameter {
    /// Argument label, for languages with named arguments.
    pub name: Option<String>,
    pub value: Expression,
    pub modifier: ParameterModifier,
}

impl CallParameter {
    pub fn new(value: Expression) -> Self {
        Self {
            name: None,
            value,
            modifier: ParameterModifier::In,
        }
    }

    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: Some(name.into()),
            value,
            modifier: ParameterModifier::In,
        }
    }
}

impl From<Expression> for CallParameter {
    fn from(value: Expression) -> Self {
        CallParameter::new(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
    /// Radix the literal is written in (2, 8, 10 or 16 are representable).
    pub base: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    pub element_type: Option<TypeRef>,
}

/// Dictionary literal stored as parallel key/value lists.
///
/// Both lists must have the same length; a mismatch is malformed input.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryLiteral {
    pub keys: Vec<Expression>,
    pub values: Vec<Expression>,
    pub key_type: Option<TypeRef>,
    pub value_type: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    /// Receiver; `None` accesses a field in the current scope.
    pub call_site: Option<Box<Expression>>,
    pub name: String,
    pub null_safe: bool,
}

/// Property access, optionally indexed (`items[2]` on an indexer property).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccess {
    pub call_site: Option<Box<Expression>>,
    pub name: String,
    pub parameters: Vec<CallParameter>,
    pub null_safe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub call_site: Option<Box<Expression>>,
    pub name: String,
    pub generic_arguments: Vec<TypeRef>,
    pub parameters: Vec<CallParameter>,
    pub null_safe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInstance {
    pub ty: TypeRef,
    pub parameters: Vec<CallParameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayElementAccess {
    pub array: Box<Expression>,
    pub indices: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueAccess {
    pub ty: TypeRef,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeCheck {
    pub expression: Box<Expression>,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeCast {
    pub expression: Box<Expression>,
    pub ty: TypeRef,
    /// A failing cast raises instead of producing nil.
    pub throws: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorExpression {
    pub lhs: Box<Expression>,
    pub operator: BinaryOperator,
    pub rhs: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperatorExpression {
    pub operator: UnaryOperator,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfThenElseExpression {
    pub condition: Box<Expression>,
    pub if_value: Box<Expression>,
    pub else_value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousMethod {
    pub parameters: Vec<ParameterDefinition>,
    pub return_type: Option<TypeRef>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpression {
    pub start: Box<Expression>,
    pub end: Box<Expression>,
    pub inclusive: bool,
}

/// The closed set of expression kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Literals
    Nil,
    BooleanLiteral(bool),
    IntegerLiteral(IntegerLiteral),
    FloatLiteral(FloatLiteral),
    StringLiteral(String),
    CharacterLiteral(char),
    ArrayLiteral(ArrayLiteral),
    DictionaryLiteral(DictionaryLiteral),
    TupleLiteral(Vec<Expression>),

    // Well-known references
    SelfReference,
    Inherited,
    /// The implicit function result variable.
    Result,

    // Names and access
    NamedIdentifier(String),
    LocalVariableAccess(String),
    FieldAccess(FieldAccess),
    PropertyAccess(PropertyAccess),
    MethodCall(MethodCall),
    NewInstance(NewInstance),
    ArrayElementAccess(ArrayElementAccess),
    EnumValueAccess(EnumValueAccess),

    // Type-level expressions
    TypeReference(TypeRef),
    TypeOf(TypeRef),
    SizeOf(TypeRef),
    DefaultOf(TypeRef),
    TypeCheck(TypeCheck),
    TypeCast(TypeCast),

    // Operators
    BinaryOperator(BinaryOperatorExpression),
    UnaryOperator(UnaryOperatorExpression),
    IfThenElse(IfThenElseExpression),
    Parentheses(Box<Expression>),
    Await(Box<Expression>),
    AddressOf(Box<Expression>),
    PointerDereference(Box<Expression>),
    Range(RangeExpression),

    AnonymousMethod(AnonymousMethod),

    /// Verbatim text, emitted as-is.
    Raw(String),
}

impl Expression {
    pub fn integer(value: i64) -> Self {
        Expression::IntegerLiteral(IntegerLiteral { value, base: 10 })
    }

    pub fn integer_in_base(value: i64, base: u32) -> Self {
        Expression::IntegerLiteral(IntegerLiteral { value, base })
    }

    pub fn float(value: f64) -> Self {
        Expression::FloatLiteral(FloatLiteral { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral(value.into())
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::NamedIdentifier(name.into())
    }

    pub fn local(name: impl Into<String>) -> Self {
        Expression::LocalVariableAccess(name.into())
    }

    pub fn binary(lhs: Expression, operator: BinaryOperator, rhs: Expression) -> Self {
        Expression::BinaryOperator(BinaryOperatorExpression {
            lhs: Box::new(lhs),
            operator,
            rhs: Box::new(rhs),
        })
    }

    pub fn unary(operator: UnaryOperator, value: Expression) -> Self {
        Expression::UnaryOperator(UnaryOperatorExpression {
            operator,
            value: Box::new(value),
        })
    }

    pub fn parenthesized(inner: Expression) -> Self {
        Expression::Parentheses(Box::new(inner))
    }

    /// A call of `name` on `call_site` (or in the current scope).
    pub fn call(call_site: Option<Expression>, name: impl Into<String>, parameters: Vec<CallParameter>) -> Self {
        Expression::MethodCall(MethodCall {
            call_site: call_site.map(Box::new),
            name: name.into(),
            generic_arguments: Vec::new(),
            parameters,
            null_safe: false,
        })
    }

    pub fn field(call_site: Option<Expression>, name: impl Into<String>) -> Self {
        Expression::FieldAccess(FieldAccess {
            call_site: call_site.map(Box::new),
            name: name.into(),
            null_safe: false,
        })
    }

    pub fn property(call_site: Option<Expression>, name: impl Into<String>) -> Self {
        Expression::PropertyAccess(PropertyAccess {
            call_site: call_site.map(Box::new),
            name: name.into(),
            parameters: Vec::new(),
            null_safe: false,
        })
    }

    pub fn new_instance(ty: TypeRef, parameters: Vec<CallParameter>) -> Self {
        Expression::NewInstance(NewInstance { ty, parameters })
    }

    pub fn cast(expression: Expression, ty: TypeRef, throws: bool) -> Self {
        Expression::TypeCast(TypeCast {
            expression: Box::new(expression),
            ty,
            throws,
        })
    }

    /// Literal and reference kinds never contain other expressions.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Expression::Nil
                | Expression::BooleanLiteral(_)
                | Expression::IntegerLiteral(_)
                | Expression::FloatLiteral(_)
                | Expression::StringLiteral(_)
                | Expression::CharacterLiteral(_)
                | Expression::SelfReference
                | Expression::Inherited
                | Expression::Result
                | Expression::NamedIdentifier(_)
                | Expression::LocalVariableAccess(_)
                | Expression::Raw(_)
        )
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::BooleanLiteral(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::integer(value)
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_defaults_to_decimal() {
        assert_eq!(
            Expression::integer(42),
            Expression::IntegerLiteral(IntegerLiteral { value: 42, base: 10 })
        );
    }

    #[test]
    fn test_call_builder() {
        let call = Expression::call(Some(Expression::SelfReference), "run", vec![Expression::integer(1).into()]);
        match call {
            Expression::MethodCall(m) => {
                assert_eq!(m.name, "run");
                assert_eq!(m.parameters.len(), 1);
                assert_eq!(m.call_site.as_deref(), Some(&Expression::SelfReference));
                assert!(!m.null_safe);
            }
            other => panic!("expected method call, got {other:?}"),
        }
    }

    #[test]
    fn test_is_leaf() {
        assert!(Expression::Nil.is_leaf());
        assert!(Expression::local("x").is_leaf());
        assert!(!Expression::parenthesized(Expression::Nil).is_leaf());
        assert!(!Expression::binary(1.into(), BinaryOperator::Add, 2.into()).is_leaf());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Expression::from(true), Expression::BooleanLiteral(true));
        assert_eq!(Expression::from("hi"), Expression::StringLiteral("hi".to_string()));
        assert_eq!(CallParameter::from(Expression::Nil).name, None);
    }
}
