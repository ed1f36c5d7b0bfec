//! Declarations: type definitions, members and parameters.
//!
//! A [`TypeDefinition`] exclusively owns its [`Member`] list; declaration order is preserved in
//! the output.

use super::Comment;
use super::expr::{CallParameter, Expression, ParameterModifier};
use super::stmt::Statement;
use super::types::TypeRef;

/// Declared visibility. `Unspecified` leaves the backend's default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Unspecified,
    Private,
    /// Visible within the declaring source file.
    Unit,
    /// Visible within the declaring assembly/module.
    Assembly,
    Protected,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Virtuality {
    #[default]
    None,
    Virtual,
    Abstract,
    Override,
    Final,
}

/// An attribute/annotation applied to a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub ty: TypeRef,
    pub parameters: Vec<CallParameter>,
    /// Compile-time guard.
    pub condition: Option<Expression>,
}

impl Attribute {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            parameters: Vec::new(),
            condition: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameter {
    pub name: String,
    pub constraints: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    pub name: String,
    /// Call-site label, for languages that separate labels from parameter names.
    pub external_name: Option<String>,
    pub ty: TypeRef,
    pub modifier: ParameterModifier,
    pub default_value: Option<Expression>,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            external_name: None,
            ty,
            modifier: ParameterModifier::In,
            default_value: None,
        }
    }
}

/// Attributes shared by every declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationInfo {
    pub visibility: Visibility,
    pub condition: Option<Expression>,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasType {
    pub actual: TypeRef,
    /// A strict alias introduces a distinct type rather than a synonym.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub value: Option<Expression>,
    pub comment: Option<Comment>,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub base_type: Option<TypeRef>,
    pub values: Vec<EnumValue>,
}

/// Body of a class, struct, interface or extension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassType {
    pub generic_parameters: Vec<GenericParameter>,
    /// Base types. For an extension the first entry is the extended type.
    pub ancestors: Vec<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub is_static: bool,
    pub is_sealed: bool,
    pub is_abstract: bool,
    pub is_partial: bool,
}

/// A named callable type (delegate, block, function pointer).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockType {
    pub parameters: Vec<ParameterDefinition>,
    pub return_type: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinitionKind {
    Alias(AliasType),
    Enum(EnumType),
    Class(ClassType),
    Struct(ClassType),
    Interface(ClassType),
    Extension(ClassType),
    Block(BlockType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub info: DeclarationInfo,
    pub kind: TypeDefinitionKind,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, kind: TypeDefinitionKind) -> Self {
        Self {
            name: name.into(),
            info: DeclarationInfo::default(),
            kind,
        }
    }

    pub fn class(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self::new(
            name,
            TypeDefinitionKind::Class(ClassType {
                members,
                ..ClassType::default()
            }),
        )
    }

    pub fn enumeration(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(
            name,
            TypeDefinitionKind::Enum(EnumType {
                base_type: None,
                values: values.iter().map(|v| EnumValue::new(*v)).collect(),
            }),
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.info.visibility = visibility;
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.info.comment = Some(comment);
        self
    }

    /// Members of class-like kinds; empty for the rest.
    pub fn members(&self) -> &[Member] {
        match &self.kind {
            TypeDefinitionKind::Class(c)
            | TypeDefinitionKind::Struct(c)
            | TypeDefinitionKind::Interface(c)
            | TypeDefinitionKind::Extension(c) => &c.members,
            _ => &[],
        }
    }
}

/// Signature and body shared by every callable member.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodBody {
    pub generic_parameters: Vec<GenericParameter>,
    pub parameters: Vec<ParameterDefinition>,
    pub return_type: Option<TypeRef>,
    pub statements: Vec<Statement>,
    pub is_async: bool,
    pub throws: bool,
    /// Implemented elsewhere (native import); renders without a body.
    pub external: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMember {
    pub ty: Option<TypeRef>,
    pub initializer: Option<Expression>,
    pub constant: bool,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMember {
    pub ty: TypeRef,
    /// Index parameters (indexer properties).
    pub parameters: Vec<ParameterDefinition>,
    /// `None` for both accessors means an auto-property.
    pub getter: Option<Vec<Statement>>,
    pub setter: Option<Vec<Statement>>,
    pub read_only: bool,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventMember {
    pub ty: TypeRef,
    pub add: Option<Vec<Statement>>,
    pub remove: Option<Vec<Statement>>,
}

/// Operators a type can overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverloadableOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Not,
    BitwiseNot,
    ImplicitConversion,
    ExplicitConversion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomOperatorMember {
    pub operator: OverloadableOperator,
    pub body: MethodBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Constructor(MethodBody),
    Destructor(MethodBody),
    Finalizer(MethodBody),
    Method(MethodBody),
    Field(FieldMember),
    Property(PropertyMember),
    Event(EventMember),
    CustomOperator(CustomOperatorMember),
    NestedType(Box<TypeDefinition>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub info: DeclarationInfo,
    pub virtuality: Virtuality,
    pub is_static: bool,
    pub kind: MemberKind,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            info: DeclarationInfo::default(),
            virtuality: Virtuality::None,
            is_static: false,
            kind,
        }
    }

    pub fn method(name: impl Into<String>, body: MethodBody) -> Self {
        Self::new(name, MemberKind::Method(body))
    }

    pub fn field(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(
            name,
            MemberKind::Field(FieldMember {
                ty: Some(ty),
                initializer: None,
                constant: false,
                read_only: false,
            }),
        )
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.info.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// The callable body of constructor/destructor/finalizer/method/operator members.
    pub fn body(&self) -> Option<&MethodBody> {
        match &self.kind {
            MemberKind::Constructor(b)
            | MemberKind::Destructor(b)
            | MemberKind::Finalizer(b)
            | MemberKind::Method(b) => Some(b),
            MemberKind::CustomOperator(op) => Some(&op.body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::types::{PredefinedType, TypeReference};

    #[test]
    fn test_enumeration_builder_preserves_order() {
        let t = TypeDefinition::enumeration("Color", &["Red", "Green", "Blue"]);
        let TypeDefinitionKind::Enum(e) = &t.kind else {
            panic!("expected enum");
        };
        let names: Vec<_> = e.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Red", "Green", "Blue"]);
    }

    #[test]
    fn test_members_of_non_class_kind_is_empty() {
        let t = TypeDefinition::enumeration("Color", &["Red"]);
        assert!(t.members().is_empty());
    }

    #[test]
    fn test_member_body() {
        let m = Member::method("run", MethodBody::default());
        assert!(m.body().is_some());
        let f = Member::field("x", TypeReference::predefined(PredefinedType::Int32).into_ref());
        assert!(f.body().is_none());
    }

    #[test]
    fn test_declaration_defaults() {
        let m = Member::method("run", MethodBody::default()).with_visibility(Visibility::Public);
        assert_eq!(m.info.visibility, Visibility::Public);
        assert_eq!(m.virtuality, Virtuality::None);
        assert!(m.info.attributes.is_empty());
    }
}
