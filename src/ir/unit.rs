//! The root container of one source file.

use super::Comment;
use super::decl::{Member, TypeDefinition};
use super::expr::Expression;

/// An imported namespace/module.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub name: String,
    /// Import the static members of a type rather than a namespace.
    pub is_static: bool,
    pub condition: Option<Expression>,
}

impl Import {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            condition: None,
        }
    }
}

/// A declaration that lives outside every type.
///
/// Backends without free functions or variables decide how to host these (e.g. a static class).
#[derive(Debug, Clone, PartialEq)]
pub enum Global {
    Function(Member),
    Variable(Member),
}

impl Global {
    pub fn member(&self) -> &Member {
        match self {
            Global::Function(m) | Global::Variable(m) => m,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeUnit {
    pub file_name: Option<String>,
    pub namespace: Option<String>,
    pub header_comment: Option<Comment>,
    pub imports: Vec<Import>,
    pub globals: Vec<Global>,
    pub types: Vec<TypeDefinition>,
}

impl CodeUnit {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, ty: TypeDefinition) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }
}
