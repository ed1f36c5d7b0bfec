//! Backend extension contract
//!
//! A backend renders the IR in one target language. It implements [`Backend`]: a handful of
//! required hooks (name, file extension, reserved words, comment syntax, imports) and one
//! production per node variant. Productions receive the [`Generator`] to write text and recurse
//! into child nodes.
//!
//! ## Default productions
//!
//! Productions whose rendering is the same in almost every language have defaults here
//! (parentheses, blocks rendered as plain statement sequences, infinite loops rewritten as
//! `while true`, comments, raw text, identifiers, code-unit orchestration). Every other
//! production defaults to the unsupported-construct policy, so a backend only has to override
//! what its language can express.
//!
//! ## Module Organization
//!
//! - `cstyle.rs` - shared C-family productions as free functions backends delegate to
//! - `csharp.rs` - C# backend
//! - `swift.rs` - Swift backend

pub mod csharp;
pub mod cstyle;
pub mod swift;

pub use csharp::CSharpBackend;
pub use swift::SwiftBackend;

use crate::codegen::{GenResult, Generator};
use crate::escape::KeywordSet;
use crate::ir::{
    AliasType, AnonymousMethod, ArrayElementAccess, ArrayLiteral, ArrayType, Assignment, Attribute,
    BinaryOperatorExpression, BlockType, ClassType, CodeUnit, Comment, CustomOperatorMember, DictionaryLiteral,
    DictionaryType, DoWhileLoop, EnumType, EnumValueAccess, EventMember, Expression, FieldAccess, FieldMember,
    FloatLiteral, ForEachLoop, ForToLoop, Global, IfStatement, IfThenElseExpression, Import, InlineBlockType,
    IntegerLiteral, LockingStatement, Member, MethodBody, MethodCall, NamedType, NewInstance, ParameterDefinition,
    PointerType, PredefinedType, PropertyAccess, PropertyMember, RangeExpression, RangeType, SequenceType, Statement,
    SwitchStatement, TryStatement, TupleType, TypeCast, TypeCheck, TypeDefinition, TypeReference,
    UnaryOperatorExpression, UsingStatement, VariableDeclaration,
};

/// One target language.
///
/// Object safe: the engine holds backends as `&dyn Backend`. Backends hold only configuration, so one
/// instance may be shared by generators on several threads.
pub trait Backend: Sync {
    // =========================================================================
    // Required hooks
    // =========================================================================

    /// Display name used in diagnostics.
    fn name(&self) -> &str;

    /// Extension of generated files, without the dot.
    fn default_file_extension(&self) -> &str;

    fn keywords(&self) -> &KeywordSet;

    /// Transform applied to an identifier segment that collides with a reserved word.
    fn escape_keyword(&self, segment: &str) -> String;

    /// Write one full-line comment.
    fn single_line_comment(&self, g: &mut Generator<'_>, text: &str) -> GenResult;

    /// Write a comment that can sit in the middle of a line.
    fn inline_comment(&self, g: &mut Generator<'_>, text: &str) -> GenResult;

    fn import(&self, g: &mut Generator<'_>, import: &Import) -> GenResult;

    // =========================================================================
    // Code unit
    // =========================================================================

    /// Header comment, imports, namespace, globals, types, footer.
    fn code_unit(&self, g: &mut Generator<'_>, unit: &CodeUnit) -> GenResult {
        self.file_header(g, unit)?;
        for import in &unit.imports {
            g.import(import)?;
        }
        if !unit.imports.is_empty() {
            g.newline();
        }
        self.namespace_start(g, unit)?;
        self.globals(g, &unit.globals)?;
        let spacing = g.options().blank_lines_between_types;
        for (index, ty) in unit.types.iter().enumerate() {
            if index > 0 || !unit.globals.is_empty() {
                g.blank_lines(spacing);
            }
            g.type_definition(ty)?;
        }
        self.namespace_end(g, unit)?;
        self.file_footer(g, unit)
    }

    fn file_header(&self, g: &mut Generator<'_>, unit: &CodeUnit) -> GenResult {
        if let Some(comment) = &unit.header_comment {
            for line in &comment.lines {
                self.single_line_comment(g, line)?;
            }
            g.newline();
        }
        Ok(())
    }

    fn file_footer(&self, _g: &mut Generator<'_>, _unit: &CodeUnit) -> GenResult {
        Ok(())
    }

    fn namespace_start(&self, _g: &mut Generator<'_>, _unit: &CodeUnit) -> GenResult {
        Ok(())
    }

    fn namespace_end(&self, _g: &mut Generator<'_>, _unit: &CodeUnit) -> GenResult {
        Ok(())
    }

    /// Top-level functions and variables, rendered as members.
    fn globals(&self, g: &mut Generator<'_>, globals: &[Global]) -> GenResult {
        for global in globals {
            g.member(global.member())?;
        }
        Ok(())
    }

    // =========================================================================
    // Declaration decorations
    // =========================================================================

    fn doc_comment(&self, g: &mut Generator<'_>, comment: &Comment) -> GenResult {
        for line in &comment.lines {
            self.single_line_comment(g, line)?;
        }
        Ok(())
    }

    /// Open a compile-time guard.
    fn condition_start(&self, g: &mut Generator<'_>, _condition: &Expression) -> GenResult {
        g.unsupported("conditional compilation")
    }

    fn condition_end(&self, _g: &mut Generator<'_>, _condition: &Expression) -> GenResult {
        Ok(())
    }

    fn attribute(&self, g: &mut Generator<'_>, _attribute: &Attribute) -> GenResult {
        g.unsupported("attribute")
    }

    // =========================================================================
    // Type definitions
    // =========================================================================

    fn alias_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _alias: &AliasType) -> GenResult {
        g.unsupported("type alias")
    }

    fn enum_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _enumeration: &EnumType) -> GenResult {
        g.unsupported("enum type")
    }

    fn class_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _class: &ClassType) -> GenResult {
        g.unsupported("class type")
    }

    fn struct_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _class: &ClassType) -> GenResult {
        g.unsupported("struct type")
    }

    fn interface_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _class: &ClassType) -> GenResult {
        g.unsupported("interface type")
    }

    fn extension_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _class: &ClassType) -> GenResult {
        g.unsupported("extension type")
    }

    fn block_type(&self, g: &mut Generator<'_>, _ty: &TypeDefinition, _block: &BlockType) -> GenResult {
        g.unsupported("block type")
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn constructor(&self, g: &mut Generator<'_>, _member: &Member, _body: &MethodBody) -> GenResult {
        g.unsupported("constructor")
    }

    fn destructor(&self, g: &mut Generator<'_>, _member: &Member, _body: &MethodBody) -> GenResult {
        g.unsupported("destructor")
    }

    fn finalizer(&self, g: &mut Generator<'_>, _member: &Member, _body: &MethodBody) -> GenResult {
        g.unsupported("finalizer")
    }

    fn method(&self, g: &mut Generator<'_>, _member: &Member, _body: &MethodBody) -> GenResult {
        g.unsupported("method")
    }

    fn field(&self, g: &mut Generator<'_>, _member: &Member, _field: &FieldMember) -> GenResult {
        g.unsupported("field")
    }

    fn property(&self, g: &mut Generator<'_>, _member: &Member, _property: &PropertyMember) -> GenResult {
        g.unsupported("property")
    }

    fn event(&self, g: &mut Generator<'_>, _member: &Member, _event: &EventMember) -> GenResult {
        g.unsupported("event")
    }

    fn custom_operator(&self, g: &mut Generator<'_>, _member: &Member, _operator: &CustomOperatorMember) -> GenResult {
        g.unsupported("custom operator")
    }

    fn nested_type(&self, g: &mut Generator<'_>, _member: &Member, nested: &TypeDefinition) -> GenResult {
        g.type_definition(nested)
    }

    fn parameter_definition(&self, g: &mut Generator<'_>, _parameter: &ParameterDefinition) -> GenResult {
        g.unsupported("parameter definition")
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// A block without delimiters: its statements in order.
    fn block(&self, g: &mut Generator<'_>, statements: &[Statement]) -> GenResult {
        g.statements(statements)
    }

    fn expression_statement(&self, g: &mut Generator<'_>, _expression: &Expression) -> GenResult {
        g.unsupported("expression statement")
    }

    fn variable_declaration(&self, g: &mut Generator<'_>, _declaration: &VariableDeclaration) -> GenResult {
        g.unsupported("variable declaration")
    }

    fn assignment(&self, g: &mut Generator<'_>, _assignment: &Assignment) -> GenResult {
        g.unsupported("assignment")
    }

    fn if_statement(&self, g: &mut Generator<'_>, _statement: &IfStatement) -> GenResult {
        g.unsupported("if statement")
    }

    fn while_loop(&self, g: &mut Generator<'_>, _condition: &Expression, _body: &Statement) -> GenResult {
        g.unsupported("while loop")
    }

    fn do_while_loop(&self, g: &mut Generator<'_>, _statement: &DoWhileLoop) -> GenResult {
        g.unsupported("do-while loop")
    }

    /// Rendered as a while loop over a synthetic `true` condition.
    fn infinite_loop(&self, g: &mut Generator<'_>, body: &Statement) -> GenResult {
        let condition = Expression::BooleanLiteral(true);
        g.synthetic_node(&condition, |g| self.while_loop(g, &condition, body))
    }

    fn for_to_loop(&self, g: &mut Generator<'_>, _statement: &ForToLoop) -> GenResult {
        g.unsupported("for-to loop")
    }

    fn for_each_loop(&self, g: &mut Generator<'_>, _statement: &ForEachLoop) -> GenResult {
        g.unsupported("for-each loop")
    }

    fn switch_statement(&self, g: &mut Generator<'_>, _statement: &SwitchStatement) -> GenResult {
        g.unsupported("switch statement")
    }

    fn try_statement(&self, g: &mut Generator<'_>, _statement: &TryStatement) -> GenResult {
        g.unsupported("try statement")
    }

    fn throw_statement(&self, g: &mut Generator<'_>, _value: Option<&Expression>) -> GenResult {
        g.unsupported("throw statement")
    }

    fn return_statement(&self, g: &mut Generator<'_>, _value: Option<&Expression>) -> GenResult {
        g.unsupported("return statement")
    }

    fn break_statement(&self, g: &mut Generator<'_>) -> GenResult {
        g.unsupported("break statement")
    }

    fn continue_statement(&self, g: &mut Generator<'_>) -> GenResult {
        g.unsupported("continue statement")
    }

    fn locking_statement(&self, g: &mut Generator<'_>, _statement: &LockingStatement) -> GenResult {
        g.unsupported("locking statement")
    }

    fn using_statement(&self, g: &mut Generator<'_>, _statement: &UsingStatement) -> GenResult {
        g.unsupported("using statement")
    }

    fn comment_statement(&self, g: &mut Generator<'_>, comment: &Comment) -> GenResult {
        for line in &comment.lines {
            self.single_line_comment(g, line)?;
        }
        Ok(())
    }

    fn empty_statement(&self, _g: &mut Generator<'_>) -> GenResult {
        Ok(())
    }

    fn raw_statement(&self, g: &mut Generator<'_>, text: &str) -> GenResult {
        g.write(text);
        Ok(())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn nil(&self, g: &mut Generator<'_>) -> GenResult {
        g.unsupported("nil literal")
    }

    fn boolean_literal(&self, g: &mut Generator<'_>, _value: bool) -> GenResult {
        g.unsupported("boolean literal")
    }

    /// Called only for bases 2, 8, 10 and 16; a backend that cannot spell one returns malformed.
    fn integer_literal(&self, g: &mut Generator<'_>, _literal: &IntegerLiteral) -> GenResult {
        g.unsupported("integer literal")
    }

    fn float_literal(&self, g: &mut Generator<'_>, _literal: &FloatLiteral) -> GenResult {
        g.unsupported("float literal")
    }

    fn string_literal(&self, g: &mut Generator<'_>, _value: &str) -> GenResult {
        g.unsupported("string literal")
    }

    fn character_literal(&self, g: &mut Generator<'_>, _value: char) -> GenResult {
        g.unsupported("character literal")
    }

    fn array_literal(&self, g: &mut Generator<'_>, _literal: &ArrayLiteral) -> GenResult {
        g.unsupported("array literal")
    }

    /// Called only when keys and values have the same length.
    fn dictionary_literal(&self, g: &mut Generator<'_>, _literal: &DictionaryLiteral) -> GenResult {
        g.unsupported("dictionary literal")
    }

    fn tuple_literal(&self, g: &mut Generator<'_>, _members: &[Expression]) -> GenResult {
        g.unsupported("tuple literal")
    }

    fn self_reference(&self, g: &mut Generator<'_>) -> GenResult {
        g.unsupported("self reference")
    }

    fn inherited(&self, g: &mut Generator<'_>) -> GenResult {
        g.unsupported("inherited reference")
    }

    fn result(&self, g: &mut Generator<'_>) -> GenResult {
        g.unsupported("result variable")
    }

    fn named_identifier(&self, g: &mut Generator<'_>, name: &str) -> GenResult {
        g.identifier(name);
        Ok(())
    }

    fn local_variable_access(&self, g: &mut Generator<'_>, name: &str) -> GenResult {
        g.identifier(name);
        Ok(())
    }

    fn field_access(&self, g: &mut Generator<'_>, _access: &FieldAccess) -> GenResult {
        g.unsupported("field access")
    }

    fn property_access(&self, g: &mut Generator<'_>, _access: &PropertyAccess) -> GenResult {
        g.unsupported("property access")
    }

    fn method_call(&self, g: &mut Generator<'_>, _call: &MethodCall) -> GenResult {
        g.unsupported("method call")
    }

    fn new_instance(&self, g: &mut Generator<'_>, _instance: &NewInstance) -> GenResult {
        g.unsupported("new instance")
    }

    fn array_element_access(&self, g: &mut Generator<'_>, _access: &ArrayElementAccess) -> GenResult {
        g.unsupported("array element access")
    }

    fn enum_value_access(&self, g: &mut Generator<'_>, access: &EnumValueAccess) -> GenResult {
        g.type_reference(&access.ty)?;
        g.write(".");
        g.identifier(&access.value);
        Ok(())
    }

    fn type_reference_expression(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        g.type_reference(ty)
    }

    fn type_of(&self, g: &mut Generator<'_>, _ty: &TypeReference) -> GenResult {
        g.unsupported("typeof expression")
    }

    fn size_of(&self, g: &mut Generator<'_>, _ty: &TypeReference) -> GenResult {
        g.unsupported("sizeof expression")
    }

    fn default_of(&self, g: &mut Generator<'_>, _ty: &TypeReference) -> GenResult {
        g.unsupported("default expression")
    }

    fn type_check(&self, g: &mut Generator<'_>, _check: &TypeCheck) -> GenResult {
        g.unsupported("type check")
    }

    fn type_cast(&self, g: &mut Generator<'_>, _cast: &TypeCast) -> GenResult {
        g.unsupported("type cast")
    }

    fn binary_operator(&self, g: &mut Generator<'_>, _expression: &BinaryOperatorExpression) -> GenResult {
        g.unsupported("binary operator")
    }

    fn unary_operator(&self, g: &mut Generator<'_>, _expression: &UnaryOperatorExpression) -> GenResult {
        g.unsupported("unary operator")
    }

    fn if_then_else(&self, g: &mut Generator<'_>, _expression: &IfThenElseExpression) -> GenResult {
        g.unsupported("if-then-else expression")
    }

    fn parentheses(&self, g: &mut Generator<'_>, inner: &Expression) -> GenResult {
        g.write("(");
        g.expression(inner)?;
        g.write(")");
        Ok(())
    }

    fn await_expression(&self, g: &mut Generator<'_>, _inner: &Expression) -> GenResult {
        g.unsupported("await expression")
    }

    fn address_of(&self, g: &mut Generator<'_>, _inner: &Expression) -> GenResult {
        g.unsupported("address-of expression")
    }

    fn pointer_dereference(&self, g: &mut Generator<'_>, _inner: &Expression) -> GenResult {
        g.unsupported("pointer dereference")
    }

    fn range_expression(&self, g: &mut Generator<'_>, _range: &RangeExpression) -> GenResult {
        g.unsupported("range expression")
    }

    fn anonymous_method(&self, g: &mut Generator<'_>, _method: &AnonymousMethod) -> GenResult {
        g.unsupported("anonymous method")
    }

    fn raw_expression(&self, g: &mut Generator<'_>, text: &str) -> GenResult {
        g.write(text);
        Ok(())
    }

    // =========================================================================
    // Type references
    // =========================================================================

    fn named_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _named: &NamedType) -> GenResult {
        g.unsupported("named type")
    }

    fn predefined_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _predefined: PredefinedType) -> GenResult {
        g.unsupported("predefined type")
    }

    fn pointer_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _pointer: &PointerType) -> GenResult {
        g.unsupported("pointer type")
    }

    fn array_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _array: &ArrayType) -> GenResult {
        g.unsupported("array type")
    }

    fn dictionary_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _dictionary: &DictionaryType) -> GenResult {
        g.unsupported("dictionary type")
    }

    fn tuple_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _tuple: &TupleType) -> GenResult {
        g.unsupported("tuple type")
    }

    fn sequence_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _sequence: &SequenceType) -> GenResult {
        g.unsupported("sequence type")
    }

    fn kind_of_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _target: &TypeReference) -> GenResult {
        g.unsupported("kind-of type")
    }

    fn constant_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _target: &TypeReference) -> GenResult {
        g.unsupported("constant type")
    }

    fn inline_block_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _block: &InlineBlockType) -> GenResult {
        g.unsupported("inline block type")
    }

    fn range_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, _range: &RangeType) -> GenResult {
        g.unsupported("range type")
    }

    fn unknown_type(&self, g: &mut Generator<'_>, _ty: &TypeReference) -> GenResult {
        g.unsupported("unknown type")
    }
}
