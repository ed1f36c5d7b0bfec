//! Swift backend
//!
//! Same-line braces, backtick-escaped identifiers and `?`/`!` optionals. Swift has no monitor
//! statement, no `using` and no events; those productions keep the unsupported default.

use unparse_core::lang::keywords::SWIFT_KEYWORDS;
use unparse_core::strings::{UnicodeEscape, lowercase_first_letter};

use super::{Backend, cstyle};
use crate::codegen::{GenResult, Generator};
use crate::escape::KeywordSet;
use crate::ir::{
    AliasType, AnonymousMethod, ArrayElementAccess, ArrayLiteral, ArrayType, Assignment, Attribute, BinaryOperator,
    BinaryOperatorExpression, BlockType, ClassType, Comment, CustomOperatorMember, DictionaryLiteral, DictionaryType,
    DoWhileLoop, EnumType, EnumValueAccess, Expression, FieldAccess, FieldMember, FloatLiteral, ForEachLoop, ForToLoop,
    GenericParameter, IfStatement, IfThenElseExpression, Import, InlineBlockType, IntegerLiteral, LoopDirection,
    Member, MethodBody, MethodCall, NamedType, NewInstance, Nullability, OverloadableOperator, ParameterDefinition,
    ParameterModifier, PointerKind, PointerType, PredefinedType, PropertyAccess, PropertyMember, RangeExpression,
    SequenceType, Statement, SwitchStatement, TryStatement, TupleType, TypeCast, TypeCheck, TypeDefinition, TypeRef,
    TypeReference, UnaryOperatorExpression, VariableDeclaration, Virtuality, Visibility,
};

#[derive(Debug, Clone)]
pub struct SwiftBackend {
    keywords: KeywordSet,
    lowercase_enum_cases: bool,
}

impl SwiftBackend {
    pub fn new() -> Self {
        Self {
            keywords: KeywordSet::case_sensitive(SWIFT_KEYWORDS.iter().copied()),
            lowercase_enum_cases: false,
        }
    }

    /// Render enum case names (declarations and accesses) with a lower-case first letter.
    pub fn with_lowercase_enum_cases(mut self, lowercase: bool) -> Self {
        self.lowercase_enum_cases = lowercase;
        self
    }

    fn enum_case_name(&self, name: &str) -> String {
        if self.lowercase_enum_cases {
            lowercase_first_letter(name)
        } else {
            name.to_string()
        }
    }
}

impl Default for SwiftBackend {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn visibility_keyword(visibility: Visibility) -> Option<&'static str> {
    match visibility {
        Visibility::Unspecified => None,
        Visibility::Private => Some("private"),
        Visibility::Unit => Some("fileprivate"),
        Visibility::Assembly | Visibility::Protected => Some("internal"),
        Visibility::Public => Some("public"),
    }
}

fn write_visibility(g: &mut Generator<'_>, visibility: Visibility) {
    if let Some(keyword) = visibility_keyword(visibility) {
        g.write(keyword);
        g.space();
    }
}

/// `?` for optionals, `!` for implicitly unwrapped optionals and unknown nullability.
fn nullability_suffix(g: &mut Generator<'_>, ty: &TypeReference) {
    match ty.effective_nullability() {
        Nullability::NullableNotUnwrapped => g.write("?"),
        Nullability::NullableUnwrapped | Nullability::Unknown => g.write("!"),
        Nullability::Default | Nullability::NotNullable => {}
    }
}

fn in_protocol(g: &Generator<'_>) -> bool {
    g.current_type().is_some_and(|scope| scope.is_interface)
}

/// Visibility, `static`, `override` and `final`. Protocol requirements carry none but `static`.
fn member_modifiers(g: &mut Generator<'_>, member: &Member) {
    let scope = g.current_type().map(|scope| (scope.is_interface, scope.is_static));
    let (protocol, scope_static) = scope.unwrap_or((false, false));
    if !protocol {
        write_visibility(g, member.info.visibility);
    }
    if (member.is_static || scope_static) && scope.is_some() {
        g.write("static ");
    }
    if protocol {
        return;
    }
    match member.virtuality {
        Virtuality::Override => g.write("override "),
        Virtuality::Final => g.write("override final "),
        Virtuality::None | Virtuality::Virtual | Virtuality::Abstract => {}
    }
}

/// `<T: A & B, U>`; nothing when empty.
fn generic_parameters(g: &mut Generator<'_>, parameters: &[GenericParameter]) -> GenResult {
    if parameters.is_empty() {
        return Ok(());
    }
    g.write("<");
    g.comma_list(parameters, |g, parameter| {
        g.identifier(&parameter.name);
        if !parameter.constraints.is_empty() {
            g.write(": ");
            g.separated_list(&parameter.constraints, " & ", |g, constraint| {
                g.type_reference_as(constraint, Nullability::NotNullable)
            })?;
        }
        Ok(())
    })?;
    g.write(">");
    Ok(())
}

fn is_void(ty: Option<&TypeRef>) -> bool {
    ty.is_none_or(|ty| ty.is_predefined(PredefinedType::Void))
}

/// ` -> R` unless the result is void.
fn return_clause(g: &mut Generator<'_>, ty: Option<&TypeRef>) -> GenResult {
    match ty {
        Some(ty) if !is_void(Some(ty)) => {
            g.write(" -> ");
            g.type_reference(ty)
        }
        _ => Ok(()),
    }
}

/// ` {` body `}` on the signature line, or nothing for requirements and signatures.
fn function_body(g: &mut Generator<'_>, body: &MethodBody) -> GenResult {
    if g.definition_only() || body.external || in_protocol(g) {
        g.newline();
        return Ok(());
    }
    g.writeln(" {");
    g.indent();
    g.statements(&body.statements)?;
    g.dedent();
    g.writeln("}");
    Ok(())
}

/// ` {`, the body's statements, `}` without a trailing newline.
fn open_body(g: &mut Generator<'_>, body: &Statement) -> GenResult {
    g.writeln(" {");
    g.indent();
    g.inner_statements(body)?;
    g.dedent();
    g.write("}");
    Ok(())
}

fn open_statements(g: &mut Generator<'_>, statements: &[Statement]) -> GenResult {
    g.writeln(" {");
    g.indent();
    g.statements(statements)?;
    g.dedent();
    g.write("}");
    Ok(())
}

fn type_header(
    g: &mut Generator<'_>,
    ty: &TypeDefinition,
    keyword: &str,
    bases: &[&TypeRef],
    generics: &[GenericParameter],
) -> GenResult {
    g.write(keyword);
    g.space();
    g.identifier(&ty.name);
    generic_parameters(g, generics)?;
    if !bases.is_empty() {
        g.write(": ");
        g.comma_list(bases, |g, base| g.type_reference_as(base, Nullability::NotNullable))?;
    }
    Ok(())
}

fn member_list(g: &mut Generator<'_>, members: &[Member]) -> GenResult {
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            g.newline();
        }
        g.member(member)?;
    }
    Ok(())
}

fn class_like(g: &mut Generator<'_>, ty: &TypeDefinition, class: &ClassType, keyword: &str) -> GenResult {
    write_visibility(g, ty.info.visibility);
    if class.is_sealed && keyword == "class" {
        g.write("final ");
    }
    let bases: Vec<&TypeRef> = class.ancestors.iter().chain(&class.interfaces).collect();
    type_header(g, ty, keyword, &bases, &class.generic_parameters)?;
    g.writeln(" {");
    g.indent();
    member_list(g, &class.members)?;
    g.dedent();
    g.writeln("}");
    Ok(())
}

fn operator_symbol(operator: OverloadableOperator) -> Option<&'static str> {
    let symbol = match operator {
        OverloadableOperator::Plus => "+",
        OverloadableOperator::Minus => "-",
        OverloadableOperator::Multiply => "*",
        OverloadableOperator::Divide => "/",
        OverloadableOperator::Modulus => "%",
        OverloadableOperator::Equals => "==",
        OverloadableOperator::NotEquals => "!=",
        OverloadableOperator::LessThan => "<",
        OverloadableOperator::LessThanOrEqual => "<=",
        OverloadableOperator::GreaterThan => ">",
        OverloadableOperator::GreaterThanOrEqual => ">=",
        OverloadableOperator::Not => "!",
        OverloadableOperator::BitwiseNot => "~",
        OverloadableOperator::ImplicitConversion | OverloadableOperator::ExplicitConversion => return None,
    };
    Some(symbol)
}

fn binding_keyword(constant: bool) -> &'static str {
    if constant { "let" } else { "var" }
}

impl Backend for SwiftBackend {
    fn name(&self) -> &str {
        "Swift"
    }

    fn default_file_extension(&self) -> &str {
        "swift"
    }

    fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    fn escape_keyword(&self, segment: &str) -> String {
        format!("`{}`", segment)
    }

    fn single_line_comment(&self, g: &mut Generator<'_>, text: &str) -> GenResult {
        cstyle::single_line_comment(g, text)
    }

    fn inline_comment(&self, g: &mut Generator<'_>, text: &str) -> GenResult {
        cstyle::inline_comment(g, text)
    }

    fn import(&self, g: &mut Generator<'_>, import: &Import) -> GenResult {
        g.write("import ");
        g.qualified_identifier(&import.name);
        g.newline();
        Ok(())
    }

    // =========================================================================
    // Declaration decorations
    // =========================================================================

    fn doc_comment(&self, g: &mut Generator<'_>, comment: &Comment) -> GenResult {
        cstyle::doc_comment(g, &comment.lines)
    }

    fn condition_start(&self, g: &mut Generator<'_>, condition: &Expression) -> GenResult {
        cstyle::condition_start(g, condition)
    }

    fn condition_end(&self, g: &mut Generator<'_>, _condition: &Expression) -> GenResult {
        cstyle::condition_end(g)
    }

    fn attribute(&self, g: &mut Generator<'_>, attribute: &Attribute) -> GenResult {
        g.write("@");
        g.type_reference_as(&attribute.ty, Nullability::NotNullable)?;
        if !attribute.parameters.is_empty() {
            g.write("(");
            cstyle::call_parameters(g, &attribute.parameters)?;
            g.write(")");
        }
        g.newline();
        Ok(())
    }

    // =========================================================================
    // Type definitions
    // =========================================================================

    fn alias_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, alias: &AliasType) -> GenResult {
        write_visibility(g, ty.info.visibility);
        g.write("typealias ");
        g.identifier(&ty.name);
        g.write(" = ");
        g.type_reference(&alias.actual)?;
        g.newline();
        Ok(())
    }

    fn enum_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, enumeration: &EnumType) -> GenResult {
        write_visibility(g, ty.info.visibility);
        let bases: Vec<&TypeRef> = enumeration.base_type.iter().collect();
        type_header(g, ty, "enum", &bases, &[])?;
        g.writeln(" {");
        g.indent();
        for value in &enumeration.values {
            if let Some(comment) = &value.comment {
                g.doc_comment(comment)?;
            }
            g.write("case ");
            g.identifier(&self.enum_case_name(&value.name));
            if let Some(number) = &value.value {
                g.write(" = ");
                g.expression(number)?;
            }
            g.newline();
        }
        g.dedent();
        g.writeln("}");
        Ok(())
    }

    fn class_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, class: &ClassType) -> GenResult {
        class_like(g, ty, class, "class")
    }

    fn struct_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, class: &ClassType) -> GenResult {
        class_like(g, ty, class, "struct")
    }

    fn interface_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, class: &ClassType) -> GenResult {
        class_like(g, ty, class, "protocol")
    }

    /// `extension Target: Protocols`; the first ancestor is the extended type.
    fn extension_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, class: &ClassType) -> GenResult {
        write_visibility(g, ty.info.visibility);
        g.write("extension ");
        match class.ancestors.first() {
            Some(target) => g.type_reference_as(target, Nullability::NotNullable)?,
            None => g.identifier(&ty.name),
        }
        if !class.interfaces.is_empty() {
            g.write(": ");
            g.comma_list(&class.interfaces, |g, interface| g.type_reference_as(interface, Nullability::NotNullable))?;
        }
        g.writeln(" {");
        g.indent();
        member_list(g, &class.members)?;
        g.dedent();
        g.writeln("}");
        Ok(())
    }

    fn block_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, block: &BlockType) -> GenResult {
        write_visibility(g, ty.info.visibility);
        g.write("typealias ");
        g.identifier(&ty.name);
        g.write(" = (");
        g.comma_list(&block.parameters, |g, parameter| g.type_reference(&parameter.ty))?;
        g.write(") -> ");
        match &block.return_type {
            Some(result) if !is_void(Some(result)) => g.type_reference(result)?,
            _ => g.write("Void"),
        }
        g.newline();
        Ok(())
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn constructor(&self, g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
        if !in_protocol(g) {
            write_visibility(g, member.info.visibility);
        }
        if member.virtuality == Virtuality::Override {
            g.write("override ");
        }
        g.write("init");
        cstyle::parameter_list(g, &body.parameters)?;
        if body.throws {
            g.write(" throws");
        }
        function_body(g, body)
    }

    fn destructor(&self, g: &mut Generator<'_>, _member: &Member, body: &MethodBody) -> GenResult {
        g.write("deinit");
        function_body(g, body)
    }

    fn finalizer(&self, g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
        self.destructor(g, member, body)
    }

    fn method(&self, g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
        member_modifiers(g, member);
        g.write("func ");
        g.identifier(&member.name);
        generic_parameters(g, &body.generic_parameters)?;
        cstyle::parameter_list(g, &body.parameters)?;
        if body.is_async {
            g.write(" async");
        }
        if body.throws {
            g.write(" throws");
        }
        return_clause(g, body.return_type.as_ref())?;
        function_body(g, body)
    }

    fn field(&self, g: &mut Generator<'_>, member: &Member, field: &FieldMember) -> GenResult {
        if field.ty.is_none() && field.initializer.is_none() {
            return g.unsupported_with("field", Some("neither a type nor an initializer".to_string()));
        }
        member_modifiers(g, member);
        g.write(binding_keyword(field.constant || field.read_only));
        g.space();
        g.identifier(&member.name);
        if let Some(ty) = &field.ty {
            g.write(": ");
            g.type_reference(ty)?;
        }
        if let Some(initializer) = &field.initializer {
            g.write(" = ");
            g.expression(initializer)?;
        }
        g.newline();
        Ok(())
    }

    fn property(&self, g: &mut Generator<'_>, member: &Member, property: &PropertyMember) -> GenResult {
        member_modifiers(g, member);
        if property.parameters.is_empty() {
            g.write("var ");
            g.identifier(&member.name);
            g.write(": ");
        } else {
            g.write("subscript");
            cstyle::parameter_list(g, &property.parameters)?;
            g.write(" -> ");
        }
        g.type_reference(&property.ty)?;
        let auto = property.getter.is_none() && property.setter.is_none();
        if in_protocol(g) || (g.definition_only() && !auto) {
            let settable = if auto { !property.read_only } else { property.setter.is_some() };
            g.writeln(if settable { " { get set }" } else { " { get }" });
            return Ok(());
        }
        if auto {
            if let Some(initializer) = &property.initializer {
                g.write(" = ");
                g.expression(initializer)?;
            }
            g.newline();
            return Ok(());
        }
        g.writeln(" {");
        g.indent();
        if let Some(getter) = &property.getter {
            g.write("get");
            open_statements(g, getter)?;
            g.newline();
        }
        if let Some(setter) = &property.setter {
            g.write("set");
            open_statements(g, setter)?;
            g.newline();
        }
        g.dedent();
        g.writeln("}");
        Ok(())
    }

    fn custom_operator(&self, g: &mut Generator<'_>, _member: &Member, operator: &CustomOperatorMember) -> GenResult {
        let Some(symbol) = operator_symbol(operator.operator) else {
            return g.unsupported_with("custom operator", Some(format!("{:?}", operator.operator)));
        };
        let body = &operator.body;
        g.write("static func ");
        g.write(symbol);
        g.space();
        cstyle::parameter_list(g, &body.parameters)?;
        return_clause(g, body.return_type.as_ref())?;
        function_body(g, body)
    }

    /// `label name: T`; by-reference parameters are `inout`, variadic ones `T...`.
    fn parameter_definition(&self, g: &mut Generator<'_>, parameter: &ParameterDefinition) -> GenResult {
        if let Some(label) = &parameter.external_name {
            g.identifier(label);
            g.space();
        }
        g.identifier(&parameter.name);
        g.write(": ");
        if matches!(parameter.modifier, ParameterModifier::Out | ParameterModifier::Var) {
            g.write("inout ");
        }
        g.type_reference(&parameter.ty)?;
        if parameter.modifier == ParameterModifier::Params {
            g.write("...");
        }
        if let Some(default) = &parameter.default_value {
            g.write(" = ");
            g.expression(default)?;
        }
        Ok(())
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// A nested scope is spelled `do { ... }`.
    fn block(&self, g: &mut Generator<'_>, statements: &[Statement]) -> GenResult {
        g.write("do");
        open_statements(g, statements)
    }

    fn expression_statement(&self, g: &mut Generator<'_>, expression: &Expression) -> GenResult {
        g.expression(expression)
    }

    fn variable_declaration(&self, g: &mut Generator<'_>, declaration: &VariableDeclaration) -> GenResult {
        g.write(binding_keyword(declaration.constant || declaration.read_only));
        g.space();
        g.identifier(&declaration.name);
        if let Some(ty) = &declaration.ty {
            g.write(": ");
            g.type_reference(ty)?;
        }
        if let Some(value) = &declaration.value {
            g.write(" = ");
            g.expression(value)?;
        }
        Ok(())
    }

    fn assignment(&self, g: &mut Generator<'_>, assignment: &Assignment) -> GenResult {
        g.expression(&assignment.target)?;
        g.write(" = ");
        g.expression(&assignment.value)
    }

    /// `if c {` ... `} else if d {` ... `} else {` ... `}`
    fn if_statement(&self, g: &mut Generator<'_>, statement: &IfStatement) -> GenResult {
        g.write("if ");
        g.expression(&statement.condition)?;
        open_body(g, &statement.then_branch)?;
        match statement.else_branch.as_deref() {
            Some(chained) if matches!(chained, Statement::If(_)) => {
                g.write(" else ");
                g.statement(chained)
            }
            Some(other) => {
                g.write(" else");
                open_body(g, other)
            }
            None => Ok(()),
        }
    }

    fn while_loop(&self, g: &mut Generator<'_>, condition: &Expression, body: &Statement) -> GenResult {
        g.write("while ");
        g.expression(condition)?;
        open_body(g, body)
    }

    fn do_while_loop(&self, g: &mut Generator<'_>, statement: &DoWhileLoop) -> GenResult {
        g.write("repeat");
        open_body(g, &statement.body)?;
        g.write(" while ");
        g.expression(&statement.condition)
    }

    /// Closed ranges for unit steps, `stride(from:through:by:)` otherwise.
    fn for_to_loop(&self, g: &mut Generator<'_>, statement: &ForToLoop) -> GenResult {
        let forward = statement.direction == LoopDirection::Forward;
        g.write("for ");
        g.identifier(&statement.variable);
        g.write(" in ");
        match (&statement.step, forward) {
            (None, true) => {
                g.expression(&statement.start)?;
                g.write("...");
                g.expression(&statement.end)?;
            }
            (step, _) => {
                g.write("stride(from: ");
                g.expression(&statement.start)?;
                g.write(", through: ");
                g.expression(&statement.end)?;
                g.write(", by: ");
                match step {
                    Some(step) if forward => g.expression(step)?,
                    Some(step) if step.is_leaf() => {
                        g.write("-");
                        g.expression(step)?;
                    }
                    Some(step) => {
                        g.write("-(");
                        g.expression(step)?;
                        g.write(")");
                    }
                    None => g.write("-1"),
                }
                g.write(")");
            }
        }
        open_body(g, &statement.body)
    }

    fn for_each_loop(&self, g: &mut Generator<'_>, statement: &ForEachLoop) -> GenResult {
        g.write("for ");
        g.identifier(&statement.variable);
        if let Some(ty) = &statement.ty {
            g.write(": ");
            g.type_reference(ty)?;
        }
        g.write(" in ");
        g.expression(&statement.collection)?;
        open_body(g, &statement.body)
    }

    /// Cases never fall through; an empty case body gets an explicit `break`.
    fn switch_statement(&self, g: &mut Generator<'_>, statement: &SwitchStatement) -> GenResult {
        g.write("switch ");
        g.expression(&statement.expression)?;
        g.writeln(" {");
        for case in &statement.cases {
            g.write("case ");
            g.comma_list(&case.labels, |g, label| g.expression(label))?;
            g.writeln(":");
            g.indent();
            g.statements(&case.statements)?;
            if case.statements.is_empty() {
                g.writeln("break");
            }
            g.dedent();
        }
        if let Some(default) = &statement.default {
            g.writeln("default:");
            g.indent();
            g.statements(default)?;
            if default.is_empty() {
                g.writeln("break");
            }
            g.dedent();
        }
        g.write("}");
        Ok(())
    }

    /// `do { defer { finally } ... } catch ...`
    fn try_statement(&self, g: &mut Generator<'_>, statement: &TryStatement) -> GenResult {
        g.writeln("do {");
        g.indent();
        if let Some(finally) = &statement.finally {
            g.write("defer");
            open_statements(g, finally)?;
            g.newline();
        }
        g.statements(&statement.statements)?;
        g.dedent();
        g.write("}");
        for catch in &statement.catches {
            g.write(" catch");
            match (&catch.name, &catch.ty) {
                (Some(name), Some(ty)) => {
                    g.write(" let ");
                    g.identifier(name);
                    g.write(" as ");
                    g.type_reference_as(ty, Nullability::NotNullable)?;
                }
                (None, Some(ty)) => {
                    g.write(" is ");
                    g.type_reference_as(ty, Nullability::NotNullable)?;
                }
                (Some(name), None) => {
                    g.write(" let ");
                    g.identifier(name);
                }
                (None, None) => {}
            }
            open_statements(g, &catch.statements)?;
        }
        Ok(())
    }

    fn throw_statement(&self, g: &mut Generator<'_>, value: Option<&Expression>) -> GenResult {
        let Some(value) = value else {
            return g.unsupported_with("throw statement", Some("rethrow without a value".to_string()));
        };
        g.write("throw ");
        g.expression(value)
    }

    fn return_statement(&self, g: &mut Generator<'_>, value: Option<&Expression>) -> GenResult {
        g.write("return");
        if let Some(value) = value {
            g.space();
            g.expression(value)?;
        }
        Ok(())
    }

    fn break_statement(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("break");
        Ok(())
    }

    fn continue_statement(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("continue");
        Ok(())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn nil(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("nil");
        Ok(())
    }

    fn boolean_literal(&self, g: &mut Generator<'_>, value: bool) -> GenResult {
        g.write(if value { "true" } else { "false" });
        Ok(())
    }

    fn integer_literal(&self, g: &mut Generator<'_>, literal: &IntegerLiteral) -> GenResult {
        cstyle::integer_literal(g, literal, |base| match base {
            2 => Some("0b"),
            8 => Some("0o"),
            10 => Some(""),
            16 => Some("0x"),
            _ => None,
        })
    }

    fn float_literal(&self, g: &mut Generator<'_>, literal: &FloatLiteral) -> GenResult {
        cstyle::float_literal(g, literal)
    }

    fn string_literal(&self, g: &mut Generator<'_>, value: &str) -> GenResult {
        cstyle::string_literal(g, value, UnicodeEscape::Braced)
    }

    fn character_literal(&self, g: &mut Generator<'_>, value: char) -> GenResult {
        cstyle::character_literal(g, value, '"', UnicodeEscape::Braced)
    }

    fn array_literal(&self, g: &mut Generator<'_>, literal: &ArrayLiteral) -> GenResult {
        if let (true, Some(element)) = (literal.elements.is_empty(), &literal.element_type) {
            g.write("[");
            g.type_reference(element)?;
            g.write("]()");
            return Ok(());
        }
        g.write("[");
        g.comma_list(&literal.elements, |g, element| g.expression(element))?;
        g.write("]");
        Ok(())
    }

    fn dictionary_literal(&self, g: &mut Generator<'_>, literal: &DictionaryLiteral) -> GenResult {
        if literal.keys.is_empty() {
            g.write("[:]");
            return Ok(());
        }
        let entries: Vec<(&Expression, &Expression)> = literal.keys.iter().zip(&literal.values).collect();
        g.write("[");
        g.comma_list(&entries, |g, (key, value)| {
            g.expression(key)?;
            g.write(": ");
            g.expression(value)
        })?;
        g.write("]");
        Ok(())
    }

    fn tuple_literal(&self, g: &mut Generator<'_>, members: &[Expression]) -> GenResult {
        g.write("(");
        g.comma_list(members, |g, member| g.expression(member))?;
        g.write(")");
        Ok(())
    }

    fn self_reference(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("self");
        Ok(())
    }

    fn inherited(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("super");
        Ok(())
    }

    fn field_access(&self, g: &mut Generator<'_>, access: &FieldAccess) -> GenResult {
        cstyle::field_access(g, access)
    }

    fn property_access(&self, g: &mut Generator<'_>, access: &PropertyAccess) -> GenResult {
        cstyle::property_access(g, access)
    }

    fn method_call(&self, g: &mut Generator<'_>, call: &MethodCall) -> GenResult {
        cstyle::method_call(g, call)
    }

    fn new_instance(&self, g: &mut Generator<'_>, instance: &NewInstance) -> GenResult {
        g.type_reference_as(&instance.ty, Nullability::NotNullable)?;
        g.write("(");
        cstyle::call_parameters(g, &instance.parameters)?;
        g.write(")");
        Ok(())
    }

    fn array_element_access(&self, g: &mut Generator<'_>, access: &ArrayElementAccess) -> GenResult {
        cstyle::array_element_access(g, access)
    }

    fn enum_value_access(&self, g: &mut Generator<'_>, access: &EnumValueAccess) -> GenResult {
        g.type_reference_as(&access.ty, Nullability::NotNullable)?;
        g.write(".");
        g.identifier(&self.enum_case_name(&access.value));
        Ok(())
    }

    fn type_of(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        g.type_reference(ty)?;
        g.write(".self");
        Ok(())
    }

    fn size_of(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        g.write("MemoryLayout<");
        g.type_reference(ty)?;
        g.write(">.size");
        Ok(())
    }

    /// The type's default value; the expression belongs to the type reference, not the tree.
    fn default_of(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        match ty.default_value() {
            Some(value) => g.synthetic_node(value, |g| g.expression(value)),
            None => g.unsupported_with("default value", Some("type has no default value".to_string())),
        }
    }

    fn type_check(&self, g: &mut Generator<'_>, check: &TypeCheck) -> GenResult {
        g.expression(&check.expression)?;
        g.write(" is ");
        g.type_reference_as(&check.ty, Nullability::NotNullable)
    }

    fn type_cast(&self, g: &mut Generator<'_>, cast: &TypeCast) -> GenResult {
        g.expression(&cast.expression)?;
        g.write(if cast.throws { " as! " } else { " as? " });
        g.type_reference_as(&cast.ty, Nullability::NotNullable)
    }

    fn binary_operator(&self, g: &mut Generator<'_>, expression: &BinaryOperatorExpression) -> GenResult {
        let symbol = match expression.operator {
            BinaryOperator::Is => Some("==="),
            BinaryOperator::IsNot => Some("!=="),
            other => cstyle::binary_operator_symbol(other),
        };
        cstyle::binary_operator(g, expression, symbol)
    }

    fn unary_operator(&self, g: &mut Generator<'_>, expression: &UnaryOperatorExpression) -> GenResult {
        cstyle::unary_operator(g, expression)
    }

    fn if_then_else(&self, g: &mut Generator<'_>, expression: &IfThenElseExpression) -> GenResult {
        cstyle::if_then_else(g, expression)
    }

    fn await_expression(&self, g: &mut Generator<'_>, inner: &Expression) -> GenResult {
        g.write("await ");
        g.expression(inner)
    }

    fn address_of(&self, g: &mut Generator<'_>, inner: &Expression) -> GenResult {
        g.write("&");
        g.expression(inner)
    }

    fn pointer_dereference(&self, g: &mut Generator<'_>, inner: &Expression) -> GenResult {
        g.expression(inner)?;
        g.write(".pointee");
        Ok(())
    }

    fn range_expression(&self, g: &mut Generator<'_>, range: &RangeExpression) -> GenResult {
        g.expression(&range.start)?;
        g.write(if range.inclusive { "..." } else { "..<" });
        g.expression(&range.end)
    }

    /// `{ (a: T) -> R in` statements `}`
    fn anonymous_method(&self, g: &mut Generator<'_>, method: &AnonymousMethod) -> GenResult {
        g.write("{ ");
        cstyle::parameter_list(g, &method.parameters)?;
        return_clause(g, method.return_type.as_ref())?;
        g.writeln(" in");
        g.indent();
        g.statements(&method.statements)?;
        g.dedent();
        g.write("}");
        Ok(())
    }

    // =========================================================================
    // Type references
    // =========================================================================

    fn named_type(&self, g: &mut Generator<'_>, ty: &TypeReference, named: &NamedType) -> GenResult {
        g.type_name(named);
        cstyle::generic_arguments(g, &named.generic_arguments)?;
        nullability_suffix(g, ty);
        Ok(())
    }

    fn predefined_type(&self, g: &mut Generator<'_>, ty: &TypeReference, predefined: PredefinedType) -> GenResult {
        g.write(match predefined {
            PredefinedType::Int8 => "Int8",
            PredefinedType::UInt8 => "UInt8",
            PredefinedType::Int16 => "Int16",
            PredefinedType::UInt16 => "UInt16",
            PredefinedType::Int32 => "Int32",
            PredefinedType::UInt32 => "UInt32",
            PredefinedType::Int64 => "Int64",
            PredefinedType::UInt64 => "UInt64",
            PredefinedType::IntPtr => "Int",
            PredefinedType::UIntPtr => "UInt",
            PredefinedType::Single => "Float",
            PredefinedType::Double => "Double",
            PredefinedType::Boolean => "Bool",
            PredefinedType::Char => "Character",
            PredefinedType::String => "String",
            PredefinedType::Object | PredefinedType::Dynamic => "Any",
            PredefinedType::Void => "Void",
        });
        if predefined != PredefinedType::Void {
            nullability_suffix(g, ty);
        }
        Ok(())
    }

    fn pointer_type(&self, g: &mut Generator<'_>, ty: &TypeReference, pointer: &PointerType) -> GenResult {
        match pointer.kind {
            PointerKind::Pointer => {
                g.write("UnsafeMutablePointer<");
                g.type_reference(&pointer.target)?;
                g.write(">");
                nullability_suffix(g, ty);
                Ok(())
            }
            PointerKind::Reference => g.type_reference(&pointer.target),
        }
    }

    fn array_type(&self, g: &mut Generator<'_>, ty: &TypeReference, array: &ArrayType) -> GenResult {
        g.write("[");
        g.type_reference(&array.element)?;
        g.write("]");
        nullability_suffix(g, ty);
        Ok(())
    }

    fn dictionary_type(&self, g: &mut Generator<'_>, ty: &TypeReference, dictionary: &DictionaryType) -> GenResult {
        g.write("[");
        g.type_reference(&dictionary.key)?;
        g.write(": ");
        g.type_reference(&dictionary.value)?;
        g.write("]");
        nullability_suffix(g, ty);
        Ok(())
    }

    fn tuple_type(&self, g: &mut Generator<'_>, ty: &TypeReference, tuple: &TupleType) -> GenResult {
        g.write("(");
        g.comma_list(&tuple.members, |g, member| g.type_reference(member))?;
        g.write(")");
        nullability_suffix(g, ty);
        Ok(())
    }

    fn sequence_type(&self, g: &mut Generator<'_>, ty: &TypeReference, sequence: &SequenceType) -> GenResult {
        g.write("AnySequence<");
        g.type_reference(&sequence.element)?;
        g.write(">");
        nullability_suffix(g, ty);
        Ok(())
    }

    fn kind_of_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, target: &TypeReference) -> GenResult {
        g.type_reference(target)
    }

    fn constant_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, target: &TypeReference) -> GenResult {
        g.type_reference(target)
    }

    /// `(A, B) -> R`; an optional function type is parenthesized before its suffix.
    fn inline_block_type(&self, g: &mut Generator<'_>, ty: &TypeReference, block: &InlineBlockType) -> GenResult {
        let optional = !matches!(
            ty.effective_nullability(),
            Nullability::Default | Nullability::NotNullable
        );
        if optional {
            g.write("(");
        }
        g.write("(");
        g.comma_list(&block.parameters, |g, parameter| g.type_reference(parameter))?;
        g.write(") -> ");
        match &block.return_type {
            Some(result) if !is_void(Some(result)) => g.type_reference(result)?,
            _ => g.write("Void"),
        }
        if optional {
            g.write(")");
            nullability_suffix(g, ty);
        }
        Ok(())
    }

    fn unknown_type(&self, g: &mut Generator<'_>, _ty: &TypeReference) -> GenResult {
        g.write("Any");
        Ok(())
    }
}
