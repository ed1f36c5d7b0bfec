//! C# backend
//!
//! Allman braces, `@`-escaped identifiers, `?` on nullable value types. Top-level globals are
//! hosted in a static partial class since C# has no free functions.

use unparse_core::lang::keywords::CSHARP_KEYWORDS;
use unparse_core::strings::UnicodeEscape;

use super::{Backend, cstyle};
use crate::codegen::{GenResult, Generator, TypeScope};
use crate::escape::KeywordSet;
use crate::ir::{
    AliasType, AnonymousMethod, ArrayElementAccess, ArrayKind, ArrayLiteral, ArrayType, Assignment, Attribute,
    BinaryOperator, BinaryOperatorExpression, BlockType, ClassType, CodeUnit, Comment, CustomOperatorMember,
    DictionaryLiteral, DictionaryType, DoWhileLoop, EnumType, EventMember, Expression, FieldAccess, FieldMember,
    FloatLiteral, ForEachLoop, ForToLoop, GenericParameter, Global, IfStatement, IfThenElseExpression, Import,
    InlineBlockType, IntegerLiteral, LockingStatement, LoopDirection, Member, MemberKind, MethodBody, MethodCall,
    NamedType, NewInstance, OverloadableOperator, ParameterDefinition, ParameterModifier, PointerKind, PointerType,
    PredefinedType, PropertyAccess, PropertyMember, RangeExpression, SequenceType, Statement, SwitchStatement,
    TryStatement, TupleType, TypeCast, TypeCheck, TypeDefinition, TypeRef, TypeReference, UnaryOperatorExpression,
    UsingStatement, VariableDeclaration, Virtuality, Visibility,
};

/// Name of the static class that hosts top-level functions and variables.
pub const GLOBAL_CLASS_NAME: &str = "__Global";

#[derive(Debug, Clone)]
pub struct CSharpBackend {
    keywords: KeywordSet,
}

impl CSharpBackend {
    pub fn new() -> Self {
        Self {
            keywords: KeywordSet::case_sensitive(CSHARP_KEYWORDS.iter().copied()),
        }
    }
}

impl Default for CSharpBackend {
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
        Visibility::Unit | Visibility::Assembly => Some("internal"),
        Visibility::Protected => Some("protected"),
        Visibility::Public => Some("public"),
    }
}

fn virtuality_keyword(virtuality: Virtuality) -> Option<&'static str> {
    match virtuality {
        Virtuality::None => None,
        Virtuality::Virtual => Some("virtual"),
        Virtuality::Abstract => Some("abstract"),
        Virtuality::Override => Some("override"),
        Virtuality::Final => Some("sealed override"),
    }
}

fn write_visibility(g: &mut Generator<'_>, visibility: Visibility) {
    if let Some(keyword) = visibility_keyword(visibility) {
        g.write(keyword);
        g.space();
    }
}

/// Visibility, `static` and virtuality; interface members carry none of them.
fn member_modifiers(g: &mut Generator<'_>, member: &Member) {
    let (in_interface, scope_static) = g
        .current_type()
        .map(|scope| (scope.is_interface, scope.is_static))
        .unwrap_or((false, false));
    if in_interface {
        return;
    }
    write_visibility(g, member.info.visibility);
    let is_const = matches!(&member.kind, MemberKind::Field(field) if field.constant);
    if (member.is_static || scope_static) && !is_const {
        g.write("static ");
    }
    if let Some(keyword) = virtuality_keyword(member.virtuality) {
        g.write(keyword);
        g.space();
    }
}

fn return_type(g: &mut Generator<'_>, ty: Option<&TypeRef>) -> GenResult {
    match ty {
        Some(ty) => g.type_reference(ty),
        None => {
            g.write("void");
            Ok(())
        }
    }
}

/// ` where T : A, B` for every constrained parameter.
fn generic_constraints(g: &mut Generator<'_>, parameters: &[GenericParameter]) -> GenResult {
    for parameter in parameters.iter().filter(|p| !p.constraints.is_empty()) {
        g.write(" where ");
        g.identifier(&parameter.name);
        g.write(" : ");
        g.comma_list(&parameter.constraints, |g, constraint| g.type_reference(constraint))?;
    }
    Ok(())
}

/// `?` for nullable value types; reference types are nullable without annotation.
fn nullable_suffix(g: &mut Generator<'_>, ty: &TypeReference) {
    if !ty.is_class_type() && ty.is_nullable() {
        g.write("?");
    }
}

/// `;` for signatures, otherwise the braced body on the following lines.
fn method_body(g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
    let in_interface = g.current_type().is_some_and(|scope| scope.is_interface);
    if g.definition_only() || body.external || in_interface || member.virtuality == Virtuality::Abstract {
        g.writeln(";");
        return Ok(());
    }
    g.newline();
    cstyle::braced_statements(g, &body.statements)
}

fn is_field(member: &Member) -> bool {
    matches!(member.kind, MemberKind::Field(_))
}

/// Members one per line; a blank line separates them unless both are fields.
fn member_list(g: &mut Generator<'_>, members: &[Member]) -> GenResult {
    for (index, member) in members.iter().enumerate() {
        if index > 0 && !(is_field(&members[index - 1]) && is_field(member)) {
            g.newline();
        }
        g.member(member)?;
    }
    Ok(())
}

fn class_like(g: &mut Generator<'_>, ty: &TypeDefinition, class: &ClassType, keyword: &str) -> GenResult {
    write_visibility(g, ty.info.visibility);
    if class.is_static {
        g.write("static ");
    }
    if class.is_abstract {
        g.write("abstract ");
    }
    if class.is_sealed {
        g.write("sealed ");
    }
    if class.is_partial {
        g.write("partial ");
    }
    g.write(keyword);
    g.space();
    g.identifier(&ty.name);
    cstyle::generic_parameter_names(g, &class.generic_parameters)?;
    let bases: Vec<&TypeRef> = class.ancestors.iter().chain(&class.interfaces).collect();
    if !bases.is_empty() {
        g.write(" : ");
        g.comma_list(&bases, |g, base| g.type_reference(base))?;
    }
    generic_constraints(g, &class.generic_parameters)?;
    g.newline();
    g.writeln("{");
    g.indent();
    member_list(g, &class.members)?;
    g.dedent();
    g.writeln("}");
    Ok(())
}

fn operator_symbol(operator: OverloadableOperator) -> &'static str {
    match operator {
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
        OverloadableOperator::ImplicitConversion => "implicit",
        OverloadableOperator::ExplicitConversion => "explicit",
    }
}

fn ends_in_jump(statements: &[Statement]) -> bool {
    matches!(
        statements.last(),
        Some(Statement::Return(_) | Statement::Throw(_) | Statement::Break | Statement::Continue)
    )
}

/// `{ get; set; }` style accessor list for auto-properties and signatures.
fn accessor_signatures(g: &mut Generator<'_>, property: &PropertyMember) {
    let auto = property.getter.is_none() && property.setter.is_none();
    let has_get = auto || property.getter.is_some();
    let has_set = if auto { !property.read_only } else { property.setter.is_some() };
    g.write(" {");
    if has_get {
        g.write(" get;");
    }
    if has_set {
        g.write(" set;");
    }
    g.write(" }");
}

fn accessor(g: &mut Generator<'_>, keyword: &str, statements: &[Statement]) -> GenResult {
    g.writeln(keyword);
    cstyle::braced_statements(g, statements)
}

impl Backend for CSharpBackend {
    fn name(&self) -> &str {
        "C#"
    }

    fn default_file_extension(&self) -> &str {
        "cs"
    }

    fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    fn escape_keyword(&self, segment: &str) -> String {
        format!("@{}", segment)
    }

    fn single_line_comment(&self, g: &mut Generator<'_>, text: &str) -> GenResult {
        cstyle::single_line_comment(g, text)
    }

    fn inline_comment(&self, g: &mut Generator<'_>, text: &str) -> GenResult {
        cstyle::inline_comment(g, text)
    }

    fn import(&self, g: &mut Generator<'_>, import: &Import) -> GenResult {
        g.write(if import.is_static { "using static " } else { "using " });
        g.qualified_identifier(&import.name);
        g.writeln(";");
        Ok(())
    }

    // =========================================================================
    // Code unit
    // =========================================================================

    fn namespace_start(&self, g: &mut Generator<'_>, unit: &CodeUnit) -> GenResult {
        if let Some(namespace) = &unit.namespace {
            g.write("namespace ");
            g.qualified_identifier(namespace);
            g.newline();
            g.writeln("{");
            g.indent();
        }
        Ok(())
    }

    fn namespace_end(&self, g: &mut Generator<'_>, unit: &CodeUnit) -> GenResult {
        if unit.namespace.is_some() {
            g.ensure_line_start();
            g.dedent();
            g.writeln("}");
        }
        Ok(())
    }

    fn globals(&self, g: &mut Generator<'_>, globals: &[Global]) -> GenResult {
        if globals.is_empty() {
            return Ok(());
        }
        g.write("public static partial class ");
        g.verbatim_identifier(GLOBAL_CLASS_NAME);
        g.newline();
        g.writeln("{");
        g.indent();
        let scope = TypeScope {
            is_static: true,
            ..TypeScope::new(GLOBAL_CLASS_NAME)
        };
        g.in_scope(scope, |g| {
            for (index, global) in globals.iter().enumerate() {
                if index > 0 {
                    g.newline();
                }
                g.member(global.member())?;
            }
            Ok(())
        })?;
        g.dedent();
        g.writeln("}");
        Ok(())
    }

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
        g.write("[");
        g.type_reference(&attribute.ty)?;
        if !attribute.parameters.is_empty() {
            g.write("(");
            cstyle::call_parameters(g, &attribute.parameters)?;
            g.write(")");
        }
        g.writeln("]");
        Ok(())
    }

    // =========================================================================
    // Type definitions
    // =========================================================================

    fn alias_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, alias: &AliasType) -> GenResult {
        g.write("using ");
        g.identifier(&ty.name);
        g.write(" = ");
        g.type_reference(&alias.actual)?;
        g.writeln(";");
        Ok(())
    }

    fn enum_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, enumeration: &EnumType) -> GenResult {
        write_visibility(g, ty.info.visibility);
        g.write("enum ");
        g.identifier(&ty.name);
        if let Some(base) = &enumeration.base_type {
            g.write(" : ");
            g.type_reference(base)?;
        }
        g.newline();
        g.writeln("{");
        g.indent();
        for (index, value) in enumeration.values.iter().enumerate() {
            if let Some(comment) = &value.comment {
                g.doc_comment(comment)?;
            }
            g.identifier(&value.name);
            if let Some(number) = &value.value {
                g.write(" = ");
                g.expression(number)?;
            }
            if index + 1 < enumeration.values.len() {
                g.write(",");
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
        class_like(g, ty, class, "interface")
    }

    fn block_type(&self, g: &mut Generator<'_>, ty: &TypeDefinition, block: &BlockType) -> GenResult {
        write_visibility(g, ty.info.visibility);
        g.write("delegate ");
        return_type(g, block.return_type.as_ref())?;
        g.space();
        g.identifier(&ty.name);
        cstyle::parameter_list(g, &block.parameters)?;
        g.writeln(";");
        Ok(())
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn constructor(&self, g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
        member_modifiers(g, member);
        let name = g
            .current_type()
            .map(|scope| scope.name.clone())
            .unwrap_or_else(|| member.name.clone());
        g.identifier(&name);
        cstyle::parameter_list(g, &body.parameters)?;
        method_body(g, member, body)
    }

    fn finalizer(&self, g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
        let name = g
            .current_type()
            .map(|scope| scope.name.clone())
            .unwrap_or_else(|| member.name.clone());
        g.write("~");
        g.identifier(&name);
        g.write("()");
        method_body(g, member, body)
    }

    fn method(&self, g: &mut Generator<'_>, member: &Member, body: &MethodBody) -> GenResult {
        member_modifiers(g, member);
        if body.external {
            g.write("extern ");
        }
        if body.is_async {
            g.write("async ");
        }
        return_type(g, body.return_type.as_ref())?;
        g.space();
        g.identifier(&member.name);
        cstyle::generic_parameter_names(g, &body.generic_parameters)?;
        cstyle::parameter_list(g, &body.parameters)?;
        generic_constraints(g, &body.generic_parameters)?;
        method_body(g, member, body)
    }

    fn field(&self, g: &mut Generator<'_>, member: &Member, field: &FieldMember) -> GenResult {
        let Some(ty) = &field.ty else {
            return g.unsupported("field without a type");
        };
        member_modifiers(g, member);
        if field.constant {
            g.write("const ");
        } else if field.read_only {
            g.write("readonly ");
        }
        g.type_reference(ty)?;
        g.space();
        g.identifier(&member.name);
        if let Some(initializer) = &field.initializer {
            g.write(" = ");
            g.expression(initializer)?;
        }
        g.writeln(";");
        Ok(())
    }

    fn property(&self, g: &mut Generator<'_>, member: &Member, property: &PropertyMember) -> GenResult {
        member_modifiers(g, member);
        g.type_reference(&property.ty)?;
        g.space();
        if property.parameters.is_empty() {
            g.identifier(&member.name);
        } else {
            g.write("this[");
            g.comma_list(&property.parameters, |g, parameter| g.parameter(parameter))?;
            g.write("]");
        }
        let auto = property.getter.is_none() && property.setter.is_none();
        if auto || g.definition_only() {
            accessor_signatures(g, property);
            if let (true, Some(initializer)) = (auto, &property.initializer) {
                g.write(" = ");
                g.expression(initializer)?;
                g.write(";");
            }
            g.newline();
            return Ok(());
        }
        g.newline();
        g.writeln("{");
        g.indent();
        if let Some(getter) = &property.getter {
            accessor(g, "get", getter)?;
        }
        if let Some(setter) = &property.setter {
            accessor(g, "set", setter)?;
        }
        g.dedent();
        g.writeln("}");
        Ok(())
    }

    fn event(&self, g: &mut Generator<'_>, member: &Member, event: &EventMember) -> GenResult {
        member_modifiers(g, member);
        g.write("event ");
        g.type_reference(&event.ty)?;
        g.space();
        g.identifier(&member.name);
        let (Some(add), Some(remove)) = (&event.add, &event.remove) else {
            g.writeln(";");
            return Ok(());
        };
        if g.definition_only() {
            g.writeln(";");
            return Ok(());
        }
        g.newline();
        g.writeln("{");
        g.indent();
        accessor(g, "add", add)?;
        accessor(g, "remove", remove)?;
        g.dedent();
        g.writeln("}");
        Ok(())
    }

    fn custom_operator(&self, g: &mut Generator<'_>, member: &Member, operator: &CustomOperatorMember) -> GenResult {
        let body = &operator.body;
        g.write("public static ");
        match operator.operator {
            OverloadableOperator::ImplicitConversion | OverloadableOperator::ExplicitConversion => {
                let Some(target) = &body.return_type else {
                    return Err(g.malformed(format!("conversion operator {} has no target type", member.name)));
                };
                g.write(operator_symbol(operator.operator));
                g.write(" operator ");
                g.type_reference(target)?;
            }
            symbol => {
                return_type(g, body.return_type.as_ref())?;
                g.write(" operator ");
                g.write(operator_symbol(symbol));
            }
        }
        cstyle::parameter_list(g, &body.parameters)?;
        method_body(g, member, body)
    }

    fn parameter_definition(&self, g: &mut Generator<'_>, parameter: &ParameterDefinition) -> GenResult {
        g.write(match parameter.modifier {
            ParameterModifier::In => "",
            ParameterModifier::Out => "out ",
            ParameterModifier::Var => "ref ",
            ParameterModifier::Const => "in ",
            ParameterModifier::Params => "params ",
        });
        g.type_reference(&parameter.ty)?;
        g.space();
        g.identifier(&parameter.name);
        if let Some(default) = &parameter.default_value {
            g.write(" = ");
            g.expression(default)?;
        }
        Ok(())
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn block(&self, g: &mut Generator<'_>, statements: &[Statement]) -> GenResult {
        cstyle::braced_statements(g, statements)
    }

    fn expression_statement(&self, g: &mut Generator<'_>, expression: &Expression) -> GenResult {
        cstyle::expression_statement(g, expression)
    }

    fn variable_declaration(&self, g: &mut Generator<'_>, declaration: &VariableDeclaration) -> GenResult {
        if declaration.constant {
            g.write("const ");
        }
        match (&declaration.ty, &declaration.value) {
            (Some(ty), _) => g.type_reference(ty)?,
            (None, Some(_)) => g.write("var"),
            (None, None) => g.write("object"),
        }
        g.space();
        g.identifier(&declaration.name);
        if let Some(value) = &declaration.value {
            g.write(" = ");
            g.expression(value)?;
        }
        g.writeln(";");
        Ok(())
    }

    fn assignment(&self, g: &mut Generator<'_>, assignment: &Assignment) -> GenResult {
        cstyle::assignment(g, assignment)
    }

    fn if_statement(&self, g: &mut Generator<'_>, statement: &IfStatement) -> GenResult {
        cstyle::if_statement(g, statement)
    }

    fn while_loop(&self, g: &mut Generator<'_>, condition: &Expression, body: &Statement) -> GenResult {
        cstyle::while_loop(g, condition, body)
    }

    fn do_while_loop(&self, g: &mut Generator<'_>, statement: &DoWhileLoop) -> GenResult {
        cstyle::do_while_loop(g, statement)
    }

    fn for_to_loop(&self, g: &mut Generator<'_>, statement: &ForToLoop) -> GenResult {
        let forward = statement.direction == LoopDirection::Forward;
        g.write("for (");
        match &statement.ty {
            Some(ty) => g.type_reference(ty)?,
            None => g.write("var"),
        }
        g.space();
        g.identifier(&statement.variable);
        g.write(" = ");
        g.expression(&statement.start)?;
        g.write("; ");
        g.identifier(&statement.variable);
        g.write(if forward { " <= " } else { " >= " });
        g.expression(&statement.end)?;
        g.write("; ");
        g.identifier(&statement.variable);
        match &statement.step {
            Some(step) => {
                g.write(if forward { " += " } else { " -= " });
                g.expression(step)?;
            }
            None => g.write(if forward { "++" } else { "--" }),
        }
        g.writeln(")");
        cstyle::braced_body(g, &statement.body)
    }

    fn for_each_loop(&self, g: &mut Generator<'_>, statement: &ForEachLoop) -> GenResult {
        g.write("foreach (");
        match &statement.ty {
            Some(ty) => g.type_reference(ty)?,
            None => g.write("var"),
        }
        g.space();
        g.identifier(&statement.variable);
        g.write(" in ");
        g.expression(&statement.collection)?;
        g.writeln(")");
        cstyle::braced_body(g, &statement.body)
    }

    fn switch_statement(&self, g: &mut Generator<'_>, statement: &SwitchStatement) -> GenResult {
        g.write("switch (");
        g.expression(&statement.expression)?;
        g.writeln(")");
        g.writeln("{");
        g.indent();
        for case in &statement.cases {
            for label in &case.labels {
                g.write("case ");
                g.expression(label)?;
                g.writeln(":");
            }
            g.indent();
            g.statements(&case.statements)?;
            if !ends_in_jump(&case.statements) {
                g.writeln("break;");
            }
            g.dedent();
        }
        if let Some(default) = &statement.default {
            g.writeln("default:");
            g.indent();
            g.statements(default)?;
            if !ends_in_jump(default) {
                g.writeln("break;");
            }
            g.dedent();
        }
        g.dedent();
        g.writeln("}");
        Ok(())
    }

    fn try_statement(&self, g: &mut Generator<'_>, statement: &TryStatement) -> GenResult {
        g.writeln("try");
        cstyle::braced_statements(g, &statement.statements)?;
        for catch in &statement.catches {
            g.write("catch");
            if let Some(ty) = &catch.ty {
                g.write(" (");
                g.type_reference(ty)?;
                if let Some(name) = &catch.name {
                    g.space();
                    g.identifier(name);
                }
                g.write(")");
            }
            g.newline();
            cstyle::braced_statements(g, &catch.statements)?;
        }
        if let Some(finally) = &statement.finally {
            g.writeln("finally");
            cstyle::braced_statements(g, finally)?;
        }
        Ok(())
    }

    fn throw_statement(&self, g: &mut Generator<'_>, value: Option<&Expression>) -> GenResult {
        cstyle::keyword_statement(g, "throw", value)
    }

    fn return_statement(&self, g: &mut Generator<'_>, value: Option<&Expression>) -> GenResult {
        cstyle::keyword_statement(g, "return", value)
    }

    fn break_statement(&self, g: &mut Generator<'_>) -> GenResult {
        cstyle::keyword_statement(g, "break", None)
    }

    fn continue_statement(&self, g: &mut Generator<'_>) -> GenResult {
        cstyle::keyword_statement(g, "continue", None)
    }

    fn locking_statement(&self, g: &mut Generator<'_>, statement: &LockingStatement) -> GenResult {
        g.write("lock (");
        g.expression(&statement.expression)?;
        g.writeln(")");
        cstyle::braced_body(g, &statement.body)
    }

    fn using_statement(&self, g: &mut Generator<'_>, statement: &UsingStatement) -> GenResult {
        g.write("using (");
        match &statement.ty {
            Some(ty) => g.type_reference(ty)?,
            None => g.write("var"),
        }
        g.space();
        g.identifier(&statement.name);
        g.write(" = ");
        g.expression(&statement.value)?;
        g.writeln(")");
        cstyle::braced_body(g, &statement.body)
    }

    fn empty_statement(&self, g: &mut Generator<'_>) -> GenResult {
        g.writeln(";");
        Ok(())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn nil(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("null");
        Ok(())
    }

    fn boolean_literal(&self, g: &mut Generator<'_>, value: bool) -> GenResult {
        g.write(if value { "true" } else { "false" });
        Ok(())
    }

    fn integer_literal(&self, g: &mut Generator<'_>, literal: &IntegerLiteral) -> GenResult {
        cstyle::integer_literal(g, literal, |base| match base {
            2 => Some("0b"),
            10 => Some(""),
            16 => Some("0x"),
            _ => None,
        })
    }

    fn float_literal(&self, g: &mut Generator<'_>, literal: &FloatLiteral) -> GenResult {
        cstyle::float_literal(g, literal)
    }

    fn string_literal(&self, g: &mut Generator<'_>, value: &str) -> GenResult {
        cstyle::string_literal(g, value, UnicodeEscape::Utf16)
    }

    fn character_literal(&self, g: &mut Generator<'_>, value: char) -> GenResult {
        if value.len_utf16() > 1 {
            return Err(g.malformed(format!("character U+{:X} does not fit a C# char", u32::from(value))));
        }
        cstyle::character_literal(g, value, '\'', UnicodeEscape::Utf16)
    }

    fn array_literal(&self, g: &mut Generator<'_>, literal: &ArrayLiteral) -> GenResult {
        match &literal.element_type {
            Some(element) => {
                g.write("new ");
                g.type_reference(element)?;
                g.write("[]");
            }
            None if literal.elements.is_empty() => g.write("new object[]"),
            None => g.write("new[]"),
        }
        if literal.elements.is_empty() {
            g.write(" { }");
            return Ok(());
        }
        g.write(" { ");
        g.comma_list(&literal.elements, |g, element| g.expression(element))?;
        g.write(" }");
        Ok(())
    }

    fn dictionary_literal(&self, g: &mut Generator<'_>, literal: &DictionaryLiteral) -> GenResult {
        g.write("new Dictionary<");
        match &literal.key_type {
            Some(ty) => g.type_reference(ty)?,
            None => g.write("object"),
        }
        g.write(", ");
        match &literal.value_type {
            Some(ty) => g.type_reference(ty)?,
            None => g.write("object"),
        }
        g.write(">");
        if literal.keys.is_empty() {
            g.write("()");
            return Ok(());
        }
        let entries: Vec<(&Expression, &Expression)> = literal.keys.iter().zip(&literal.values).collect();
        g.write(" { ");
        g.comma_list(&entries, |g, (key, value)| {
            g.write("{ ");
            g.expression(key)?;
            g.write(", ");
            g.expression(value)?;
            g.write(" }");
            Ok(())
        })?;
        g.write(" }");
        Ok(())
    }

    fn tuple_literal(&self, g: &mut Generator<'_>, members: &[Expression]) -> GenResult {
        g.write("(");
        g.comma_list(members, |g, member| g.expression(member))?;
        g.write(")");
        Ok(())
    }

    fn self_reference(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("this");
        Ok(())
    }

    fn inherited(&self, g: &mut Generator<'_>) -> GenResult {
        g.write("base");
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
        g.write("new ");
        g.type_reference(&instance.ty)?;
        g.write("(");
        cstyle::call_parameters(g, &instance.parameters)?;
        g.write(")");
        Ok(())
    }

    fn array_element_access(&self, g: &mut Generator<'_>, access: &ArrayElementAccess) -> GenResult {
        cstyle::array_element_access(g, access)
    }

    fn type_of(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        g.write("typeof(");
        g.type_reference(ty)?;
        g.write(")");
        Ok(())
    }

    fn size_of(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        g.write("sizeof(");
        g.type_reference(ty)?;
        g.write(")");
        Ok(())
    }

    fn default_of(&self, g: &mut Generator<'_>, ty: &TypeReference) -> GenResult {
        g.write("default(");
        g.type_reference(ty)?;
        g.write(")");
        Ok(())
    }

    fn type_check(&self, g: &mut Generator<'_>, check: &TypeCheck) -> GenResult {
        g.expression(&check.expression)?;
        g.write(" is ");
        g.type_reference(&check.ty)
    }

    fn type_cast(&self, g: &mut Generator<'_>, cast: &TypeCast) -> GenResult {
        if !cast.throws {
            g.expression(&cast.expression)?;
            g.write(" as ");
            return g.type_reference(&cast.ty);
        }
        g.write("(");
        g.type_reference(&cast.ty)?;
        g.write(")");
        if cast.expression.is_leaf() {
            g.expression(&cast.expression)
        } else {
            g.write("(");
            g.expression(&cast.expression)?;
            g.write(")");
            Ok(())
        }
    }

    fn binary_operator(&self, g: &mut Generator<'_>, expression: &BinaryOperatorExpression) -> GenResult {
        let symbol = match expression.operator {
            BinaryOperator::Is => Some("is"),
            BinaryOperator::IsNot => Some("is not"),
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
        g.write("*");
        g.expression(inner)
    }

    fn range_expression(&self, g: &mut Generator<'_>, range: &RangeExpression) -> GenResult {
        if range.inclusive {
            return g.unsupported_with("range expression", Some("inclusive upper bound".to_string()));
        }
        g.expression(&range.start)?;
        g.write("..");
        g.expression(&range.end)
    }

    fn anonymous_method(&self, g: &mut Generator<'_>, method: &AnonymousMethod) -> GenResult {
        cstyle::parameter_list(g, &method.parameters)?;
        g.writeln(" => {");
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
        nullable_suffix(g, ty);
        Ok(())
    }

    fn predefined_type(&self, g: &mut Generator<'_>, ty: &TypeReference, predefined: PredefinedType) -> GenResult {
        g.write(match predefined {
            PredefinedType::Int8 => "sbyte",
            PredefinedType::UInt8 => "byte",
            PredefinedType::Int16 => "short",
            PredefinedType::UInt16 => "ushort",
            PredefinedType::Int32 => "int",
            PredefinedType::UInt32 => "uint",
            PredefinedType::Int64 => "long",
            PredefinedType::UInt64 => "ulong",
            PredefinedType::IntPtr => "nint",
            PredefinedType::UIntPtr => "nuint",
            PredefinedType::Single => "float",
            PredefinedType::Double => "double",
            PredefinedType::Boolean => "bool",
            PredefinedType::Char => "char",
            PredefinedType::String => "string",
            PredefinedType::Object => "object",
            PredefinedType::Dynamic => "dynamic",
            PredefinedType::Void => "void",
        });
        nullable_suffix(g, ty);
        Ok(())
    }

    fn pointer_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, pointer: &PointerType) -> GenResult {
        match pointer.kind {
            PointerKind::Pointer => {
                g.type_reference(&pointer.target)?;
                g.write("*");
            }
            PointerKind::Reference => {
                g.write("ref ");
                g.type_reference(&pointer.target)?;
            }
        }
        Ok(())
    }

    fn array_type(&self, g: &mut Generator<'_>, ty: &TypeReference, array: &ArrayType) -> GenResult {
        g.type_reference(&array.element)?;
        let rank = match array.kind {
            ArrayKind::Dynamic => 1,
            ArrayKind::Static | ArrayKind::Inline => array.bounds.len().max(1),
        };
        g.write(&format!("[{}]", ",".repeat(rank - 1)));
        nullable_suffix(g, ty);
        Ok(())
    }

    fn dictionary_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, dictionary: &DictionaryType) -> GenResult {
        g.write("Dictionary<");
        g.type_reference(&dictionary.key)?;
        g.write(", ");
        g.type_reference(&dictionary.value)?;
        g.write(">");
        Ok(())
    }

    fn tuple_type(&self, g: &mut Generator<'_>, ty: &TypeReference, tuple: &TupleType) -> GenResult {
        g.write("(");
        g.comma_list(&tuple.members, |g, member| g.type_reference(member))?;
        g.write(")");
        nullable_suffix(g, ty);
        Ok(())
    }

    fn sequence_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, sequence: &SequenceType) -> GenResult {
        g.write("IEnumerable<");
        g.type_reference(&sequence.element)?;
        g.write(">");
        Ok(())
    }

    fn kind_of_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, target: &TypeReference) -> GenResult {
        g.type_reference(target)
    }

    fn constant_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, target: &TypeReference) -> GenResult {
        g.type_reference(target)
    }

    fn inline_block_type(&self, g: &mut Generator<'_>, _ty: &TypeReference, block: &InlineBlockType) -> GenResult {
        match &block.return_type {
            None if block.parameters.is_empty() => {
                g.write("Action");
                Ok(())
            }
            None => {
                g.write("Action<");
                g.comma_list(&block.parameters, |g, parameter| g.type_reference(parameter))?;
                g.write(">");
                Ok(())
            }
            Some(result) => {
                let arguments: Vec<&TypeRef> = block.parameters.iter().chain(std::iter::once(result)).collect();
                g.write("Func<");
                g.comma_list(&arguments, |g, argument| g.type_reference(argument))?;
                g.write(">");
                Ok(())
            }
        }
    }

    fn unknown_type(&self, g: &mut Generator<'_>, _ty: &TypeReference) -> GenResult {
        g.write("dynamic");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_escape_uses_at_sign() {
        let backend = CSharpBackend::new();
        assert!(backend.keywords().contains("class"));
        assert_eq!(backend.escape_keyword("class"), "@class");
        assert!(!backend.keywords().contains("Class"));
    }

    #[test]
    fn test_visibility_keywords() {
        assert_eq!(visibility_keyword(Visibility::Unspecified), None);
        assert_eq!(visibility_keyword(Visibility::Assembly), Some("internal"));
        assert_eq!(visibility_keyword(Visibility::Public), Some("public"));
    }

    #[test]
    fn test_ends_in_jump() {
        assert!(ends_in_jump(&[Statement::Break]));
        assert!(ends_in_jump(&[Statement::Empty, Statement::Return(None)]));
        assert!(!ends_in_jump(&[]));
        assert!(!ends_in_jump(&[Statement::Empty]));
    }
}
