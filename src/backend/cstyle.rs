//! Shared C-family productions
//!
//! Free functions for syntax common to the curly-brace languages: comments, `#if` guards, braced
//! blocks, operators, member access, call argument lists, literals and the simple statements.
//! Backends compose these by delegating from their own productions and override the pieces
//! where their language differs.

use unparse_core::strings::{UnicodeEscape, escape_literal};

use crate::codegen::{GenResult, Generator};
use crate::ir::{
    ArrayElementAccess, Assignment, BinaryOperator, BinaryOperatorExpression, CallParameter, DoWhileLoop,
    Expression, FieldAccess, FloatLiteral, GenericParameter, IfStatement, IfThenElseExpression, IntegerLiteral,
    MethodCall, ParameterDefinition, PropertyAccess, Statement, TypeRef, UnaryOperator, UnaryOperatorExpression,
};

// ============================================================================
// Comments and guards
// ============================================================================

pub fn single_line_comment(g: &mut Generator<'_>, text: &str) -> GenResult {
    if text.is_empty() {
        g.writeln("//");
    } else {
        g.writeln(&format!("// {}", text));
    }
    Ok(())
}

pub fn inline_comment(g: &mut Generator<'_>, text: &str) -> GenResult {
    g.write("/* ");
    g.write(&text.replace("*/", "* /"));
    g.write(" */");
    Ok(())
}

/// `/// text` doc comment lines.
pub fn doc_comment(g: &mut Generator<'_>, lines: &[String]) -> GenResult {
    for line in lines {
        if line.is_empty() {
            g.writeln("///");
        } else {
            g.writeln(&format!("/// {}", line));
        }
    }
    Ok(())
}

pub fn condition_start(g: &mut Generator<'_>, condition: &Expression) -> GenResult {
    g.write("#if ");
    g.expression(condition)?;
    g.newline();
    Ok(())
}

pub fn condition_end(g: &mut Generator<'_>) -> GenResult {
    g.writeln("#endif");
    Ok(())
}

// ============================================================================
// Blocks
// ============================================================================

/// `{`, the statements one level deeper, `}`; braces on their own lines.
pub fn braced_statements(g: &mut Generator<'_>, statements: &[Statement]) -> GenResult {
    g.writeln("{");
    g.indent();
    g.statements(statements)?;
    g.dedent();
    g.writeln("}");
    Ok(())
}

/// Braced rendering of a statement used as a body; a block body supplies only its contents.
pub fn braced_body(g: &mut Generator<'_>, body: &Statement) -> GenResult {
    g.writeln("{");
    g.indent();
    g.inner_statements(body)?;
    g.dedent();
    g.writeln("}");
    Ok(())
}

// ============================================================================
// Operators
// ============================================================================

/// Spelling of a binary operator shared by the C family; `None` where languages diverge.
pub fn binary_operator_symbol(operator: BinaryOperator) -> Option<&'static str> {
    let symbol = match operator {
        BinaryOperator::Add => "+",
        BinaryOperator::Subtract => "-",
        BinaryOperator::Multiply => "*",
        BinaryOperator::Divide | BinaryOperator::IntegerDivide => "/",
        BinaryOperator::Modulus => "%",
        BinaryOperator::Equals => "==",
        BinaryOperator::NotEquals => "!=",
        BinaryOperator::LessThan => "<",
        BinaryOperator::LessThanOrEqual => "<=",
        BinaryOperator::GreaterThan => ">",
        BinaryOperator::GreaterThanOrEqual => ">=",
        BinaryOperator::LogicalAnd => "&&",
        BinaryOperator::LogicalOr => "||",
        BinaryOperator::LogicalXor | BinaryOperator::BitwiseXor => "^",
        BinaryOperator::BitwiseAnd => "&",
        BinaryOperator::BitwiseOr => "|",
        BinaryOperator::ShiftLeft => "<<",
        BinaryOperator::ShiftRight => ">>",
        BinaryOperator::AddEvent => "+=",
        BinaryOperator::RemoveEvent => "-=",
        BinaryOperator::NullCoalesce => "??",
        BinaryOperator::Implies | BinaryOperator::Is | BinaryOperator::IsNot => return None,
    };
    Some(symbol)
}

pub fn unary_operator_symbol(operator: UnaryOperator) -> &'static str {
    match operator {
        UnaryOperator::Plus => "+",
        UnaryOperator::Minus => "-",
        UnaryOperator::Not => "!",
        UnaryOperator::BitwiseNot => "~",
    }
}

/// `lhs op rhs` using `symbol`; an operator the backend cannot spell is unsupported.
pub fn binary_operator(
    g: &mut Generator<'_>,
    expression: &BinaryOperatorExpression,
    symbol: Option<&str>,
) -> GenResult {
    let Some(symbol) = symbol else {
        return g.unsupported_with("binary operator", Some(format!("{:?}", expression.operator)));
    };
    g.expression(&expression.lhs)?;
    g.write(&format!(" {} ", symbol));
    g.expression(&expression.rhs)
}

pub fn unary_operator(g: &mut Generator<'_>, expression: &UnaryOperatorExpression) -> GenResult {
    g.write(unary_operator_symbol(expression.operator));
    g.expression(&expression.value)
}

/// `condition ? a : b`
pub fn if_then_else(g: &mut Generator<'_>, expression: &IfThenElseExpression) -> GenResult {
    g.expression(&expression.condition)?;
    g.write(" ? ");
    g.expression(&expression.if_value)?;
    g.write(" : ");
    g.expression(&expression.else_value)
}

// ============================================================================
// Access and calls
// ============================================================================

/// Receiver followed by `.` (or `?.` when null-safe); nothing for the current scope.
pub fn call_site(g: &mut Generator<'_>, call_site: Option<&Expression>, null_safe: bool) -> GenResult {
    if let Some(site) = call_site {
        g.expression(site)?;
        g.write(if null_safe { "?." } else { "." });
    }
    Ok(())
}

/// Comma-separated arguments; labelled arguments render as `label: value`.
pub fn call_parameters(g: &mut Generator<'_>, parameters: &[CallParameter]) -> GenResult {
    g.comma_list(parameters, |g, parameter| {
        if let Some(name) = &parameter.name {
            g.identifier(name);
            g.write(": ");
        }
        g.expression(&parameter.value)
    })
}

pub fn field_access(g: &mut Generator<'_>, access: &FieldAccess) -> GenResult {
    call_site(g, access.call_site.as_deref(), access.null_safe)?;
    g.identifier(&access.name);
    Ok(())
}

/// `site.name`, or `site.name[args]` for an indexed property (`site[args]` when unnamed).
pub fn property_access(g: &mut Generator<'_>, access: &PropertyAccess) -> GenResult {
    call_site(g, access.call_site.as_deref(), access.null_safe)?;
    if access.parameters.is_empty() {
        g.identifier(&access.name);
        return Ok(());
    }
    if !access.name.is_empty() {
        g.identifier(&access.name);
    }
    g.write("[");
    call_parameters(g, &access.parameters)?;
    g.write("]");
    Ok(())
}

pub fn method_call(g: &mut Generator<'_>, call: &MethodCall) -> GenResult {
    call_site(g, call.call_site.as_deref(), call.null_safe)?;
    g.identifier(&call.name);
    generic_arguments(g, &call.generic_arguments)?;
    g.write("(");
    call_parameters(g, &call.parameters)?;
    g.write(")");
    Ok(())
}

pub fn array_element_access(g: &mut Generator<'_>, access: &ArrayElementAccess) -> GenResult {
    g.expression(&access.array)?;
    g.write("[");
    g.comma_list(&access.indices, |g, index| g.expression(index))?;
    g.write("]");
    Ok(())
}

/// `<A, B>`; nothing when empty.
pub fn generic_arguments(g: &mut Generator<'_>, arguments: &[TypeRef]) -> GenResult {
    if arguments.is_empty() {
        return Ok(());
    }
    g.write("<");
    g.comma_list(arguments, |g, argument| g.type_reference(argument))?;
    g.write(">");
    Ok(())
}

/// `<T, U>` without constraints; nothing when empty.
pub fn generic_parameter_names(g: &mut Generator<'_>, parameters: &[GenericParameter]) -> GenResult {
    if parameters.is_empty() {
        return Ok(());
    }
    g.write("<");
    g.comma_list(parameters, |g, parameter| {
        g.identifier(&parameter.name);
        Ok(())
    })?;
    g.write(">");
    Ok(())
}

/// `(a, b)` through the parameter-definition production.
pub fn parameter_list(g: &mut Generator<'_>, parameters: &[ParameterDefinition]) -> GenResult {
    g.write("(");
    g.comma_list(parameters, |g, parameter| g.parameter(parameter))?;
    g.write(")");
    Ok(())
}

// ============================================================================
// Literals
// ============================================================================

pub fn string_literal(g: &mut Generator<'_>, value: &str, style: UnicodeEscape) -> GenResult {
    let preserve = g.options().preserve_unicode_characters_in_string_literals;
    g.write(&format!("\"{}\"", escape_literal(value, '"', preserve, style)));
    Ok(())
}

pub fn character_literal(g: &mut Generator<'_>, value: char, quote: char, style: UnicodeEscape) -> GenResult {
    let preserve = g.options().preserve_unicode_characters_in_string_literals;
    let escaped = escape_literal(value.encode_utf8(&mut [0; 4]), quote, preserve, style);
    g.write(&format!("{quote}{escaped}{quote}"));
    Ok(())
}

/// Integer literal with the base prefix the backend spells for `literal.base`.
///
/// ## Parameters
/// - `prefix`: maps a base to its literal prefix (`""` for decimal); `None` when the backend has
///   no spelling for it, which makes the literal malformed for this backend.
pub fn integer_literal(
    g: &mut Generator<'_>,
    literal: &IntegerLiteral,
    prefix: impl Fn(u32) -> Option<&'static str>,
) -> GenResult {
    let Some(prefix) = prefix(literal.base) else {
        return Err(g.malformed(format!(
            "the {} backend cannot spell integer literals in base {}",
            g.backend_name(),
            literal.base
        )));
    };
    let magnitude = literal.value.unsigned_abs();
    let digits = match literal.base {
        2 => format!("{:b}", magnitude),
        8 => format!("{:o}", magnitude),
        16 => format!("{:X}", magnitude),
        _ => magnitude.to_string(),
    };
    let sign = if literal.value < 0 { "-" } else { "" };
    g.write(&format!("{sign}{prefix}{digits}"));
    Ok(())
}

/// Decimal float literal that always carries a fractional part or exponent.
pub fn float_literal(g: &mut Generator<'_>, literal: &FloatLiteral) -> GenResult {
    if !literal.value.is_finite() {
        return Err(g.malformed(format!("non-finite float literal {}", literal.value)));
    }
    let mut text = literal.value.to_string();
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    g.write(&text);
    Ok(())
}

// ============================================================================
// Statements
// ============================================================================

pub fn expression_statement(g: &mut Generator<'_>, expression: &Expression) -> GenResult {
    g.expression(expression)?;
    g.writeln(";");
    Ok(())
}

pub fn assignment(g: &mut Generator<'_>, assignment: &Assignment) -> GenResult {
    g.expression(&assignment.target)?;
    g.write(" = ");
    g.expression(&assignment.value)?;
    g.writeln(";");
    Ok(())
}

/// `keyword value;` or `keyword;`
pub fn keyword_statement(g: &mut Generator<'_>, keyword: &str, value: Option<&Expression>) -> GenResult {
    g.write(keyword);
    if let Some(value) = value {
        g.space();
        g.expression(value)?;
    }
    g.writeln(";");
    Ok(())
}

/// `if (condition)` with braced branches; an `if` in the else branch chains as `else if`.
pub fn if_statement(g: &mut Generator<'_>, statement: &IfStatement) -> GenResult {
    g.write("if (");
    g.expression(&statement.condition)?;
    g.writeln(")");
    braced_body(g, &statement.then_branch)?;
    match statement.else_branch.as_deref() {
        Some(chained) if matches!(chained, Statement::If(_)) => {
            g.write("else ");
            g.statement(chained)
        }
        Some(other) => {
            g.writeln("else");
            braced_body(g, other)
        }
        None => Ok(()),
    }
}

pub fn while_loop(g: &mut Generator<'_>, condition: &Expression, body: &Statement) -> GenResult {
    g.write("while (");
    g.expression(condition)?;
    g.writeln(")");
    braced_body(g, body)
}

pub fn do_while_loop(g: &mut Generator<'_>, statement: &DoWhileLoop) -> GenResult {
    g.writeln("do");
    braced_body(g, &statement.body)?;
    g.write("while (");
    g.expression(&statement.condition)?;
    g.writeln(");");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CSharpBackend;
    use crate::format::GenerateOptions;

    fn render(f: impl FnOnce(&mut Generator<'_>) -> GenResult) -> GenResult<String> {
        let backend = CSharpBackend::new();
        let options = GenerateOptions::default();
        let mut g = Generator::new(&backend, &options);
        f(&mut g)?;
        Ok(g.finish().0)
    }

    fn decimal_and_hex(base: u32) -> Option<&'static str> {
        match base {
            10 => Some(""),
            16 => Some("0x"),
            _ => None,
        }
    }

    #[test]
    fn test_negative_hex_literal_keeps_sign_before_prefix() {
        let literal = IntegerLiteral { value: -255, base: 16 };
        assert_eq!(render(|g| integer_literal(g, &literal, decimal_and_hex)).unwrap(), "-0xFF");
    }

    #[test]
    fn test_unspellable_base_is_malformed() {
        let literal = IntegerLiteral { value: 9, base: 2 };
        let err = render(|g| integer_literal(g, &literal, decimal_and_hex)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed input: the C# backend cannot spell integer literals in base 2"
        );
    }

    #[test]
    fn test_float_literal_always_has_fraction() {
        assert_eq!(render(|g| float_literal(g, &FloatLiteral { value: 3.0 })).unwrap(), "3.0");
        assert_eq!(render(|g| float_literal(g, &FloatLiteral { value: -0.5 })).unwrap(), "-0.5");
        assert!(render(|g| float_literal(g, &FloatLiteral { value: f64::INFINITY })).is_err());
    }

    #[test]
    fn test_inline_comment_cannot_close_early() {
        assert_eq!(render(|g| inline_comment(g, "a */ b")).unwrap(), "/* a * / b */");
    }

    #[test]
    fn test_doc_comment_lines() {
        let lines = vec!["Summary.".to_string(), String::new()];
        assert_eq!(render(|g| doc_comment(g, &lines)).unwrap(), "/// Summary.\n///\n");
    }

    #[test]
    fn test_shared_operator_spellings() {
        assert_eq!(binary_operator_symbol(BinaryOperator::IntegerDivide), Some("/"));
        assert_eq!(binary_operator_symbol(BinaryOperator::NullCoalesce), Some("??"));
        assert_eq!(binary_operator_symbol(BinaryOperator::Implies), None);
        assert_eq!(unary_operator_symbol(UnaryOperator::BitwiseNot), "~");
    }

    #[test]
    fn test_keyword_statement() {
        assert_eq!(render(|g| keyword_statement(g, "break", None)).unwrap(), "break;\n");
        let value = Expression::integer(1);
        assert_eq!(render(|g| keyword_statement(g, "return", Some(&value))).unwrap(), "return 1;\n");
    }
}
