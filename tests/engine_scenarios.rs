//! End-to-end scenarios for the generation engine: spans, the unsupported-construct policy,
//! malformed input, list wrapping, options and the pass lifecycle.
//!
//! Run with: `cargo test --test engine_scenarios`

mod common;

use common::{init_tracing, int};
use unparse::backend::{CSharpBackend, SwiftBackend};
use unparse::codegen::{CodeGenerator, GenerateError, PassState};
use unparse::format::GenerateOptions;
use unparse::ir::{
    BinaryOperator, CodeUnit, Comment, CustomOperatorMember, DictionaryLiteral, Expression, Import, Location, Member,
    MemberKind, MethodBody, OverloadableOperator, Statement, TypeDefinition, Visibility,
};

fn csharp() -> CodeGenerator<CSharpBackend> {
    CodeGenerator::new(CSharpBackend::new())
}

fn swift() -> CodeGenerator<SwiftBackend> {
    CodeGenerator::new(SwiftBackend::new())
}

fn slice<'a>(text: &'a str, start: Location, end: Location) -> &'a str {
    &text[start.offset..end.offset]
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_type_span_inside_namespace() {
    let unit = CodeUnit::new("Demo").with_type(TypeDefinition::enumeration("Color", &["Red", "Green"]));
    let generated = csharp().generate_unit(&unit).unwrap();
    assert_eq!(
        generated.text,
        "namespace Demo\n{\n    enum Color\n    {\n        Red,\n        Green\n    }\n}\n"
    );

    let span = generated.spans.get(&unit.types[0]).unwrap();
    assert_eq!((span.start.line, span.start.column), (2, 4));
    assert_eq!((span.end.line, span.end.column), (7, 0));
    assert_eq!(
        slice(&generated.text, span.start, span.end),
        "enum Color\n    {\n        Red,\n        Green\n    }\n"
    );

    let unit_span = generated.spans.get(&unit).unwrap();
    assert_eq!(unit_span.start, Location::default());
    assert!(unit_span.contains(&span));
}

/// Each of `needles` occurs in `text`, in the given order.
fn assert_in_order(text: &str, needles: &[&str]) {
    let positions: Vec<usize> = needles
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("{needle:?} missing from {text:?}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{needles:?} out of order in {text:?}");
}

#[test]
fn test_simple_unit_renders_in_declaration_order() {
    let unit = CodeUnit::new("Demo").with_type(TypeDefinition::enumeration("Color", &["Red", "Green", "Blue"]));

    let generated = csharp().generate_unit(&unit).unwrap();
    assert_in_order(&generated.text, &["Demo", "Color", "Red", "Green", "Blue"]);
    let span = generated.spans.get(&unit.types[0]).unwrap();
    assert!(span.end.line > span.start.line);

    // Swift has no namespace declaration; the rest keeps its order.
    let generated = swift().generate_unit(&unit).unwrap();
    assert!(!generated.text.contains("Demo"));
    assert_in_order(&generated.text, &["Color", "Red", "Green", "Blue"]);
    let span = generated.spans.get(&unit.types[0]).unwrap();
    assert!(span.end.line > span.start.line);
}

#[test]
fn test_expression_spans_cover_their_text() {
    let statement = Statement::ret(Some(Expression::binary(
        Expression::local("a"),
        BinaryOperator::Add,
        Expression::integer(1),
    )));
    let generated = csharp().generate_statement(&statement, None).unwrap().unwrap();
    assert_eq!(generated.text, "return a + 1;\n");

    let Statement::Return(Some(value)) = &statement else {
        unreachable!()
    };
    let Expression::BinaryOperator(binary) = value else {
        unreachable!()
    };
    let spans = &generated.spans;
    let text = &generated.text;

    let whole = spans.get(value).unwrap();
    assert_eq!(slice(text, whole.start, whole.end), "a + 1");
    let lhs = spans.get(&*binary.lhs).unwrap();
    assert_eq!(slice(text, lhs.start, lhs.end), "a");
    let rhs = spans.get(&*binary.rhs).unwrap();
    assert_eq!(slice(text, rhs.start, rhs.end), "1");

    let statement_span = spans.get(&statement).unwrap();
    assert!(statement_span.contains(&whole));
    assert!(whole.contains(&lhs) && whole.contains(&rhs));
}

#[test]
fn test_synthetic_loop_condition_gets_no_span() {
    let statement = Statement::InfiniteLoop(Box::new(Statement::block(vec![Statement::Break])));
    let generated = csharp().generate_statement(&statement, None).unwrap().unwrap();
    assert_eq!(generated.text, "while (true)\n{\n    break;\n}\n");
    // The loop, its block and the break; the generated `true` is not part of the tree.
    assert_eq!(generated.spans.len(), 3);

    let Statement::InfiniteLoop(body) = &statement else {
        unreachable!()
    };
    let Statement::Block(inner) = body.as_ref() else {
        unreachable!()
    };
    let block = generated.spans.get(body.as_ref()).unwrap();
    let brk = generated.spans.get(&inner[0]).unwrap();
    assert_eq!((brk.start.line, brk.start.column), (2, 4));
    assert!(block.contains(&brk));
}

#[test]
fn test_type_default_value_is_rendered_synthetically() {
    let statement = Statement::Expression(Expression::DefaultOf(int()));
    let generated = swift().generate_statement(&statement, None).unwrap().unwrap();
    assert_eq!(generated.text, "0\n");
    // The statement and the default-of expression; the borrowed literal is synthetic.
    assert_eq!(generated.spans.len(), 2);
}

#[test]
fn test_unrendered_node_has_no_span() {
    let member = Member::field("x", int());
    let other = Member::field("y", int());
    let generated = csharp().generate_member(&member, None, None).unwrap();
    assert!(generated.spans.get(&member).is_some());
    assert!(generated.spans.get(&other).is_none());
}

// ============================================================================
// Unsupported constructs and malformed input
// ============================================================================

fn locked_block() -> Statement {
    Statement::block(vec![
        Statement::locking(Expression::local("gate"), Statement::block(Vec::new())),
        Statement::ret(None),
    ])
}

#[test]
fn test_unsupported_construct_degrades_to_comment() {
    init_tracing();
    let text = swift().statement_to_string(&locked_block()).unwrap();
    assert_eq!(
        text,
        "do {\n    /* locking statement is not supported by the Swift backend */\n    return\n}\n"
    );
}

#[test]
fn test_unsupported_construct_fails_when_asserting() {
    let mut generator = swift().with_options(GenerateOptions::new().with_fail_on_asserts(true));
    let err = generator.statement_to_string(&locked_block()).unwrap_err();
    assert!(
        matches!(
            &err,
            GenerateError::Unsupported {
                production: "locking statement",
                ..
            }
        ),
        "got {err:?}"
    );
    assert_eq!(err.to_string(), "locking statement is not supported by the Swift backend");
    assert_eq!(generator.state(), PassState::Idle);
}

#[test]
fn test_integer_in_unknown_base_is_malformed() {
    let err = csharp().expression_to_string(&Expression::integer_in_base(5, 3)).unwrap_err();
    assert!(matches!(err, GenerateError::Malformed(_)), "got {err:?}");
    assert!(!err.is_unsupported());
}

#[test]
fn test_mismatched_dictionary_is_malformed_without_asserting() {
    let literal = Expression::DictionaryLiteral(DictionaryLiteral {
        keys: vec![Expression::string("a"), Expression::string("b")],
        values: vec![Expression::integer(1)],
        key_type: None,
        value_type: None,
    });
    for result in [
        csharp().expression_to_string(&literal),
        swift().expression_to_string(&literal),
    ] {
        assert_eq!(
            result.unwrap_err(),
            GenerateError::Malformed("dictionary literal has 2 keys but 1 values".to_string())
        );
    }
}

#[test]
fn test_non_finite_float_is_malformed() {
    let err = swift().expression_to_string(&Expression::float(f64::NAN)).unwrap_err();
    assert!(matches!(err, GenerateError::Malformed(_)), "got {err:?}");
}

#[test]
fn test_conversion_operator_without_target_is_malformed() {
    let member = Member::new(
        "op_Implicit",
        MemberKind::CustomOperator(CustomOperatorMember {
            operator: OverloadableOperator::ImplicitConversion,
            body: MethodBody::default(),
        }),
    );
    let err = csharp().generate_member(&member, None, None).unwrap_err();
    assert!(matches!(err, GenerateError::Malformed(_)), "got {err:?}");
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_long_argument_list_wraps_to_alignment_column() {
    let call = Expression::call(None, "compute", (1..=6).map(|n| Expression::integer(n).into()).collect());
    let mut generator = csharp().with_options(GenerateOptions::new().with_split_lines_longer_than(20));
    assert_eq!(generator.expression_to_string(&call).unwrap(), "compute(1, 2, 3, 4, 5,\n        6)");
}

#[test]
fn test_short_argument_list_stays_on_one_line() {
    let call = Expression::call(None, "compute", (1..=6).map(|n| Expression::integer(n).into()).collect());
    assert_eq!(csharp().expression_to_string(&call).unwrap(), "compute(1, 2, 3, 4, 5, 6)");
}

#[test]
fn test_tab_indentation() {
    let class = TypeDefinition::class("A", vec![Member::field("x", int())]);
    let mut tabs = csharp().with_options(GenerateOptions::new().with_tabs(true));
    assert_eq!(tabs.generate_type(&class, None).unwrap().text, "class A\n{\n\tint x;\n}\n");

    let mut narrow = csharp().with_options(GenerateOptions::new().with_tab_size(2));
    assert_eq!(narrow.generate_type(&class, None).unwrap().text, "class A\n{\n  int x;\n}\n");
}

#[test]
fn test_blank_lines_between_types() {
    let unit = CodeUnit::default()
        .with_type(TypeDefinition::enumeration("A", &["X"]))
        .with_type(TypeDefinition::enumeration("B", &["Y"]));
    let mut generator = csharp().with_options(GenerateOptions::new().with_blank_lines_between_types(2));
    assert_eq!(
        generator.generate_unit(&unit).unwrap().text,
        "enum A\n{\n    X\n}\n\n\nenum B\n{\n    Y\n}\n"
    );
}

#[test]
fn test_header_comment() {
    let mut unit = CodeUnit::default().with_type(TypeDefinition::enumeration("A", &["X"]));
    unit.header_comment = Some(Comment::new("Generated file.\nDo not edit."));
    assert_eq!(
        swift().generate_unit(&unit).unwrap().text,
        "// Generated file.\n// Do not edit.\n\nenum A {\n    case X\n}\n"
    );
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_only_colliding_segments_are_escaped() {
    let unit = CodeUnit::default().with_import(Import::new("System.class.Tools"));
    assert_eq!(csharp().generate_unit(&unit).unwrap().text, "using System.@class.Tools;\n\n");
    assert_eq!(
        swift().expression_to_string(&Expression::local("func")).unwrap(),
        "`func`"
    );
    assert_eq!(csharp().expression_to_string(&Expression::local("func")).unwrap(), "func");
}

// ============================================================================
// Pass lifecycle
// ============================================================================

#[test]
fn test_pass_state_transitions() {
    let mut generator = csharp();
    assert_eq!(generator.state(), PassState::Idle);
    generator.expression_to_string(&Expression::integer(1)).unwrap();
    assert_eq!(generator.state(), PassState::Done);
    generator.expression_to_string(&Expression::integer_in_base(1, 7)).unwrap_err();
    assert_eq!(generator.state(), PassState::Idle);
}

#[test]
fn test_generator_is_reusable_across_passes() {
    let mut generator = csharp();
    let first = generator.expression_to_string(&Expression::string("a")).unwrap();
    let second = generator.expression_to_string(&Expression::string("a")).unwrap();
    assert_eq!(first, second);
    assert_eq!(generator.default_file_extension(), "cs");
    assert_eq!(swift().default_file_extension(), "swift");
}

#[test]
fn test_statement_with_no_text_yields_none() {
    assert!(swift().generate_statement(&Statement::Empty, None).unwrap().is_none());
    assert!(csharp().generate_statement(&Statement::Empty, None).unwrap().is_some());
}

#[test]
fn test_definition_only_type() {
    let body = MethodBody {
        statements: vec![Statement::ret(Some(Expression::integer(1)))],
        return_type: Some(int()),
        ..MethodBody::default()
    };
    let class = TypeDefinition::class(
        "Calc",
        vec![Member::method("One", body).with_visibility(Visibility::Public)],
    );
    let mut generator = swift();
    assert_eq!(
        generator.generate_type_definition_only(&class, None).unwrap().text,
        "class Calc {\n    public func One() -> Int32\n}\n"
    );
    assert_eq!(
        generator.generate_type(&class, None).unwrap().text,
        "class Calc {\n    public func One() -> Int32 {\n        return 1\n    }\n}\n"
    );
}
