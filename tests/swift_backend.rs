//! Rendering tests for the Swift backend.
//!
//! Run with: `cargo test --test swift_backend`

mod common;

use common::{int, named, string};
use unparse::backend::SwiftBackend;
use unparse::codegen::CodeGenerator;
use unparse::ir::{
    AnonymousMethod, BinaryOperator, BlockType, CatchBlock, ClassType, CodeUnit, DictionaryLiteral, EnumValueAccess,
    Expression, FieldMember, ForToLoop, GenericParameter, Global, Import, LoopDirection, Member, MemberKind,
    MethodBody, Nullability, ParameterDefinition, PredefinedType, PropertyMember, Statement, SwitchCase,
    SwitchStatement, TryStatement, TypeCheck, TypeDefinition, TypeDefinitionKind, TypeRef, TypeReference, Visibility,
};

fn generator() -> CodeGenerator<SwiftBackend> {
    CodeGenerator::new(SwiftBackend::new())
}

/// `String` without the implicitly-unwrapped default of class types.
fn text() -> TypeRef {
    string().as_not_nullable()
}

fn render_expression(expression: &Expression) -> String {
    generator().expression_to_string(expression).unwrap()
}

fn render_statement(statement: &Statement) -> String {
    generator().statement_to_string(statement).unwrap()
}

fn render_member(member: &Member) -> String {
    generator().generate_member(member, None, None).unwrap().text
}

fn print(argument: Expression) -> Statement {
    Expression::call(None, "print", vec![argument.into()]).into()
}

// ============================================================================
// Type definitions
// ============================================================================

#[test]
fn test_class_with_if_else_method() {
    let greet = MethodBody {
        parameters: vec![ParameterDefinition::new("name", text())],
        return_type: Some(text()),
        statements: vec![Statement::if_then(
            Expression::binary(Expression::local("name"), BinaryOperator::Equals, Expression::string("")),
            Statement::block(vec![Statement::ret(Some(Expression::string("nobody")))]),
            Some(Statement::block(vec![Statement::ret(Some(Expression::local("name")))])),
        )],
        ..MethodBody::default()
    };
    let class = TypeDefinition::class("Greeter", vec![Member::method("greet", greet)]);

    let text = generator().generate_type(&class, None).unwrap().text;
    insta::assert_snapshot!(text, @r#"
    class Greeter {
        func greet(name: String) -> String {
            if name == "" {
                return "nobody"
            } else {
                return name
            }
        }
    }
    "#);
}

#[test]
fn test_enum_cases_can_be_lowercased() {
    let color = TypeDefinition::enumeration("Color", &["Red", "Green"]);
    let mut generator = CodeGenerator::new(SwiftBackend::new().with_lowercase_enum_cases(true));
    let text = generator.generate_type(&color, None).unwrap().text;
    assert_eq!(text, "enum Color {\n    case red\n    case green\n}\n");

    let access = Expression::EnumValueAccess(EnumValueAccess {
        ty: named("Color"),
        value: "Red".to_string(),
    });
    assert_eq!(generator.expression_to_string(&access).unwrap(), "Color.red");
}

#[test]
fn test_protocol_requirements() {
    let requirement = Member::new(
        "name",
        MemberKind::Property(PropertyMember {
            ty: text(),
            parameters: Vec::new(),
            getter: None,
            setter: None,
            read_only: true,
            initializer: None,
        }),
    )
    .with_visibility(Visibility::Public);
    let protocol = TypeDefinition::new(
        "Named",
        TypeDefinitionKind::Interface(ClassType {
            members: vec![requirement],
            ..ClassType::default()
        }),
    );
    let text = generator().generate_type(&protocol, None).unwrap().text;
    assert_eq!(text, "protocol Named {\n    var name: String { get }\n}\n");
}

#[test]
fn test_extension_names_its_target_and_protocols() {
    let extension = TypeDefinition::new(
        "StringGreeting",
        TypeDefinitionKind::Extension(ClassType {
            ancestors: vec![string()],
            interfaces: vec![named("Greeting")],
            members: vec![Member::method("hello", MethodBody::default())],
            ..ClassType::default()
        }),
    );
    let text = generator().generate_type(&extension, None).unwrap().text;
    assert_eq!(text, "extension String: Greeting {\n    func hello() {\n    }\n}\n");
}

#[test]
fn test_sealed_class_with_base() {
    let class = TypeDefinition::new(
        "Dog",
        TypeDefinitionKind::Class(ClassType {
            ancestors: vec![named("Animal")],
            is_sealed: true,
            ..ClassType::default()
        }),
    )
    .with_visibility(Visibility::Public);
    let text = generator().generate_type(&class, None).unwrap().text;
    assert_eq!(text, "public final class Dog: Animal {\n}\n");
}

#[test]
fn test_block_type_is_a_function_alias() {
    let handler = TypeDefinition::new(
        "Handler",
        TypeDefinitionKind::Block(BlockType {
            parameters: vec![ParameterDefinition::new("code", int())],
            return_type: None,
        }),
    );
    let text = generator().generate_type(&handler, None).unwrap().text;
    assert_eq!(text, "typealias Handler = (Int32) -> Void\n");
}

#[test]
fn test_unit_with_import_and_free_function() {
    let mut unit = CodeUnit::default()
        .with_import(Import::new("Foundation"))
        .with_type(TypeDefinition::class("App", Vec::new()));
    unit.globals.push(Global::Function(Member::method("main", MethodBody::default())));
    let text = generator().generate_unit(&unit).unwrap().text;
    assert_eq!(text, "import Foundation\n\nfunc main() {\n}\n\nclass App {\n}\n");
}

// ============================================================================
// Members
// ============================================================================

#[test]
fn test_constant_field() {
    let member = Member::new(
        "limit",
        MemberKind::Field(FieldMember {
            ty: Some(int()),
            initializer: Some(Expression::integer(10)),
            constant: true,
            read_only: false,
        }),
    )
    .with_visibility(Visibility::Private);
    assert_eq!(render_member(&member), "private let limit: Int32 = 10\n");
}

#[test]
fn test_field_without_type_or_initializer_degrades_to_comment() {
    let member = Member::new(
        "x",
        MemberKind::Field(FieldMember {
            ty: None,
            initializer: None,
            constant: false,
            read_only: false,
        }),
    );
    assert_eq!(
        render_member(&member),
        "/* field is not supported by the Swift backend (neither a type nor an initializer) */\n"
    );
}

#[test]
fn test_computed_property() {
    let member = Member::new(
        "area",
        MemberKind::Property(PropertyMember {
            ty: TypeReference::predefined(PredefinedType::Double).into_ref(),
            parameters: Vec::new(),
            getter: Some(vec![Statement::ret(Some(Expression::binary(
                Expression::local("w"),
                BinaryOperator::Multiply,
                Expression::local("h"),
            )))]),
            setter: None,
            read_only: true,
            initializer: None,
        }),
    );
    assert_eq!(
        render_member(&member),
        "var area: Double {\n    get {\n        return w * h\n    }\n}\n"
    );
}

#[test]
fn test_throwing_initializer() {
    let init = Member::new(
        "init",
        MemberKind::Constructor(MethodBody {
            parameters: vec![ParameterDefinition::new("value", int())],
            throws: true,
            ..MethodBody::default()
        }),
    );
    assert_eq!(render_member(&init), "init(value: Int32) throws {\n}\n");
}

#[test]
fn test_members_of_static_class_are_static() {
    let owner = TypeDefinition::new(
        "Util",
        TypeDefinitionKind::Class(ClassType {
            is_static: true,
            ..ClassType::default()
        }),
    );
    let make = Member::method(
        "make",
        MethodBody {
            return_type: Some(int()),
            ..MethodBody::default()
        },
    );
    let text = generator().generate_member(&make, Some(&owner), None).unwrap().text;
    assert_eq!(text, "static func make() -> Int32 {\n}\n");
}

#[test]
fn test_generic_method_with_constraints() {
    let element = named("T").as_not_nullable();
    let first = Member::method(
        "first",
        MethodBody {
            generic_parameters: vec![GenericParameter {
                name: "T".to_string(),
                constraints: vec![named("Equatable"), named("Hashable")],
            }],
            parameters: vec![ParameterDefinition::new(
                "items",
                TypeReference::array(element.clone()).into_ref().as_not_nullable(),
            )],
            return_type: Some(element.as_nullable()),
            ..MethodBody::default()
        },
    );
    assert_eq!(
        render_member(&first),
        "func first<T: Equatable & Hashable>(items: [T]) -> T? {\n}\n"
    );
}

#[test]
fn test_labelled_parameter() {
    let parameter = ParameterDefinition {
        external_name: Some("to".to_string()),
        ..ParameterDefinition::new("recipient", text())
    };
    let text = generator().generate_parameter_definition(&parameter, None).unwrap().text;
    assert_eq!(text, "to recipient: String");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_for_to_loop_uses_closed_range() {
    let statement = Statement::ForTo(ForToLoop {
        variable: "i".to_string(),
        ty: None,
        start: Expression::integer(0),
        end: Expression::integer(9),
        step: None,
        direction: LoopDirection::Forward,
        body: Box::new(Statement::block(vec![print(Expression::local("i"))])),
    });
    assert_eq!(render_statement(&statement), "for i in 0...9 {\n    print(i)\n}\n");
}

#[test]
fn test_backward_for_to_loop_strides_down() {
    let statement = Statement::ForTo(ForToLoop {
        variable: "i".to_string(),
        ty: None,
        start: Expression::integer(10),
        end: Expression::integer(0),
        step: Some(Expression::integer(2)),
        direction: LoopDirection::Backward,
        body: Box::new(Statement::block(vec![print(Expression::local("i"))])),
    });
    assert_eq!(
        render_statement(&statement),
        "for i in stride(from: 10, through: 0, by: -2) {\n    print(i)\n}\n"
    );
}

#[test]
fn test_switch_with_empty_case() {
    let statement = Statement::Switch(SwitchStatement {
        expression: Expression::local("x"),
        cases: vec![SwitchCase {
            labels: vec![Expression::integer(1), Expression::integer(2)],
            statements: Vec::new(),
        }],
        default: Some(vec![Statement::ret(None)]),
    });
    assert_eq!(
        render_statement(&statement),
        "switch x {\ncase 1, 2:\n    break\ndefault:\n    return\n}\n"
    );
}

#[test]
fn test_try_with_finally_becomes_defer() {
    let statement = Statement::Try(TryStatement {
        statements: vec![Expression::call(None, "run", Vec::new()).into()],
        catches: vec![
            CatchBlock {
                name: Some("e".to_string()),
                ty: Some(named("MyError")),
                statements: vec![print(Expression::local("e"))],
            },
            CatchBlock {
                name: None,
                ty: None,
                statements: Vec::new(),
            },
        ],
        finally: Some(vec![Expression::call(None, "cleanup", Vec::new()).into()]),
    });
    insta::assert_snapshot!(render_statement(&statement), @r"
    do {
        defer {
            cleanup()
        }
        run()
    } catch let e as MyError {
        print(e)
    } catch {
    }
    ");
}

#[test]
fn test_rethrow_is_unsupported() {
    assert_eq!(
        render_statement(&Statement::Throw(None)),
        "/* throw statement is not supported by the Swift backend (rethrow without a value) */\n"
    );
}

#[test]
fn test_variable_declarations_have_no_semicolons() {
    assert_eq!(
        render_statement(&Statement::declare("count", Some(int()), Some(Expression::integer(0)))),
        "var count: Int32 = 0\n"
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_literals() {
    assert_eq!(render_expression(&Expression::Nil), "nil");
    assert_eq!(render_expression(&Expression::integer_in_base(8, 8)), "0o10");
    assert_eq!(render_expression(&Expression::string("é")), "\"\\u{e9}\"");
    assert_eq!(render_expression(&Expression::CharacterLiteral('a')), "\"a\"");
}

#[test]
fn test_dictionary_literals() {
    let entries = Expression::DictionaryLiteral(DictionaryLiteral {
        keys: vec![Expression::string("a")],
        values: vec![Expression::integer(1)],
        key_type: None,
        value_type: None,
    });
    assert_eq!(render_expression(&entries), "[\"a\": 1]");
    let empty = Expression::DictionaryLiteral(DictionaryLiteral {
        keys: Vec::new(),
        values: Vec::new(),
        key_type: None,
        value_type: None,
    });
    assert_eq!(render_expression(&empty), "[:]");
}

#[test]
fn test_casts_and_identity() {
    let value = Expression::local("value");
    assert_eq!(render_expression(&Expression::cast(value.clone(), named("Foo"), true)), "value as! Foo");
    assert_eq!(render_expression(&Expression::cast(value.clone(), named("Foo"), false)), "value as? Foo");
    assert_eq!(
        render_expression(&Expression::binary(value, BinaryOperator::Is, Expression::local("other"))),
        "value === other"
    );
}

#[test]
fn test_new_instance_drops_optional_marker() {
    let expression = Expression::new_instance(named("Point"), vec![Expression::integer(1).into()]);
    assert_eq!(render_expression(&expression), "Point(1)");
}

#[test]
fn test_default_of_uses_type_default_value() {
    assert_eq!(render_expression(&Expression::DefaultOf(int())), "0");
    let void = TypeReference::predefined(PredefinedType::Void).into_ref();
    assert_eq!(
        render_expression(&Expression::DefaultOf(void)),
        "/* default value is not supported by the Swift backend (type has no default value) */"
    );
}

#[test]
fn test_closure() {
    let closure = Expression::AnonymousMethod(AnonymousMethod {
        parameters: vec![ParameterDefinition::new("x", int())],
        return_type: Some(int()),
        statements: vec![Statement::ret(Some(Expression::binary(
            Expression::local("x"),
            BinaryOperator::Multiply,
            Expression::integer(2),
        )))],
    });
    assert_eq!(render_expression(&closure), "{ (x: Int32) -> Int32 in\n    return x * 2\n}");
}

// ============================================================================
// Type references
// ============================================================================

#[test]
fn test_nullability_markers() {
    let foo = named("Foo");
    let render = |ty: TypeRef| render_expression(&Expression::TypeReference(ty));
    assert_eq!(render(foo.clone()), "Foo!");
    assert_eq!(render(foo.as_nullable()), "Foo?");
    assert_eq!(render(foo.as_not_nullable()), "Foo");
    assert_eq!(render(foo.with_nullability(Nullability::Unknown)), "Foo!");
    assert_eq!(render(int()), "Int32");
}

#[test]
fn test_optional_function_type_is_parenthesized() {
    let callback = TypeReference::inline_block(vec![int()], None, Default::default())
        .into_ref()
        .as_nullable();
    assert_eq!(render_expression(&Expression::TypeReference(callback)), "((Int32) -> Void)?");
}

// ============================================================================
// Spans of non-optional type positions
// ============================================================================

/// The text recorded for `ty` in `generated`.
fn spanned<'a>(generated: &'a unparse::Generated<'_>, ty: &TypeRef) -> &'a str {
    let span = generated.spans.get(&**ty).unwrap_or_else(|| panic!("no span for {ty:?}"));
    &generated.text[span.start.offset..span.end.offset]
}

#[test]
fn test_instantiated_type_keeps_its_span() {
    let statement: Statement = Expression::new_instance(named("Widget"), Vec::new()).into();
    let generated = generator().generate_statement(&statement, None).unwrap().unwrap();
    assert_eq!(generated.text, "Widget()\n");
    let Statement::Expression(Expression::NewInstance(instance)) = &statement else {
        unreachable!()
    };
    assert_eq!(spanned(&generated, &instance.ty), "Widget");
}

#[test]
fn test_cast_and_check_types_keep_their_spans() {
    let cast = Expression::cast(Expression::local("x"), named("Widget"), false);
    let check = Expression::TypeCheck(TypeCheck {
        expression: Box::new(Expression::local("y")),
        ty: named("Gadget"),
    });
    let statement = Statement::block(vec![cast.into(), check.into()]);
    let generated = generator().generate_statement(&statement, None).unwrap().unwrap();
    assert_eq!(generated.text, "do {\n    x as? Widget\n    y is Gadget\n}\n");
    let Statement::Block(statements) = &statement else {
        unreachable!()
    };
    let Statement::Expression(Expression::TypeCast(cast)) = &statements[0] else {
        unreachable!()
    };
    let Statement::Expression(Expression::TypeCheck(check)) = &statements[1] else {
        unreachable!()
    };
    assert_eq!(spanned(&generated, &cast.ty), "Widget");
    assert_eq!(spanned(&generated, &check.ty), "Gadget");
}

#[test]
fn test_base_and_constraint_types_keep_their_spans() {
    let class = TypeDefinition::new(
        "Box",
        TypeDefinitionKind::Class(ClassType {
            generic_parameters: vec![GenericParameter {
                name: "T".to_string(),
                constraints: vec![named("Equatable")],
            }],
            ancestors: vec![named("Container")],
            interfaces: vec![named("Sendable")],
            ..ClassType::default()
        }),
    );
    let generated = generator().generate_type(&class, None).unwrap();
    assert_eq!(generated.text, "class Box<T: Equatable>: Container, Sendable {\n}\n");
    let TypeDefinitionKind::Class(body) = &class.kind else {
        unreachable!()
    };
    assert_eq!(spanned(&generated, &body.ancestors[0]), "Container");
    assert_eq!(spanned(&generated, &body.interfaces[0]), "Sendable");
    assert_eq!(spanned(&generated, &body.generic_parameters[0].constraints[0]), "Equatable");

    let type_span = generated.spans.get(&class).unwrap();
    assert!(type_span.contains(&generated.spans.get(&*body.ancestors[0]).unwrap()));
}

#[test]
fn test_enum_access_type_keeps_its_span() {
    let access = Expression::EnumValueAccess(EnumValueAccess {
        ty: named("Color"),
        value: "Red".to_string(),
    });
    let statement: Statement = access.into();
    let generated = generator().generate_statement(&statement, None).unwrap().unwrap();
    let Statement::Expression(Expression::EnumValueAccess(access)) = &statement else {
        unreachable!()
    };
    assert_eq!(spanned(&generated, &access.ty), "Color");
}
