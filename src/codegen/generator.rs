//! Dispatch and traversal engine.
//!
//! [`Generator`] walks the IR depth-first. For every node it matches the node's variant, hands the
//! payload to the matching [`Backend`] production and records the text span the production
//! produced. Productions write through the generator and recurse back into it for child nodes,
//! so a parent's span always encloses its children's spans.
//!
//! ## Notes
//! - The engine never inspects which language it is rendering; all syntax lives in productions.
//! - Spans are recorded in a side table keyed by node identity. Nodes marked synthetic (see
//!   [`Generator::synthetic_node`]) are rendered without recording spans for them or their
//!   children.
//! - A span starts where the node's first character lands, counting indentation that is still
//!   pending at line start, and never after the start of a node it contains. A node that writes
//!   nothing gets an empty span at the writer's position, before any pending indentation.

use std::collections::{HashMap, HashSet};

use super::errors::{GenResult, GenerateError};
use crate::backend::Backend;
use crate::escape::{EscapeMode, IdentifierResolver, NamespacePolicy};
use crate::format::{GenerateOptions, OutputWriter};
use crate::ir::{
    CodeUnit, Comment, DeclarationInfo, Entity, Expression, Import, Location, Member, MemberKind, NamedType,
    NodeKey, Nullability, ParameterDefinition, Span, Statement, TypeDefinition, TypeDefinitionKind, TypeKind, TypeRef,
    TypeReference,
};

/// The type definition whose members are being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScope {
    pub name: String,
    pub is_interface: bool,
    /// Every member is implicitly static (static classes, hosts for globals).
    pub is_static: bool,
}

impl TypeScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
            is_static: false,
        }
    }

    pub(crate) fn of(ty: &TypeDefinition) -> Self {
        let (is_interface, is_static) = match &ty.kind {
            TypeDefinitionKind::Interface(_) => (true, false),
            TypeDefinitionKind::Class(class) => (false, class.is_static),
            _ => (false, false),
        };
        Self {
            name: ty.name.clone(),
            is_interface,
            is_static,
        }
    }
}

/// Engine state for one generation pass.
pub struct Generator<'a> {
    backend: &'a dyn Backend,
    options: &'a GenerateOptions,
    writer: OutputWriter,
    spans: HashMap<NodeKey, Span>,
    synthetic: HashSet<NodeKey>,
    recording: bool,
    /// Earliest start among the nodes finished inside the node being recorded.
    floor: Option<Location>,
    definition_only: bool,
    unit: Option<&'a CodeUnit>,
    scopes: Vec<TypeScope>,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(backend: &'a dyn Backend, options: &'a GenerateOptions) -> Self {
        Self {
            backend,
            options,
            writer: OutputWriter::new(options),
            spans: HashMap::new(),
            synthetic: HashSet::new(),
            recording: true,
            floor: None,
            definition_only: false,
            unit: None,
            scopes: Vec::new(),
        }
    }

    pub(crate) fn with_unit(mut self, unit: Option<&'a CodeUnit>) -> Self {
        self.unit = unit;
        self
    }

    pub(crate) fn with_definition_only(mut self, definition_only: bool) -> Self {
        self.definition_only = definition_only;
        self
    }

    pub(crate) fn finish(self) -> (String, HashMap<NodeKey, Span>) {
        (self.writer.finish(), self.spans)
    }

    // =========================================================================
    // Pass context
    // =========================================================================

    pub fn options(&self) -> &GenerateOptions {
        self.options
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Render declarations without bodies.
    pub fn definition_only(&self) -> bool {
        self.definition_only
    }

    /// The innermost type definition being rendered.
    pub fn current_type(&self) -> Option<&TypeScope> {
        self.scopes.last()
    }

    /// Render `f` as if inside a type definition described by `scope`.
    pub fn in_scope<R>(&mut self, scope: TypeScope, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scopes.push(scope);
        let result = f(self);
        self.scopes.pop();
        result
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub fn writeln(&mut self, text: &str) {
        self.writer.writeln(text);
    }

    pub fn newline(&mut self) {
        self.writer.newline();
    }

    pub fn space(&mut self) {
        self.writer.space();
    }

    pub fn blank_lines(&mut self, count: usize) {
        self.writer.blank_lines(count);
    }

    pub fn indent(&mut self) {
        self.writer.indent();
    }

    pub fn dedent(&mut self) {
        self.writer.dedent();
    }

    pub fn location(&self) -> Location {
        self.writer.location()
    }

    pub fn at_line_start(&self) -> bool {
        self.writer.at_line_start()
    }

    /// Terminate the current line unless nothing has been written to it.
    pub fn ensure_line_start(&mut self) {
        if !self.writer.at_line_start() {
            self.writer.newline();
        }
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Resolve a possibly dotted name against the backend's reserved words.
    pub fn resolve_identifier(&self, name: &str, mode: EscapeMode, policy: NamespacePolicy) -> String {
        let backend = self.backend;
        let escape = |segment: &str| backend.escape_keyword(segment);
        IdentifierResolver::new(backend.keywords(), self.options.omit_namespace_prefixes, &escape)
            .resolve(name, mode, policy)
    }

    /// Write `name`, escaping segments that collide with reserved words.
    pub fn identifier(&mut self, name: &str) {
        let resolved = self.resolve_identifier(name, EscapeMode::Escape, NamespacePolicy::Default);
        self.writer.write(&resolved);
    }

    /// Write the name of a named type. Types in the code unit's own namespace are written without
    /// it.
    pub fn type_name(&mut self, named: &NamedType) {
        let unit_namespace = self.unit.and_then(|unit| unit.namespace.as_deref());
        match (&named.namespace, unit_namespace) {
            (Some(namespace), Some(local)) if namespace == local => self.identifier(&named.name),
            _ => self.identifier(&named.full_name()),
        }
    }

    /// Write `name` escaped and with its namespace, even when namespaces are being omitted.
    pub fn qualified_identifier(&mut self, name: &str) {
        let resolved = self.resolve_identifier(name, EscapeMode::Escape, NamespacePolicy::AlwaysQualified);
        self.writer.write(&resolved);
    }

    /// Write `name` without keyword checks.
    pub fn verbatim_identifier(&mut self, name: &str) {
        let resolved = self.resolve_identifier(name, EscapeMode::Verbatim, NamespacePolicy::Default);
        self.writer.write(&resolved);
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Render `items` separated by `separator`, wrapping past the configured threshold.
    ///
    /// Continuation lines are padded to the alignment column: the column the outermost list in
    /// progress started at.
    pub fn separated_list<T>(
        &mut self,
        items: &[T],
        separator: &str,
        mut render: impl FnMut(&mut Self, &T) -> GenResult,
    ) -> GenResult {
        let (align_to, owned) = self.writer.begin_alignment();
        let threshold = self.options.split_lines_longer_than;
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.writer.write_separator(separator, threshold, align_to);
            }
            render(self, item)?;
        }
        self.writer.end_alignment(owned);
        Ok(())
    }

    pub fn comma_list<T>(&mut self, items: &[T], render: impl FnMut(&mut Self, &T) -> GenResult) -> GenResult {
        self.separated_list(items, ", ", render)
    }

    // =========================================================================
    // Error policy
    // =========================================================================

    /// Apply the unsupported-construct policy for `production`.
    ///
    /// With `fail_on_asserts` this returns the error; otherwise it writes an inline comment naming
    /// the construct and lets the pass continue.
    pub fn unsupported(&mut self, production: &'static str) -> GenResult {
        self.unsupported_with(production, None)
    }

    pub fn unsupported_with(&mut self, production: &'static str, detail: Option<String>) -> GenResult {
        let error = GenerateError::Unsupported {
            backend: self.backend.name().to_string(),
            production,
            detail,
        };
        if self.options.fail_on_asserts {
            return Err(error);
        }
        tracing::warn!(backend = self.backend.name(), production, "rendering unsupported construct as a comment");
        let backend = self.backend;
        backend.inline_comment(self, &error.to_string())
    }

    pub fn malformed(&self, detail: impl Into<String>) -> GenerateError {
        GenerateError::Malformed(detail.into())
    }

    // =========================================================================
    // Synthetic nodes
    // =========================================================================

    /// Render `f` with `node` treated as synthetic: neither it nor its children get spans.
    pub fn synthetic_node<T: Entity, R>(&mut self, node: &T, f: impl FnOnce(&mut Self) -> R) -> R {
        let key = node.key();
        let inserted = self.synthetic.insert(key);
        let result = f(self);
        if inserted {
            self.synthetic.remove(&key);
        }
        result
    }

    /// Run `render` and record the span it produced for `node`.
    fn recorded<T: Entity>(&mut self, node: &T, render: impl FnOnce(&mut Self) -> GenResult) -> GenResult {
        let key = node.key();
        let before = self.writer.location();
        let pending = self.writer.next_location();
        let was_recording = self.recording;
        let suspended = self.synthetic.contains(&key);
        if suspended {
            self.recording = false;
        }
        let outer_floor = self.floor.take();
        let result = render(self);
        self.recording = was_recording;
        let after = self.writer.location();
        let span = if after == before {
            Span::new(before, before)
        } else {
            let start = self.floor.map_or(pending, |floor| floor.min(pending));
            Span::new(start, after.max(start))
        };
        self.floor = Some(outer_floor.map_or(span.start, |floor| floor.min(span.start)));
        result?;
        if was_recording && !suspended {
            self.spans.insert(key, Span::new(span.start, span.end));
        }
        Ok(())
    }

    // =========================================================================
    // Dispatch: code unit and declarations
    // =========================================================================

    pub fn code_unit(&mut self, unit: &CodeUnit) -> GenResult {
        let backend = self.backend;
        self.recorded(unit, |g| backend.code_unit(g, unit))
    }

    pub fn import(&mut self, import: &Import) -> GenResult {
        let backend = self.backend;
        self.guarded(import.condition.as_ref(), |g| {
            backend.import(g, import)?;
            g.ensure_line_start();
            Ok(())
        })
    }

    pub fn type_definition(&mut self, ty: &TypeDefinition) -> GenResult {
        self.guarded(ty.info.condition.as_ref(), |g| {
            g.recorded(ty, |g| {
                g.declaration_preamble(&ty.info)?;
                g.in_scope(TypeScope::of(ty), |g| g.dispatch_type_definition(ty))
            })?;
            g.ensure_line_start();
            Ok(())
        })
    }

    fn dispatch_type_definition(&mut self, ty: &TypeDefinition) -> GenResult {
        let backend = self.backend;
        match &ty.kind {
            TypeDefinitionKind::Alias(alias) => backend.alias_type(self, ty, alias),
            TypeDefinitionKind::Enum(enumeration) => backend.enum_type(self, ty, enumeration),
            TypeDefinitionKind::Class(class) => backend.class_type(self, ty, class),
            TypeDefinitionKind::Struct(class) => backend.struct_type(self, ty, class),
            TypeDefinitionKind::Interface(class) => backend.interface_type(self, ty, class),
            TypeDefinitionKind::Extension(class) => backend.extension_type(self, ty, class),
            TypeDefinitionKind::Block(block) => backend.block_type(self, ty, block),
        }
    }

    pub fn member(&mut self, member: &Member) -> GenResult {
        self.guarded(member.info.condition.as_ref(), |g| {
            g.recorded(member, |g| {
                g.declaration_preamble(&member.info)?;
                g.dispatch_member(member)
            })?;
            g.ensure_line_start();
            Ok(())
        })
    }

    fn dispatch_member(&mut self, member: &Member) -> GenResult {
        let backend = self.backend;
        match &member.kind {
            MemberKind::Constructor(body) => backend.constructor(self, member, body),
            MemberKind::Destructor(body) => backend.destructor(self, member, body),
            MemberKind::Finalizer(body) => backend.finalizer(self, member, body),
            MemberKind::Method(body) => backend.method(self, member, body),
            MemberKind::Field(field) => backend.field(self, member, field),
            MemberKind::Property(property) => backend.property(self, member, property),
            MemberKind::Event(event) => backend.event(self, member, event),
            MemberKind::CustomOperator(operator) => backend.custom_operator(self, member, operator),
            MemberKind::NestedType(nested) => backend.nested_type(self, member, nested),
        }
    }

    pub fn parameter(&mut self, parameter: &ParameterDefinition) -> GenResult {
        let backend = self.backend;
        self.recorded(parameter, |g| backend.parameter_definition(g, parameter))
    }

    /// Doc comment and attributes of a declaration.
    fn declaration_preamble(&mut self, info: &DeclarationInfo) -> GenResult {
        let backend = self.backend;
        if let Some(comment) = &info.comment {
            self.doc_comment(comment)?;
        }
        for attribute in &info.attributes {
            self.guarded(attribute.condition.as_ref(), |g| {
                backend.attribute(g, attribute)?;
                g.ensure_line_start();
                Ok(())
            })?;
        }
        Ok(())
    }

    pub fn doc_comment(&mut self, comment: &Comment) -> GenResult {
        let backend = self.backend;
        backend.doc_comment(self, comment)?;
        self.ensure_line_start();
        Ok(())
    }

    /// Wrap `f` in the backend's compile-time condition guards when `condition` is set.
    fn guarded(&mut self, condition: Option<&Expression>, f: impl FnOnce(&mut Self) -> GenResult) -> GenResult {
        let backend = self.backend;
        let Some(condition) = condition else {
            return f(self);
        };
        self.ensure_line_start();
        backend.condition_start(self, condition)?;
        self.ensure_line_start();
        f(self)?;
        self.ensure_line_start();
        backend.condition_end(self, condition)?;
        self.ensure_line_start();
        Ok(())
    }

    // =========================================================================
    // Dispatch: statements
    // =========================================================================

    /// Render one statement; every statement ends its own line.
    pub fn statement(&mut self, statement: &Statement) -> GenResult {
        self.recorded(statement, |g| g.dispatch_statement(statement))?;
        self.ensure_line_start();
        Ok(())
    }

    pub fn statements(&mut self, statements: &[Statement]) -> GenResult {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    /// Render the contents of a statement used as a body.
    ///
    /// A block renders its children directly (the enclosing construct supplies the delimiters)
    /// while still recording the block's own span; any other statement renders as usual.
    pub fn inner_statements(&mut self, body: &Statement) -> GenResult {
        match body {
            Statement::Block(statements) => self.recorded(body, |g| g.statements(statements)),
            other => self.statement(other),
        }
    }

    fn dispatch_statement(&mut self, statement: &Statement) -> GenResult {
        let backend = self.backend;
        match statement {
            Statement::Block(statements) => backend.block(self, statements),
            Statement::Expression(expression) => backend.expression_statement(self, expression),
            Statement::VariableDeclaration(declaration) => backend.variable_declaration(self, declaration),
            Statement::Assignment(assignment) => backend.assignment(self, assignment),
            Statement::If(conditional) => backend.if_statement(self, conditional),
            Statement::While(lp) => backend.while_loop(self, &lp.condition, &lp.body),
            Statement::DoWhile(lp) => backend.do_while_loop(self, lp),
            Statement::InfiniteLoop(body) => backend.infinite_loop(self, body),
            Statement::ForTo(lp) => backend.for_to_loop(self, lp),
            Statement::ForEach(lp) => backend.for_each_loop(self, lp),
            Statement::Switch(switch) => backend.switch_statement(self, switch),
            Statement::Try(block) => backend.try_statement(self, block),
            Statement::Throw(value) => backend.throw_statement(self, value.as_ref()),
            Statement::Return(value) => backend.return_statement(self, value.as_ref()),
            Statement::Break => backend.break_statement(self),
            Statement::Continue => backend.continue_statement(self),
            Statement::Locking(locking) => backend.locking_statement(self, locking),
            Statement::Using(using) => backend.using_statement(self, using),
            Statement::Comment(comment) => backend.comment_statement(self, comment),
            Statement::Empty => backend.empty_statement(self),
            Statement::Raw(text) => backend.raw_statement(self, text),
        }
    }

    // =========================================================================
    // Dispatch: expressions
    // =========================================================================

    pub fn expression(&mut self, expression: &Expression) -> GenResult {
        self.recorded(expression, |g| g.dispatch_expression(expression))
    }

    fn dispatch_expression(&mut self, expression: &Expression) -> GenResult {
        let backend = self.backend;
        match expression {
            Expression::Nil => backend.nil(self),
            Expression::BooleanLiteral(value) => backend.boolean_literal(self, *value),
            Expression::IntegerLiteral(literal) => {
                if !matches!(literal.base, 2 | 8 | 10 | 16) {
                    return Err(self.malformed(format!("integer literal in unsupported base {}", literal.base)));
                }
                backend.integer_literal(self, literal)
            }
            Expression::FloatLiteral(literal) => backend.float_literal(self, literal),
            Expression::StringLiteral(value) => backend.string_literal(self, value),
            Expression::CharacterLiteral(value) => backend.character_literal(self, *value),
            Expression::ArrayLiteral(literal) => backend.array_literal(self, literal),
            Expression::DictionaryLiteral(literal) => {
                if literal.keys.len() != literal.values.len() {
                    return Err(self.malformed(format!(
                        "dictionary literal has {} keys but {} values",
                        literal.keys.len(),
                        literal.values.len()
                    )));
                }
                backend.dictionary_literal(self, literal)
            }
            Expression::TupleLiteral(members) => backend.tuple_literal(self, members),
            Expression::SelfReference => backend.self_reference(self),
            Expression::Inherited => backend.inherited(self),
            Expression::Result => backend.result(self),
            Expression::NamedIdentifier(name) => backend.named_identifier(self, name),
            Expression::LocalVariableAccess(name) => backend.local_variable_access(self, name),
            Expression::FieldAccess(access) => backend.field_access(self, access),
            Expression::PropertyAccess(access) => backend.property_access(self, access),
            Expression::MethodCall(call) => backend.method_call(self, call),
            Expression::NewInstance(instance) => backend.new_instance(self, instance),
            Expression::ArrayElementAccess(access) => backend.array_element_access(self, access),
            Expression::EnumValueAccess(access) => backend.enum_value_access(self, access),
            Expression::TypeReference(ty) => backend.type_reference_expression(self, ty),
            Expression::TypeOf(ty) => backend.type_of(self, ty),
            Expression::SizeOf(ty) => backend.size_of(self, ty),
            Expression::DefaultOf(ty) => backend.default_of(self, ty),
            Expression::TypeCheck(check) => backend.type_check(self, check),
            Expression::TypeCast(cast) => backend.type_cast(self, cast),
            Expression::BinaryOperator(binary) => backend.binary_operator(self, binary),
            Expression::UnaryOperator(unary) => backend.unary_operator(self, unary),
            Expression::IfThenElse(conditional) => backend.if_then_else(self, conditional),
            Expression::Parentheses(inner) => backend.parentheses(self, inner),
            Expression::Await(inner) => backend.await_expression(self, inner),
            Expression::AddressOf(inner) => backend.address_of(self, inner),
            Expression::PointerDereference(inner) => backend.pointer_dereference(self, inner),
            Expression::Range(range) => backend.range_expression(self, range),
            Expression::AnonymousMethod(method) => backend.anonymous_method(self, method),
            Expression::Raw(text) => backend.raw_expression(self, text),
        }
    }

    // =========================================================================
    // Dispatch: type references
    // =========================================================================

    pub fn type_reference(&mut self, ty: &TypeReference) -> GenResult {
        self.recorded(ty, |g| g.dispatch_type_reference(ty))
    }

    /// Render `ty` as its `nullability` view; the span is recorded for `ty` itself.
    pub fn type_reference_as(&mut self, ty: &TypeRef, nullability: Nullability) -> GenResult {
        let view = ty.with_nullability(nullability);
        self.recorded(&**ty, |g| g.dispatch_type_reference(&view))
    }

    fn dispatch_type_reference(&mut self, ty: &TypeReference) -> GenResult {
        let backend = self.backend;
        match ty.kind() {
            TypeKind::Named(named) => backend.named_type(self, ty, named),
            TypeKind::Predefined(predefined) => backend.predefined_type(self, ty, *predefined),
            TypeKind::Pointer(pointer) => backend.pointer_type(self, ty, pointer),
            TypeKind::Array(array) => backend.array_type(self, ty, array),
            TypeKind::Dictionary(dictionary) => backend.dictionary_type(self, ty, dictionary),
            TypeKind::Tuple(tuple) => backend.tuple_type(self, ty, tuple),
            TypeKind::Sequence(sequence) => backend.sequence_type(self, ty, sequence),
            TypeKind::KindOf(target) => backend.kind_of_type(self, ty, target),
            TypeKind::Constant(target) => backend.constant_type(self, ty, target),
            TypeKind::InlineBlock(block) => backend.inline_block_type(self, ty, block),
            TypeKind::Range(range) => backend.range_type(self, ty, range),
            TypeKind::Unknown => backend.unknown_type(self, ty),
        }
    }
}
