//! Public generation API
//!
//! [`CodeGenerator`] pairs a [`Backend`] with [`GenerateOptions`] and exposes one entry point per
//! kind of root node. Each entry point runs a full pass:
//!
//! ```text
//! Idle → Initialized (fresh buffer, unit bound) → Rendering → Done (text + spans)
//! ```
//!
//! A pass borrows the generator mutably, so one instance never runs two passes at once. The IR
//! tree is only read; several generators may render the same tree concurrently.
//!
//! ## Examples
//!
//! ```rust
//! use unparse::backend::CSharpBackend;
//! use unparse::codegen::CodeGenerator;
//! use unparse::ir::{CodeUnit, TypeDefinition};
//!
//! let unit = CodeUnit::new("Demo").with_type(TypeDefinition::enumeration("Color", &["Red", "Green"]));
//! let mut generator = CodeGenerator::new(CSharpBackend::new());
//! let generated = generator.generate_unit(&unit).unwrap();
//! assert!(generated.text.contains("enum Color"));
//! ```

mod errors;
mod generator;
mod spans;

pub use errors::{GenResult, GenerateError};
pub use generator::{Generator, TypeScope};
pub use spans::SpanTable;

use crate::backend::Backend;
use crate::format::GenerateOptions;
use crate::ir::{CodeUnit, Expression, Member, ParameterDefinition, Statement, TypeDefinition};

/// Where a [`CodeGenerator`] is in its pass lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    #[default]
    Idle,
    Initialized,
    Rendering,
    Done,
}

/// Output of one pass: the text plus the span every rendered node produced.
#[derive(Debug, Clone)]
pub struct Generated<'t> {
    pub text: String,
    pub spans: SpanTable<'t>,
}

/// Renders IR trees through one backend.
#[derive(Debug)]
pub struct CodeGenerator<B: Backend> {
    backend: B,
    options: GenerateOptions,
    state: PassState,
}

impl<B: Backend> CodeGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            options: GenerateOptions::default(),
            state: PassState::Idle,
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Change options between passes.
    pub fn options_mut(&mut self) -> &mut GenerateOptions {
        &mut self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    pub fn default_file_extension(&self) -> &str {
        self.backend.default_file_extension()
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Render a whole code unit.
    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), types = unit.types.len()))]
    pub fn generate_unit<'t>(&mut self, unit: &'t CodeUnit) -> GenResult<Generated<'t>> {
        self.run(Some(unit), false, |g| g.code_unit(unit))
    }

    /// Render a code unit's declarations without bodies.
    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), types = unit.types.len()))]
    pub fn generate_unit_definition_only<'t>(&mut self, unit: &'t CodeUnit) -> GenResult<Generated<'t>> {
        self.run(Some(unit), true, |g| g.code_unit(unit))
    }

    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), name = %ty.name))]
    pub fn generate_type<'t>(&mut self, ty: &'t TypeDefinition, unit: Option<&'t CodeUnit>) -> GenResult<Generated<'t>> {
        self.run(unit, false, |g| g.type_definition(ty))
    }

    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), name = %ty.name))]
    pub fn generate_type_definition_only<'t>(
        &mut self,
        ty: &'t TypeDefinition,
        unit: Option<&'t CodeUnit>,
    ) -> GenResult<Generated<'t>> {
        self.run(unit, true, |g| g.type_definition(ty))
    }

    /// Render one member, optionally in the context of its declaring type.
    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), name = %member.name))]
    pub fn generate_member<'t>(
        &mut self,
        member: &'t Member,
        ty: Option<&'t TypeDefinition>,
        unit: Option<&'t CodeUnit>,
    ) -> GenResult<Generated<'t>> {
        self.run(unit, false, |g| Self::member_in(g, member, ty))
    }

    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), name = %member.name))]
    pub fn generate_member_definition<'t>(
        &mut self,
        member: &'t Member,
        ty: Option<&'t TypeDefinition>,
        unit: Option<&'t CodeUnit>,
    ) -> GenResult<Generated<'t>> {
        self.run(unit, true, |g| Self::member_in(g, member, ty))
    }

    #[tracing::instrument(skip_all, fields(backend = self.backend.name(), name = %parameter.name))]
    pub fn generate_parameter_definition<'t>(
        &mut self,
        parameter: &'t ParameterDefinition,
        unit: Option<&'t CodeUnit>,
    ) -> GenResult<Generated<'t>> {
        self.run(unit, false, |g| g.parameter(parameter))
    }

    /// Render one statement; `None` when it produces no text.
    #[tracing::instrument(skip_all, fields(backend = self.backend.name()))]
    pub fn generate_statement<'t>(
        &mut self,
        statement: &'t Statement,
        unit: Option<&'t CodeUnit>,
    ) -> GenResult<Option<Generated<'t>>> {
        let generated = self.run(unit, false, |g| g.statement(statement))?;
        Ok((!generated.text.is_empty()).then_some(generated))
    }

    pub fn expression_to_string(&mut self, expression: &Expression) -> GenResult<String> {
        Ok(self.run(None, false, |g| g.expression(expression))?.text)
    }

    pub fn statement_to_string(&mut self, statement: &Statement) -> GenResult<String> {
        Ok(self.run(None, false, |g| g.statement(statement))?.text)
    }

    // =========================================================================
    // Pass driver
    // =========================================================================

    fn member_in(g: &mut Generator<'_>, member: &Member, ty: Option<&TypeDefinition>) -> GenResult {
        match ty {
            Some(ty) => g.in_scope(TypeScope::of(ty), |g| g.member(member)),
            None => g.member(member),
        }
    }

    fn run<'t>(
        &mut self,
        unit: Option<&'t CodeUnit>,
        definition_only: bool,
        render: impl FnOnce(&mut Generator<'_>) -> GenResult,
    ) -> GenResult<Generated<'t>> {
        self.state = PassState::Initialized;
        let mut generator = Generator::new(&self.backend, &self.options)
            .with_unit(unit)
            .with_definition_only(definition_only);
        self.state = PassState::Rendering;
        if let Err(error) = render(&mut generator) {
            self.state = PassState::Idle;
            tracing::debug!(%error, "generation pass failed");
            return Err(error);
        }
        let (text, spans) = generator.finish();
        self.state = PassState::Done;
        tracing::debug!(bytes = text.len(), spans = spans.len(), "generation pass finished");
        Ok(Generated {
            text,
            spans: SpanTable::new(spans),
        })
    }
}
