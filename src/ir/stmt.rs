//! Statements.

use super::Comment;
use super::expr::Expression;
use super::types::TypeRef;

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub ty: Option<TypeRef>,
    pub value: Option<Expression>,
    pub constant: bool,
    pub read_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Expression,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expression,
    pub body: Box<Statement>,
}

/// Post-tested loop: the body runs once before `condition` is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileLoop {
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopDirection {
    #[default]
    Forward,
    Backward,
}

/// Counting loop over an inclusive range.
#[derive(Debug, Clone, PartialEq)]
pub struct ForToLoop {
    pub variable: String,
    pub ty: Option<TypeRef>,
    pub start: Expression,
    pub end: Expression,
    pub step: Option<Expression>,
    pub direction: LoopDirection,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForEachLoop {
    pub variable: String,
    pub ty: Option<TypeRef>,
    pub collection: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub labels: Vec<Expression>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub expression: Expression,
    pub cases: Vec<SwitchCase>,
    pub default: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchBlock {
    pub name: Option<String>,
    pub ty: Option<TypeRef>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub statements: Vec<Statement>,
    pub catches: Vec<CatchBlock>,
    pub finally: Option<Vec<Statement>>,
}

/// Run `body` while holding the monitor of `expression`.
#[derive(Debug, Clone, PartialEq)]
pub struct LockingStatement {
    pub expression: Expression,
    pub body: Box<Statement>,
}

/// Bind a disposable value for the duration of `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsingStatement {
    pub name: String,
    pub ty: Option<TypeRef>,
    pub value: Expression,
    pub body: Box<Statement>,
}

/// The closed set of statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Vec<Statement>),
    Expression(Expression),
    VariableDeclaration(VariableDeclaration),
    Assignment(Assignment),
    If(IfStatement),
    While(WhileLoop),
    DoWhile(DoWhileLoop),
    InfiniteLoop(Box<Statement>),
    ForTo(ForToLoop),
    ForEach(ForEachLoop),
    Switch(SwitchStatement),
    Try(TryStatement),
    Throw(Option<Expression>),
    Return(Option<Expression>),
    Break,
    Continue,
    Locking(LockingStatement),
    Using(UsingStatement),
    Comment(Comment),
    Empty,
    /// Verbatim text, emitted as its own line(s).
    Raw(String),
}

impl Statement {
    pub fn block(statements: Vec<Statement>) -> Self {
        Statement::Block(statements)
    }

    pub fn assign(target: Expression, value: Expression) -> Self {
        Statement::Assignment(Assignment { target, value })
    }

    pub fn declare(name: impl Into<String>, ty: Option<TypeRef>, value: Option<Expression>) -> Self {
        Statement::VariableDeclaration(VariableDeclaration {
            name: name.into(),
            ty,
            value,
            constant: false,
            read_only: false,
        })
    }

    pub fn if_then(condition: Expression, then_branch: Statement, else_branch: Option<Statement>) -> Self {
        Statement::If(IfStatement {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn while_loop(condition: Expression, body: Statement) -> Self {
        Statement::While(WhileLoop {
            condition,
            body: Box::new(body),
        })
    }

    pub fn locking(expression: Expression, body: Statement) -> Self {
        Statement::Locking(LockingStatement {
            expression,
            body: Box::new(body),
        })
    }

    pub fn ret(value: Option<Expression>) -> Self {
        Statement::Return(value)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Statement::Comment(Comment::new(text))
    }
}

impl From<Expression> for Statement {
    fn from(expression: Expression) -> Self {
        Statement::Expression(expression)
    }
}
