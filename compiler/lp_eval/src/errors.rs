//! Evaluation errors.
//!
//! Every failure is fatal to the current top-level execution; there is no
//! in-language recovery. `EvalErrorKind` carries the structured data for
//! each condition, and [`EvalError::category`] folds it into the coarse
//! taxonomy callers match on.
//!
//! Construct errors through the factory functions below rather than
//! building kinds by hand at the detection site.

use lp_lexer::BlockError;

/// Result of an evaluation step.
pub type EvalResult<T> = Result<T, EvalError>;

/// Coarse error taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unterminated block, missing keyword, malformed header.
    Syntax,
    /// A name resolved to nothing where a concrete value was required.
    UnboundName,
    /// `call` target is not bound.
    NotFound,
    /// `call` target is bound to something other than a function.
    NotCallable,
    /// Operand-stack discipline violated.
    InvariantViolation,
    /// `foreign` used with an unregistered language tag.
    UnsupportedForeign,
    /// Value-level failure (bad operand types, overflow, recursion limit,
    /// failing foreign backend).
    Runtime,
}

/// Structured error category with the data for each condition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Syntax
    #[error(transparent)]
    Block(#[from] BlockError),
    #[error("expected `{expected}` in `{construct}`, found {found}")]
    ExpectedKeyword {
        construct: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("`{construct}` expects {expected}, but the program ends here")]
    UnexpectedEnd {
        construct: &'static str,
        expected: &'static str,
    },
    #[error("`{construct}` expects {expected}, found `{found}`")]
    Malformed {
        construct: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("`{keyword}` without a preceding `if`")]
    DanglingClause { keyword: &'static str },

    // Names
    #[error("unbound name `{name}`")]
    UnboundName { name: String },

    // Calls
    #[error("function `{name}` not found")]
    FunctionNotFound { name: String },
    #[error("`{name}` is bound to {found}, which is not callable")]
    NotCallable { name: String, found: String },

    // Operand stack
    #[error("operand stack not empty when program finished: [{remaining}]")]
    OperandStackNotEmpty { remaining: String },
    #[error("unable to load left hand operand for `{operator}`")]
    EmptyOperandStack { operator: &'static str },
    #[error("`{operator}` needs a named target, found {found}")]
    InvalidAssignTarget { operator: &'static str, found: String },

    // Foreign
    #[error("unsupported foreign language `{language}`")]
    UnsupportedForeign { language: String },
    #[error("foreign `{language}` code failed: {message}")]
    ForeignFailed { language: String, message: String },

    // Runtime
    #[error("cannot apply `{operator}` to {left} and {right}")]
    InvalidOperands {
        operator: &'static str,
        left: String,
        right: String,
    },
    #[error("integer overflow in `{operator}`")]
    IntegerOverflow { operator: &'static str },
    #[error("`{construct}` cannot iterate over {found}")]
    NotIterable {
        construct: &'static str,
        found: String,
    },
    #[error("cannot destructure {found} into {expected} names")]
    DestructureMismatch { expected: usize, found: String },
    #[error("evaluation nested deeper than {limit} levels (self-referential macro?)")]
    DepthExceeded { limit: usize },
}

/// An evaluation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind }
    }

    /// Which part of the taxonomy this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match &self.kind {
            EvalErrorKind::Block(_)
            | EvalErrorKind::ExpectedKeyword { .. }
            | EvalErrorKind::UnexpectedEnd { .. }
            | EvalErrorKind::Malformed { .. }
            | EvalErrorKind::DanglingClause { .. } => ErrorCategory::Syntax,
            EvalErrorKind::UnboundName { .. } => ErrorCategory::UnboundName,
            EvalErrorKind::FunctionNotFound { .. } => ErrorCategory::NotFound,
            EvalErrorKind::NotCallable { .. } => ErrorCategory::NotCallable,
            EvalErrorKind::OperandStackNotEmpty { .. }
            | EvalErrorKind::EmptyOperandStack { .. }
            | EvalErrorKind::InvalidAssignTarget { .. } => ErrorCategory::InvariantViolation,
            EvalErrorKind::UnsupportedForeign { .. } => ErrorCategory::UnsupportedForeign,
            EvalErrorKind::ForeignFailed { .. }
            | EvalErrorKind::InvalidOperands { .. }
            | EvalErrorKind::IntegerOverflow { .. }
            | EvalErrorKind::NotIterable { .. }
            | EvalErrorKind::DestructureMismatch { .. }
            | EvalErrorKind::DepthExceeded { .. } => ErrorCategory::Runtime,
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl From<BlockError> for EvalError {
    fn from(err: BlockError) -> Self {
        EvalError::new(EvalErrorKind::Block(err))
    }
}

// Syntax Errors

#[cold]
pub fn expected_keyword(construct: &'static str, expected: &'static str, found: &str) -> EvalError {
    EvalErrorKind::ExpectedKeyword {
        construct,
        expected,
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn unexpected_end(construct: &'static str, expected: &'static str) -> EvalError {
    EvalErrorKind::UnexpectedEnd {
        construct,
        expected,
    }
    .into()
}

#[cold]
pub fn malformed(construct: &'static str, expected: &'static str, found: &str) -> EvalError {
    EvalErrorKind::Malformed {
        construct,
        expected,
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn dangling_clause(keyword: &'static str) -> EvalError {
    EvalErrorKind::DanglingClause { keyword }.into()
}

// Name and Call Errors

#[cold]
pub fn unbound_name(name: &str) -> EvalError {
    EvalErrorKind::UnboundName {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn function_not_found(name: &str) -> EvalError {
    EvalErrorKind::FunctionNotFound {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn not_callable(name: &str, found: &str) -> EvalError {
    EvalErrorKind::NotCallable {
        name: name.to_string(),
        found: found.to_string(),
    }
    .into()
}

// Operand Stack Errors

#[cold]
pub fn operand_stack_not_empty(remaining: String) -> EvalError {
    EvalErrorKind::OperandStackNotEmpty { remaining }.into()
}

#[cold]
pub fn empty_operand_stack(operator: &'static str) -> EvalError {
    EvalErrorKind::EmptyOperandStack { operator }.into()
}

#[cold]
pub fn invalid_assign_target(operator: &'static str, found: &str) -> EvalError {
    EvalErrorKind::InvalidAssignTarget {
        operator,
        found: found.to_string(),
    }
    .into()
}

// Foreign Errors

#[cold]
pub fn unsupported_foreign(language: &str) -> EvalError {
    EvalErrorKind::UnsupportedForeign {
        language: language.to_string(),
    }
    .into()
}

#[cold]
pub fn foreign_failed(language: &str, message: impl Into<String>) -> EvalError {
    EvalErrorKind::ForeignFailed {
        language: language.to_string(),
        message: message.into(),
    }
    .into()
}

// Runtime Errors

#[cold]
pub fn invalid_operands(operator: &'static str, left: &str, right: &str) -> EvalError {
    EvalErrorKind::InvalidOperands {
        operator,
        left: left.to_string(),
        right: right.to_string(),
    }
    .into()
}

#[cold]
pub fn integer_overflow(operator: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operator }.into()
}

#[cold]
pub fn not_iterable(construct: &'static str, found: &str) -> EvalError {
    EvalErrorKind::NotIterable {
        construct,
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn destructure_mismatch(expected: usize, found: &str) -> EvalError {
    EvalErrorKind::DestructureMismatch {
        expected,
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn depth_exceeded(limit: usize) -> EvalError {
    EvalErrorKind::DepthExceeded { limit }.into()
}
