//! Runtime errors for the interpreter

use thiserror::Error;

/// Error raised while evaluating a single token
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    /// The token is not a literal and no dictionary defines it
    #[error("undefined: `{name}` is neither a literal nor a defined name{hint}")]
    Undefined { name: String, hint: String },

    /// An operator precondition failed
    #[error("{operator}: {reason}")]
    Operator {
        operator: &'static str,
        reason: Mismatch,
    },

    /// A resource cap was hit; the command was aborted
    #[error("{limit} limit of {max} exceeded")]
    LimitExceeded { limit: Limit, max: usize },
}

/// Which operator precondition failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Mismatch {
    #[error("stack underflow: needs {needed} operand(s), found {found}")]
    StackUnderflow { needed: usize, found: usize },

    #[error("type check: expected {expected}, got {got}")]
    TypeCheck {
        expected: &'static str,
        got: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("range check: {0}")]
    RangeCheck(String),

    #[error("negative count {0}")]
    NegativeCount(i64),

    #[error("step must be non-zero")]
    ZeroStep,

    #[error("dictionary stack underflow: the system dictionary cannot be ended")]
    DictStackUnderflow,
}

/// Resource caps enforced by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Depth,
    Iterations,
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Depth => write!(f, "block nesting depth"),
            Limit::Iterations => write!(f, "loop iteration"),
        }
    }
}

/// Coarse classification reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ParseFailure,
    TypeOrArityMismatch,
    ResourceLimit,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::ParseFailure => "Parse",
            ErrorCategory::TypeOrArityMismatch => "Type",
            ErrorCategory::ResourceLimit => "Limit",
        }
    }
}

impl InterpError {
    pub fn undefined(name: &str, suggestion: Option<&str>) -> Self {
        InterpError::Undefined {
            name: name.to_string(),
            hint: crate::util::format_suggestion_hint(suggestion),
        }
    }

    pub fn stack_underflow(operator: &'static str, needed: usize, found: usize) -> Self {
        Self::operator(operator, Mismatch::StackUnderflow { needed, found })
    }

    pub fn type_check(operator: &'static str, expected: &'static str, got: &'static str) -> Self {
        Self::operator(operator, Mismatch::TypeCheck { expected, got })
    }

    pub fn division_by_zero(operator: &'static str) -> Self {
        Self::operator(operator, Mismatch::DivisionByZero)
    }

    pub fn range_check(operator: &'static str, detail: impl Into<String>) -> Self {
        Self::operator(operator, Mismatch::RangeCheck(detail.into()))
    }

    pub fn negative_count(operator: &'static str, count: i64) -> Self {
        Self::operator(operator, Mismatch::NegativeCount(count))
    }

    pub fn zero_step(operator: &'static str) -> Self {
        Self::operator(operator, Mismatch::ZeroStep)
    }

    pub fn dict_stack_underflow(operator: &'static str) -> Self {
        Self::operator(operator, Mismatch::DictStackUnderflow)
    }

    pub fn depth_exceeded(max: usize) -> Self {
        InterpError::LimitExceeded {
            limit: Limit::Depth,
            max,
        }
    }

    pub fn iterations_exceeded(max: usize) -> Self {
        InterpError::LimitExceeded {
            limit: Limit::Iterations,
            max,
        }
    }

    fn operator(operator: &'static str, reason: Mismatch) -> Self {
        InterpError::Operator { operator, reason }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            InterpError::Undefined { .. } => ErrorCategory::ParseFailure,
            InterpError::Operator { .. } => ErrorCategory::TypeOrArityMismatch,
            InterpError::LimitExceeded { .. } => ErrorCategory::ResourceLimit,
        }
    }

    pub fn is_resource_limit(&self) -> bool {
        self.category() == ErrorCategory::ResourceLimit
    }

    /// The failed precondition, for operator errors
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            InterpError::Operator { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, InterpError>;
