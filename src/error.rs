//! Error types for expression admission, compilation, evaluation and
//! problem construction.

use crate::parse::Rule;
use thiserror::Error;

/// Errors raised while admitting or compiling expression text.
///
/// A whole batch is rejected as soon as one record fails; no partial
/// recovery is attempted.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text does not match the admitted expression grammar.
    #[error("invalid expression `{text}`")]
    InvalidExpression {
        /// The offending input, echoed back for display to the submitter.
        text: String,
        #[source]
        source: Box<pest::error::Error<Rule>>,
    },

    /// The text exceeds the admission length cap.
    #[error("expression longer than {limit} bytes")]
    TooLong { limit: usize },

    /// The text is grammatical but calls a function this crate does not
    /// recognize.
    #[error("cannot compile `{text}`: unknown function `{name}`")]
    UnknownFunction { text: String, name: String },

    /// A recognized function was called with the wrong number of arguments.
    #[error("cannot compile `{text}`: `{name}` takes 1 argument, found {found}")]
    BadArity {
        text: String,
        name: String,
        found: usize,
    },

    /// A numeric literal failed to convert to an IEEE double.
    #[error("cannot compile `{text}`: bad numeric literal `{literal}`")]
    BadLiteral { text: String, literal: String },
}

/// Errors raised while evaluating a compiled expression.
///
/// Numeric violations are surfaced as errors, never coerced to a sentinel
/// value. Overflow to infinity is not an error and propagates as an IEEE
/// value.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The binding map does not cover every free symbol by name.
    #[error("too few arguments supplied: missing bindings for {}", .missing.join(", "))]
    MissingArgument {
        /// Free symbols with no binding, in sorted order.
        missing: Vec<String>,
    },

    /// A divisor evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A function was applied outside its real domain.
    #[error("`{function}({argument})` is undefined")]
    Domain {
        function: &'static str,
        argument: f64,
    },

    /// A power has no real value, e.g. a negative base with a fractional
    /// exponent.
    #[error("`{base} ^ {exponent}` has no real value")]
    Power { base: f64, exponent: f64 },
}

/// Errors raised while assembling or evaluating an analytical problem.
#[derive(Debug, Error)]
pub enum ProblemError {
    /// An objective references a symbol with no variable bounds supplied.
    #[error("no variable bounds supplied for symbol `{name}`")]
    MissingVariable { name: String },

    /// Variable bounds are inverted or do not contain the starting point.
    #[error(
        "invalid bounds for `{name}`: lower {lower}, upper {upper}, initial {initial}"
    )]
    InvalidBounds {
        name: String,
        lower: f64,
        upper: f64,
        initial: f64,
    },

    /// A decision vector's length does not match the variable count.
    #[error("decision vector has {found} components, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// An objective failed to evaluate at a decision vector.
    #[error("objective evaluation failed")]
    Eval(#[from] EvalError),
}
