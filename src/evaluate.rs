use std::collections::HashMap;

use crate::error::EvalError;
use crate::expression::{CompiledExpression, Expr, Function};

/// Name-to-value bindings supplied at evaluation time.
///
/// Constructed fresh per evaluation call; entries for names the expression
/// does not use are ignored, so forward-compatible supersets are allowed.
pub type BindingMap = HashMap<String, f64>;

impl CompiledExpression {
    /// Evaluates the expression at the point described by `bindings`.
    ///
    /// Every free symbol must be bound by name or the call fails with
    /// [`EvalError::MissingArgument`] listing the uncovered symbols.
    ///
    /// Arithmetic is standard IEEE double precision. Division by an exact
    /// zero and real-domain violations (`sqrt` of a negative, a negative
    /// base under a fractional exponent) fail with the corresponding
    /// [`EvalError`] variant; overflow to infinity propagates as an IEEE
    /// value.
    pub fn evaluate(&self, bindings: &BindingMap) -> Result<f64, EvalError> {
        let mut values = Vec::with_capacity(self.free_symbols.len());
        let mut missing = Vec::new();
        for name in &self.free_symbols {
            match bindings.get(name) {
                Some(value) => values.push(*value),
                None => missing.push(name.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(EvalError::MissingArgument { missing });
        }
        self.ast.evaluate_recursive(&values)
    }
}

impl Expr {
    fn evaluate_recursive(&self, values: &[f64]) -> Result<f64, EvalError> {
        match self {
            Self::Add(lhs, rhs) => {
                Ok(lhs.evaluate_recursive(values)? + rhs.evaluate_recursive(values)?)
            }
            Self::Binding(binding) => Ok(values[*binding]),
            Self::Call(function, arg) => function.apply(arg.evaluate_recursive(values)?),
            Self::Constant(constant) => Ok(constant.value()),
            Self::Div(lhs, rhs) => {
                let divisor = rhs.evaluate_recursive(values)?;
                if divisor == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(lhs.evaluate_recursive(values)? / divisor)
            }
            Self::Literal(value) => Ok(*value),
            Self::Mul(lhs, rhs) => {
                Ok(lhs.evaluate_recursive(values)? * rhs.evaluate_recursive(values)?)
            }
            Self::Neg(only) => Ok(-only.evaluate_recursive(values)?),
            Self::Pow(lhs, rhs) => {
                let base = lhs.evaluate_recursive(values)?;
                let exponent = rhs.evaluate_recursive(values)?;
                let result = base.powf(exponent);
                if result.is_nan() && !base.is_nan() && !exponent.is_nan() {
                    return Err(EvalError::Power { base, exponent });
                }
                Ok(result)
            }
            Self::Sub(lhs, rhs) => {
                Ok(lhs.evaluate_recursive(values)? - rhs.evaluate_recursive(values)?)
            }
        }
    }
}

impl Function {
    pub(crate) fn apply(self, argument: f64) -> Result<f64, EvalError> {
        let result = match self {
            Self::Abs => argument.abs(),
            Self::Acos => argument.acos(),
            Self::Asin => argument.asin(),
            Self::Atan => argument.atan(),
            Self::Ceil => argument.ceil(),
            Self::Cos => argument.cos(),
            Self::Cosh => argument.cosh(),
            Self::Exp => argument.exp(),
            Self::Floor => argument.floor(),
            Self::Ln => argument.ln(),
            Self::Log10 => argument.log10(),
            Self::Sin => argument.sin(),
            Self::Sinh => argument.sinh(),
            Self::Sqrt => argument.sqrt(),
            Self::Tan => argument.tan(),
            Self::Tanh => argument.tanh(),
        };
        // A NaN out of a non-NaN argument means the argument fell outside
        // the function's real domain.
        if result.is_nan() && !argument.is_nan() {
            return Err(EvalError::Domain {
                function: self.name(),
                argument,
            });
        }
        Ok(result)
    }
}
