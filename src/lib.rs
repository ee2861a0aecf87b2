//! Objective expression parser/evaluator.
//!
//! # Why?
//!
//! Interactive multi-objective methods let a decision maker type their own
//! objective functions into a form, one row per objective. That text is
//! untrusted, so it is admitted by a strict grammar before compilation, and
//! every compiled row must agree with the rest of the batch on one sorted
//! set of decision variables. This crate does exactly that and nothing
//! else; it owns no HTTP, no rendering and no solver.
//!
//! # Example
//!
//! ```rust
//! use objective_expr::*;
//!
//! let records = vec![
//!     ExpressionRecord {
//!         expression: "x + y".to_string(),
//!         lower_bound: 0.0,
//!         upper_bound: 5.0,
//!     },
//!     ExpressionRecord {
//!         expression: "y / z - 1".to_string(),
//!         lower_bound: 33.0,
//!         upper_bound: 40.0,
//!     },
//! ];
//! let batch = parse(&records).unwrap();
//! assert_eq!(batch.symbols(), ["x", "y", "z"]);
//!
//! let bindings: BindingMap = [("x", 5.0), ("y", 6.0), ("z", 2.0)]
//!     .into_iter()
//!     .map(|(name, value)| (name.to_string(), value))
//!     .collect();
//! assert_eq!(batch.evaluate(&bindings).unwrap(), [11.0, 2.0]);
//! ```

mod batch;
mod error;
mod evaluate;
mod expression;
mod parse;
mod problem;
mod typeset;

/// Uses the [`pest`] parsing expression grammar language.
///
/// ```text
#[doc = include_str!("grammar.pest")]
/// ```
pub mod grammar_doc {}

pub use batch::*;
pub use error::*;
pub use evaluate::*;
pub use expression::*;
pub use parse::{free_symbols_of, validate, MAX_EXPRESSION_LEN};
pub use problem::*;
pub use typeset::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn bindings(entries: &[(&str, f64)]) -> BindingMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn batch_to_problem_end_to_end() {
        let records = vec![
            ExpressionRecord {
                expression: "x + y + z".to_string(),
                lower_bound: -50.0,
                upper_bound: 50.0,
            },
            ExpressionRecord {
                expression: "10 * x + 9".to_string(),
                lower_bound: -100.0,
                upper_bound: 600.0,
            },
        ];
        let batch = parse(&records).unwrap();
        assert_eq!(batch.symbols(), ["x", "y", "z"]);

        let bounds: HashMap<String, VariableBounds> = [
            ("x", 0.0, 10.0, 5.0),
            ("y", -5.0, 5.0, 0.0),
            ("z", 15.0, 20.0, 17.5),
        ]
        .into_iter()
        .map(|(name, lower_bound, upper_bound, initial_value)| {
            (
                name.to_string(),
                VariableBounds {
                    lower_bound,
                    upper_bound,
                    initial_value,
                },
            )
        })
        .collect();
        let problem = AnalyticalProblem::new(batch, &bounds).unwrap();
        assert_eq!(problem.ideal(), [-50.0, -100.0]);
        assert_eq!(problem.nadir(), [50.0, 600.0]);

        let at_start = problem.evaluate(&[vec![5.0, 0.0, 17.5]]).unwrap();
        assert_eq!(at_start, [vec![22.5, 59.0]]);

        let (typeset, variables) = typeset_problem(&problem);
        assert_eq!(typeset[1].formula, "f_{2} = 10 \\cdot x + 9");
        assert_eq!(variables.len(), 3);
    }

    #[test]
    fn collector_output_feeds_evaluation() {
        // The collector's keys, once filled in, always satisfy the
        // evaluator of the same text.
        let text = "x - z / y * 3";
        let compiled = CompiledExpression::compile(text).unwrap();
        let point: BindingMap = free_symbols_of(text)
            .unwrap()
            .into_keys()
            .zip([1.0, 2.0, 3.0])
            .collect();
        compiled.evaluate(&point).unwrap();
    }

    #[test]
    fn compiled_expressions_survive_reuse_across_points() {
        let compiled = CompiledExpression::compile("x ** 2 - y").unwrap();
        assert_eq!(
            compiled.evaluate(&bindings(&[("x", 3.0), ("y", 1.0)])).unwrap(),
            8.0
        );
        assert_eq!(
            compiled.evaluate(&bindings(&[("x", -2.0), ("y", 4.0)])).unwrap(),
            0.0
        );
    }
}
