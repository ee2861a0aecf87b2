use std::collections::HashMap;

use crate::batch::{Objective, ParsedBatch};
use crate::error::ProblemError;
use crate::evaluate::BindingMap;

/// Bounds and starting point gathered for one decision variable, keyed by
/// symbol name in the caller's variable form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariableBounds {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub initial_value: f64,
}

/// A named decision variable of an analytical problem.
#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
    pub bounds: VariableBounds,
}

/// A multi-objective problem over compiled objective expressions.
///
/// Variables follow the batch's canonical (sorted) symbol ordering, and
/// decision vectors passed to [`AnalyticalProblem::evaluate`] are read
/// positionally against that ordering. The ideal and nadir points are the
/// objective bounds, positionally.
#[derive(Clone, Debug)]
pub struct AnalyticalProblem {
    objectives: Vec<Objective>,
    variables: Vec<Variable>,
}

impl AnalyticalProblem {
    /// Builds a problem from a parsed batch and per-symbol variable bounds.
    ///
    /// Every batch symbol must have bounds supplied, with
    /// `lower_bound <= initial_value <= upper_bound`.
    pub fn new(
        batch: ParsedBatch,
        bounds: &HashMap<String, VariableBounds>,
    ) -> Result<Self, ProblemError> {
        let mut variables = Vec::with_capacity(batch.symbols.len());
        for name in &batch.symbols {
            let bounds = match bounds.get(name) {
                Some(bounds) => *bounds,
                None => {
                    return Err(ProblemError::MissingVariable { name: name.clone() });
                }
            };
            if !(bounds.lower_bound <= bounds.initial_value
                && bounds.initial_value <= bounds.upper_bound)
            {
                return Err(ProblemError::InvalidBounds {
                    name: name.clone(),
                    lower: bounds.lower_bound,
                    upper: bounds.upper_bound,
                    initial: bounds.initial_value,
                });
            }
            variables.push(Variable {
                name: name.clone(),
                bounds,
            });
        }

        Ok(Self {
            objectives: batch.objectives,
            variables,
        })
    }

    /// Compiled objectives in submission order.
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Decision variables in canonical symbol order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Objective lower bounds, positionally.
    pub fn ideal(&self) -> Vec<f64> {
        self.objectives.iter().map(|o| o.lower_bound).collect()
    }

    /// Objective upper bounds, positionally.
    pub fn nadir(&self) -> Vec<f64> {
        self.objectives.iter().map(|o| o.upper_bound).collect()
    }

    /// The starting point as a binding map over all variables.
    pub fn initial_point(&self) -> BindingMap {
        self.variables
            .iter()
            .map(|v| (v.name.clone(), v.bounds.initial_value))
            .collect()
    }

    /// Evaluates the whole problem over a population of decision vectors.
    ///
    /// Each vector is zipped against the variable ordering into a binding
    /// map; the result holds one objective vector per input vector, order
    /// preserved on both axes. A vector of the wrong length is an error, not
    /// a silent truncation.
    pub fn evaluate(&self, population: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ProblemError> {
        let mut results = Vec::with_capacity(population.len());
        for point in population {
            if point.len() != self.variables.len() {
                return Err(ProblemError::DimensionMismatch {
                    expected: self.variables.len(),
                    found: point.len(),
                });
            }
            let bindings: BindingMap = self
                .variables
                .iter()
                .map(|v| v.name.clone())
                .zip(point.iter().copied())
                .collect();
            let mut row = Vec::with_capacity(self.objectives.len());
            for objective in &self.objectives {
                row.push(objective.expression.evaluate(&bindings)?);
            }
            results.push(row);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{parse, ExpressionRecord};

    fn record(expression: &str, lower_bound: f64, upper_bound: f64) -> ExpressionRecord {
        ExpressionRecord {
            expression: expression.to_string(),
            lower_bound,
            upper_bound,
        }
    }

    fn example_batch() -> ParsedBatch {
        parse(&[
            record("x + y + z", -50.0, 50.0),
            record("x - z / y * 3", -33.0, 40.0),
        ])
        .unwrap()
    }

    fn example_bounds() -> HashMap<String, VariableBounds> {
        [
            ("x", 0.0, 10.0, 5.0),
            ("y", -5.0, 5.0, 0.1),
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
        .collect()
    }

    #[test]
    fn builds_variables_in_symbol_order() {
        let problem = AnalyticalProblem::new(example_batch(), &example_bounds()).unwrap();
        let names: Vec<&str> = problem.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["x", "y", "z"]);
        assert_eq!(problem.ideal(), [-50.0, -33.0]);
        assert_eq!(problem.nadir(), [50.0, 40.0]);
        assert_eq!(problem.initial_point()["z"], 17.5);
    }

    #[test]
    fn uncovered_symbol_is_rejected() {
        let mut bounds = example_bounds();
        bounds.remove("y");
        let err = AnalyticalProblem::new(example_batch(), &bounds).unwrap_err();
        assert!(matches!(err, ProblemError::MissingVariable { name } if name == "y"));
    }

    #[test]
    fn inverted_or_uncontained_bounds_are_rejected() {
        let mut bounds = example_bounds();
        bounds.insert(
            "x".to_string(),
            VariableBounds {
                lower_bound: 10.0,
                upper_bound: 0.0,
                initial_value: 5.0,
            },
        );
        assert!(matches!(
            AnalyticalProblem::new(example_batch(), &bounds),
            Err(ProblemError::InvalidBounds { .. })
        ));

        let mut bounds = example_bounds();
        bounds.insert(
            "x".to_string(),
            VariableBounds {
                lower_bound: 0.0,
                upper_bound: 10.0,
                initial_value: 11.0,
            },
        );
        assert!(matches!(
            AnalyticalProblem::new(example_batch(), &bounds),
            Err(ProblemError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn evaluates_a_population_row_per_vector() {
        let problem = AnalyticalProblem::new(example_batch(), &example_bounds()).unwrap();
        // Vectors follow the canonical symbol order: [x, y, z].
        let population = vec![vec![1.0, 2.0, 3.0], vec![5.0, 1.0, 15.0]];
        let results = problem.evaluate(&population).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], [6.0, 1.0 - 3.0 / 2.0 * 3.0]);
        assert_eq!(results[1], [21.0, 5.0 - 15.0 / 1.0 * 3.0]);
    }

    #[test]
    fn wrong_length_vector_is_rejected() {
        let problem = AnalyticalProblem::new(example_batch(), &example_bounds()).unwrap();
        let err = problem.evaluate(&[vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(
            err,
            ProblemError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
    }
}
