use std::collections::BTreeSet;

use crate::error::{EvalError, ParseError};
use crate::evaluate::BindingMap;
use crate::expression::CompiledExpression;
use crate::parse::validate;

/// One objective as submitted: expression text plus its objective bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionRecord {
    pub expression: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// One compiled objective with the bounds carried through from its record.
#[derive(Clone, Debug)]
pub struct Objective {
    pub expression: CompiledExpression,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// The objective bundle produced from a batch of records.
#[derive(Clone, Debug)]
pub struct ParsedBatch {
    pub(crate) objectives: Vec<Objective>,
    pub(crate) symbols: Vec<String>,
    pub(crate) records: Vec<ExpressionRecord>,
}

impl ParsedBatch {
    /// Compiled objectives in record order.
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// The union of every objective's free symbols, deduplicated and sorted
    /// lexicographically. Downstream variable-bound forms are generated
    /// positionally from this list.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The records this batch was parsed from, in submission order.
    pub fn records(&self) -> &[ExpressionRecord] {
        &self.records
    }

    /// Evaluates every objective at one point, in objective order.
    pub fn evaluate(&self, bindings: &BindingMap) -> Result<Vec<f64>, EvalError> {
        self.objectives
            .iter()
            .map(|objective| objective.expression.evaluate(bindings))
            .collect()
    }
}

/// Parses an ordered batch of records into an objective bundle.
///
/// Admission runs over the whole batch before any compilation begins, and
/// the batch is all-or-nothing: N records yield exactly N objectives or the
/// first error is propagated. An empty batch is vacuously valid and yields
/// an empty bundle.
pub fn parse(records: &[ExpressionRecord]) -> Result<ParsedBatch, ParseError> {
    for record in records {
        validate(&record.expression)?;
        tracing::debug!(expression = record.expression.as_str(), "valid expression");
    }

    let mut objectives = Vec::with_capacity(records.len());
    let mut unique_symbols = BTreeSet::new();
    for record in records {
        let compiled = CompiledExpression::compile(&record.expression)?;
        unique_symbols.extend(compiled.free_symbols().iter().cloned());
        objectives.push(Objective {
            expression: compiled,
            lower_bound: record.lower_bound,
            upper_bound: record.upper_bound,
        });
    }

    Ok(ParsedBatch {
        objectives,
        symbols: unique_symbols.into_iter().collect(),
        records: records.to_vec(),
    })
}
