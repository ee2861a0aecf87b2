use std::collections::{BTreeMap, BTreeSet};

use crate::error::ParseError;
use crate::expression::{CompiledExpression, Constant, Expr, Function};

use once_cell::sync::Lazy;
use pest::iterators::{Pair, Pairs};
use pest::{prec_climber::*, Parser};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"] // relative to project `src`
struct ExpressionParser;

/// Admission cap on raw expression text; longer input is rejected before
/// the grammar sees it.
pub const MAX_EXPRESSION_LEN: usize = 4096;

/// Checks that `text` matches the expression grammar in its entirety.
///
/// The validator and the compiler share this one grammar, so text admitted
/// here can only fail compilation for semantic reasons (an unknown function
/// name), never for shape.
pub fn validate(text: &str) -> Result<(), ParseError> {
    parse_calculation(text).map(|_| ())
}

/// Free symbols of `text` as a name-to-unset-placeholder map, ready to be
/// filled in by a caller gathering one value per variable.
///
/// Built on the compiler's own symbol extraction, so the set reported here
/// is always exactly the set the evaluator will require.
pub fn free_symbols_of(text: &str) -> Result<BTreeMap<String, Option<f64>>, ParseError> {
    let compiled = CompiledExpression::compile(text)?;
    Ok(compiled
        .free_symbols
        .iter()
        .map(|name| (name.clone(), None))
        .collect())
}

fn parse_calculation(text: &str) -> Result<Pairs<'_, Rule>, ParseError> {
    if text.len() > MAX_EXPRESSION_LEN {
        return Err(ParseError::TooLong {
            limit: MAX_EXPRESSION_LEN,
        });
    }
    ExpressionParser::parse(Rule::calculation, text).map_err(|e| ParseError::InvalidExpression {
        text: text.to_string(),
        source: Box::new(e),
    })
}

impl CompiledExpression {
    /// Compiles `text` into an evaluable expression.
    ///
    /// Variable names encountered during parsing are replaced by positional
    /// [`crate::BindingId`]s into the sorted free-symbol list, which lets
    /// the compiled expression be evaluated against many different binding
    /// maps without re-resolving names.
    pub fn compile(text: &str) -> Result<Self, ParseError> {
        let pairs = parse_calculation(text)?;
        let free_symbols = free_symbol_names(pairs.clone());
        let ast = climb_recursive(pairs, text, &free_symbols)?;
        tracing::trace!(source = text, symbols = ?free_symbols, "compiled expression");
        Ok(Self {
            ast,
            free_symbols,
            source: text.to_string(),
        })
    }
}

/// Every `variable` occurrence that is not a recognized constant,
/// deduplicated and sorted lexicographically.
fn free_symbol_names(pairs: Pairs<'_, Rule>) -> Vec<String> {
    let unique: BTreeSet<&str> = pairs
        .flatten()
        .filter(|p| p.as_rule() == Rule::variable)
        .map(|p| p.as_str())
        .filter(|name| Constant::from_name(name).is_none())
        .collect();
    unique.into_iter().map(str::to_string).collect()
}

static PRECEDENCE_CLIMBER: Lazy<PrecClimber<Rule>> = Lazy::new(|| {
    use Assoc::*;
    use Rule::*;

    PrecClimber::new(vec![
        Operator::new(add, Left) | Operator::new(subtract, Left),
        Operator::new(multiply, Left) | Operator::new(divide, Left),
        Operator::new(power, Right),
    ])
});

fn climb_recursive(
    input: Pairs<'_, Rule>,
    text: &str,
    symbols: &[String],
) -> Result<Expr, ParseError> {
    PRECEDENCE_CLIMBER.climb(
        input,
        |pair: Pair<'_, Rule>| match pair.as_rule() {
            Rule::expr => climb_recursive(pair.into_inner(), text, symbols),
            Rule::number => {
                let literal = pair.as_str();
                literal
                    .parse::<f64>()
                    .map(Expr::Literal)
                    .map_err(|_| ParseError::BadLiteral {
                        text: text.to_string(),
                        literal: literal.to_string(),
                    })
            }
            Rule::unary_expr => {
                let mut inner = pair.into_inner();
                let unary = inner.next().unwrap();
                match unary.as_rule() {
                    Rule::neg => Ok(Expr::Neg(Box::new(climb_recursive(
                        inner, text, symbols,
                    )?))),
                    x => panic!("Unexpected unary operator: {x:?}"),
                }
            }
            Rule::variable => {
                let name = pair.as_str();
                if let Some(constant) = Constant::from_name(name) {
                    return Ok(Expr::Constant(constant));
                }
                // The symbol list was collected from this same parse.
                match symbols.binary_search_by(|s| s.as_str().cmp(name)) {
                    Ok(id) => Ok(Expr::Binding(id)),
                    Err(_) => unreachable!("uncollected symbol {name}"),
                }
            }
            Rule::call => {
                let mut inner = pair.into_inner();
                let name = inner.next().unwrap().as_str();
                let function = match Function::from_name(name) {
                    Some(function) => function,
                    None => {
                        return Err(ParseError::UnknownFunction {
                            text: text.to_string(),
                            name: name.to_string(),
                        })
                    }
                };
                let mut args = inner.collect::<Vec<_>>();
                if args.len() != 1 {
                    return Err(ParseError::BadArity {
                        text: text.to_string(),
                        name: name.to_string(),
                        found: args.len(),
                    });
                }
                let arg = climb_recursive(args.remove(0).into_inner(), text, symbols)?;
                Ok(Expr::Call(function, Box::new(arg)))
            }
            x => panic!("Unexpected primary rule {x:?}"),
        },
        |lhs: Result<Expr, ParseError>, op: Pair<'_, Rule>, rhs: Result<Expr, ParseError>| {
            let (lhs, rhs) = (Box::new(lhs?), Box::new(rhs?));
            Ok(match op.as_rule() {
                Rule::add => Expr::Add(lhs, rhs),
                Rule::subtract => Expr::Sub(lhs, rhs),
                Rule::multiply => Expr::Mul(lhs, rhs),
                Rule::divide => Expr::Div(lhs, rhs),
                Rule::power => Expr::Pow(lhs, rhs),
                x => panic!("Unexpected operator {x:?}"),
            })
        },
    )
}
