//! LaTeX rendering of compiled expressions and assembled problems, used by
//! display layers to echo a problem back for user confirmation.

use crate::expression::{CompiledExpression, Constant, Expr, Function};
use crate::problem::AnalyticalProblem;

/// One typeset objective row: the `f_{i} = <expr>` formula plus its bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct TypesetObjective {
    pub formula: String,
    pub lower_bound: String,
    pub upper_bound: String,
}

/// One typeset variable row.
#[derive(Clone, Debug, PartialEq)]
pub struct TypesetVariable {
    pub symbol: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub initial_value: f64,
}

impl CompiledExpression {
    /// Renders the expression tree as LaTeX.
    pub fn to_latex(&self) -> String {
        latex_recursive(&self.ast, &self.free_symbols)
    }
}

/// Renders every objective and variable of `problem`, in problem order.
pub fn typeset_problem(
    problem: &AnalyticalProblem,
) -> (Vec<TypesetObjective>, Vec<TypesetVariable>) {
    let objectives = problem
        .objectives()
        .iter()
        .enumerate()
        .map(|(index, objective)| TypesetObjective {
            formula: format!(
                "f_{{{}}} = {}",
                index + 1,
                objective.expression.to_latex()
            ),
            lower_bound: objective.lower_bound.to_string(),
            upper_bound: objective.upper_bound.to_string(),
        })
        .collect();

    let variables = problem
        .variables()
        .iter()
        .map(|variable| TypesetVariable {
            symbol: variable.name.clone(),
            lower_bound: variable.bounds.lower_bound,
            upper_bound: variable.bounds.upper_bound,
            initial_value: variable.bounds.initial_value,
        })
        .collect();

    (objectives, variables)
}

/// Binding strength used to decide where parentheses are required.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(..) | Expr::Sub(..) => 1,
        Expr::Mul(..) | Expr::Div(..) | Expr::Neg(..) => 2,
        Expr::Pow(..) => 3,
        Expr::Call(..) | Expr::Constant(_) | Expr::Literal(_) | Expr::Binding(_) => 4,
    }
}

fn latex_recursive(expr: &Expr, symbols: &[String]) -> String {
    match expr {
        Expr::Add(lhs, rhs) => format!(
            "{} + {}",
            latex_recursive(lhs, symbols),
            latex_recursive(rhs, symbols)
        ),
        Expr::Sub(lhs, rhs) => format!(
            "{} - {}",
            latex_recursive(lhs, symbols),
            group(rhs, 2, symbols)
        ),
        Expr::Mul(lhs, rhs) => format!(
            "{} \\cdot {}",
            group(lhs, 2, symbols),
            group(rhs, 2, symbols)
        ),
        // `\frac` carries its own grouping.
        Expr::Div(num, den) => format!(
            "\\frac{{{}}}{{{}}}",
            latex_recursive(num, symbols),
            latex_recursive(den, symbols)
        ),
        Expr::Pow(base, exponent) => format!(
            "{}^{{{}}}",
            group(base, 4, symbols),
            latex_recursive(exponent, symbols)
        ),
        Expr::Neg(only) => format!("-{}", group(only, 2, symbols)),
        Expr::Call(function, arg) => function_latex(*function, &latex_recursive(arg, symbols)),
        Expr::Constant(Constant::Pi) => "\\pi".to_string(),
        Expr::Constant(Constant::E) => "e".to_string(),
        Expr::Literal(value) => value.to_string(),
        Expr::Binding(binding) => symbols[*binding].clone(),
    }
}

fn group(expr: &Expr, min_precedence: u8, symbols: &[String]) -> String {
    let rendered = latex_recursive(expr, symbols);
    if precedence(expr) < min_precedence {
        format!("\\left({rendered}\\right)")
    } else {
        rendered
    }
}

fn function_latex(function: Function, arg: &str) -> String {
    let command = match function {
        Function::Sqrt => return format!("\\sqrt{{{arg}}}"),
        Function::Abs => return format!("\\left|{arg}\\right|"),
        Function::Floor => return format!("\\lfloor {arg} \\rfloor"),
        Function::Ceil => return format!("\\lceil {arg} \\rceil"),
        Function::Log10 => return format!("\\log_{{10}}\\left({arg}\\right)"),
        Function::Asin => "\\arcsin",
        Function::Acos => "\\arccos",
        Function::Atan => "\\arctan",
        Function::Sin => "\\sin",
        Function::Cos => "\\cos",
        Function::Tan => "\\tan",
        Function::Sinh => "\\sinh",
        Function::Cosh => "\\cosh",
        Function::Tanh => "\\tanh",
        Function::Exp => "\\exp",
        Function::Ln => "\\ln",
    };
    format!("{command}\\left({arg}\\right)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{parse, ExpressionRecord};
    use crate::problem::VariableBounds;
    use std::collections::HashMap;

    fn latex_of(text: &str) -> String {
        CompiledExpression::compile(text).unwrap().to_latex()
    }

    #[test]
    fn division_renders_as_frac() {
        assert_eq!(latex_of("y / z"), "\\frac{y}{z}");
        assert_eq!(latex_of("y / z - 1"), "\\frac{y}{z} - 1");
    }

    #[test]
    fn constants_and_functions_render_as_commands() {
        assert_eq!(latex_of("cos(x*pi)"), "\\cos\\left(x \\cdot \\pi\\right)");
        assert_eq!(latex_of("sqrt(z)"), "\\sqrt{z}");
    }

    #[test]
    fn lower_precedence_subtrees_are_parenthesized() {
        assert_eq!(latex_of("(x + y) * z"), "\\left(x + y\\right) \\cdot z");
        assert_eq!(latex_of("x - (y - z)"), "x - \\left(y - z\\right)");
        assert_eq!(latex_of("(x + y) ** 2"), "\\left(x + y\\right)^{2}");
        assert_eq!(latex_of("x ** 2"), "x^{2}");
    }

    #[test]
    fn problem_rows_follow_problem_order() {
        let batch = parse(&[
            ExpressionRecord {
                expression: "x + y".to_string(),
                lower_bound: 0.0,
                upper_bound: 5.0,
            },
            ExpressionRecord {
                expression: "y / x".to_string(),
                lower_bound: 33.0,
                upper_bound: 40.0,
            },
        ])
        .unwrap();
        let bounds: HashMap<String, VariableBounds> = ["x", "y"]
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    VariableBounds {
                        lower_bound: 0.0,
                        upper_bound: 1.0,
                        initial_value: 0.5,
                    },
                )
            })
            .collect();
        let problem = AnalyticalProblem::new(batch, &bounds).unwrap();

        let (objectives, variables) = typeset_problem(&problem);
        assert_eq!(objectives[0].formula, "f_{1} = x + y");
        assert_eq!(objectives[1].formula, "f_{2} = \\frac{y}{x}");
        assert_eq!(objectives[1].lower_bound, "33");
        let symbols: Vec<&str> = variables.iter().map(|v| v.symbol.as_str()).collect();
        assert_eq!(symbols, ["x", "y"]);
    }
}
