/// An `f64`-valued objective expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    // Binary ops.
    Add(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),

    // Unary op.
    Neg(Box<Expr>),

    // Call of a recognized function.
    Call(Function, Box<Expr>),

    // Recognized constant.
    Constant(Constant),

    // Numeric literal.
    Literal(f64),

    // Free symbol.
    Binding(BindingId),
}

/// Index into the sorted free-symbol list of a [`CompiledExpression`].
pub type BindingId = usize;

/// Functions recognized by the compiler. A call-site name that resolves to
/// one of these never contributes a free symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Abs,
    Acos,
    Asin,
    Atan,
    Ceil,
    Cos,
    Cosh,
    Exp,
    Floor,
    Ln,
    Log10,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
}

impl Function {
    /// Resolves a call-site name. `log` is the natural logarithm.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => Self::Abs,
            "acos" => Self::Acos,
            "asin" => Self::Asin,
            "atan" => Self::Atan,
            "ceil" => Self::Ceil,
            "cos" => Self::Cos,
            "cosh" => Self::Cosh,
            "exp" => Self::Exp,
            "floor" => Self::Floor,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "sin" => Self::Sin,
            "sinh" => Self::Sinh,
            "sqrt" => Self::Sqrt,
            "tan" => Self::Tan,
            "tanh" => Self::Tanh,
            _ => return None,
        })
    }

    /// Canonical spelling used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Acos => "acos",
            Self::Asin => "asin",
            Self::Atan => "atan",
            Self::Ceil => "ceil",
            Self::Cos => "cos",
            Self::Cosh => "cosh",
            Self::Exp => "exp",
            Self::Floor => "floor",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Sin => "sin",
            Self::Sinh => "sinh",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Tanh => "tanh",
        }
    }
}

/// Constants recognized by the compiler; like functions, these never
/// contribute free symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    E,
    Pi,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "e" => Some(Self::E),
            "pi" => Some(Self::Pi),
            _ => None,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::E => std::f64::consts::E,
            Self::Pi => std::f64::consts::PI,
        }
    }
}

/// A validated, compiled objective expression.
///
/// Owns the expression tree, the sorted free-symbol list and the source
/// text. Evaluation is pure: the same bindings always produce the same
/// result, and a compiled expression can be reused for any number of
/// evaluations.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    pub(crate) ast: Expr,
    pub(crate) free_symbols: Vec<String>,
    pub(crate) source: String,
}

impl CompiledExpression {
    /// The expression tree.
    pub fn tree(&self) -> &Expr {
        &self.ast
    }

    /// Free symbols in sorted lexicographic order. A binding map must cover
    /// every name listed here for evaluation to succeed.
    pub fn free_symbols(&self) -> &[String] {
        &self.free_symbols
    }

    /// The raw text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}
