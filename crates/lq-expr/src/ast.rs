use std::collections::BTreeSet;
use std::fmt;

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal with the text it was written as.
    Number {
        /// Parsed value.
        value: f64,
        /// Source text, e.g. `0.50`.
        raw: String,
    },
    /// A named constant.
    Constant(Constant),
    /// A free variable.
    Variable(String),
    /// A parenthesized sub-expression, kept so output matches the input.
    Group(Box<Expr>),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// The operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Function application, e.g. `sin(x)`.
    Call {
        /// The function.
        func: Func,
        /// Its argument.
        arg: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// Juxtaposition, as in `2x`.
    ImplicitMul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number.
    E,
    /// ∞
    Infinity,
}

impl Constant {
    /// Look up a constant by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            "inf" | "infinity" | "Infinity" => Some(Constant::Infinity),
            _ => None,
        }
    }

    /// Numeric value.
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::Infinity => f64::INFINITY,
        }
    }
}

macro_rules! functions {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Built-in functions of one argument.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Func {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl Func {
            /// Every built-in function.
            pub const ALL: &'static [Func] = &[$(Func::$variant),+];

            /// Look up a function by name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Func::$variant),)+
                    _ => None,
                }
            }

            /// The name it is written with.
            pub fn name(self) -> &'static str {
                match self {
                    $(Func::$variant => $name,)+
                }
            }
        }
    };
}

functions! {
    Sin => "sin",
    Cos => "cos",
    Tan => "tan",
    Sec => "sec",
    Csc => "csc",
    Cot => "cot",
    Asin => "asin",
    Acos => "acos",
    Atan => "atan",
    Sinh => "sinh",
    Cosh => "cosh",
    Tanh => "tanh",
    Sqrt => "sqrt",
    Cbrt => "cbrt",
    Exp => "exp",
    Ln => "ln",
    Log => "log",
    Log10 => "log10",
    Log2 => "log2",
    Abs => "abs",
    Floor => "floor",
    Ceil => "ceil",
    Sign => "sign",
}

impl Expr {
    /// Distinct variable names, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Number { .. } | Expr::Constant(_) => {}
            Expr::Variable(name) => {
                names.insert(name);
            }
            Expr::Group(inner) | Expr::Neg(inner) => inner.collect_variables(names),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Call { arg, .. } => arg.collect_variables(names),
        }
    }

    /// Strip one layer of written parentheses.
    pub fn ungrouped(&self) -> &Expr {
        match self {
            Expr::Group(inner) => inner,
            other => other,
        }
    }
}

/// Plain ASCII rendering that parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { raw, .. } => write!(f, "{raw}"),
            Expr::Constant(Constant::Pi) => write!(f, "pi"),
            Expr::Constant(Constant::E) => write!(f, "e"),
            Expr::Constant(Constant::Infinity) => write!(f, "inf"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Group(inner) => write!(f, "({inner})"),
            Expr::Neg(inner) => write!(f, "-{inner}"),
            Expr::Binary { op, lhs, rhs } => match op {
                BinOp::Add => write!(f, "{lhs} + {rhs}"),
                BinOp::Sub => write!(f, "{lhs} - {rhs}"),
                BinOp::Mul => write!(f, "{lhs} * {rhs}"),
                BinOp::ImplicitMul => write!(f, "{lhs} {rhs}"),
                BinOp::Div => write!(f, "{lhs} / {rhs}"),
                BinOp::Pow => write!(f, "{lhs}^{rhs}"),
            },
            Expr::Call { func, arg } => write!(f, "{}({arg})", func.name()),
        }
    }
}
