use crate::ast::{BinOp, Expr, Func};
use crate::error::{EvalError, EvalResult};

/// Variable values available during evaluation.
pub trait Bindings {
    /// The value of `name`, if bound.
    fn lookup(&self, name: &str) -> Option<f64>;
}

/// No variables at all.
impl Bindings for () {
    fn lookup(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// A single variable.
impl Bindings for (&str, f64) {
    fn lookup(&self, name: &str) -> Option<f64> {
        (name == self.0).then_some(self.1)
    }
}

impl Func {
    /// Apply the function to a real argument. May return NaN or ±∞.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Sec => x.cos().recip(),
            Func::Csc => x.sin().recip(),
            Func::Cot => x.tan().recip(),
            Func::Asin => x.asin(),
            Func::Acos => x.acos(),
            Func::Atan => x.atan(),
            Func::Sinh => x.sinh(),
            Func::Cosh => x.cosh(),
            Func::Tanh => x.tanh(),
            Func::Sqrt => x.sqrt(),
            Func::Cbrt => x.cbrt(),
            Func::Exp => x.exp(),
            Func::Ln | Func::Log => x.ln(),
            Func::Log10 => x.log10(),
            Func::Log2 => x.log2(),
            Func::Abs => x.abs(),
            Func::Floor => x.floor(),
            Func::Ceil => x.ceil(),
            Func::Sign => {
                if x == 0.0 {
                    0.0
                } else {
                    x.signum()
                }
            }
        }
    }
}

impl Expr {
    /// Evaluate with the given variable values.
    ///
    /// Intermediate infinities are allowed (so `1/inf` is 0); the final
    /// result must be a finite real number.
    pub fn evaluate(&self, bindings: &impl Bindings) -> EvalResult<f64> {
        let value = self.eval(bindings)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::Domain(format!("{self} is not a finite number")))
        }
    }

    fn eval(&self, bindings: &impl Bindings) -> EvalResult<f64> {
        match self {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Constant(constant) => Ok(constant.value()),
            Expr::Variable(name) => bindings
                .lookup(name)
                .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
            Expr::Group(inner) => inner.eval(bindings),
            Expr::Neg(inner) => Ok(-inner.eval(bindings)?),
            Expr::Binary { op, lhs, rhs } => {
                let a = lhs.eval(bindings)?;
                let b = rhs.eval(bindings)?;
                let value = match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul | BinOp::ImplicitMul => a * b,
                    BinOp::Div => {
                        if b == 0.0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        a / b
                    }
                    BinOp::Pow => a.powf(b),
                };
                if value.is_nan() {
                    return Err(EvalError::Domain(format!("{self} is undefined")));
                }
                Ok(value)
            }
            Expr::Call { func, arg } => {
                let x = arg.eval(bindings)?;
                let value = func.apply(x);
                if value.is_nan() {
                    return Err(EvalError::Domain(format!(
                        "{} is undefined at {x}",
                        func.name()
                    )));
                }
                Ok(value)
            }
        }
    }
}
