//! Unicode rendering for terminals: `x²`, `√x`, `π`, `∞`, `·`.

use crate::ast::{BinOp, Constant, Expr, Func};

/// Render an expression tree with Unicode math symbols.
pub fn to_pretty(expr: &Expr) -> String {
    match expr {
        Expr::Number { raw, .. } => raw.clone(),
        Expr::Constant(Constant::Pi) => "π".to_string(),
        Expr::Constant(Constant::E) => "e".to_string(),
        Expr::Constant(Constant::Infinity) => "∞".to_string(),
        Expr::Variable(name) => name.clone(),
        Expr::Group(inner) => format!("({})", to_pretty(inner)),
        Expr::Neg(inner) => format!("−{}", to_pretty(inner)),
        Expr::Binary { op, lhs, rhs } => {
            let (l, r) = (to_pretty(lhs), to_pretty(rhs));
            match op {
                BinOp::Add => format!("{l} + {r}"),
                BinOp::Sub => format!("{l} − {r}"),
                BinOp::Mul => format!("{l}·{r}"),
                BinOp::ImplicitMul => {
                    let digits_meet = l.ends_with(|c: char| c.is_ascii_digit())
                        && r.starts_with(|c: char| c.is_ascii_digit() || c == '.');
                    if digits_meet {
                        format!("{l}·{r}")
                    } else {
                        format!("{l}{r}")
                    }
                }
                BinOp::Div => format!("{l}/{r}"),
                BinOp::Pow => match superscript(rhs) {
                    Some(sup) => format!("{l}{sup}"),
                    None => format!("{l}^{r}"),
                },
            }
        }
        Expr::Call { func, arg } => {
            let inner = to_pretty(arg);
            match func {
                Func::Sqrt | Func::Cbrt => {
                    let radical = if *func == Func::Sqrt { '√' } else { '∛' };
                    if is_atomic(arg) {
                        format!("{radical}{inner}")
                    } else {
                        format!("{radical}({inner})")
                    }
                }
                Func::Abs => format!("|{inner}|"),
                _ => format!("{}({inner})", func.name()),
            }
        }
    }
}

fn is_atomic(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Number { .. } | Expr::Constant(_) | Expr::Variable(_) | Expr::Group(_)
    )
}

/// Integer exponents (optionally negative) as superscript digits.
fn superscript(exponent: &Expr) -> Option<String> {
    let (sign, raw) = match exponent {
        Expr::Number { raw, .. } => ("", raw),
        Expr::Neg(inner) => match inner.as_ref() {
            Expr::Number { raw, .. } => ("⁻", raw),
            _ => return None,
        },
        _ => return None,
    };

    let digits: Option<String> = raw
        .chars()
        .map(|c| match c {
            '0' => Some('⁰'),
            '1' => Some('¹'),
            '2' => Some('²'),
            '3' => Some('³'),
            '4' => Some('⁴'),
            '5' => Some('⁵'),
            '6' => Some('⁶'),
            '7' => Some('⁷'),
            '8' => Some('⁸'),
            '9' => Some('⁹'),
            _ => None,
        })
        .collect();
    digits.map(|d| format!("{sign}{d}"))
}
