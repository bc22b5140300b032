//! LaTeX rendering.
//!
//! Written parentheses are kept as `\left(…\right)`; no extra parentheses
//! are introduced, so the output mirrors what the author typed.

use crate::ast::{BinOp, Constant, Expr, Func};

/// Render an expression tree as LaTeX.
pub fn to_tex(expr: &Expr) -> String {
    let mut out = String::new();
    write_tex(expr, &mut out);
    out
}

fn write_tex(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Number { raw, .. } => out.push_str(raw),
        Expr::Constant(Constant::Pi) => out.push_str("\\pi"),
        Expr::Constant(Constant::E) => out.push('e'),
        Expr::Constant(Constant::Infinity) => out.push_str("\\infty"),
        Expr::Variable(name) if name.chars().count() > 1 => {
            out.push_str("\\mathrm{");
            out.push_str(name);
            out.push('}');
        }
        Expr::Variable(name) => out.push_str(name),
        Expr::Group(inner) => {
            out.push_str("\\left(");
            write_tex(inner, out);
            out.push_str("\\right)");
        }
        Expr::Neg(inner) => {
            out.push('-');
            write_tex(inner, out);
        }
        Expr::Binary { op, lhs, rhs } => match op {
            BinOp::Div => {
                out.push_str("\\frac{");
                write_tex(lhs, out);
                out.push_str("}{");
                write_tex(rhs, out);
                out.push('}');
            }
            BinOp::Pow => {
                out.push('{');
                write_tex(lhs, out);
                out.push_str("}^{");
                write_tex(rhs, out);
                out.push('}');
            }
            _ => {
                write_tex(lhs, out);
                out.push_str(match op {
                    BinOp::Add => "+",
                    BinOp::Sub => "-",
                    BinOp::Mul => "\\cdot",
                    _ => "~",
                });
                let mut right = String::new();
                write_tex(rhs, &mut right);
                // A letter right after a control word would extend its name.
                if out.ends_with("\\cdot") && right.starts_with(|c: char| c.is_ascii_alphabetic()) {
                    out.push(' ');
                }
                out.push_str(&right);
            }
        },
        Expr::Call { func, arg } => write_call(*func, arg, out),
    }
}

fn write_call(func: Func, arg: &Expr, out: &mut String) {
    let wrap = |open: &str, close: &str, out: &mut String| {
        out.push_str(open);
        write_tex(arg, out);
        out.push_str(close);
    };

    match func {
        Func::Sqrt => wrap("\\sqrt{", "}", out),
        Func::Cbrt => wrap("\\sqrt[3]{", "}", out),
        Func::Abs => wrap("\\left|", "\\right|", out),
        Func::Floor => wrap("\\left\\lfloor", "\\right\\rfloor", out),
        Func::Ceil => wrap("\\left\\lceil", "\\right\\rceil", out),
        _ => {
            out.push_str(match func {
                Func::Asin => "\\arcsin",
                Func::Acos => "\\arccos",
                Func::Atan => "\\arctan",
                Func::Log10 => "\\log_{10}",
                Func::Log2 => "\\log_{2}",
                Func::Sign => "\\mathrm{sign}",
                Func::Sin => "\\sin",
                Func::Cos => "\\cos",
                Func::Tan => "\\tan",
                Func::Sec => "\\sec",
                Func::Csc => "\\csc",
                Func::Cot => "\\cot",
                Func::Sinh => "\\sinh",
                Func::Cosh => "\\cosh",
                Func::Tanh => "\\tanh",
                Func::Exp => "\\exp",
                Func::Ln => "\\ln",
                _ => "\\log",
            });
            wrap("\\left(", "\\right)", out);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::typeset;

    #[test]
    fn fraction_keeps_parentheses() {
        assert_eq!(
            typeset("(x^2 - 1)/(x - 1)"),
            "\\frac{\\left({x}^{2}-1\\right)}{\\left(x-1\\right)}"
        );
    }

    #[test]
    fn functions() {
        assert_eq!(typeset("sin(x)/x"), "\\frac{\\sin\\left(x\\right)}{x}");
        assert_eq!(typeset("sqrt(x+1)"), "\\sqrt{x+1}");
        assert_eq!(typeset("abs(x)"), "\\left|x\\right|");
        assert_eq!(typeset("asin(x)"), "\\arcsin\\left(x\\right)");
        assert_eq!(typeset("log10(x)"), "\\log_{10}\\left(x\\right)");
    }

    #[test]
    fn constants_and_products() {
        assert_eq!(typeset("2*pi"), "2\\cdot\\pi");
        assert_eq!(typeset("3x"), "3~x");
        assert_eq!(typeset("-∞"), "-\\infty");
        assert_eq!(typeset("e^-x"), "{e}^{-x}");
    }

    #[test]
    fn multi_letter_variables_are_upright() {
        assert_eq!(typeset("rate*t"), "\\mathrm{rate}\\cdot t");
    }

    #[test]
    fn invalid_input_is_returned_unchanged() {
        assert_eq!(typeset("x +"), "x +");
        assert_eq!(typeset("f(x)"), "f(x)");
        assert_eq!(typeset("1 $ 2"), "1 $ 2");
    }

    #[test]
    fn snapshot_of_a_typical_question() {
        insta::assert_snapshot!(
            typeset("(1 - cos(x))/x^2"),
            @r"\frac{\left(1-\cos\left(x\right)\right)}{{x}^{2}}"
        );
    }
}
