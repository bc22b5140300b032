use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use std::ops::Range;

use crate::ast::{BinOp, Constant, Expr, Func};
use crate::error::SyntaxError;
use crate::lexer::Token;

type Span = SimpleSpan;

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn negate(expr: Expr) -> Expr {
    Expr::Neg(Box::new(expr))
}

/// Turn a name (and an optional parenthesized argument) into a call,
/// constant, or variable.
fn resolve_name<'a>(name: String, arg: Option<Expr>, span: Span) -> Result<Expr, Rich<'a, Token>> {
    if let Some(func) = Func::from_name(&name) {
        return match arg {
            Some(arg) => Ok(Expr::Call {
                func,
                arg: Box::new(arg),
            }),
            None => Err(Rich::custom(
                span,
                format!("{name} needs an argument in parentheses"),
            )),
        };
    }
    if arg.is_some() {
        return Err(Rich::custom(span, format!("{name} is not a function")));
    }
    Ok(match Constant::from_name(&name) {
        Some(constant) => Expr::Constant(constant),
        None => Expr::Variable(name),
    })
}

/// Build the expression parser.
///
/// Precedence from loosest to tightest: `+ -`, then `* /` and juxtaposition,
/// then unary minus, then right-associative `^`.
fn expression_parser<'a, I>() -> impl Parser<'a, I, Expr, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    recursive(|expr| {
        let number = select! { Token::Number(value, raw) => Expr::Number { value, raw } }
            .labelled("number");
        let symbol = select! {
            Token::Pi => Expr::Constant(Constant::Pi),
            Token::Infinity => Expr::Constant(Constant::Infinity),
        };
        let ident = select! { Token::Ident(name) => name }.labelled("name");

        let group = expr.delimited_by(just(Token::LParen), just(Token::RParen));

        let named = ident
            .then(group.clone().or_not())
            .try_map(|(name, arg), span| resolve_name(name, arg, span));

        let atom = choice((
            number,
            symbol,
            named,
            group.map(|inner| Expr::Group(Box::new(inner))),
        ))
        .labelled("operand");

        // x^-2 and x^--2 are allowed; the sign binds to the exponent.
        let power = recursive(|power| {
            let exponent = just(Token::Minus)
                .repeated()
                .foldr(power, |_, e| negate(e));
            atom.then(just(Token::Caret).ignore_then(exponent).or_not())
                .map(|(base, exponent)| match exponent {
                    Some(exponent) => binary(BinOp::Pow, base, exponent),
                    None => base,
                })
        });

        let unary = choice((just(Token::Minus).to(true), just(Token::Plus).to(false)))
            .repeated()
            .foldr(power.clone(), |minus, e| if minus { negate(e) } else { e });

        let product_op = choice((
            just(Token::Star).to(BinOp::Mul),
            just(Token::Slash).to(BinOp::Div),
        ));
        let product = unary.clone().foldl(
            choice((
                product_op.then(unary),
                power.map(|rhs| (BinOp::ImplicitMul, rhs)),
            ))
            .repeated(),
            |lhs, (op, rhs)| binary(op, lhs, rhs),
        );

        let sum_op = choice((
            just(Token::Plus).to(BinOp::Add),
            just(Token::Minus).to(BinOp::Sub),
        ));
        product
            .clone()
            .foldl(sum_op.then(product).repeated(), |lhs, (op, rhs)| {
                binary(op, lhs, rhs)
            })
            .labelled("expression")
    })
    .then_ignore(end())
}

/// Parse a token stream into an expression tree.
pub fn parse(tokens: &[(Token, Range<usize>)]) -> Result<Expr, Vec<SyntaxError>> {
    let token_iter = tokens
        .iter()
        .map(|(tok, span)| (tok.clone(), Span::from(span.clone())));

    let len = tokens.last().map_or(0, |(_, s)| s.end);
    let eoi: Span = (len..len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let (output, errors) = expression_parser().parse(stream).into_output_errors();

    if let Some(expr) = output
        && errors.is_empty()
    {
        return Ok(expr);
    }

    Err(errors
        .into_iter()
        .map(|e| SyntaxError {
            span: e.span().into_range(),
            message: e.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_source(source: &str) -> Result<Expr, Vec<SyntaxError>> {
        let (tokens, lex_errors) = lexer::lex(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        parse(&tokens)
    }

    fn shape(source: &str) -> String {
        fn walk(e: &Expr) -> String {
            match e {
                Expr::Number { raw, .. } => raw.clone(),
                Expr::Constant(c) => format!("{c:?}"),
                Expr::Variable(v) => v.clone(),
                Expr::Group(inner) => format!("({})", walk(inner)),
                Expr::Neg(inner) => format!("neg[{}]", walk(inner)),
                Expr::Binary { op, lhs, rhs } => {
                    format!("{op:?}[{}, {}]", walk(lhs), walk(rhs))
                }
                Expr::Call { func, arg } => format!("{}[{}]", func.name(), walk(arg)),
            }
        }
        walk(&parse_source(source).unwrap())
    }

    #[test]
    fn parse_precedence() {
        assert_eq!(shape("1 + 2 * 3"), "Add[1, Mul[2, 3]]");
        assert_eq!(shape("1 - 2 - 3"), "Sub[Sub[1, 2], 3]");
        assert_eq!(shape("8 / 4 / 2"), "Div[Div[8, 4], 2]");
    }

    #[test]
    fn parse_power_is_right_associative() {
        assert_eq!(shape("2^3^2"), "Pow[2, Pow[3, 2]]");
    }

    #[test]
    fn parse_unary_minus_binds_looser_than_power() {
        assert_eq!(shape("-x^2"), "neg[Pow[x, 2]]");
        assert_eq!(shape("x^-1"), "Pow[x, neg[1]]");
        assert_eq!(shape("2 * -x"), "Mul[2, neg[x]]");
        assert_eq!(shape("+x"), "x");
    }

    #[test]
    fn parse_implicit_multiplication() {
        assert_eq!(shape("2x"), "ImplicitMul[2, x]");
        assert_eq!(shape("3x^2"), "ImplicitMul[3, Pow[x, 2]]");
        assert_eq!(shape("2(x+1)"), "ImplicitMul[2, (Add[x, 1])]");
        assert_eq!(shape("(x-1)(x+1)"), "ImplicitMul[(Sub[x, 1]), (Add[x, 1])]");
        assert_eq!(shape("2 - x"), "Sub[2, x]");
    }

    #[test]
    fn parse_functions_and_constants() {
        assert_eq!(shape("sin(x)/x"), "Div[sin[x], x]");
        assert_eq!(shape("2pi"), "ImplicitMul[2, Pi]");
        assert_eq!(shape("π"), "Pi");
        assert_eq!(shape("e^x"), "Pow[E, x]");
        assert_eq!(shape("-∞"), "neg[Infinity]");
        assert_eq!(shape("Infinity"), "Infinity");
        assert_eq!(shape("sqrt(x+1) - 1"), "Sub[sqrt[Add[x, 1]], 1]");
    }

    #[test]
    fn parse_keeps_written_parentheses() {
        assert_eq!(shape("((x))"), "((x))");
    }

    #[test]
    fn parse_rejects_call_on_non_function() {
        let errors = parse_source("f(x)").unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn parse_rejects_function_without_argument() {
        assert!(parse_source("sin x").is_err());
        assert!(parse_source("sqrt").is_err());
    }

    #[test]
    fn parse_rejects_incomplete_input() {
        assert!(parse_source("").is_err());
        assert!(parse_source("x +").is_err());
        assert!(parse_source("(x + 1").is_err());
        assert!(parse_source("x + 1)").is_err());
        assert!(parse_source("* x").is_err());
    }

    #[test]
    fn parse_errors_carry_spans() {
        let errors = parse_source("x + )").unwrap_err();
        assert!(errors.iter().all(|e| e.span.start >= 2 && e.span.end <= 5));
    }
}
