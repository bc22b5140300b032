//! Limit points and a numeric approach table.
//!
//! The table only illustrates how `f` behaves near the point. It is a
//! preview for authors and players and is never used to grade answers.

use std::fmt;

use crate::ast::{Constant, Expr};
use crate::error::{ExprError, ExprResult};
use crate::plot::Ordinate;
use crate::Expression;

/// Step sizes (or magnitudes, for infinite points) used by [`approach`].
const EXPONENTS: [i32; 6] = [1, 2, 3, 4, 5, 6];

/// Relative tolerance for "the last values agree".
const TOLERANCE: f64 = 1e-4;

/// Magnitude from which fast-growing values are read as divergence.
const DIVERGENCE: f64 = 100.0;

/// Where the variable tends to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitPoint {
    /// A real number.
    Finite(f64),
    /// +∞
    PosInfinity,
    /// −∞
    NegInfinity,
}

impl LimitPoint {
    /// Read a limit point: any constant expression (`0`, `pi/2`, `-1/3`)
    /// or a signed infinity (`∞`, `-inf`, `+Infinity`).
    pub fn parse(text: &str) -> ExprResult<Self> {
        let expression = Expression::parse(text)?;
        if let Some(name) = expression.ast().variables().into_iter().next() {
            return Err(ExprError::NotConstant(name.to_string()));
        }

        match infinity_sign(expression.ast()) {
            Some(true) => Ok(LimitPoint::PosInfinity),
            Some(false) => Ok(LimitPoint::NegInfinity),
            None => Ok(LimitPoint::Finite(expression.ast().evaluate(&())?)),
        }
    }

    /// Whether this is ±∞.
    pub fn is_infinite(self) -> bool {
        !matches!(self, LimitPoint::Finite(_))
    }
}

/// `Some(true)` for `∞`, `Some(false)` for `-∞`, through any parentheses and signs.
fn infinity_sign(expr: &Expr) -> Option<bool> {
    match expr {
        Expr::Constant(Constant::Infinity) => Some(true),
        Expr::Group(inner) => infinity_sign(inner),
        Expr::Neg(inner) => infinity_sign(inner).map(|positive| !positive),
        _ => None,
    }
}

impl fmt::Display for LimitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitPoint::Finite(a) => write!(f, "{}", format_number(*a)),
            LimitPoint::PosInfinity => write!(f, "∞"),
            LimitPoint::NegInfinity => write!(f, "−∞"),
        }
    }
}

/// Which side(s) to approach a finite point from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Both sides.
    #[default]
    Both,
    /// From below (`x → a⁻`).
    Left,
    /// From above (`x → a⁺`).
    Right,
}

/// A single evaluation `f(x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Where `f` was evaluated.
    pub x: f64,
    /// What it evaluated to.
    pub y: Ordinate,
}

/// One row of the table: the samples at the same distance from the point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachRow {
    /// Sample below the point (for `+∞`: the growing abscissa).
    pub left: Option<Sample>,
    /// Sample above the point (for `−∞`: the shrinking abscissa).
    pub right: Option<Sample>,
}

/// What the table suggests the limit is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// Values settle on this number.
    Value(f64),
    /// Values grow without bound.
    PosInfinity,
    /// Values fall without bound.
    NegInfinity,
    /// Nothing conclusive (sides disagree, oscillation, undefined points).
    Inconclusive,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Value(v) => write!(f, "≈ {}", format_number(*v)),
            Estimate::PosInfinity => write!(f, "→ ∞"),
            Estimate::NegInfinity => write!(f, "→ −∞"),
            Estimate::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

/// Numeric approach of an expression towards a limit point.
#[derive(Debug, Clone, PartialEq)]
pub struct Approach {
    /// The free variable.
    pub variable: String,
    /// The point approached.
    pub point: LimitPoint,
    /// Rows from farthest to closest.
    pub rows: Vec<ApproachRow>,
    /// Reading of the last rows.
    pub estimate: Estimate,
}

/// Tabulate `f` near `point`: `f(a ± 10⁻ᵏ)` for finite points, `f(±10ᵏ)`
/// for infinite ones, `k = 1 … 6`. `direction` is ignored for infinite points.
pub fn approach(
    expression: &Expression,
    point: LimitPoint,
    direction: Direction,
) -> ExprResult<Approach> {
    let variable = expression.free_variable()?;
    let eval = |x: f64| Sample {
        x,
        y: expression
            .evaluate(&variable, x)
            .map_or(Ordinate::Undefined, Ordinate::Value),
    };

    let rows = EXPONENTS
        .iter()
        .map(|&k| {
            let scale = 10f64.powi(k);
            match point {
                LimitPoint::Finite(a) => {
                    let h = scale.recip();
                    ApproachRow {
                        left: (direction != Direction::Right).then(|| eval(a - h)),
                        right: (direction != Direction::Left).then(|| eval(a + h)),
                    }
                }
                LimitPoint::PosInfinity => ApproachRow {
                    left: Some(eval(scale)),
                    right: None,
                },
                LimitPoint::NegInfinity => ApproachRow {
                    left: None,
                    right: Some(eval(-scale)),
                },
            }
        })
        .collect::<Vec<_>>();

    let estimate = estimate(&rows);
    Ok(Approach {
        variable,
        point,
        rows,
        estimate,
    })
}

/// Read the trend of one side, or of both sides when they agree.
fn estimate(rows: &[ApproachRow]) -> Estimate {
    let column = |pick: fn(&ApproachRow) -> Option<Sample>| -> Option<Vec<f64>> {
        let samples: Vec<Sample> = rows.iter().filter_map(pick).collect();
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().filter_map(|s| s.y.value()).collect())
    };

    let sides: Vec<Estimate> = [column(|r| r.left), column(|r| r.right)]
        .into_iter()
        .flatten()
        .map(|values| side_trend(&values, rows.len()))
        .collect();

    match sides.as_slice() {
        [one] => *one,
        [a, b] => match (a, b) {
            (Estimate::Value(x), Estimate::Value(y)) if agree(*x, *y) => {
                Estimate::Value(round((x + y) / 2.0))
            }
            (Estimate::PosInfinity, Estimate::PosInfinity) => Estimate::PosInfinity,
            (Estimate::NegInfinity, Estimate::NegInfinity) => Estimate::NegInfinity,
            _ => Estimate::Inconclusive,
        },
        _ => Estimate::Inconclusive,
    }
}

fn side_trend(values: &[f64], expected: usize) -> Estimate {
    // Any undefined sample makes the column unreliable.
    if values.len() != expected || values.len() < 3 {
        return Estimate::Inconclusive;
    }
    let last = &values[values.len() - 3..];

    // Divergence: large and at least doubling at every step.
    if last.iter().all(|v| *v >= DIVERGENCE) && last.windows(2).all(|w| w[1] >= 2.0 * w[0]) {
        return Estimate::PosInfinity;
    }
    if last.iter().all(|v| *v <= -DIVERGENCE) && last.windows(2).all(|w| w[1] <= 2.0 * w[0]) {
        return Estimate::NegInfinity;
    }
    if agree(last[1], last[2]) {
        return Estimate::Value(round(last[2]));
    }
    Estimate::Inconclusive
}

fn agree(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Round to 4 decimals and drop a negative zero.
fn round(v: f64) -> f64 {
    let r = (v * 1e4).round() / 1e4;
    if r == 0.0 { 0.0 } else { r }
}

/// Compact decimal: integers without a fraction, others trimmed to 6 places.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞".into() } else { "−∞".into() };
    }
    if v.abs() >= 1e9 || (v != 0.0 && v.abs() < 1e-6) {
        return format!("{v:e}");
    }
    let text = format!("{v:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
