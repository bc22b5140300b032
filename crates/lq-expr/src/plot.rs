//! Sampling an expression over an evenly spaced domain for charting.

use serde::{Deserialize, Serialize};

use crate::Expression;

/// Evenly spaced abscissae: `start`, `start + step`, … (`samples` points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// First abscissa.
    pub start: f64,
    /// Distance between consecutive abscissae.
    pub step: f64,
    /// Number of points.
    pub samples: usize,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            start: -5.0,
            step: 0.05,
            samples: 200,
        }
    }
}

impl Domain {
    /// Create a domain.
    pub fn new(start: f64, step: f64, samples: usize) -> Self {
        Self {
            start,
            step,
            samples,
        }
    }

    /// The abscissae in order.
    pub fn abscissae(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(|i| self.start + i as f64 * self.step)
    }

    /// Last abscissa, if there is one.
    pub fn end(&self) -> Option<f64> {
        self.samples
            .checked_sub(1)
            .map(|last| self.start + last as f64 * self.step)
    }
}

/// One ordinate of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ordinate {
    /// The expression evaluated to this value.
    Value(f64),
    /// The expression is undefined here (pole, domain error, …).
    Undefined,
}

impl Ordinate {
    /// The value, if defined.
    pub fn value(self) -> Option<f64> {
        match self {
            Ordinate::Value(y) => Some(y),
            Ordinate::Undefined => None,
        }
    }
}

/// Sampled points of an expression. Empty when the expression could not be read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    /// The free variable the expression was sampled over.
    pub variable: String,
    /// `(x, y)` pairs in domain order.
    pub points: Vec<(f64, Ordinate)>,
}

impl Series {
    /// Sample `expression` over `domain`.
    ///
    /// An expression with more than one variable cannot be plotted and yields
    /// an empty series.
    pub fn sample(expression: &Expression, domain: &Domain) -> Self {
        let Ok(variable) = expression.free_variable() else {
            return Self::default();
        };

        let points = domain
            .abscissae()
            .map(|x| {
                let y = match expression.evaluate(&variable, x) {
                    Ok(y) => Ordinate::Value(y),
                    Err(_) => Ordinate::Undefined,
                };
                (x, y)
            })
            .collect();

        Self { variable, points }
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Defined points only.
    pub fn defined(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|&(x, y)| y.value().map(|y| (x, y)))
    }

    /// Runs of consecutive defined points. Charts draw each run as its own
    /// line so poles are not bridged.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            match y {
                Ordinate::Value(y) => current.push((x, y)),
                Ordinate::Undefined => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Smallest and largest defined ordinate.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.defined().fold(None, |acc, (_, y)| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}
