use std::fmt::Write as _;

use comfy_table::{ContentArrangement, Table};
use lq_core::LimitSide;
use lq_expr::diagnostics::render_syntax_errors;
use lq_expr::limit::format_number;
use lq_expr::{Domain, Expression, LimitPoint, Ordinate, Sample, approach};

use crate::config::AppConfig;
use crate::present;

pub fn run(config: &AppConfig, expression: &str, point: &str, side: &str) -> Result<(), String> {
    let report = render(&config.plot, expression, point, side)?;
    print!("{report}");
    Ok(())
}

/// The whole preview as text.
fn render(domain: &Domain, source: &str, point: &str, side: &str) -> Result<String, String> {
    let side = LimitSide::parse(side)
        .ok_or_else(|| format!("unknown side \"{side}\" (use none, left or right)"))?;
    let expression = Expression::parse(source).map_err(|e| {
        eprint!(
            "{}",
            render_syntax_errors(source, "expression", e.syntax_errors(), true)
        );
        format!("invalid expression \"{source}\": {e}")
    })?;
    let limit_point = LimitPoint::parse(point).map_err(|e| {
        eprint!(
            "{}",
            render_syntax_errors(point, "limit point", e.syntax_errors(), true)
        );
        format!("invalid limit point \"{point}\": {e}")
    })?;
    let table = approach(&expression, limit_point, present::direction(side))
        .map_err(|e| e.to_string())?;

    let mut out = String::new();
    let _ = writeln!(out, "  {}", present::limit_statement(source, point, side));
    let _ = writeln!(out, "  latex: {}", present::limit_tex(source, point, side));

    let series = expression.sample(domain);
    let undefined = series
        .points
        .iter()
        .filter(|(_, y)| *y == Ordinate::Undefined)
        .count();
    let _ = writeln!(
        out,
        "  plot:  {} points from {} to {}, {undefined} undefined",
        series.len(),
        format_number(domain.start),
        format_number(domain.end().unwrap_or(domain.start)),
    );
    let _ = writeln!(out);

    let mut grid = Table::new();
    grid.set_content_arrangement(ContentArrangement::Dynamic);
    let variable = &table.variable;
    grid.set_header(vec![
        variable.clone(),
        format!("f({variable})"),
        variable.clone(),
        format!("f({variable})"),
    ]);
    for row in &table.rows {
        let (lx, ly) = cells(row.left);
        let (rx, ry) = cells(row.right);
        grid.add_row(vec![lx, ly, rx, ry]);
    }
    let _ = writeln!(out, "{grid}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  estimate: {} (numeric preview, not a proof)",
        table.estimate
    );
    Ok(out)
}

fn cells(sample: Option<Sample>) -> (String, String) {
    match sample {
        Some(Sample { x, y }) => (
            format_number(x),
            y.value().map_or_else(|| "undefined".to_string(), format_number),
        ),
        None => (String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinc_at_zero() {
        let out = render(&Domain::default(), "sin(x)/x", "0", "none").unwrap();
        assert!(out.contains("lim x→0 sin(x)/x"));
        assert!(out.contains("\\frac{\\sin\\left(x\\right)}{x}"));
        assert!(out.contains("200 points from -5 to 4.95"));
        assert!(out.contains("0.1"));
        assert!(out.contains("estimate: ≈ 1"));
    }

    #[test]
    fn one_sided_divergence() {
        let out = render(&Domain::default(), "1/x", "0", "right").unwrap();
        assert!(out.contains("lim x→0⁺"));
        assert!(out.contains("estimate: → ∞"));
    }

    #[test]
    fn pole_counts_as_undefined() {
        let domain = Domain::new(-1.0, 0.5, 5);
        let out = render(&domain, "1/x", "inf", "none").unwrap();
        assert!(out.contains("5 points from -1 to 1, 1 undefined"));
        assert!(out.contains("estimate: ≈ 0"));
    }

    #[test]
    fn errors() {
        let domain = Domain::default();
        assert!(render(&domain, "sin(", "0", "none").is_err());
        assert!(render(&domain, "x", "y", "none").is_err());
        assert!(render(&domain, "x", "0", "up").is_err());
        assert!(render(&domain, "x*y", "0", "none").is_err());
    }
}
