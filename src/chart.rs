use std::fmt::Write;

use crate::catalog::ChartSpec;

/// Render `series` as horizontal text bars scaled so the tallest is `width` cells.
pub fn render_bar_chart(chart: &ChartSpec, series: &[(String, f64)], width: usize) -> String {
    let mut out = format!("{} per {}\n", chart.y_label, chart.x_label);
    if series.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let label_width = series
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = series.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);

    for (label, y) in series {
        let cells = if max > 0.0 {
            ((y / max) * width as f64).round() as usize
        } else {
            0
        };
        // write! into a String cannot fail
        let _ = writeln!(
            out,
            "{:<label_width$} | {} {}",
            label,
            "#".repeat(cells),
            y
        );
    }
    out
}
