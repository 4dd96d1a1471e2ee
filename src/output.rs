// Console presentation: markdown tables, ASCII bar charts, and the static
// conclusions block. Rendering is deterministic for a given input so the
// chart output can be asserted in tests.
use tabled::{settings::Style, Table, Tabled};

use crate::util::format_number;

pub const NO_DATA_NOTICE: &str = "No data available for the selected date range.";

const CONCLUSIONS: &[&str] = &[
    "Rentals peak in fall (Musim Gugur) under clear skies (Cerah); light rain or snow sharply reduces demand.",
    "Registered riders dominate workdays (Hari Kerja), matching a commuter pattern, while casual riders take over on holidays and weekends (Hari Libur/Akhir Pekan).",
];

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Render labeled values as horizontal ASCII bars, scaled to the largest
/// value. One line per entry:
///
/// `Musim Gugur / Cerah | ############ 5,644`
pub fn render_bar_chart(rows: &[(String, f64)], width: usize) -> String {
    if rows.is_empty() {
        return "(no rows)\n".to_string();
    }
    let width = width.max(10);
    let max_val = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_w = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        let filled = if max_val > 0.0 {
            ((value / max_val) * width as f64).round() as usize
        } else {
            0
        };
        let bar = "#".repeat(filled);
        out.push_str(&format!(
            "{label:<label_w$} | {bar:<width$} {}\n",
            format_number(*value, 0)
        ));
    }
    out
}

pub fn print_conclusions() {
    println!("Conclusions:");
    for line in CONCLUSIONS {
        println!(" * {}", line);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_chart_is_deterministic_and_scaled() {
        let rows = vec![
            ("Hari Kerja".to_string(), 4000.0),
            ("Hari Libur".to_string(), 2000.0),
        ];
        let chart = render_bar_chart(&rows, 20);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        // The largest value fills the full width, the half value half of it.
        assert!(lines[0].contains(&"#".repeat(20)));
        assert!(lines[1].contains(&"#".repeat(10)));
        assert!(!lines[1].contains(&"#".repeat(11)));
        assert!(lines[0].ends_with("4,000"));
    }

    #[test]
    fn empty_chart_renders_a_placeholder() {
        assert_eq!(render_bar_chart(&[], 20), "(no rows)\n");
    }

    #[test]
    fn all_zero_values_render_empty_bars() {
        let rows = vec![("a".to_string(), 0.0)];
        let chart = render_bar_chart(&rows, 20);
        assert!(!chart.contains('#'));
    }
}
