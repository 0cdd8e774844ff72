//! Two-column table rendering

use super::OutputFormatter;
use crate::core::{OutputOptions, StepReport};
use console::{measure_text_width, pad_str, Alignment};

const HEADERS: [&str; 2] = ["Step", "Output"];

/// `Step | Output` table with ASCII borders; multi-line output spans rows
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatter;

impl OutputFormatter for TableFormatter {
    fn render(&self, reports: &[StepReport], _options: &OutputOptions) -> String {
        let rows: Vec<[&str; 2]> = reports
            .iter()
            .flat_map(|report| {
                let title = report.title.as_deref().map_or("", str::trim);
                let output = report.output.trim();
                let mut lines: Vec<&str> = output.lines().collect();
                if lines.is_empty() {
                    lines.push("");
                }
                lines
                    .into_iter()
                    .enumerate()
                    .map(move |(i, line)| [if i == 0 { title } else { "" }, line])
            })
            .collect();

        let mut widths = HEADERS.map(measure_text_width);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }

        let border = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );
        let mut out = vec![border.clone(), row_line(&HEADERS, widths), border.clone()];
        out.extend(rows.iter().map(|row| row_line(row, widths)));
        out.push(border);
        out.join("\n")
    }
}

fn row_line(cells: &[&str; 2], widths: [usize; 2]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!(" {} ", pad_str(cell, w, Alignment::Left, None)))
        .collect();
    format!("|{}|", padded.join("|"))
}
