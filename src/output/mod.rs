//! Rendering of step reports into the final output text
//!
//! Three renderings exist: plain (outputs only), prefixed (`title: output`)
//! and a two-column table. [`formatter_for`] picks one from the effective
//! output options.

mod table;

pub use table::TableFormatter;

use crate::core::{OutputOptions, StepReport};
use console::style;

/// Renders an ordered list of step reports
pub trait OutputFormatter {
    fn render(&self, reports: &[StepReport], options: &OutputOptions) -> String;

    /// Render, adding the pipeline title header when `pretty` is set
    fn format(&self, reports: &[StepReport], options: &OutputOptions) -> String {
        let body = self.render(reports, options);
        if options.pretty && !options.title.is_empty() {
            let underline = "=".repeat(console::measure_text_width(&options.title));
            format!("{}\n{}\n{}", options.title, underline, body)
        } else {
            body
        }
    }
}

/// Pick the formatter for the given options: table, then prefixed, then plain
pub fn formatter_for(options: &OutputOptions) -> Box<dyn OutputFormatter> {
    if options.table {
        Box::new(TableFormatter)
    } else if !options.prefix.is_empty() {
        Box::new(PrefixedFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

/// Outputs only, one per line
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn render(&self, reports: &[StepReport], _options: &OutputOptions) -> String {
        reports
            .iter()
            .map(|r| r.output.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `title: output` lines, the label optionally in red
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedFormatter;

impl OutputFormatter for PrefixedFormatter {
    fn render(&self, reports: &[StepReport], options: &OutputOptions) -> String {
        reports
            .iter()
            .map(|report| match report.title.as_deref().map(str::trim) {
                Some(title) => {
                    let label = format!("{}: ", title);
                    let label = if options.colored {
                        style(label).red().force_styling(true).to_string()
                    } else {
                        label
                    };
                    format!("{}{}", label, report.output.trim())
                }
                None => report.output.trim().to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
