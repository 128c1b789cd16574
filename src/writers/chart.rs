use crossterm::style::{style, Color, Stylize};
use std::fmt::Write;

use crate::models::{DailyRecord, MissingValuePolicy};
use crate::utils::constants::{CHART_BAR_GLYPH, CHART_MAX_BAR, CHART_NO_DATA};

/// Draws daily low/high temperatures as horizontal bars, low in blue
/// followed by high in red, one line per record.
pub struct ChartRenderer {
    policy: MissingValuePolicy,
    colored: bool,
}

impl ChartRenderer {
    pub fn new(policy: MissingValuePolicy) -> Self {
        Self {
            policy,
            colored: true,
        }
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Render `records` in the order given. The heading is taken from the
    /// first record's month.
    pub fn render(&self, records: &[DailyRecord]) -> String {
        let Some(first) = records.first() else {
            return CHART_NO_DATA.to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", first.date.format("%B %Y"));

        for record in records {
            let low = self.policy.resolve(record.min_temp_c);
            let high = self.policy.resolve(record.max_temp_c);

            let _ = writeln!(
                out,
                "{} {}{} {} - {}",
                record.date.format("%d"),
                self.bar(low, Color::Blue),
                self.bar(high, Color::Red),
                format_temp(low),
                format_temp(high)
            );
        }

        out
    }

    fn bar(&self, value: Option<f64>, color: Color) -> String {
        let bar = CHART_BAR_GLYPH.to_string().repeat(bar_length(value));
        if self.colored && !bar.is_empty() {
            style(bar).with(color).to_string()
        } else {
            bar
        }
    }
}

/// Whole units of the value, capped at `CHART_MAX_BAR`; absent or negative
/// values draw nothing.
pub fn bar_length(value: Option<f64>) -> usize {
    match value {
        Some(v) if v > 0.0 => (v.trunc() as usize).min(CHART_MAX_BAR),
        _ => 0,
    }
}

fn format_temp(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{}C", v))
}
