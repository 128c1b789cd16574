use std::fmt::Write;

use crate::models::{ExtremeSummary, MissingValuePolicy, MonthlyAverages};
use crate::processors::Report;
use crate::writers::ChartRenderer;

/// Turns a finished [`Report`] into the text printed on stdout.
pub struct ReportWriter {
    chart: ChartRenderer,
}

impl ReportWriter {
    pub fn new(policy: MissingValuePolicy, colored: bool) -> Self {
        Self {
            chart: ChartRenderer::new(policy).with_colors(colored),
        }
    }

    pub fn render(&self, report: &Report) -> String {
        match report {
            Report::Extremes(summary) => self.extremes(summary),
            Report::Averages(averages) => self.averages(averages),
            Report::Chart(records) => self.chart.render(records),
        }
    }

    pub fn extremes(&self, summary: &ExtremeSummary) -> String {
        let mut out = String::new();

        let _ = match summary.highest_temp() {
            Ok(e) => writeln!(out, "Highest temperature of {}C on {}", e.value, e.occurred_on),
            Err(e) => writeln!(out, "Highest temperature: {}", e),
        };
        let _ = match summary.lowest_temp() {
            Ok(e) => writeln!(out, "Lowest temperature of {}C on {}", e.value, e.occurred_on),
            Err(e) => writeln!(out, "Lowest temperature: {}", e),
        };
        let _ = match summary.most_humid() {
            Ok(e) => writeln!(
                out,
                "Most humid day with {}% humidity on {}",
                e.value, e.occurred_on
            ),
            Err(e) => writeln!(out, "Most humid day: {}", e),
        };

        out
    }

    pub fn averages(&self, averages: &MonthlyAverages) -> String {
        let mut out = String::new();

        let _ = match averages.highest_temp() {
            Ok(v) => writeln!(out, "Average highest temperature: {:.1}C", v),
            Err(e) => writeln!(out, "Average highest temperature: {}", e),
        };
        let _ = match averages.lowest_temp() {
            Ok(v) => writeln!(out, "Average lowest temperature: {:.1}C", v),
            Err(e) => writeln!(out, "Average lowest temperature: {}", e),
        };
        let _ = match averages.humidity() {
            Ok(v) => writeln!(out, "Average humidity: {:.1}%", v),
            Err(e) => writeln!(out, "Average humidity: {}", e),
        };

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtremeResult, Period};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn writer() -> ReportWriter {
        ReportWriter::new(MissingValuePolicy::TreatAsZero, false)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extremes_text() {
        let summary = ExtremeSummary {
            period: Period::year(2023),
            highest_temp: Some(ExtremeResult::new(30.0, date(2023, 6, 1))),
            lowest_temp: Some(ExtremeResult::new(18.0, date(2023, 6, 2))),
            most_humid: Some(ExtremeResult::new(90.0, date(2023, 6, 2))),
        };

        assert_eq!(
            writer().render(&Report::Extremes(summary)),
            "Highest temperature of 30C on 2023-06-01\n\
             Lowest temperature of 18C on 2023-06-02\n\
             Most humid day with 90% humidity on 2023-06-02\n"
        );
    }

    #[test]
    fn test_extremes_without_data() {
        let summary = ExtremeSummary {
            period: Period::year(1999),
            highest_temp: None,
            lowest_temp: None,
            most_humid: None,
        };

        assert_eq!(
            writer().extremes(&summary),
            "Highest temperature: no data available for 1999\n\
             Lowest temperature: no data available for 1999\n\
             Most humid day: no data available for 1999\n"
        );
    }

    #[test]
    fn test_averages_text() {
        let averages = MonthlyAverages {
            period: Period::new(2023, Some(6)).unwrap(),
            highest_temp: Some(27.5),
            lowest_temp: Some(19.0),
            humidity: None,
        };

        assert_eq!(
            writer().render(&Report::Averages(averages)),
            "Average highest temperature: 27.5C\n\
             Average lowest temperature: 19.0C\n\
             Average humidity: no data available for 2023-06\n"
        );
    }
}
