use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, WeatherError};
use crate::processors::{ReportMode, ReportQuery};

#[derive(Parser, Debug)]
#[command(name = "weatherman")]
#[command(about = "Weather reports from per-station daily records")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "Year of the report")]
    pub year: i32,

    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=12),
        help = "Month of the report (1-12); without other flags reports monthly averages"
    )]
    pub month: Option<u32>,

    #[arg(short, long, conflicts_with = "chart", help = "Report the highest, lowest and most humid days")]
    pub extremes: bool,

    #[arg(short, long, requires = "month", help = "Draw daily high/low temperature bars for the month")]
    pub chart: bool,

    #[arg(help = "Directory containing the weather files")]
    pub path: PathBuf,

    #[arg(long, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the chart without colors")]
    pub no_color: bool,

    #[arg(short, long, help = "Hide the progress bar")]
    pub quiet: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn report_mode(&self) -> ReportMode {
        if self.chart {
            ReportMode::Chart
        } else if self.extremes || self.month.is_none() {
            ReportMode::Extremes
        } else {
            ReportMode::Averages
        }
    }

    pub fn query(&self) -> Result<ReportQuery> {
        match (self.report_mode(), self.month) {
            (ReportMode::Extremes, month) => ReportQuery::extremes(self.year, month),
            (ReportMode::Averages, Some(month)) => ReportQuery::averages(self.year, month),
            (ReportMode::Chart, Some(month)) => ReportQuery::chart(self.year, month),
            (mode, None) => Err(WeatherError::MonthRequired(mode)),
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("weatherman").chain(args.iter().copied()))
    }

    #[test]
    fn test_year_only_reports_extremes() {
        let cli = parse(&["--year", "2004", "weatherfiles"]).unwrap();

        assert_eq!(cli.report_mode(), ReportMode::Extremes);
        assert_eq!(cli.query().unwrap().period.month, None);
    }

    #[test]
    fn test_month_reports_averages() {
        let cli = parse(&["-y", "2004", "-m", "6", "weatherfiles"]).unwrap();
        assert_eq!(cli.report_mode(), ReportMode::Averages);
    }

    #[test]
    fn test_extremes_flag_wins_over_month() {
        let cli = parse(&["-y", "2004", "-m", "6", "--extremes", "weatherfiles"]).unwrap();
        assert_eq!(cli.report_mode(), ReportMode::Extremes);
    }

    #[test]
    fn test_chart() {
        let cli = parse(&["-y", "2004", "-m", "6", "--chart", "weatherfiles"]).unwrap();
        assert_eq!(cli.query().unwrap().mode, ReportMode::Chart);
    }

    #[test]
    fn test_chart_requires_month() {
        assert!(parse(&["-y", "2004", "--chart", "weatherfiles"]).is_err());
    }

    #[test]
    fn test_chart_conflicts_with_extremes() {
        assert!(parse(&["-y", "2004", "-m", "6", "-c", "-e", "weatherfiles"]).is_err());
    }

    #[test]
    fn test_month_out_of_range() {
        assert!(parse(&["-y", "2004", "-m", "13", "weatherfiles"]).is_err());
    }

    #[test]
    fn test_year_and_path_are_required() {
        assert!(parse(&["weatherfiles"]).is_err());
        assert!(parse(&["-y", "2004"]).is_err());
    }
}
