//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use growth_domain::{CentileCurveSet, CentileResult, MeasurementType};
use growth_engine::{ChartSpec, SummaryRow, AGE_AXIS_LABEL};
use std::collections::BTreeSet;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the centile of a single measurement.
    pub fn format_centile(
        &self,
        measurement_type: MeasurementType,
        age_in_days: u32,
        value: f64,
        centile: &CentileResult,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "measurement_type": measurement_type,
                    "age_in_days": age_in_days,
                    "value": value,
                    "unit": measurement_type.unit(),
                    "z": centile.z,
                    "percentile": centile.percentile,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Measurement", "Age (days)", "Value", "Z-score", "Centile"]);
                builder.push_record([
                    measurement_type.name().to_string(),
                    age_in_days.to_string(),
                    format!("{:.2} {}", value, measurement_type.unit()),
                    format!("{:.2}", centile.z),
                    self.centile_cell(centile),
                ]);
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(format!("{:.2}", centile.percentile)),
        }
    }

    /// Format a curve set as one row per sampled age.
    pub fn format_curves(&self, set: &CentileCurveSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(set)?),
            OutputFormat::Table => {
                if set.curves.is_empty() {
                    return Ok(self.colorize("No curves.", "yellow"));
                }
                let mut builder = Builder::default();
                let mut header = vec![AGE_AXIS_LABEL.to_string()];
                header.extend(set.curves.iter().map(|c| c.label.clone()));
                builder.push_record(header);
                for row in curve_rows(set) {
                    builder.push_record(row);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(curve_rows(set)
                .into_iter()
                .map(|row| row.join(","))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format latest-centile summary rows.
    pub fn format_summary(&self, rows: &[SummaryRow]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Table => {
                if rows.is_empty() {
                    return Ok(self.colorize("No centiles available.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record([
                    "Measurement",
                    "Date",
                    "Age (days)",
                    "Value",
                    "Z-score",
                    "Centile",
                ]);
                for row in rows {
                    builder.push_record([
                        row.measurement_type.name().to_string(),
                        row.date.to_string(),
                        row.age_in_days.to_string(),
                        format!("{:.2} {}", row.value, row.unit),
                        format!("{:.2}", row.centile.z),
                        self.centile_cell(&row.centile),
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(rows
                .iter()
                .map(|row| format!("{} {:.2}", row.measurement_type, row.centile.percentile))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a chart: its title and the child's plotted points.
    pub fn format_chart(&self, chart: &ChartSpec) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(chart)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Date", "Age (years)", chart.y_label.as_str(), "Centile"]);
                for point in &chart.child_points {
                    builder.push_record([
                        point.date.to_string(),
                        format!("{:.2}", point.age_in_years),
                        format!("{:.2}", point.value),
                        match &point.centile {
                            Some(centile) => self.centile_cell(centile),
                            None => "-".to_string(),
                        },
                    ]);
                }
                let lines: Vec<String> =
                    chart.curves.curves.iter().map(|c| c.label.clone()).collect();
                Ok(format!(
                    "{}\n{}\n{}",
                    self.colorize(&chart.title, "cyan"),
                    self.render(builder),
                    self.info(&format!("Reference lines: {}", lines.join(", ")))
                ))
            }
            OutputFormat::Quiet => Ok(chart
                .plotted_points()
                .map(|point| {
                    let percentile = point
                        .centile
                        .map(|c| format!("{:.2}", c.percentile))
                        .unwrap_or_default();
                    format!("{} {:.2} {}", point.age_in_days, point.value, percentile)
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    // Extreme centiles stand out in red
    fn centile_cell(&self, centile: &CentileResult) -> String {
        let label = centile.display_label();
        if centile.z.abs() > 2.0 {
            self.colorize(&label, "red")
        } else {
            label
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

// Union of sampled ages; "-" where a curve has a gap
fn curve_rows(set: &CentileCurveSet) -> Vec<Vec<String>> {
    let ages: BTreeSet<u32> = set
        .curves
        .iter()
        .flat_map(|c| c.points.iter().map(|p| p.age_in_days).chain(c.gaps.iter().copied()))
        .collect();

    ages.into_iter()
        .map(|age| {
            let mut row = vec![age.to_string()];
            row.extend(set.curves.iter().map(|curve| {
                curve
                    .value_at(age)
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "-".to_string())
            }));
            row
        })
        .collect()
}
