//! Exportable growth report
//!
//! A report has one page per chart, a summary of the latest centiles and a
//! note for every chart that could not be drawn. It is encoded as JSON for
//! downstream renderers.

use crate::chart::{ChartFacade, ChartSpec, SummaryRow};
use crate::error::{EngineError, Result};
use growth_domain::{ChildProfile, MeasurementType};
use rayon::prelude::*;
use serde::Serialize;

/// Name used for files when the child has no name
pub const DEFAULT_CHILD_NAME: &str = "child";

/// A chart left out of the report and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipNote {
    /// Measurement type of the omitted chart
    pub measurement_type: MeasurementType,
    /// Human-readable reason
    pub reason: String,
}

/// One page of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    /// 1-based page number
    pub page: usize,
    /// Chart on this page
    pub chart: ChartSpec,
}

/// A complete growth report for one child
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    /// Child the report describes
    pub child: ChildProfile,
    /// Reference dataset version the centiles were computed against
    pub dataset_version: String,
    /// Latest centiles, one row per available type
    pub summary: Vec<SummaryRow>,
    /// Chart pages in requested order
    pub pages: Vec<ReportPage>,
    /// Charts that were omitted
    pub skipped: Vec<SkipNote>,
}

impl ReportDocument {
    /// Suggested download name: `<name or child>_growth_chart.json`
    pub fn file_name(&self) -> String {
        let name = self
            .child
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_CHILD_NAME);
        let safe: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}_growth_chart.json", safe)
    }

    /// Encode as pretty-printed JSON
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

impl ChartFacade<'_> {
    /// Assemble a report with charts for `types`, in that order
    ///
    /// Charts are built in parallel. A chart that fails for a recoverable
    /// reason (out of range, no standard, no data) becomes a [`SkipNote`];
    /// any other failure aborts the report. An empty record is a
    /// [`EngineError::Render`] error.
    pub fn report(&self, types: &[MeasurementType]) -> Result<ReportDocument> {
        if self.series().is_empty() {
            return Err(EngineError::Render(
                "cannot export a report with no measurements".to_string(),
            ));
        }

        let built: Vec<_> = types
            .par_iter()
            .map(|&measurement_type| (measurement_type, self.build_chart(measurement_type)))
            .collect();

        let mut pages = Vec::new();
        let mut skipped = Vec::new();
        for (measurement_type, outcome) in built {
            match outcome {
                Ok(chart) => pages.push(ReportPage {
                    page: pages.len() + 1,
                    chart,
                }),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(measurement = %measurement_type, reason = %e, "Chart skipped");
                    skipped.push(SkipNote {
                        measurement_type,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(ReportDocument {
            child: self.series().profile().clone(),
            dataset_version: self.engine().store().dataset_version().to_string(),
            summary: self.latest_centiles()?,
            pages,
            skipped,
        })
    }

    /// Report for `types` encoded as JSON bytes
    pub fn export(&self, types: &[MeasurementType]) -> Result<Vec<u8>> {
        let document = self.report(types)?;
        tracing::info!(
            pages = document.pages.len(),
            skipped = document.skipped.len(),
            "Exported growth report"
        );
        document.to_json()
    }
}
