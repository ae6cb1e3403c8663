//! Bar chart rendering and HTML export.
//!
//! Consumes a finished aggregate table plus a caller-supplied title and
//! writes a self-contained HTML artifact: the data and layout are embedded
//! as JSON and drawn by plotly.js loaded from the CDN.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tracing::{debug, info};

use crate::analyzers::types::{DayOfWeekMedian, HourlyMedian, MonthComparison};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// A single-series bar chart: categorical x values against numeric y values.
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    x_label: String,
    y_label: String,
    x: Vec<String>,
    y: Vec<f64>,
}

impl BarChart {
    /// Chart of median transfers per hour of day.
    pub fn from_hourly(rows: &[HourlyMedian], title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: "Hour of day".to_string(),
            y_label: "Median #transfers".to_string(),
            x: rows.iter().map(|r| r.hour.to_string()).collect(),
            y: rows.iter().map(|r| r.median_transfers).collect(),
        }
    }

    /// Chart of median transfers per day of week.
    pub fn from_day_of_week(rows: &[DayOfWeekMedian], title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: "Day of week".to_string(),
            y_label: "Median #transfers".to_string(),
            x: rows.iter().map(|r| r.day_of_week.to_string()).collect(),
            y: rows.iter().map(|r| r.median_transfers).collect(),
        }
    }

    /// Chart of total transfers per month from a comparison table.
    pub fn from_comparison(rows: &[MonthComparison], title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: "Month".to_string(),
            y_label: "Total #transfers".to_string(),
            x: rows.iter().map(|r| r.month.to_string()).collect(),
            y: rows.iter().map(|r| r.total_transfers as f64).collect(),
        }
    }

    /// Renders the chart as a complete HTML page.
    pub fn to_html(&self) -> String {
        let data = json!([{
            "type": "bar",
            "x": self.x,
            "y": self.y,
        }]);
        let layout = json!({
            "title": { "text": self.title },
            "xaxis": { "title": { "text": self.x_label }, "type": "category" },
            "yaxis": { "title": { "text": self.y_label } },
            "plot_bgcolor": "white",
            "paper_bgcolor": "white",
        });

        format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <script src=\"{PLOTLY_CDN}\"></script>\n\
             </head>\n\
             <body>\n\
             <div id=\"chart\"></div>\n\
             <script>\n\
             Plotly.newPlot(\"chart\", {data}, {layout});\n\
             </script>\n\
             </body>\n\
             </html>\n",
            title = escape_html(&self.title),
        )
    }

    /// Writes the chart to an HTML file.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), points = self.y.len(), "Writing chart");
        fs::write(path, self.to_html())?;
        info!(path = %path.display(), title = %self.title, "Chart written");
        Ok(())
    }
}

/// Escapes text placed inside HTML element content.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
