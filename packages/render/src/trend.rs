//! LCSI trend line chart.

use std::path::Path;

use lcsi_survey_models::{StrategyLabel, TrendRow};

use crate::RenderError;
use crate::figure::{Axis, Figure, Layout, Legend, Line, Marker, ScatterTrace, Title, Trace};
use crate::html::write_html;

/// Plotly's default qualitative colors, one per tracked category.
const CATEGORY_COLORS: [&str; 3] = ["#636efa", "#EF553B", "#00cc96"];

/// Grid and axis line color of the white theme.
const GRID_COLOR: &str = "#EBF0F8";

/// Text and labels of the trend chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendChartOptions {
    /// Title, followed by the covered year range.
    pub title: String,
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// Legend title.
    pub legend_title: String,
}

impl Default for TrendChartOptions {
    fn default() -> Self {
        Self {
            title: "LCSI Strategies Trend".to_string(),
            x_title: "Year".to_string(),
            y_title: "% of Households".to_string(),
            legend_title: "Strategy Type".to_string(),
        }
    }
}

/// Builds the trend figure: one `lines+markers` series per tracked category,
/// always in Stress, Crisis, Emergency order, each with ascending years.
///
/// Categories without rows still get an (empty) series, so an empty data set
/// produces a valid chart.
#[must_use]
pub fn trend_figure(rows: &[TrendRow], options: &TrendChartOptions) -> Figure<'static> {
    let data = StrategyLabel::TRACKED
        .iter()
        .zip(CATEGORY_COLORS)
        .map(|(&category, color)| Trace::Scatter(category_series(rows, category, color)))
        .collect();

    let title = match year_range(rows) {
        Some((first, last)) => format!("{} ({first}-{last})", options.title),
        None => options.title.clone(),
    };

    Figure {
        data,
        layout: Layout {
            title: Some(Title::new(title)),
            xaxis: Some(Axis {
                title: Title::new(&options.x_title),
                gridcolor: GRID_COLOR,
                zerolinecolor: GRID_COLOR,
                linecolor: GRID_COLOR,
                tickmode: Some("linear"),
                dtick: Some(1.0),
            }),
            yaxis: Some(Axis {
                title: Title::new(&options.y_title),
                gridcolor: GRID_COLOR,
                zerolinecolor: GRID_COLOR,
                linecolor: GRID_COLOR,
                tickmode: None,
                dtick: None,
            }),
            legend: Some(Legend {
                title: Title::new(&options.legend_title),
                traceorder: "normal",
            }),
            hovermode: Some("x unified"),
            paper_bgcolor: Some("white"),
            plot_bgcolor: Some("white"),
            ..Layout::default()
        },
        frames: Vec::new(),
    }
}

/// Renders the trend chart to `path`, overwriting any existing file.
///
/// # Errors
///
/// Returns [`RenderError`] if the figure cannot be serialized or written.
pub fn write_trend_chart(
    path: &Path,
    rows: &[TrendRow],
    options: &TrendChartOptions,
) -> Result<(), RenderError> {
    let figure = trend_figure(rows, options);
    write_html(path, &figure, &options.title, "lcsi-trend-chart")
}

fn category_series(rows: &[TrendRow], category: StrategyLabel, color: &str) -> ScatterTrace {
    let mut points: Vec<(i32, f64)> = rows
        .iter()
        .filter(|r| r.category == category)
        .map(|r| (r.year, r.percentage))
        .collect();
    points.sort_by_key(|&(year, _)| year);

    let name = category.to_string();
    ScatterTrace {
        legendgroup: name.clone(),
        mode: "lines+markers",
        x: points.iter().map(|&(year, _)| year).collect(),
        y: points.iter().map(|&(_, pct)| pct).collect(),
        line: Line {
            color: Some(color.to_string()),
            width: None,
        },
        marker: Marker {
            color: Some(color.to_string()),
            line: None,
        },
        hovertemplate: "%{y:.1f}%".to_string(),
        showlegend: true,
        name,
    }
}

fn year_range(rows: &[TrendRow]) -> Option<(i32, i32)> {
    let first = rows.iter().map(|r| r.year).min()?;
    let last = rows.iter().map(|r| r.year).max()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, category: StrategyLabel, percentage: f64) -> TrendRow {
        TrendRow {
            year,
            category,
            count: 1,
            total_for_year: 1,
            percentage,
        }
    }

    fn scatter<'t>(trace: &'t Trace<'_>) -> &'t ScatterTrace {
        match trace {
            Trace::Scatter(s) => s,
            Trace::Choropleth(_) => panic!("expected a scatter trace"),
        }
    }

    #[test]
    fn series_follow_fixed_category_order() {
        let rows = vec![
            row(2022, StrategyLabel::Emergency, 10.0),
            row(2022, StrategyLabel::Stress, 40.0),
            row(2022, StrategyLabel::Crisis, 20.0),
        ];
        let figure = trend_figure(&rows, &TrendChartOptions::default());

        let names: Vec<&str> = figure
            .data
            .iter()
            .map(|t| scatter(t).name.as_str())
            .collect();
        assert_eq!(names, vec!["Stress", "Crisis", "Emergency"]);
    }

    #[test]
    fn years_ascend_within_a_series() {
        let rows = vec![
            row(2024, StrategyLabel::Stress, 30.0),
            row(2021, StrategyLabel::Stress, 10.0),
            row(2023, StrategyLabel::Stress, 20.0),
        ];
        let figure = trend_figure(&rows, &TrendChartOptions::default());
        let stress = scatter(&figure.data[0]);

        assert_eq!(stress.x, vec![2021, 2023, 2024]);
        assert_eq!(stress.y, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn title_includes_year_range() {
        let rows = vec![
            row(2021, StrategyLabel::Stress, 10.0),
            row(2025, StrategyLabel::Crisis, 10.0),
        ];
        let figure = trend_figure(&rows, &TrendChartOptions::default());
        assert_eq!(
            figure.layout.title.unwrap().text,
            "LCSI Strategies Trend (2021-2025)"
        );
    }

    #[test]
    fn empty_rows_give_three_empty_series() {
        let figure = trend_figure(&[], &TrendChartOptions::default());

        assert_eq!(figure.data.len(), 3);
        assert!(figure.data.iter().all(|t| scatter(t).x.is_empty()));
        assert_eq!(
            figure.layout.title.as_ref().unwrap().text,
            "LCSI Strategies Trend"
        );
        serde_json::to_string(&figure).unwrap();
    }

    #[test]
    fn layout_uses_white_theme_and_unified_hover() {
        let figure = trend_figure(&[], &TrendChartOptions::default());
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["layout"]["hovermode"], "x unified");
        assert_eq!(json["layout"]["plot_bgcolor"], "white");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "% of Households");
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["mode"], "lines+markers");
        assert!(json.get("frames").is_none());
    }

    #[test]
    fn writes_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lcsi_trend_chart.html");

        write_trend_chart(
            &path,
            &[row(2022, StrategyLabel::Stress, 12.5)],
            &TrendChartOptions::default(),
        )
        .unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("lcsi-trend-chart"));
        assert!(html.contains(r#""name":"Stress""#));
    }
}
