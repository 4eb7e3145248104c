//! Animated emergency prevalence choropleth.
//!
//! One animation frame per survey year. Regions are joined to boundary
//! features by comparing the tabular region name with the resolved name
//! property; regions without a feature simply draw nothing.

use std::collections::BTreeMap;
use std::path::Path;

use geojson::FeatureCollection;
use lcsi_analytics::max_prevalence;
use lcsi_geography::NameKey;
use lcsi_survey_models::SpatialRow;
use serde_json::json;

use crate::RenderError;
use crate::figure::{
    ChoroplethTrace, ColorBar, Figure, Frame, Geo, Layout, Line, Margin, Marker, Slider,
    SliderStep, SliderValue, Title, Trace,
};
use crate::html::write_html;

/// Milliseconds each frame stays on screen during playback.
const FRAME_DURATION_MS: u32 = 500;

/// Text and styling of the prevalence map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Map title.
    pub title: String,
    /// Color bar title.
    pub colorbar_title: String,
    /// Region outline width in pixels.
    pub outline_width: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            title: "Prevalence of Emergency Livelihood Coping Strategies (%)".to_string(),
            colorbar_title: "Emergency Rate (%)".to_string(),
            outline_width: 0.5,
        }
    }
}

/// Builds the animated choropleth.
///
/// The color scale spans `[0, max prevalence]` across every year so frames
/// are comparable. The initial trace shows the earliest year and carries the
/// boundary polygons; frames only swap locations and values.
#[must_use]
pub fn choropleth_figure<'a>(
    rows: &[SpatialRow],
    boundaries: &'a FeatureCollection,
    key: &NameKey,
    options: &MapOptions,
) -> Figure<'a> {
    let zmax = max_prevalence(rows);

    let mut by_year: BTreeMap<i32, Vec<&SpatialRow>> = BTreeMap::new();
    for row in rows {
        by_year.entry(row.year).or_default().push(row);
    }

    let frames: Vec<Frame<'a>> = by_year
        .iter()
        .map(|(&year, year_rows)| Frame {
            name: year.to_string(),
            data: vec![Trace::Choropleth(year_trace(
                year, year_rows, None, key, zmax, options,
            ))],
        })
        .collect();

    let initial = by_year.iter().next().map_or_else(
        || year_trace(0, &[], Some(boundaries), key, zmax, options),
        |(&year, year_rows)| year_trace(year, year_rows, Some(boundaries), key, zmax, options),
    );

    let years: Vec<i32> = by_year.keys().copied().collect();

    Figure {
        data: vec![Trace::Choropleth(initial)],
        layout: Layout {
            title: Some(Title::new(&options.title)),
            margin: Some(Margin {
                r: 0,
                t: 50,
                l: 0,
                b: 0,
            }),
            geo: Some(Geo {
                fitbounds: "locations",
                visible: false,
            }),
            sliders: year_slider(&years),
            updatemenus: play_buttons(&years),
            ..Layout::default()
        },
        frames,
    }
}

/// Renders the map to `path`, overwriting any existing file.
///
/// # Errors
///
/// Returns [`RenderError`] if the figure cannot be serialized or written.
pub fn write_choropleth_map(
    path: &Path,
    rows: &[SpatialRow],
    boundaries: &FeatureCollection,
    key: &NameKey,
    options: &MapOptions,
) -> Result<(), RenderError> {
    let figure = choropleth_figure(rows, boundaries, key, options);
    log::debug!(
        "Map has {} frames keyed on {}",
        figure.frames.len(),
        key.feature_id_key()
    );
    write_html(path, &figure, &options.title, "lcsi-emergency-map")
}

fn year_trace<'a>(
    year: i32,
    rows: &[&SpatialRow],
    geojson: Option<&'a FeatureCollection>,
    key: &NameKey,
    zmax: f64,
    options: &MapOptions,
) -> ChoroplethTrace<'a> {
    ChoroplethTrace {
        geojson,
        locationmode: "geojson-id",
        featureidkey: key.feature_id_key(),
        locations: rows.iter().map(|r| r.region_name.clone()).collect(),
        z: rows.iter().map(|r| r.prevalence_percentage).collect(),
        zmin: 0.0,
        zmax,
        colorscale: "Reds",
        colorbar: ColorBar {
            title: Title::new(&options.colorbar_title),
        },
        marker: Marker {
            color: None,
            line: Some(Line {
                color: None,
                width: Some(options.outline_width),
            }),
        },
        hovertemplate: format!(
            "<b>%{{location}}</b><br>Year={year}<br>{}=%{{z:.1f}}<extra></extra>",
            options.colorbar_title
        ),
    }
}

fn animate_args(frames: serde_json::Value, duration: u32) -> serde_json::Value {
    json!([
        frames,
        {
            "mode": "immediate",
            "fromcurrent": true,
            "frame": { "duration": duration, "redraw": true },
            "transition": { "duration": 0 }
        }
    ])
}

fn year_slider(years: &[i32]) -> Vec<Slider> {
    if years.is_empty() {
        return Vec::new();
    }

    vec![Slider {
        active: 0,
        currentvalue: SliderValue {
            prefix: "Year=".to_string(),
        },
        pad: Margin {
            r: 0,
            t: 50,
            l: 0,
            b: 10,
        },
        steps: years
            .iter()
            .map(|year| SliderStep {
                label: year.to_string(),
                method: "animate",
                args: animate_args(json!([year.to_string()]), 0),
            })
            .collect(),
    }]
}

fn play_buttons(years: &[i32]) -> Vec<serde_json::Value> {
    if years.len() < 2 {
        return Vec::new();
    }

    vec![json!({
        "type": "buttons",
        "direction": "left",
        "showactive": false,
        "x": 0.1,
        "y": 0,
        "xanchor": "right",
        "yanchor": "top",
        "pad": { "r": 10, "t": 70 },
        "buttons": [
            {
                "label": "&#9654;",
                "method": "animate",
                "args": animate_args(serde_json::Value::Null, FRAME_DURATION_MS)
            },
            {
                "label": "&#9724;",
                "method": "animate",
                "args": animate_args(json!([null]), 0)
            }
        ]
    })]
}
