//! Serializable subset of the Plotly.js figure schema.
//!
//! Only the attributes the LCSI charts use are modelled. Optional attributes
//! are omitted from the JSON when unset so Plotly applies its own defaults.

use geojson::FeatureCollection;
use serde::Serialize;

/// A complete Plotly figure: traces, layout, and animation frames.
#[derive(Debug, Clone, Serialize)]
pub struct Figure<'a> {
    /// Traces drawn initially.
    pub data: Vec<Trace<'a>>,
    /// Layout shared by all frames.
    pub layout: Layout,
    /// Animation frames, in playback order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame<'a>>,
}

/// A single Plotly trace.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace<'a> {
    /// Line/marker series.
    Scatter(ScatterTrace),
    /// Filled regions keyed by a `GeoJSON` property.
    Choropleth(ChoroplethTrace<'a>),
}

/// Line chart series.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    /// Legend entry.
    pub name: String,
    /// Legend group, same as the name.
    pub legendgroup: String,
    /// Draw mode, e.g. `lines+markers`.
    pub mode: &'static str,
    /// X values.
    pub x: Vec<i32>,
    /// Y values.
    pub y: Vec<f64>,
    /// Line styling.
    pub line: Line,
    /// Marker styling.
    pub marker: Marker,
    /// Hover label template.
    pub hovertemplate: String,
    /// Whether the trace is listed in the legend.
    pub showlegend: bool,
}

/// Line styling.
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    /// CSS color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Stroke width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Marker styling.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    /// CSS color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Outline styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

/// Choropleth trace.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace<'a> {
    /// Boundary polygons. Only set on the initial trace; frames reuse it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geojson: Option<&'a FeatureCollection>,
    /// Always `geojson-id`: locations are matched on [`Self::featureidkey`].
    pub locationmode: &'static str,
    /// Path of the feature property matched against [`Self::locations`].
    pub featureidkey: String,
    /// Region names.
    pub locations: Vec<String>,
    /// Value per region.
    pub z: Vec<f64>,
    /// Lower bound of the color scale.
    pub zmin: f64,
    /// Upper bound of the color scale.
    pub zmax: f64,
    /// Named Plotly color scale.
    pub colorscale: &'static str,
    /// Color bar styling.
    pub colorbar: ColorBar,
    /// Region outline styling.
    pub marker: Marker,
    /// Hover label template.
    pub hovertemplate: String,
}

/// Color bar next to a choropleth.
#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    /// Color bar title.
    pub title: Title,
}

/// A text title.
#[derive(Debug, Clone, Serialize)]
pub struct Title {
    /// Title text.
    pub text: String,
}

impl Title {
    /// Creates a title from any string-like value.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Figure layout.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    /// Figure title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// X axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    /// Y axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    /// Hover mode, e.g. `x unified`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
    /// Background outside the plot area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<&'static str>,
    /// Background inside the plot area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<&'static str>,
    /// Plot margins in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// Map projection settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    /// Animation sliders.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sliders: Vec<Slider>,
    /// Button groups (play/pause).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub updatemenus: Vec<serde_json::Value>,
}

/// Cartesian axis.
#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: Title,
    /// Grid line color.
    pub gridcolor: &'static str,
    /// Zero line color.
    pub zerolinecolor: &'static str,
    /// Axis line color.
    pub linecolor: &'static str,
    /// Tick placement mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<&'static str>,
    /// Tick spacing, used with `linear` tick mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
}

/// Legend settings.
#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    /// Legend title.
    pub title: Title,
    /// Item ordering; `normal` keeps trace order.
    pub traceorder: &'static str,
}

/// Plot margins.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Margin {
    /// Right.
    pub r: u32,
    /// Top.
    pub t: u32,
    /// Left.
    pub l: u32,
    /// Bottom.
    pub b: u32,
}

/// Geographic subplot settings.
#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    /// `locations` zooms to the drawn regions.
    pub fitbounds: &'static str,
    /// Whether base map chrome (coastlines, frame, land) is drawn.
    pub visible: bool,
}

/// Animation frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    /// Frame name, referenced by slider steps.
    pub name: String,
    /// Trace updates applied when the frame is shown.
    pub data: Vec<Trace<'a>>,
}

/// Animation slider.
#[derive(Debug, Clone, Serialize)]
pub struct Slider {
    /// Index of the initially selected step.
    pub active: usize,
    /// Label shown above the slider.
    pub currentvalue: SliderValue,
    /// Padding in pixels.
    pub pad: Margin,
    /// One step per frame.
    pub steps: Vec<SliderStep>,
}

/// Current-value label of a slider.
#[derive(Debug, Clone, Serialize)]
pub struct SliderValue {
    /// Text before the value.
    pub prefix: String,
}

/// Slider step that jumps to a frame.
#[derive(Debug, Clone, Serialize)]
pub struct SliderStep {
    /// Step label.
    pub label: String,
    /// Always `animate`.
    pub method: &'static str,
    /// Arguments to `Plotly.animate`.
    pub args: serde_json::Value,
}
