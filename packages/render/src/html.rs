//! Standalone HTML output.
//!
//! The figure JSON is inlined into the page and Plotly.js is loaded from its
//! CDN, so the file opens in any browser without a server.

use std::path::Path;

use crate::RenderError;
use crate::figure::Figure;

/// Plotly.js bundle referenced by every page.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Renders `figure` into a complete HTML document.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if the figure cannot be serialized.
pub fn render_html(
    figure: &Figure<'_>,
    page_title: &str,
    div_id: &str,
) -> Result<String, RenderError> {
    // A literal "</" inside a JSON string would close the <script> element.
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>{title}</title>
<script src="{cdn}" charset="utf-8"></script>
<style>html, body {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="{div_id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
<script type="text/javascript">
var figure = {figure_json};
Plotly.newPlot("{div_id}", figure.data, figure.layout, {{"responsive": true}}).then(function () {{
    if (figure.frames) {{
        Plotly.addFrames("{div_id}", figure.frames);
    }}
}});
</script>
</body>
</html>
"#,
        title = escape_html(page_title),
        cdn = PLOTLY_CDN_URL,
    ))
}

/// Writes `figure` to `path` as a standalone HTML page, replacing any
/// existing file.
///
/// # Errors
///
/// Returns [`RenderError`] if serialization or the write fails.
pub fn write_html(
    path: &Path,
    figure: &Figure<'_>,
    page_title: &str,
    div_id: &str,
) -> Result<(), RenderError> {
    let html = render_html(figure, page_title, div_id)?;
    std::fs::write(path, html.as_bytes()).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
