//! SVG output for a [`ChartLayout`].

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;
use std::path::Path;

use crate::chart::{ArcShape, ChartLayout};
use crate::label::{Label, TextChunk};
use crate::ChartError;

pub struct SvgRenderer {
    font: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new("15px sans-serif")
    }
}

impl SvgRenderer {
    pub fn new(font: impl Into<String>) -> Self {
        Self { font: font.into() }
    }

    pub fn render(&self, layout: &ChartLayout) -> String {
        let mut arcs = String::new();
        for arc in &layout.arcs {
            let _ = writeln!(
                arcs,
                r#"    <path d="{d}" fill="{fill}" fill-opacity="{opacity}"><title>{title}</title></path>"#,
                d = sector_path(arc),
                fill = arc.fill,
                opacity = arc.fill_opacity,
                title = escape(&arc.name),
            );
        }
        let mut labels = String::new();
        for label in &layout.labels {
            labels.push_str(&render_label(label, layout.radius));
        }
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" viewBox="0 0 {w} {h}" width="{w}" height="{h}" style="font: {font}">
  <g transform="translate({cx},{cy}) rotate({rotation})">
   <g class="arcs">
{arcs}   </g>
   <g class="labels" pointer-events="none" text-anchor="middle" style="user-select: none">
{labels}   </g>
  </g>
</svg>
"#,
            id = escape(&layout.container_id),
            w = layout.width,
            h = layout.height,
            font = escape(&self.font),
            cx = f64::from(layout.width) / 2.0,
            cy = f64::from(layout.height) / 2.0,
            rotation = fmt_num(layout.rotation.to_degrees()),
        )
    }

    pub fn save(&self, layout: &ChartLayout, path: impl AsRef<Path>) -> Result<(), ChartError> {
        let path = path.as_ref();
        std::fs::write(path, self.render(layout))?;
        tracing::info!(path = %path.display(), arcs = layout.arcs.len(), "chart written");
        Ok(())
    }
}

fn render_label(label: &Label, ring: f64) -> String {
    let transform = if label.is_root {
        String::new()
    } else {
        format!(
            r#" transform="rotate({}) translate({},0)""#,
            fmt_num(label.angle_deg - 90.0),
            fmt_num(label.radius * ring)
        )
    };
    let mut out = format!("    <g{transform}>\n");
    for line in &label.lines {
        let _ = writeln!(
            out,
            r#"      <text dy="0.35em"{transform}>{text}</text>"#,
            transform = line_transform(line),
            text = escape(&line.text),
        );
    }
    out.push_str("    </g>\n");
    out
}

fn line_transform(line: &TextChunk) -> String {
    let mut parts = Vec::new();
    if line.flipped {
        parts.push("rotate(180)".to_owned());
    }
    if line.is_stacked() {
        parts.push(format!(
            "translate({},{})",
            fmt_num(line.offset_x()),
            fmt_num(line.offset_y())
        ));
        parts.push(format!("rotate({})", fmt_num(line.tilt())));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(r#" transform="{}""#, parts.join(" "))
    }
}

fn point(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Annular sector path, angles clockwise from twelve o'clock.
pub fn sector_path(arc: &ArcShape) -> String {
    let (r0, r1) = (arc.inner_radius.max(0.0), arc.outer_radius.max(0.0));
    let span = arc.end_angle - arc.start_angle;
    if span >= TAU - 1e-9 {
        return ring_path(r0, r1);
    }
    let pad = arc.pad_angle.min(span) / 2.0;
    let (a0, a1) = (arc.start_angle + pad, arc.end_angle - pad);
    let large = if a1 - a0 > PI { 1 } else { 0 };

    let (ox0, oy0) = point(r1, a0);
    let (ox1, oy1) = point(r1, a1);
    let mut d = format!(
        "M{},{}A{r},{r},0,{large},1,{},{}",
        fmt_num(ox0),
        fmt_num(oy0),
        fmt_num(ox1),
        fmt_num(oy1),
        r = fmt_num(r1),
    );
    if r0 > 0.0 {
        let (ix1, iy1) = point(r0, a1);
        let (ix0, iy0) = point(r0, a0);
        let _ = write!(
            d,
            "L{},{}A{r},{r},0,{large},0,{},{}Z",
            fmt_num(ix1),
            fmt_num(iy1),
            fmt_num(ix0),
            fmt_num(iy0),
            r = fmt_num(r0),
        );
    } else {
        d.push_str("L0,0Z");
    }
    d
}

/// A whole ring, drawn as two half circles out and two back in.
fn ring_path(r0: f64, r1: f64) -> String {
    let mut d = format!(
        "M0,{top}A{r},{r},0,1,1,0,{bottom}A{r},{r},0,1,1,0,{top}Z",
        top = fmt_num(-r1),
        bottom = fmt_num(r1),
        r = fmt_num(r1),
    );
    if r0 > 0.0 {
        let _ = write!(
            d,
            "M0,{top}A{r},{r},0,1,0,0,{bottom}A{r},{r},0,1,0,0,{top}Z",
            top = fmt_num(-r0),
            bottom = fmt_num(r0),
            r = fmt_num(r0),
        );
    }
    d
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        rounded.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
