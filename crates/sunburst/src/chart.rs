use std::collections::HashMap;
use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::datum::WordDatum;
use crate::label::{place_label, Label};
use crate::partition::{NodeId, Partition, PartitionNode, VisibilityRule};
use crate::ChartError;

/// Radians of rotation per unit of wheel delta.
pub const WHEEL_SENSITIVITY: f64 = 0.002;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub container_id: String,
    pub visibility: VisibilityRule,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            container_id: "word-chart".to_owned(),
            visibility: VisibilityRule::default(),
        }
    }
}

impl ChartConfig {
    /// Pixel width of one ring.
    pub fn radius(&self) -> f64 {
        f64::from(self.width) / 6.0
    }

    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const NEUTRAL: Rgb = Rgb(0xcc, 0xcc, 0xcc);

    /// Cyclical rainbow, `t` in `[0, 1]`.
    pub fn sinebow(t: f64) -> Self {
        let t = 0.5 - t;
        let channel = |shift: f64| {
            let s = (PI * (t + shift)).sin();
            (255.0 * s * s).round().clamp(0.0, 255.0) as u8
        };
        Rgb(channel(0.0), channel(1.0 / 3.0), channel(2.0 / 3.0))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// An annular sector ready to be drawn. Angles in radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub node: NodeId,
    pub name: String,
    pub depth: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub pad_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill: Rgb,
    pub fill_opacity: f64,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub container_id: String,
    /// Pixel width of one ring.
    pub radius: f64,
    /// View rotation in radians.
    pub rotation: f64,
    pub arcs: Vec<ArcShape>,
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The chart is now centred on this node.
    Focused(String),
    ZoomedOut,
    /// A related word; it has nothing below it to centre on.
    Leaf(String),
    Missed,
}

/// Chart state across input events: the data, the node at the centre
/// and how far the view is turned.
#[derive(Debug, Clone)]
pub struct WordChart {
    config: ChartConfig,
    datum: Option<WordDatum>,
    focus: Vec<usize>,
    rotation: f64,
}

impl WordChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            datum: None,
            focus: Vec::new(),
            rotation: 0.0,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_datum(&mut self, datum: WordDatum) {
        tracing::debug!(root = %datum.name, senses = datum.children.len(), "new chart data");
        self.datum = Some(datum);
        self.focus.clear();
        self.rotation = 0.0;
    }

    pub fn datum(&self) -> Option<&WordDatum> {
        self.datum.as_ref()
    }

    /// The node currently drawn at the centre.
    pub fn focused(&self) -> Option<&WordDatum> {
        let datum = self.datum.as_ref()?;
        datum.descend(&self.focus).or(Some(datum))
    }

    pub fn focus_path(&self) -> &[usize] {
        &self.focus
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }

    pub fn rotate_degrees(&mut self, degrees: f64) {
        self.rotation = (self.rotation + degrees.to_radians()).rem_euclid(TAU);
    }

    pub fn wheel(&mut self, delta: f64) {
        self.rotation = (self.rotation + delta * WHEEL_SENSITIVITY).rem_euclid(TAU);
    }

    /// Moves the centre one level up. Returns false when already at the top.
    pub fn zoom_out(&mut self) -> bool {
        self.focus.pop().is_some()
    }

    pub fn layout(&self) -> Result<ChartLayout, ChartError> {
        let focused = self.focused().ok_or(ChartError::NoData)?;
        let partition = Partition::new(focused);
        let rule = self.config.visibility;
        let radius = self.config.radius();
        let palette = palette(&partition);

        let mut arcs = Vec::new();
        let mut labels = Vec::new();
        for node in partition.descendants() {
            if rule.arc_visible(node) {
                let fill = partition
                    .ancestor_at_depth(node.id, 1)
                    .and_then(|sense| palette.get(&sense.id).copied())
                    .unwrap_or(Rgb::NEUTRAL);
                arcs.push(ArcShape {
                    node: node.id,
                    name: node.name().to_owned(),
                    depth: node.depth,
                    start_angle: node.x0,
                    end_angle: node.x1,
                    pad_angle: (node.span() / 2.0).min(0.005),
                    inner_radius: node.y0 * radius,
                    outer_radius: (node.y0 * radius).max(node.y1 * radius - 1.0),
                    fill,
                    fill_opacity: if node.is_leaf() { 0.4 } else { 0.6 },
                });
            }
            if rule.label_visible(node) {
                labels.push(place_label(node, self.rotation));
            }
        }
        tracing::debug!(arcs = arcs.len(), labels = labels.len(), "chart laid out");
        Ok(ChartLayout {
            width: self.config.width,
            height: self.config.height,
            container_id: self.config.container_id.clone(),
            radius,
            rotation: self.rotation,
            arcs,
            labels,
        })
    }

    /// Handles a click at `(x, y)` in chart pixels, origin at the top left corner.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        let Some(focused) = self.focused() else {
            return ClickOutcome::Missed;
        };
        let (cx, cy) = self.config.center();
        let (dx, dy) = (x - cx, y - cy);
        let ring = dx.hypot(dy) / self.config.radius();
        if ring < 1.0 {
            return if self.zoom_out() {
                ClickOutcome::ZoomedOut
            } else {
                ClickOutcome::Missed
            };
        }
        let angle = (dx.atan2(-dy) - self.rotation).rem_euclid(TAU);

        let partition = Partition::new(focused);
        let rule = self.config.visibility;
        let hit = partition.nodes().iter().find(|node| {
            rule.arc_visible(node)
                && node.y0 <= ring
                && ring < node.y1
                && node.x0 <= angle
                && angle < node.x1
        });
        let Some(hit) = hit else {
            return ClickOutcome::Missed;
        };
        if hit.is_leaf() {
            return ClickOutcome::Leaf(hit.name().to_owned());
        }
        let name = hit.name().to_owned();
        let path = partition.datum_path(hit.id).unwrap_or_default();
        self.focus.extend(path);
        ClickOutcome::Focused(name)
    }

    /// Centres on the visible node whose label best matches `query`.
    pub fn focus_on_label(&mut self, query: &str) -> Option<String> {
        let focused = self.focused()?;
        let partition = Partition::new(focused);
        let rule = self.config.visibility;
        let candidates = partition
            .nodes()
            .iter()
            .filter(|node| rule.arc_visible(node) && !node.is_leaf())
            .collect::<Vec<&PartitionNode<'_>>>();
        let best = best_match(&candidates, query)?;
        let name = best.name().to_owned();
        let path = partition.datum_path(best.id).unwrap_or_default();
        self.focus.extend(path);
        Some(name)
    }
}

/// One colour per sense, spread evenly around the rainbow.
fn palette(partition: &Partition<'_>) -> HashMap<NodeId, Rgb> {
    let senses = &partition.root().children;
    senses
        .iter()
        .enumerate()
        .map(|(index, &id)| (id, Rgb::sinebow(index as f64 / senses.len() as f64)))
        .collect()
}

fn best_match<'n, 'a>(
    candidates: &[&'n PartitionNode<'a>],
    query: &str,
) -> Option<&'n PartitionNode<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    let containing = candidates
        .iter()
        .filter(|node| node.name().to_lowercase().contains(&query))
        .collect::<Vec<_>>();
    if let [only] = containing[..] {
        return Some(*only);
    }
    let mut scored = candidates
        .iter()
        .map(|node| (*node, strsim::jaro(&node.name().to_lowercase(), &query)))
        .collect::<Vec<(&PartitionNode<'a>, f64)>>();
    // most similar at the start
    scored.sort_unstable_by(|(_, a), (_, b)| b.total_cmp(a));
    match &scored[..] {
        [] => None,
        [(node, score)] => (*score > 0.9).then_some(*node),
        [(node, first), (_, second), ..] => {
            let difference = first - second;
            ((*first > 0.9 && difference > 0.25) || *first == 1.0).then_some(*node)
        }
    }
}
