use crate::partition::{NodeId, PartitionNode};
use crate::text::split_text;

/// Longest line of a wrapped label, in characters.
pub const LABEL_MAX_LEN: usize = 23;
/// Lines allowed per radian of span.
const LINES_PER_RADIAN: f64 = 10.0;

/// One line of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub text: String,
    pub pos: usize,
    pub count: usize,
    pub is_root: bool,
    pub flipped: bool,
}

impl TextChunk {
    /// Vertical offset in lines, centring the stack around the node's mid-angle.
    pub fn dy(&self) -> f64 {
        self.pos as f64 - self.count.max(1) as f64 / 2.0 + 0.5
    }

    pub fn is_stacked(&self) -> bool {
        self.count > 1
    }

    /// Horizontal nudge; outer lines of a stack lean towards the centre of the slice.
    pub fn offset_x(&self) -> f64 {
        if !self.is_stacked() {
            return 0.0;
        }
        let offset = self.dy().abs() * 2.0;
        if self.flipped {
            offset
        } else {
            -offset
        }
    }

    pub fn offset_y(&self) -> f64 {
        if self.is_stacked() {
            self.dy() * 20.0 + 4.0
        } else {
            0.0
        }
    }

    /// Degrees each line is tilted to follow the arc.
    pub fn tilt(&self) -> f64 {
        if !self.is_stacked() {
            return 0.0;
        }
        if self.flipped {
            -self.dy() * 5.0
        } else {
            self.dy() * 5.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub node: NodeId,
    /// Mid-angle of the node, degrees clockwise from twelve o'clock.
    pub angle_deg: f64,
    /// Middle of the node's band, in rings.
    pub radius: f64,
    pub is_root: bool,
    pub flipped: bool,
    pub lines: Vec<TextChunk>,
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Lays out the label of `node` for a view rotated by `rotation` radians.
pub fn place_label(node: &PartitionNode<'_>, rotation: f64) -> Label {
    let rotation_deg = rotation.to_degrees();
    if node.depth == 0 {
        let upright = normalize_degrees(rotation_deg);
        let flipped = upright > 90.0 && upright < 270.0;
        return Label {
            node: node.id,
            angle_deg: 0.0,
            radius: 0.0,
            is_root: true,
            flipped,
            lines: vec![TextChunk {
                text: node.name().to_owned(),
                pos: 0,
                count: 1,
                is_root: true,
                flipped,
            }],
        };
    }

    let angle_deg = node.mid_angle().to_degrees();
    let flipped = normalize_degrees(angle_deg + rotation_deg) > 180.0;
    let mut lines = split_text(node.name(), LABEL_MAX_LEN);
    lines.truncate(max_lines(node.span()));
    let count = lines.len();
    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(pos, text)| TextChunk {
            text,
            pos,
            count,
            is_root: false,
            flipped,
        })
        .collect();
    Label {
        node: node.id,
        angle_deg,
        radius: node.mid_radius(),
        is_root: false,
        flipped,
        lines,
    }
}

/// Wider slices may stack more lines.
pub fn max_lines(span: f64) -> usize {
    if span > 0.0 {
        (span * LINES_PER_RADIAN).ceil() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::WordDatum;
    use crate::partition::Partition;
    use std::f64::consts::PI;

    const DEFINITION: &str = "having or showing great warmth or intensity of feeling";

    fn node_at<'a>(datum: &'a WordDatum, x0: f64, x1: f64) -> PartitionNode<'a> {
        let partition = Partition::new(datum);
        let mut node = partition.nodes()[1].clone();
        node.x0 = x0;
        node.x1 = x1;
        node
    }

    fn sense() -> WordDatum {
        WordDatum::branch("hot", vec![WordDatum::leaf(DEFINITION, 1.0)])
    }

    #[test]
    fn wraps_and_centres_lines() {
        let datum = sense();
        let label = place_label(&node_at(&datum, 0.0, 1.0), 0.0);
        let text = label.lines.iter().map(|c| &c.text[..]).collect::<Vec<&str>>();
        assert_eq!(
            text,
            vec!["having or showing great", "warmth or intensity of", "feeling"]
        );
        let dy = label.lines.iter().map(TextChunk::dy).collect::<Vec<f64>>();
        assert_eq!(dy, vec![-1.0, 0.0, 1.0]);
        assert!(label.lines.iter().all(|c| c.count == 3));
        assert_eq!(label.radius, 1.5);
    }

    #[test]
    fn narrow_slices_truncate_lines() {
        let datum = sense();
        let label = place_label(&node_at(&datum, 0.0, 0.15), 0.0);
        assert_eq!(label.lines.len(), 2);
        assert_eq!(label.lines[0].count, 2);
        assert_eq!(label.lines[0].dy(), -0.5);
        assert_eq!(max_lines(0.05), 1);
        assert_eq!(max_lines(0.0), 0);
    }

    #[test]
    fn lower_half_is_flipped() {
        let datum = sense();
        let right = place_label(&node_at(&datum, 0.0, PI / 2.0), 0.0);
        assert!(!right.flipped);
        assert!((right.angle_deg - 45.0).abs() < 1e-9);

        let left = place_label(&node_at(&datum, PI, 2.0 * PI), 0.0);
        assert!(left.flipped);
        assert!(left.lines.iter().all(|c| c.flipped));

        // rotating the view by a half turn swaps them
        assert!(place_label(&node_at(&datum, 0.0, PI / 2.0), PI).flipped);
        assert!(!place_label(&node_at(&datum, PI, 2.0 * PI), PI).flipped);
    }

    #[test]
    fn flipped_lines_mirror_offsets() {
        let chunk = TextChunk {
            text: "warmth".to_owned(),
            pos: 0,
            count: 2,
            is_root: false,
            flipped: false,
        };
        assert_eq!((chunk.offset_x(), chunk.offset_y(), chunk.tilt()), (-1.0, -6.0, -2.5));
        let flipped = TextChunk { flipped: true, ..chunk };
        assert_eq!((flipped.offset_x(), flipped.offset_y(), flipped.tilt()), (1.0, -6.0, 2.5));

        let single = TextChunk {
            text: "cold".to_owned(),
            pos: 0,
            count: 1,
            is_root: false,
            flipped: true,
        };
        assert_eq!((single.offset_x(), single.offset_y(), single.tilt()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn root_is_not_wrapped_and_follows_rotation() {
        let datum = WordDatum::branch(DEFINITION, vec![WordDatum::leaf("cold", 1.0)]);
        let partition = Partition::new(&datum);
        let label = place_label(partition.root(), 0.0);
        assert!(label.is_root);
        assert_eq!(label.lines.len(), 1);
        assert_eq!(label.lines[0].text, DEFINITION);
        assert!(!label.flipped);
        assert!(place_label(partition.root(), PI).flipped);
        assert!(!place_label(partition.root(), -PI / 4.0).flipped);
    }
}
