//! Circular partition of a [`WordDatum`] tree.
//!
//! Every node gets an angular span `[x0, x1]` inside `[0, 2π]`, proportional to
//! the summed value of its leaves, and a radial band `[depth, depth + 1]`.
//! Siblings are laid out contiguously, largest first.

use std::f64::consts::TAU;

use crate::datum::WordDatum;

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct PartitionNode<'a> {
    pub id: NodeId,
    pub datum: &'a WordDatum,
    /// Position of `datum` among its parent's datum children.
    pub index_in_parent: usize,
    pub parent: Option<NodeId>,
    /// Sorted by value, descending.
    pub children: Vec<NodeId>,
    pub depth: usize,
    /// Distance to the deepest leaf below.
    pub height: usize,
    pub value: f64,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl PartitionNode<'_> {
    pub fn name(&self) -> &str {
        &self.datum.name
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn span(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn mid_angle(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct Partition<'a> {
    nodes: Vec<PartitionNode<'a>>,
}

impl<'a> Partition<'a> {
    pub fn new(root: &'a WordDatum) -> Self {
        let mut partition = Self { nodes: Vec::new() };
        partition.insert(root, 0, None, 0);
        partition.sort_children(0);
        let root = &mut partition.nodes[0];
        root.x0 = 0.0;
        root.x1 = TAU;
        root.y0 = 0.0;
        root.y1 = 1.0;
        partition.divide(0);
        partition
    }

    /// Adds `datum` and its subtree, returning the new node's id.
    /// Values and heights are summed on the way up.
    fn insert(
        &mut self,
        datum: &'a WordDatum,
        index_in_parent: usize,
        parent: Option<NodeId>,
        depth: usize,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(PartitionNode {
            id,
            datum,
            index_in_parent,
            parent,
            children: Vec::with_capacity(datum.children.len()),
            depth,
            height: 0,
            value: 0.0,
            x0: 0.0,
            x1: 0.0,
            y0: depth as f64,
            y1: depth as f64 + 1.0,
        });
        let mut value = 0.0;
        let mut height = 0;
        for (index, child) in datum.children.iter().enumerate() {
            let child = self.insert(child, index, Some(id), depth + 1);
            value += self.nodes[child].value;
            height = height.max(self.nodes[child].height + 1);
            self.nodes[id].children.push(child);
        }
        if datum.is_leaf() {
            value = leaf_value(datum);
        }
        let node = &mut self.nodes[id];
        node.value = value;
        node.height = height;
        id
    }

    fn sort_children(&mut self, id: NodeId) {
        let mut children = std::mem::take(&mut self.nodes[id].children);
        children.sort_by(|&a, &b| {
            let (a, b) = (&self.nodes[a], &self.nodes[b]);
            b.value
                .total_cmp(&a.value)
                .then_with(|| a.name().cmp(b.name()))
        });
        for &child in &children {
            self.sort_children(child);
        }
        self.nodes[id].children = children;
    }

    /// Hands the parent's span to its children in order, each in proportion to its value.
    fn divide(&mut self, id: NodeId) {
        let (x0, x1, total) = {
            let node = &self.nodes[id];
            (node.x0, node.x1, node.value)
        };
        let scale = if total > 0.0 { (x1 - x0) / total } else { 0.0 };
        let children = self.nodes[id].children.clone();
        let mut start = x0;
        let mut covered = 0.0;
        for (position, &child) in children.iter().enumerate() {
            let node = &mut self.nodes[child];
            covered += node.value;
            let last = position + 1 == children.len();
            // the final stretch closes exactly on the parent's edge
            let end = if total > 0.0 && (covered >= total || last) {
                x1
            } else {
                x0 + covered * scale
            };
            node.x0 = start;
            node.x1 = end;
            start = end;
            self.divide(child);
        }
    }

    pub fn root(&self) -> &PartitionNode<'a> {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> Option<&PartitionNode<'a>> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[PartitionNode<'a>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn height(&self) -> usize {
        self.root().height
    }

    /// Pre-order walk in sorted child order.
    pub fn descendants(&self) -> Vec<&PartitionNode<'a>> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            order.push(node);
            stack.extend(node.children.iter().rev());
        }
        order
    }

    pub fn ancestor_at_depth(&self, id: NodeId, depth: usize) -> Option<&PartitionNode<'a>> {
        let mut node = self.node(id)?;
        if node.depth < depth {
            return None;
        }
        while node.depth > depth {
            node = &self.nodes[node.parent?];
        }
        Some(node)
    }

    /// Datum child indices leading from the partition root to `id`.
    pub fn datum_path(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut node = self.node(id)?;
        let mut path = Vec::with_capacity(node.depth);
        while let Some(parent) = node.parent {
            path.push(node.index_in_parent);
            node = &self.nodes[parent];
        }
        path.reverse();
        Some(path)
    }
}

fn leaf_value(datum: &WordDatum) -> f64 {
    match datum.value {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Which rings are drawn. Deeper rings stay hidden until the chart is re-centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityRule {
    pub ring_limit: f64,
    pub inner_cutoff: f64,
    pub min_label_area: f64,
}

impl Default for VisibilityRule {
    fn default() -> Self {
        Self {
            ring_limit: 3.0,
            inner_cutoff: 1.0,
            min_label_area: 0.03,
        }
    }
}

impl VisibilityRule {
    pub fn arc_visible(&self, node: &PartitionNode<'_>) -> bool {
        node.y1 <= self.ring_limit && node.y0 >= self.inner_cutoff && node.x1 > node.x0
    }

    pub fn label_visible(&self, node: &PartitionNode<'_>) -> bool {
        node.y1 <= self.ring_limit
            && (node.y1 - node.y0) * (node.x1 - node.x0) > self.min_label_area
    }
}
