//! Glyph packer
//!
//! Binary space-partitioning tree over the atlas. Every insertion walks
//! the tree depth-first and takes the first leaf that can hold the
//! footprint; oversize leaves are split so the first child is an exact
//! fit along one axis. The split axis alternates with depth, starting
//! with a top/bottom split at the root.
//!
//! Nodes live in one arena and refer to each other by index. The tree is
//! scaffolding for a single packing run and is dropped as a whole.
//!
//! Coordinates: origin (0, 0) is the bottom-left of the atlas and a
//! node's (x, y) is its bottom-left corner.

/// Axis-aligned rectangle in atlas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    /// True if `other` lies entirely inside `self`
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// True if the interiors intersect (shared edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }
}

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a leaf is divided into two children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// First child is the top strip, second the remainder below it
    TopBottom,
    /// First child is the left strip, second the remainder to its right
    LeftRight,
}

impl Split {
    /// Root splits top/bottom, then alternate with every level
    #[inline]
    pub fn for_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            Split::TopBottom
        } else {
            Split::LeftRight
        }
    }
}

/// One rectangle of the partition
#[derive(Debug, Clone)]
pub struct GlyphNode {
    pub rect: Rect,
    children: Option<[NodeId; 2]>,
    /// Index into the caller's glyph slice
    glyph: Option<usize>,
}

impl GlyphNode {
    fn leaf(rect: Rect) -> Self {
        Self {
            rect,
            children: None,
            glyph: None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    pub fn glyph(&self) -> Option<usize> {
        self.glyph
    }
}

/// Arena-backed packing tree
#[derive(Debug, Clone)]
pub struct GlyphTree {
    nodes: Vec<GlyphNode>,
}

impl GlyphTree {
    const ROOT: NodeId = NodeId(0);

    /// Tree with a single empty leaf covering the whole atlas
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            nodes: vec![GlyphNode::leaf(Rect::new(0, 0, width, height))],
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn node(&self, id: NodeId) -> &GlyphNode {
        &self.nodes[id.0]
    }

    /// Number of nodes (leaves and internal)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GlyphNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Occupied leaves as (glyph index, rectangle)
    pub fn placements(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.glyph.map(|g| (g, n.rect)))
    }

    /// Place a `width` x `height` footprint for glyph `glyph`
    ///
    /// Returns the leaf that now holds the glyph, or None if no free
    /// rectangle can take it. Leaves are only split once they are known to
    /// fit, so a failed insertion leaves the tree untouched.
    pub fn insert(&mut self, glyph: usize, width: i32, height: i32) -> Option<NodeId> {
        self.insert_at(Self::ROOT, 0, glyph, width, height)
    }

    fn insert_at(
        &mut self,
        id: NodeId,
        depth: usize,
        glyph: usize,
        width: i32,
        height: i32,
    ) -> Option<NodeId> {
        let node = &self.nodes[id.0];

        if let Some([first, second]) = node.children {
            return self
                .insert_at(first, depth + 1, glyph, width, height)
                .or_else(|| self.insert_at(second, depth + 1, glyph, width, height));
        }

        if node.rect.width < width || node.rect.height < height || node.glyph.is_some() {
            return None;
        }

        if node.rect.width == width && node.rect.height == height {
            self.nodes[id.0].glyph = Some(glyph);
            return Some(id);
        }

        let [first, _] = self.split(id, width, height, Split::for_depth(depth));
        self.insert_at(first, depth + 1, glyph, width, height)
    }

    /// Divide leaf `id` so the first child matches `width` (left/right) or
    /// `height` (top/bottom)
    fn split(&mut self, id: NodeId, width: i32, height: i32, split: Split) -> [NodeId; 2] {
        let r = self.nodes[id.0].rect;
        let (first, second) = match split {
            Split::TopBottom => (
                Rect::new(r.x, r.y + r.height - height, r.width, height),
                Rect::new(r.x, r.y, r.width, r.height - height),
            ),
            Split::LeftRight => (
                Rect::new(r.x, r.y, width, r.height),
                Rect::new(r.x + width, r.y, r.width - width, r.height),
            ),
        };

        let first_id = NodeId(self.nodes.len());
        self.nodes.push(GlyphNode::leaf(first));
        let second_id = NodeId(self.nodes.len());
        self.nodes.push(GlyphNode::leaf(second));

        let children = [first_id, second_id];
        self.nodes[id.0].children = Some(children);
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small deterministic generator for footprint sizes
    fn sizes(count: usize, max: i32, mut seed: u32) -> Vec<(i32, i32)> {
        (0..count)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let w = ((seed >> 16) % max as u32) as i32 + 1;
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let h = ((seed >> 16) % max as u32) as i32 + 1;
                (w, h)
            })
            .collect()
    }

    fn assert_partition(tree: &GlyphTree) {
        for (_, node) in tree.nodes() {
            if let Some([a, b]) = node.children() {
                let (ra, rb) = (tree.node(a).rect, tree.node(b).rect);
                assert_eq!(ra.area() + rb.area(), node.rect.area());
                assert!(node.rect.contains(&ra));
                assert!(node.rect.contains(&rb));
                assert!(!ra.overlaps(&rb));
                assert!(node.glyph().is_none());
            }
        }
    }

    #[test]
    fn test_exact_fit_occupies_root() {
        let mut tree = GlyphTree::new(4, 4);
        let node = tree.insert(0, 4, 4).unwrap();
        assert_eq!(node, tree.root());
        assert_eq!(tree.node(node).rect, Rect::new(0, 0, 4, 4));
        assert_eq!(tree.insert(1, 1, 1), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_rows_fill_then_fail() {
        let mut tree = GlyphTree::new(4, 2);
        let first = tree.insert(0, 4, 1).unwrap();
        assert_eq!(tree.node(first).rect, Rect::new(0, 1, 4, 1));

        let second = tree.insert(1, 4, 1).unwrap();
        assert_eq!(tree.node(second).rect, Rect::new(0, 0, 4, 1));

        assert_eq!(tree.insert(2, 4, 1), None);
        assert_partition(&tree);
    }

    #[test]
    fn test_oversize_fails() {
        let mut tree = GlyphTree::new(8, 8);
        assert_eq!(tree.insert(0, 9, 1), None);
        assert_eq!(tree.insert(0, 1, 9), None);
        assert!(tree.node(tree.root()).is_leaf());
    }

    #[test]
    fn test_split_axis_alternates() {
        let mut tree = GlyphTree::new(8, 8);
        let id = tree.insert(0, 3, 2).unwrap();

        // Root: top strip of height 2
        let [top, bottom] = tree.node(tree.root()).children().unwrap();
        assert_eq!(tree.node(top).rect, Rect::new(0, 6, 8, 2));
        assert_eq!(tree.node(bottom).rect, Rect::new(0, 0, 8, 6));

        // Depth 1: left strip of width 3
        let [left, right] = tree.node(top).children().unwrap();
        assert_eq!(left, id);
        assert_eq!(tree.node(left).rect, Rect::new(0, 6, 3, 2));
        assert_eq!(tree.node(right).rect, Rect::new(3, 6, 5, 2));
    }

    #[test]
    fn test_same_height_glyphs_share_row() {
        let mut tree = GlyphTree::new(8, 8);
        let a = tree.insert(0, 3, 2).unwrap();
        let b = tree.insert(1, 2, 2).unwrap();
        assert_eq!(tree.node(a).rect.y, tree.node(b).rect.y);
        assert_eq!(tree.node(b).rect.x, 3);
    }

    #[test]
    fn test_placements_disjoint_and_in_bounds() {
        let bounds = Rect::new(0, 0, 128, 128);
        let mut input = sizes(150, 10, 7);
        input.sort_by(|a, b| b.1.cmp(&a.1));

        let mut tree = GlyphTree::new(bounds.width, bounds.height);
        for (i, &(w, h)) in input.iter().enumerate() {
            tree.insert(i, w, h).expect("footprint should fit");
        }

        let placed: Vec<(usize, Rect)> = tree.placements().collect();
        assert_eq!(placed.len(), input.len());
        for (i, (g, r)) in placed.iter().enumerate() {
            assert!(bounds.contains(r));
            assert_eq!((r.width, r.height), input[*g]);
            for (_, other) in &placed[i + 1..] {
                assert!(!r.overlaps(other), "{:?} overlaps {:?}", r, other);
            }
        }
        assert_partition(&tree);
    }

    #[test]
    fn test_partition_holds_after_failures() {
        let mut tree = GlyphTree::new(16, 16);
        for (i, (w, h)) in sizes(80, 9, 3).into_iter().enumerate() {
            let _ = tree.insert(i, w, h);
        }
        assert_partition(&tree);
    }

    #[test]
    fn test_deterministic() {
        let input = sizes(60, 10, 11);
        let run = || {
            let mut tree = GlyphTree::new(64, 64);
            for (i, &(w, h)) in input.iter().enumerate() {
                let _ = tree.insert(i, w, h);
            }
            tree.placements().collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_zero_sized_footprint_terminates() {
        let mut tree = GlyphTree::new(4, 4);
        let id = tree.insert(0, 0, 0).unwrap();
        assert_eq!(tree.node(id).rect.area(), 0);
        assert!(tree.insert(1, 4, 4).is_some());
        assert!(tree.insert(2, 1, 1).is_none());
    }
}
