//! Ordered course index: an unbalanced binary search tree over course numbers.
//!
//! Placement rule: a course whose number is greater than the visited node's
//! goes left, anything else (less or equal) goes right. Lookup descends the
//! same way, so in-order traversal yields courses in descending order.
//!
//! Duplicate course numbers are kept. A duplicate always lands below the
//! first equal node, so lookup returns the first inserted one while the
//! traversal still lists every copy.
//!
//! Insert, lookup and traversal are iterative; a degenerate chain (sorted
//! input) costs heap, not call stack.

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::Course;

/// Default number of levels rendered by [`CourseIndex::shape`].
pub const SHAPE_DEPTH: usize = 32;

/// Tree node owning exactly one course.
#[derive(Debug)]
pub struct CourseNode {
    pub course: Course,
    /// Subtree of greater course numbers
    pub left: Option<Index>,
    /// Subtree of lesser or equal course numbers
    pub right: Option<Index>,
}

impl CourseNode {
    fn new(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Arena-backed binary search tree keyed by course number.
///
/// Every node is owned by the arena and referenced by exactly one parent
/// link (or by `root`). Nodes are never removed, so indices stay valid for
/// the lifetime of the index, and dropping the index releases all nodes.
#[derive(Debug)]
pub struct CourseIndex {
    arena: Arena<CourseNode>,
    root: Option<Index>,
}

impl Default for CourseIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseIndex {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&CourseNode> {
        self.arena.get(idx)
    }

    /// Insert a course. Never fails: descends to the first free slot.
    #[instrument(level = "trace", skip(self, course), fields(id = %course.id))]
    pub fn insert(&mut self, course: Course) {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(CourseNode::new(course)));
            return;
        };

        loop {
            // indices handed out by this arena are never removed
            let node = &self.arena[current];
            let go_left = course.id > node.course.id;
            let next = if go_left { node.left } else { node.right };

            match next {
                Some(child) => current = child,
                None => {
                    let child = self.arena.insert(CourseNode::new(course));
                    let parent = &mut self.arena[current];
                    if go_left {
                        parent.left = Some(child);
                    } else {
                        parent.right = Some(child);
                    }
                    return;
                }
            }
        }
    }

    /// Look up a course by exact course number.
    ///
    /// The first match on the path from the root wins; see the module docs
    /// for what that means for duplicates. No normalization is applied.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, id: &str) -> Option<&Course> {
        let mut current = self.root;
        while let Some(node) = current.and_then(|idx| self.arena.get(idx)) {
            if node.course.id == id {
                return Some(&node.course);
            }
            current = if id > node.course.id.as_str() {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// In-order traversal (left, node, right): descending by course number.
    ///
    /// Read-only and restartable; two traversals without an insert in between
    /// yield the same sequence.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                deepest = deepest.max(depth);
                stack.extend(node.left.map(|c| (c, depth + 1)));
                stack.extend(node.right.map(|c| (c, depth + 1)));
            }
        }
        deepest
    }

    /// Render the tree shape, labelling each child with the side it hangs on.
    ///
    /// Nodes below `max_depth` are folded into a single `… (N more)` leaf, so
    /// the rendered tree (and termtree's recursive display and drop) stays
    /// shallow even for a degenerate chain. Returns `None` when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn shape(&self, max_depth: usize) -> Option<Tree<String>> {
        let root = self.root?;
        let mut pending: Vec<(Index, &'static str, usize, bool)> = vec![(root, "", 1, false)];
        let mut built: Vec<Tree<String>> = Vec::new();

        while let Some((idx, side, depth, expanded)) = pending.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            if depth > max_depth {
                built.push(Tree::new(format!(
                    "{side}\u{2026} ({} more)",
                    self.subtree_len(idx)
                )));
                continue;
            }
            if !expanded {
                pending.push((idx, side, depth, true));
                if let Some(right) = node.right {
                    pending.push((right, "R ", depth + 1, false));
                }
                if let Some(left) = node.left {
                    pending.push((left, "L ", depth + 1, false));
                }
                continue;
            }

            // children finished left first, so the right one is on top
            let right = node.right.and_then(|_| built.pop());
            let left = node.left.and_then(|_| built.pop());

            let mut tree = Tree::new(format!("{side}{}", node.course));
            for child in [left, right].into_iter().flatten() {
                tree.push(child);
            }
            built.push(tree);
        }

        built.pop()
    }

    fn subtree_len(&self, idx: Index) -> usize {
        let mut count = 0;
        let mut stack = vec![idx];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.get(idx) {
                count += 1;
                stack.extend(node.left);
                stack.extend(node.right);
            }
        }
        count
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct InOrderIter<'a> {
    index: &'a CourseIndex,
    stack: Vec<Index>,
}

impl<'a> InOrderIter<'a> {
    fn new(index: &'a CourseIndex) -> Self {
        let mut iter = Self {
            index,
            stack: Vec::new(),
        };
        iter.push_left_spine(index.root);
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<Index>) {
        while let Some(idx) = next {
            let Some(node) = self.index.arena.get(idx) else {
                break;
            };
            self.stack.push(idx);
            next = node.left;
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let node = index.arena.get(self.stack.pop()?)?;
        self.push_left_spine(node.right);
        Some(&node.course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(index: &CourseIndex) -> Vec<&str> {
        index.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn given_empty_index_when_queried_then_nothing_found() {
        let index = CourseIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.depth(), 0);
        assert!(index.search("CSCI100").is_none());
        assert!(index.iter().next().is_none());
        assert!(index.shape(SHAPE_DEPTH).is_none());
    }

    #[test]
    fn given_greater_key_when_inserting_then_attaches_left() {
        let mut index = CourseIndex::new();
        index.insert(Course::new("B", "Intro"));
        index.insert(Course::new("C", "Advanced"));
        index.insert(Course::new("A", "Basics"));

        let root = index.get_node(index.root().unwrap()).unwrap();
        assert_eq!(root.course.id, "B");
        let left = index.get_node(root.left.unwrap()).unwrap();
        let right = index.get_node(root.right.unwrap()).unwrap();
        assert_eq!(left.course.id, "C");
        assert_eq!(right.course.id, "A");
    }

    #[test]
    fn given_equal_key_when_inserting_then_attaches_right() {
        let mut index = CourseIndex::new();
        index.insert(Course::new("B", "first"));
        index.insert(Course::new("B", "second"));

        let root = index.get_node(index.root().unwrap()).unwrap();
        assert!(root.left.is_none());
        let dup = index.get_node(root.right.unwrap()).unwrap();
        assert_eq!(dup.course.name, "second");
    }

    #[test]
    fn given_sorted_input_when_inserting_then_builds_chain_without_recursion() {
        let mut index = CourseIndex::new();
        let n = 5_000;
        for i in 0..n {
            index.insert(Course::new(format!("C{i:06}"), "chain"));
        }
        assert_eq!(index.len(), n);
        assert_eq!(index.depth(), n);
        assert!(index.search("C000000").is_some());
        assert!(index.search(&format!("C{:06}", n - 1)).is_some());
        assert_eq!(index.iter().count(), n);
        assert_eq!(ids(&index).first().copied(), Some("C004999"));
    }

    #[test]
    fn given_index_when_rendering_shape_then_labels_sides() {
        let mut index = CourseIndex::new();
        index.insert(Course::new("B", "Intro"));
        index.insert(Course::new("A", "Basics"));
        index.insert(Course::new("C", "Advanced"));

        let rendered = index.shape(SHAPE_DEPTH).unwrap().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "B, Intro");
        assert!(lines[1].ends_with("L C, Advanced"), "got {rendered}");
        assert!(lines[2].ends_with("R A, Basics"), "got {rendered}");
    }

    #[test]
    fn given_depth_limit_when_rendering_shape_then_folds_deeper_nodes() {
        let mut index = CourseIndex::new();
        for id in ["A", "B", "C", "D", "E"] {
            index.insert(Course::new(id, "chain"));
        }

        let rendered = index.shape(2).unwrap().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3, "got {rendered}");
        assert_eq!(lines[0], "A, chain");
        assert!(lines[1].ends_with("L B, chain"), "got {rendered}");
        assert!(lines[2].ends_with("L \u{2026} (3 more)"), "got {rendered}");
    }

    #[test]
    fn given_long_chain_when_rendering_shape_then_small_stack_suffices() {
        let handle = std::thread::Builder::new()
            .stack_size(1024 * 1024)
            .spawn(|| {
                let n = 20_000;
                let mut index = CourseIndex::new();
                for i in 0..n {
                    index.insert(Course::new(format!("C{i:06}"), "chain"));
                }
                let shape = index.shape(SHAPE_DEPTH).expect("non-empty");
                let rendered = shape.to_string();
                drop(shape);
                (rendered, n)
            })
            .expect("spawn render thread");

        let (rendered, n) = handle.join().expect("render thread finished");
        assert_eq!(rendered.lines().count(), SHAPE_DEPTH + 1);
        assert!(rendered.contains(&format!("({} more)", n - SHAPE_DEPTH)));
        assert!(rendered.len() < 64 * 1024, "rendered {} bytes", rendered.len());
    }
}
