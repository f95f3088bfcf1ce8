// src/tree/visit.rs
// =============================================================================
// Tree traversal with in-place replacement.
//
// Instead of handing a visitor `&mut Node` (and hoping it doesn't reshape the
// tree under our feet), we hand it a `ChildSlot`: the parent's child vector
// plus an index. The only structural change a slot allows is "replace the
// child at this index", so sibling counts never change mid-walk and the
// traversal can keep going right after the visitor returns.
//
// Order is pre-order, depth-first: a node is visited before its children, and
// children are visited left to right. That is the reading order of the
// document.
// =============================================================================

use super::node::{Node, NodeKind};

// A mutable handle to one child in its parent's child list
pub struct ChildSlot<'a> {
    siblings: &'a mut Vec<Node>,
    index: usize,
}

impl ChildSlot<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn node(&self) -> &Node {
        &self.siblings[self.index]
    }

    /// Swaps in `node` at the same position and returns the old child
    pub fn replace(&mut self, node: Node) -> Node {
        std::mem::replace(&mut self.siblings[self.index], node)
    }
}

// Calls `visit` for every node of `kind` below `root`, in document order
//
// The root itself is not visited; it has no parent slot to hand out.
// If the visitor replaces a node, the walk descends into the replacement
// (a raw fragment has no children, so in practice nothing more happens).
pub fn visit_kind_mut<F>(root: &mut Node, kind: &NodeKind, mut visit: F)
where
    F: FnMut(ChildSlot<'_>),
{
    walk(&mut root.children, kind, &mut visit);
}

fn walk<F>(children: &mut Vec<Node>, kind: &NodeKind, visit: &mut F)
where
    F: FnMut(ChildSlot<'_>),
{
    for index in 0..children.len() {
        if children[index].is(kind) {
            visit(ChildSlot {
                siblings: &mut *children,
                index,
            });
        }
        walk(&mut children[index].children, kind, visit);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not just give the visitor `&mut Node`?
//    - With `&mut Node` a visitor could only change the node's fields
//    - Replacing a paragraph with a different kind of node is cleaner as a
//      swap in the parent's Vec, which is what the slot does
//
// 2. What is std::mem::replace?
//    - Puts a new value where the old one was and hands back the old one
//    - Lets us move a value out of a `&mut` without leaving a hole
//
// 3. Why `&mut *children` when building the slot?
//    - It reborrows the Vec for just the duration of the visitor call
//    - Once the visitor returns, we can use `children` again to descend
// -----------------------------------------------------------------------------
