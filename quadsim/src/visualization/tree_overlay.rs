//! Renderer-agnostic overlay of the Barnes–Hut quadtree
//!
//! Rendering code implements [`TreeOverlay`] (any `FnMut(CellRect)` works)
//! and receives one rectangle per visible cell, already scaled to screen
//! units. No physics depends on this module.

use crate::simulation::barnes_hut::QuadTree;

/// Leaves narrower than this on screen are not reported
pub const MIN_VISIBLE_WIDTH: f64 = 5.0;

/// Axis-aligned cell outline in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub divided: bool,
}

pub trait TreeOverlay {
    fn cell(&mut self, rect: CellRect);
}

impl<F: FnMut(CellRect)> TreeOverlay for F {
    fn cell(&mut self, rect: CellRect) {
        self(rect)
    }
}

/// Report every non-empty cell of `tree`, parents first.
///
/// Divided cells are always reported. Leaves are skipped once their scaled
/// width drops under [`MIN_VISIBLE_WIDTH`].
pub fn draw_tree(tree: &QuadTree, scale: f64, overlay: &mut dyn TreeOverlay) {
    tree.visit(|cell| {
        if cell.is_empty() {
            return;
        }
        if cell.width * scale < MIN_VISIBLE_WIDTH && !cell.is_divided() {
            return;
        }
        overlay.cell(CellRect {
            left: (cell.center.x - cell.width / 2.0) * scale,
            top: (cell.center.y - cell.height / 2.0) * scale,
            width: cell.width * scale,
            height: cell.height * scale,
            divided: cell.is_divided(),
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Body, NVec2};

    /// Root of side 300 split once: two empty children, two 150-wide leaves
    fn split_once() -> QuadTree {
        let bodies = vec![
            Body::new(NVec2::new(0.0, 0.0), NVec2::zeros(), 1.0),
            Body::new(NVec2::new(100.0, 100.0), NVec2::zeros(), 1.0),
        ];
        QuadTree::build(&bodies, 1.0)
    }

    fn collect(tree: &QuadTree, scale: f64) -> Vec<CellRect> {
        let mut rects = Vec::new();
        draw_tree(tree, scale, &mut |r: CellRect| rects.push(r));
        rects
    }

    #[test]
    fn small_scale_keeps_only_divided_root() {
        let tree = split_once();
        let mut cells = 0;
        let mut empty = 0;
        tree.visit(|cell| {
            cells += 1;
            if cell.is_empty() {
                empty += 1;
            }
        });
        assert_eq!((cells, empty), (5, 2));

        let rects = collect(&tree, 0.01);
        assert_eq!(rects.len(), 1);
        assert!(rects[0].divided);
        assert!((rects[0].width - 3.0).abs() < 1e-12);
        assert!(rects[0].width < MIN_VISIBLE_WIDTH);
    }

    #[test]
    fn unit_scale_reports_leaves_but_not_empty_cells() {
        let tree = split_once();
        let rects = collect(&tree, 1.0);
        assert_eq!(rects.len(), 3);
        assert!(rects[0].divided);
        assert!(rects[1..].iter().all(|r| !r.divided && (r.width - 150.0).abs() < 1e-12));
    }
}
