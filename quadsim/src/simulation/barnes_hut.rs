//! # Barnes–Hut Quadtree (2D)
//!
//! A 4-ary spatial index over the current body positions, rebuilt from
//! scratch for every force evaluation and dropped afterwards.
//!
//! - The root is a square around the body bounding box padded by
//!   [`TREE_MARGIN`] on every side.
//! - A cell is either a leaf holding bodies directly or divided into exactly
//!   four half-size children.
//! - A leaf holds at most one body, unless its size has reached the minimum
//!   cell size. Then it stays a leaf and takes every further body routed to it.
//! - Every cell keeps the total mass and center of mass (COM) of the bodies
//!   below it. Insertion updates these incrementally along the path, and
//!   subdivision recomputes them exactly for the new children.
//!
//! Cells live in one `Vec` and refer to their children by index, the same
//! arena layout the octree of the 3D engine used.
//!
//! Quadrant numbering, with `y` growing downwards as on screen:
//!
//! ```text
//!   0 | 1      0: x <  cx, y <  cy     1: x >= cx, y <  cy
//!  ---+---
//!   2 | 3      2: x <  cx, y >= cy     3: x >= cx, y >= cy
//! ```
//!
//! A body exactly on a split line goes right (`x == cx`) or bottom (`y == cy`).

use crate::simulation::forces::inv_distance_cubed;
use crate::simulation::params::TREE_MARGIN;
use crate::simulation::states::{Body, NVec2};

/// One square region of the plane.
#[derive(Debug, Clone)]
pub struct Cell {
    pub center: NVec2,
    pub width: f64,
    pub height: f64,
    pub mass: f64,
    pub com: NVec2,
    pub bodies: Vec<usize>, // indices into the body slice, leaves only
    pub children: Option<[usize; 4]>, // indices into QuadTree::cells
}

impl Cell {
    pub fn new(center: NVec2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            mass: 0.0,
            com: NVec2::zeros(),
            bodies: Vec::with_capacity(1),
            children: None,
        }
    }

    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.children.is_none()
    }

    /// Fold one more body into the running mass and COM
    fn accumulate(&mut self, body: &Body) {
        let old_mass = self.mass;
        let new_mass = old_mass + body.m;
        if new_mass > 0.0 {
            self.com = (self.com * old_mass + body.x * body.m) / new_mass;
        } else {
            self.com = body.x;
        }
        self.mass = new_mass;
    }
}

/// A complete quadtree built over one snapshot of the bodies.
#[derive(Debug, Clone)]
pub struct QuadTree {
    pub cells: Vec<Cell>,
    pub root: usize,
    pub min_cell_size: f64,
}

impl QuadTree {
    /// Empty tree whose root is a `size` x `size` square at `center`
    pub fn new(center: NVec2, size: f64, min_cell_size: f64) -> Self {
        Self {
            cells: vec![Cell::new(center, size, size)],
            root: 0,
            min_cell_size,
        }
    }

    /// Build a tree over `bodies`, inserting them in slice order.
    pub fn build(bodies: &[Body], min_cell_size: f64) -> Self {
        let (center, size) = root_square(bodies);
        let mut tree = Self::new(center, size, min_cell_size);
        for i in 0..bodies.len() {
            tree.insert(bodies, i);
        }
        tree
    }

    pub fn root_cell(&self) -> &Cell {
        &self.cells[self.root]
    }

    /// Insert body `body_idx`, walking down from the root.
    ///
    /// Every cell on the way absorbs the body into its mass and COM. The walk
    /// stops at an empty leaf, or at a leaf that cannot be subdivided any
    /// further. A leaf that already holds one body is split and the walk
    /// continues into the matching child.
    pub fn insert(&mut self, bodies: &[Body], body_idx: usize) {
        let body = &bodies[body_idx];
        let mut current = self.root;
        self.cells[current].accumulate(body);

        loop {
            if !self.cells[current].is_divided() {
                match self.cells[current].bodies.len() {
                    0 => {
                        self.cells[current].bodies.push(body_idx);
                        return;
                    }
                    1 => {
                        if !self.subdivide(current, bodies) {
                            self.cells[current].bodies.push(body_idx);
                            self.recompute_mass_and_com(current, bodies);
                            return;
                        }
                    }
                    _ => {
                        // a floor-sized leaf keeps collecting bodies
                        self.cells[current].bodies.push(body_idx);
                        self.recompute_mass_and_com(current, bodies);
                        return;
                    }
                }
            }

            let Some(children) = self.cells[current].children else {
                return;
            };
            current = children[quadrant_for_point(&body.x, &self.cells[current])];
            self.cells[current].accumulate(body);
        }
    }

    /// Split a leaf into four children and hand its bodies down.
    ///
    /// Returns `false`, leaving the cell untouched, when its width or height
    /// is at or below `min_cell_size`.
    pub fn subdivide(&mut self, cell_idx: usize, bodies: &[Body]) -> bool {
        let cell = &self.cells[cell_idx];
        if cell.is_divided() {
            return true;
        }
        // inclusive: a cell exactly min_cell_size wide is already a floor leaf
        if cell.width <= self.min_cell_size || cell.height <= self.min_cell_size {
            return false;
        }

        let center = cell.center;
        let half_w = cell.width / 2.0;
        let half_h = cell.height / 2.0;
        let quarter_w = half_w / 2.0;
        let quarter_h = half_h / 2.0;

        let first = self.cells.len();
        for (dx, dy) in [
            (-quarter_w, -quarter_h),
            (quarter_w, -quarter_h),
            (-quarter_w, quarter_h),
            (quarter_w, quarter_h),
        ] {
            self.cells.push(Cell::new(center + NVec2::new(dx, dy), half_w, half_h));
        }
        let children = [first, first + 1, first + 2, first + 3];

        let held = std::mem::take(&mut self.cells[cell_idx].bodies);
        self.cells[cell_idx].children = Some(children);

        for bidx in held {
            let q = quadrant_for_point(&bodies[bidx].x, &self.cells[cell_idx]);
            self.cells[children[q]].bodies.push(bidx);
        }
        for child in children {
            self.recompute_mass_and_com(child, bodies);
        }
        true
    }

    /// Exact mass and COM of a leaf from the bodies it holds
    fn recompute_mass_and_com(&mut self, cell_idx: usize, bodies: &[Body]) {
        let cell = &mut self.cells[cell_idx];
        let mut mass = 0.0;
        let mut weighted = NVec2::zeros();
        for &bidx in &cell.bodies {
            let b = &bodies[bidx];
            mass += b.m;
            weighted += b.x * b.m;
        }

        cell.mass = mass;
        cell.com = if mass > 0.0 {
            weighted / mass
        } else if let Some(&first) = cell.bodies.first() {
            bodies[first].x
        } else {
            NVec2::zeros()
        };
    }

    /// Approximate acceleration on body `i` from everything in the tree.
    ///
    /// A leaf, or a divided cell with `width / d < theta`, acts as one point
    /// mass at its COM. `d` is the softened distance `sqrt(|r|^2 + eps2)`.
    /// A leaf holding only body `i` contributes nothing.
    pub fn acceleration_on(&self, i: usize, bodies: &[Body], g: f64, eps2: f64, theta: f64) -> NVec2 {
        self.cell_acceleration(self.root, i, bodies[i].x, g, eps2, theta)
    }

    fn cell_acceleration(&self, cell_idx: usize, body_idx: usize, pos: NVec2, g: f64, eps2: f64, theta: f64) -> NVec2 {
        let cell = &self.cells[cell_idx];
        if cell.mass == 0.0 {
            return NVec2::zeros();
        }

        let r = cell.com - pos;
        let d2 = r.norm_squared() + eps2;

        match cell.children {
            Some(children) if cell.width / d2.sqrt() >= theta => {
                children.iter().fold(NVec2::zeros(), |acc, &child| {
                    acc + self.cell_acceleration(child, body_idx, pos, g, eps2, theta)
                })
            }
            _ => {
                if cell.bodies.len() == 1 && cell.bodies[0] == body_idx {
                    return NVec2::zeros();
                }
                g * cell.mass * inv_distance_cubed(d2) * r
            }
        }
    }

    /// Number of levels below the root, 0 for a single leaf
    pub fn depth(&self) -> usize {
        self.depth_from(self.root)
    }

    fn depth_from(&self, cell_idx: usize) -> usize {
        match self.cells[cell_idx].children {
            Some(children) => 1 + children.iter().map(|&c| self.depth_from(c)).max().unwrap_or(0),
            None => 0,
        }
    }

    /// Depth-first walk from the root, parents before children
    pub fn visit<F: FnMut(&Cell)>(&self, mut f: F) {
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            let cell = &self.cells[idx];
            f(cell);
            if let Some(children) = cell.children {
                stack.extend(children.iter().rev());
            }
        }
    }
}

// helpers ===========================================================================

/// Quadrant index of `p` inside `cell`, see the module docs for the layout.
pub fn quadrant_for_point(p: &NVec2, cell: &Cell) -> usize {
    if p.x < cell.center.x {
        if p.y < cell.center.y { 0 } else { 2 }
    } else if p.y < cell.center.y {
        1
    } else {
        3
    }
}

/// Center and side length of the root square.
///
/// The body bounding box is padded by `TREE_MARGIN` on every side, and the
/// square takes the larger padded extent.
fn root_square(bodies: &[Body]) -> (NVec2, f64) {
    if bodies.is_empty() {
        return (NVec2::zeros(), 2.0 * TREE_MARGIN);
    }

    let mut min = NVec2::new(f64::INFINITY, f64::INFINITY);
    let mut max = NVec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for b in bodies {
        min.x = min.x.min(b.x.x);
        min.y = min.y.min(b.x.y);
        max.x = max.x.max(b.x.x);
        max.y = max.y.max(b.x.y);
    }

    let margin = NVec2::new(TREE_MARGIN, TREE_MARGIN);
    let min = min - margin;
    let max = max + margin;
    let extent = max - min;

    ((min + max) * 0.5, extent.x.max(extent.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f64, y: f64, m: f64) -> Body {
        Body::new(NVec2::new(x, y), NVec2::zeros(), m)
    }

    #[test]
    fn split_lines_route_right_and_bottom() {
        let cell = Cell::new(NVec2::new(50.0, 50.0), 100.0, 100.0);
        assert_eq!(quadrant_for_point(&NVec2::new(50.0, 50.0), &cell), 3);
        assert_eq!(quadrant_for_point(&NVec2::new(49.0, 50.0), &cell), 2);
        assert_eq!(quadrant_for_point(&NVec2::new(50.0, 49.0), &cell), 1);
        assert_eq!(quadrant_for_point(&NVec2::new(49.0, 49.0), &cell), 0);
    }

    #[test]
    fn root_square_is_padded() {
        let bodies = vec![body(0.0, 0.0, 1.0), body(300.0, 100.0, 1.0)];
        let (center, size) = root_square(&bodies);
        assert_eq!(center, NVec2::new(150.0, 50.0));
        assert_eq!(size, 500.0);
    }

    #[test]
    fn children_tile_parent() {
        let bodies = vec![body(10.0, 10.0, 1.0)];
        let mut tree = QuadTree::new(NVec2::new(0.0, 0.0), 100.0, 1.0);
        tree.insert(&bodies, 0);
        assert!(tree.subdivide(tree.root, &bodies));

        let children = tree.root_cell().children.unwrap();
        let centers: Vec<NVec2> = children.iter().map(|&c| tree.cells[c].center).collect();
        assert_eq!(centers[0], NVec2::new(-25.0, -25.0));
        assert_eq!(centers[1], NVec2::new(25.0, -25.0));
        assert_eq!(centers[2], NVec2::new(-25.0, 25.0));
        assert_eq!(centers[3], NVec2::new(25.0, 25.0));
        assert_eq!(tree.cells[children[3]].bodies, vec![0]);
        assert!(tree.root_cell().bodies.is_empty());
    }
}
