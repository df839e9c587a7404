//! Board: fixed grid of colour tags, gravity, connected-group erase detection, all-clear query.

use crate::config::ERASE_THRESHOLD;

/// Colour tag stored in a cell: `EMPTY` or `1..=colors`.
pub type CellValue = i8;

pub const EMPTY: CellValue = 0;

/// Returned by [`Board::get`] for coordinates off the grid. Never stored.
pub const OUT_OF_BOUNDS: CellValue = -1;

const NEIGHBOURS_4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// One cell removed by an erase cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErasedCell {
    pub x: i32,
    pub y: i32,
    pub color: CellValue,
}

/// Result of one connectivity scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraseReport {
    /// Total cells to erase across all groups.
    pub count: usize,
    /// Number of distinct groups found.
    pub groups: usize,
    pub cells: Vec<ErasedCell>,
}

impl EraseReport {
    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.cells.iter().map(|c| (c.x, c.y)).collect()
    }
}

/// Grid of cells. y=0 is top; rows are stored [0..rows].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// cells[y][x]
    cells: Vec<Vec<CellValue>>,
}

impl Board {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![EMPTY; cols]; rows],
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Stored tag, or [`OUT_OF_BOUNDS`] off the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> CellValue {
        if !self.in_bounds(x, y) {
            return OUT_OF_BOUNDS;
        }
        self.cells[y as usize][x as usize]
    }

    /// Writes a tag; off-grid writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: CellValue) {
        if self.in_bounds(x, y) {
            self.cells[y as usize][x as usize] = color;
        }
    }

    /// Row-major view for drawing.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[CellValue]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(EMPTY);
        }
    }

    /// Moves every occupied cell with an empty cell directly below it down one row.
    ///
    /// Decisions are made against the grid as it was when the call started, so a stack of
    /// floating cells drops one row per call; repeat until this returns `false`.
    pub fn apply_gravity(&mut self) -> bool {
        let snapshot = self.cells.clone();
        let mut moved = false;
        for x in 0..self.cols {
            for y in (0..self.rows.saturating_sub(1)).rev() {
                let c = snapshot[y][x];
                if c != EMPTY && snapshot[y + 1][x] == EMPTY {
                    self.cells[y + 1][x] = c;
                    self.cells[y][x] = EMPTY;
                    moved = true;
                }
            }
        }
        moved
    }

    /// 4-neighbour connected components of one colour with at least [`ERASE_THRESHOLD`] cells.
    pub fn find_erasable_groups(&self) -> EraseReport {
        let mut visited = vec![vec![false; self.cols]; self.rows];
        let mut report = EraseReport::default();

        for start_y in 0..self.rows {
            for start_x in 0..self.cols {
                let color = self.cells[start_y][start_x];
                if color == EMPTY || visited[start_y][start_x] {
                    continue;
                }
                visited[start_y][start_x] = true;
                let mut component = Vec::new();
                let mut stack = vec![(start_x as i32, start_y as i32)];

                while let Some((x, y)) = stack.pop() {
                    component.push(ErasedCell { x, y, color });
                    for (dx, dy) in NEIGHBOURS_4 {
                        let (nx, ny) = (x + dx, y + dy);
                        if self.get(nx, ny) == color && !visited[ny as usize][nx as usize] {
                            visited[ny as usize][nx as usize] = true;
                            stack.push((nx, ny));
                        }
                    }
                }

                if component.len() >= ERASE_THRESHOLD {
                    report.count += component.len();
                    report.groups += 1;
                    report.cells.extend(component);
                }
            }
        }
        report
    }

    pub fn clear_cells(&mut self, cells: &[(i32, i32)]) {
        for &(x, y) in cells {
            self.set(x, y, EMPTY);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c == EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn board() -> Board {
        Board::new(6, 12)
    }

    fn place(b: &mut Board, cells: &[(i32, i32)], color: CellValue) {
        for &(x, y) in cells {
            b.set(x, y, color);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = board();
        assert_eq!(b.cols(), 6);
        assert_eq!(b.rows(), 12);
        assert!(b.is_empty());
    }

    #[test]
    fn test_get_out_of_bounds_is_sentinel() {
        let b = board();
        assert_eq!(b.get(-1, 0), OUT_OF_BOUNDS);
        assert_eq!(b.get(0, -1), OUT_OF_BOUNDS);
        assert_eq!(b.get(6, 0), OUT_OF_BOUNDS);
        assert_eq!(b.get(0, 12), OUT_OF_BOUNDS);
        assert_eq!(b.get(5, 11), EMPTY);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut b = board();
        b.set(-1, 3, 2);
        b.set(6, 3, 2);
        b.set(2, 12, 2);
        assert!(b.is_empty());
        b.set(2, 5, 3);
        assert_eq!(b.get(2, 5), 3);
        assert!(!b.is_empty());
    }

    #[test]
    fn test_square_of_four_is_erasable() {
        let mut b = board();
        place(&mut b, &[(1, 10), (2, 10), (1, 11), (2, 11)], 1);
        let report = b.find_erasable_groups();
        assert_eq!(report.count, 4);
        assert_eq!(report.groups, 1);
        assert_eq!(report.cells.len(), 4);
        assert!(report.cells.iter().all(|c| c.color == 1));
    }

    #[test]
    fn test_checkerboard_is_not_erasable() {
        let mut b = board();
        place(&mut b, &[(1, 10), (2, 11)], 1);
        place(&mut b, &[(2, 10), (1, 11)], 2);
        let report = b.find_erasable_groups();
        assert_eq!(report.count, 0);
        assert!(report.cells.is_empty());
    }

    #[test]
    fn test_three_in_l_shape_is_not_erasable() {
        let mut b = board();
        place(&mut b, &[(1, 10), (2, 10), (1, 11)], 1);
        assert_eq!(b.find_erasable_groups().count, 0);
    }

    #[test]
    fn test_diagonal_cells_are_not_connected() {
        let mut b = board();
        place(&mut b, &[(0, 11), (1, 10), (2, 9), (3, 8)], 4);
        assert_eq!(b.find_erasable_groups().count, 0);
    }

    #[test]
    fn test_two_small_groups_are_not_merged() {
        let mut b = board();
        // Two same-coloured triples separated by a different colour.
        place(&mut b, &[(0, 11), (0, 10), (0, 9)], 1);
        place(&mut b, &[(1, 11)], 2);
        place(&mut b, &[(2, 11), (2, 10), (2, 9)], 1);
        assert_eq!(b.find_erasable_groups().count, 0);
    }

    #[test]
    fn test_multiple_groups_reported_together() {
        let mut b = board();
        place(&mut b, &[(0, 11), (0, 10), (0, 9), (0, 8)], 1);
        place(&mut b, &[(1, 11), (2, 11), (3, 11), (4, 11), (5, 11)], 2);
        let report = b.find_erasable_groups();
        assert_eq!(report.count, 9);
        assert_eq!(report.groups, 2);
    }

    #[test]
    fn test_clear_cells_empties_reported_cells() {
        let mut b = board();
        place(&mut b, &[(1, 10), (2, 10), (1, 11), (2, 11)], 1);
        let report = b.find_erasable_groups();
        b.clear_cells(&report.positions());
        assert!(b.is_empty());
    }

    #[test]
    fn test_gravity_after_erase() {
        let mut b = board();
        place(&mut b, &[(1, 10), (2, 10), (1, 11), (2, 11)], 1);
        place(&mut b, &[(2, 8), (2, 9)], 2);
        let report = b.find_erasable_groups();
        b.clear_cells(&report.positions());
        while b.apply_gravity() {}
        assert_eq!(b.get(2, 8), EMPTY);
        assert_eq!(b.get(2, 9), EMPTY);
        assert_eq!(b.get(2, 10), 2);
        assert_eq!(b.get(2, 11), 2);
    }

    #[test]
    fn test_gravity_moves_one_row_per_call() {
        let mut b = board();
        b.set(0, 5, 3);
        assert!(b.apply_gravity());
        assert_eq!(b.get(0, 5), EMPTY);
        assert_eq!(b.get(0, 6), 3);
    }

    #[test]
    fn test_stacked_floating_cells_do_not_cascade_in_one_call() {
        let mut b = board();
        b.set(0, 9, 1);
        b.set(0, 10, 2);
        assert!(b.apply_gravity());
        // Lower cell fell; upper cell saw an occupied cell below in the snapshot.
        assert_eq!(b.get(0, 11), 2);
        assert_eq!(b.get(0, 10), EMPTY);
        assert_eq!(b.get(0, 9), 1);
        assert!(b.apply_gravity());
        assert_eq!(b.get(0, 10), 1);
        assert!(!b.apply_gravity());
    }

    #[test]
    fn test_gravity_on_settled_board_reports_no_movement() {
        let mut b = board();
        b.set(3, 11, 1);
        b.set(3, 10, 2);
        assert!(!b.apply_gravity());
    }

    #[test]
    fn test_l_and_t_shapes_erase_whole() {
        let mut b = board();
        let l = [(0, 9), (0, 10), (0, 11), (1, 11)];
        let t = [(3, 11), (4, 11), (5, 11), (4, 10)];
        place(&mut b, &l, 1);
        place(&mut b, &t, 2);
        let report = b.find_erasable_groups();
        assert_eq!(report.groups, 2);
        assert_eq!(report.count, 8);
        let found: HashSet<(i32, i32)> = report.positions().into_iter().collect();
        let expected: HashSet<(i32, i32)> = l.iter().chain(t.iter()).copied().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_three_cell_l_is_not_erased() {
        let mut b = board();
        place(&mut b, &[(2, 10), (2, 11), (3, 11)], 3);
        place(&mut b, &[(3, 10)], 1);
        assert_eq!(b.find_erasable_groups(), EraseReport::default());
    }

    /// Component labels by repeated min-propagation between same-coloured neighbours.
    fn component_labels(b: &Board) -> Vec<Vec<usize>> {
        let (cols, rows) = (b.cols(), b.rows());
        let mut label: Vec<Vec<usize>> =
            (0..rows).map(|y| (0..cols).map(|x| y * cols + x).collect()).collect();
        let mut changed = true;
        while changed {
            changed = false;
            for y in 0..rows {
                for x in 0..cols {
                    let c = b.get(x as i32, y as i32);
                    if c == EMPTY {
                        continue;
                    }
                    for (dx, dy) in NEIGHBOURS_4 {
                        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                        if b.get(nx, ny) == c {
                            let other = label[ny as usize][nx as usize];
                            if other < label[y][x] {
                                label[y][x] = other;
                                changed = true;
                            }
                        }
                    }
                }
            }
        }
        label
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        prop::collection::vec(0i8..=4, 6 * 12).prop_map(|tags| {
            let mut b = Board::new(6, 12);
            for (i, t) in tags.into_iter().enumerate() {
                b.set((i % 6) as i32, (i / 6) as i32, t);
            }
            b
        })
    }

    proptest! {
        #[test]
        fn gravity_settles_within_rows_calls(mut b in arb_board()) {
            let mut calls = 0;
            while b.apply_gravity() {
                calls += 1;
                prop_assert!(calls <= b.rows(), "gravity still moving after {calls} calls");
            }
            for y in 0..(b.rows() as i32 - 1) {
                for x in 0..b.cols() as i32 {
                    if b.get(x, y) != EMPTY {
                        prop_assert_ne!(b.get(x, y + 1), EMPTY, "floating cell at ({}, {})", x, y);
                    }
                }
            }
            let settled = b.clone();
            prop_assert!(!b.apply_gravity());
            prop_assert_eq!(b, settled);
        }

        #[test]
        fn gravity_preserves_cell_counts(b in arb_board()) {
            let count = |b: &Board| -> Vec<usize> {
                (0..=4).map(|c| b.rows_iter().flatten().filter(|&&t| t == c).count()).collect()
            };
            let before = count(&b);
            let mut after = b.clone();
            while after.apply_gravity() {}
            prop_assert_eq!(before, count(&after));
        }

        #[test]
        fn erase_report_is_consistent(b in arb_board()) {
            let report = b.find_erasable_groups();
            prop_assert_eq!(report.count, report.cells.len());
            let unique: HashSet<(i32, i32)> = report.cells.iter().map(|c| (c.x, c.y)).collect();
            prop_assert_eq!(unique.len(), report.cells.len());
            prop_assert!(report.count >= report.groups * ERASE_THRESHOLD);
            for c in &report.cells {
                prop_assert_eq!(b.get(c.x, c.y), c.color);
                prop_assert_ne!(c.color, EMPTY);
            }
        }

        #[test]
        fn erase_report_matches_component_labelling(b in arb_board()) {
            let label = component_labels(&b);
            let mut sizes = std::collections::HashMap::new();
            for y in 0..b.rows() {
                for x in 0..b.cols() {
                    if b.get(x as i32, y as i32) != EMPTY {
                        *sizes.entry(label[y][x]).or_insert(0usize) += 1;
                    }
                }
            }
            let mut expected = HashSet::new();
            for y in 0..b.rows() {
                for x in 0..b.cols() {
                    if b.get(x as i32, y as i32) != EMPTY && sizes[&label[y][x]] >= ERASE_THRESHOLD {
                        expected.insert((x as i32, y as i32));
                    }
                }
            }
            let big = sizes.values().filter(|&&n| n >= ERASE_THRESHOLD).count();

            let report = b.find_erasable_groups();
            let found: HashSet<(i32, i32)> = report.positions().into_iter().collect();
            prop_assert_eq!(found, expected);
            prop_assert_eq!(report.groups, big);
            // Cells of one reported group share a label, so each group is connected and
            // single-coloured.
            let labels: HashSet<usize> = report
                .cells
                .iter()
                .map(|c| label[c.y as usize][c.x as usize])
                .collect();
            prop_assert_eq!(labels.len(), report.groups);
        }

        #[test]
        fn single_vertical_bar_found_exactly(color in 1i8..=4, x in 0i32..6, len in 1usize..=12) {
            let mut b = Board::new(6, 12);
            let cells: HashSet<(i32, i32)> = (0..len as i32).map(|i| (x, 11 - i)).collect();
            for &(cx, cy) in &cells {
                b.set(cx, cy, color);
            }
            let report = b.find_erasable_groups();
            if len >= ERASE_THRESHOLD {
                let found: HashSet<(i32, i32)> = report.cells.iter().map(|c| (c.x, c.y)).collect();
                prop_assert_eq!(found, cells);
                prop_assert_eq!(report.count, len);
                prop_assert_eq!(report.groups, 1);
            } else {
                prop_assert_eq!(report.count, 0);
            }
        }
    }
}
