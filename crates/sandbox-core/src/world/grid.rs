//! Double-buffered cell grid
//!
//! Two equal row-major buffers: `current` is the read source for a tick and
//! `next` is the write target. Roles exchange once per completed tick.

use sandbox_simulation::Cell;

/// Double-buffered 2-D cell storage
pub struct Grid {
    width: usize,
    height: usize,
    current: Vec<Cell>,
    next: Vec<Cell>,
    /// Positions whose `next` value is final for this tick
    claimed: Vec<bool>,
}

impl Grid {
    /// Create a grid with both buffers filled with ambient empty cells
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");

        let area = width * height;
        Self {
            width,
            height,
            current: vec![Cell::EMPTY; area],
            next: vec![Cell::EMPTY; area],
            claimed: vec![false; area],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Position at `(x + dx, y + dy)` if it lies inside the grid
    #[inline]
    pub fn offset(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        self.in_bounds(nx, ny).then_some((nx as usize, ny as usize))
    }

    /// Snapshot of the cell in `current`
    #[inline]
    pub fn read(&self, x: usize, y: usize) -> Cell {
        self.current[self.index(x, y)]
    }

    /// Cell already staged in `next` for this tick
    #[inline]
    pub fn staged(&self, x: usize, y: usize) -> Cell {
        self.next[self.index(x, y)]
    }

    /// Store a cell into `next` only
    #[inline]
    pub fn write(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.next[idx] = cell;
    }

    /// Exchange `current` and `next` after a full tick
    pub fn swap_roles(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Exchange the cells at `a` and `b` in `current` and mirror both into `next`
    ///
    /// Both cells get their stagnation counter reset. `b` is the destination
    /// and is claimed for the rest of the tick. This is the only operation
    /// that mutates `current` while a tick is running.
    pub fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);

        self.current.swap(ia, ib);
        self.current[ia].reset_stagnation();
        self.current[ib].reset_stagnation();
        self.next[ia] = self.current[ia];
        self.next[ib] = self.current[ib];
        self.claimed[ib] = true;
    }

    /// Whether the `next` value at this position is already final for this tick
    #[inline]
    pub fn is_claimed(&self, x: usize, y: usize) -> bool {
        self.claimed[self.index(x, y)]
    }

    /// Write a newly created cell into `next` and claim its position
    pub fn spawn(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.next[idx] = cell;
        self.claimed[idx] = true;
    }

    /// Forget all claims; called once per tick before the buffers swap
    pub fn clear_claims(&mut self) {
        self.claimed.fill(false);
    }

    /// Write a cell into both buffers, outside the tick discipline
    pub fn place(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.current[idx] = cell;
        self.next[idx] = cell;
    }

    /// Make `next` an exact copy of `current`
    pub fn sync_next(&mut self) {
        self.next.copy_from_slice(&self.current);
    }

    /// All cells of `current`, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.current
    }

    #[cfg(test)]
    pub(crate) fn fill_next(&mut self, cell: Cell) {
        self.next.fill(cell);
    }
}
