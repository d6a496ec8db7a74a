use super::BorderSpec;
use crate::document::format_coord;

/// Resolves two candidate borders meeting at one edge: the wider one wins;
/// on a tie the cell's own border wins over the table's.
pub fn collapse(cell: Option<BorderSpec>, table: Option<BorderSpec>) -> Option<BorderSpec> {
    match (cell, table) {
        (None, None) => None,
        (None, Some(t)) => Some(t),
        (Some(c), None) => Some(c),
        (Some(c), Some(t)) => {
            if c.width < t.width {
                Some(t)
            } else {
                Some(c)
            }
        }
    }
}

/// The two 2-D border grids a renderer maintains while laying out its rows.
///
/// `h[i][c]` is the resolved border between row `i-1` and row `i` in column
/// `c` (`h[0]` is the top edge, `h[last]` the bottom edge laid out so far).
/// `v[c][r]` is the resolved border between column `c-1` and column `c`
/// within row `r` (`v[0]` the left edge, `v[cols]` the right edge).
#[derive(Debug, Clone)]
pub struct BorderGrids {
    pub h: Vec<Vec<Option<BorderSpec>>>,
    pub v: Vec<Vec<Option<BorderSpec>>>,
    cols: usize,
}

impl BorderGrids {
    pub fn new(rows: usize, cols: usize) -> Self {
        BorderGrids {
            h: vec![vec![None; cols]; rows + 1],
            v: vec![vec![None; rows]; cols + 1],
            cols,
        }
    }

    /// Writes `candidate` across `h[row][col..col+span]`, keeping whichever
    /// border is wider at each slot, and returns the border the caller
    /// (a cell touching this edge) must now adopt as its own.
    pub fn write_h(&mut self, row: usize, col: usize, span: usize, candidate: Option<BorderSpec>) -> Option<BorderSpec> {
        let mut adopted = candidate;
        for c in col..(col + span).min(self.cols) {
            adopted = write_slot(&mut self.h[row][c], candidate);
        }
        adopted
    }

    /// Writes `candidate` across `v[col][row..row+span]`, mirroring `write_h`.
    pub fn write_v(&mut self, col: usize, row: usize, span: usize, candidate: Option<BorderSpec>) -> Option<BorderSpec> {
        let mut adopted = candidate;
        for r in row..(row + span).min(self.v[col].len()) {
            adopted = write_slot(&mut self.v[col][r], candidate);
        }
        adopted
    }
}

fn write_slot(slot: &mut Option<BorderSpec>, candidate: Option<BorderSpec>) -> Option<BorderSpec> {
    match (*slot, candidate) {
        (None, cand) => {
            *slot = cand;
            cand
        }
        (Some(existing), None) => Some(existing),
        (Some(existing), Some(cand)) => {
            if cand.width > existing.width {
                *slot = Some(cand);
                Some(cand)
            } else {
                Some(existing)
            }
        }
    }
}

/// The drawing collaborator the engine emits border strokes and structure
/// hints to.
pub trait DrawTarget {
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, border: BorderSpec);
    fn open_artifact(&mut self);
    fn close_artifact(&mut self);
    fn push_tag(&mut self, role: &str);
    fn pop_tag(&mut self);
}

/// Concrete `DrawTarget` writing directly into a PDF content stream.
pub struct PdfContentTarget<'a> {
    pub output: &'a mut Vec<u8>,
}

impl<'a> DrawTarget for PdfContentTarget<'a> {
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, border: BorderSpec) {
        self.output.extend_from_slice(b"q\n");
        self.output.extend_from_slice(
            format!(
                "{} {} {} RG\n{} w\n",
                format_coord(border.color.r),
                format_coord(border.color.g),
                format_coord(border.color.b),
                format_coord(border.width),
            )
            .as_bytes(),
        );
        self.output.extend_from_slice(
            format!(
                "{} {} m\n{} {} l\nS\n",
                format_coord(x1),
                format_coord(y1),
                format_coord(x2),
                format_coord(y2),
            )
            .as_bytes(),
        );
        self.output.extend_from_slice(b"Q\n");
    }

    fn open_artifact(&mut self) {
        self.output.extend_from_slice(b"/Artifact BMC\n");
    }

    fn close_artifact(&mut self) {
        self.output.extend_from_slice(b"EMC\n");
    }

    fn push_tag(&mut self, role: &str) {
        self.output.extend_from_slice(format!("/{} BDC\n", role).as_bytes());
    }

    fn pop_tag(&mut self) {
        self.output.extend_from_slice(b"EMC\n");
    }
}

/// Strokes the horizontal borders of row `row_index` in the grid
/// (`H[row_index]`) across the given column x-coordinates, coalescing
/// contiguous equal borders into a single stroke.
pub fn draw_horizontal(
    grid: &[Option<BorderSpec>],
    col_xs: &[f64],
    y: f64,
    target: &mut dyn DrawTarget,
) {
    let mut run_start = 0usize;
    let mut idx = 0usize;
    while idx < grid.len() {
        let current = grid[idx];
        let mut end = idx;
        while end + 1 < grid.len() && grid[end + 1] == current {
            end += 1;
        }
        if let Some(border) = current {
            target.stroke_line(col_xs[run_start], y, col_xs[end + 1], y, border);
        }
        idx = end + 1;
        run_start = idx;
    }
}

/// Strokes the vertical border column `v[col]` across the given row
/// y-coordinates, coalescing contiguous equal borders.
pub fn draw_vertical(
    grid: &[Option<BorderSpec>],
    row_ys: &[f64],
    x: f64,
    target: &mut dyn DrawTarget,
) {
    let mut run_start = 0usize;
    let mut idx = 0usize;
    while idx < grid.len() {
        let current = grid[idx];
        let mut end = idx;
        while end + 1 < grid.len() && grid[end + 1] == current {
            end += 1;
        }
        if let Some(border) = current {
            target.stroke_line(x, row_ys[run_start], x, row_ys[end + 1], border);
        }
        idx = end + 1;
        run_start = idx;
    }
}
