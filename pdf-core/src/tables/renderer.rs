use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::borders::{collapse, draw_horizontal, draw_vertical, BorderGrids, DrawTarget};
use super::columns::resolve_column_widths;
use super::content::{ContentSink, ContentStatus};
use super::error::TableError;
use super::TableModel;
use crate::textflow::{Rect, UsedFonts};
use crate::truetype::TrueTypeFont;

/// Outcome of a `TableRenderer::layout` call.
pub enum LayoutOutcome {
    Full { occupied_area: Rect },
    Partial { occupied_area: Rect, committed: Box<TableRenderer>, continuation: Box<TableRenderer> },
    Nothing { cause: String },
}

/// Lays out one logical table (or a continuation slice of one) into a
/// rectangular area, producing the committed placement and, if the table
/// didn't fully fit, a continuation renderer for the next area.
pub struct TableRenderer {
    model: TableModel,
    range_start: usize,
    is_original_non_split: bool,
    column_widths: Vec<f64>,
    heights: Vec<f64>,
    grids: BorderGrids,
    header_renderer: Option<Box<TableRenderer>>,
    footer_renderer: Option<Box<TableRenderer>>,
    placed_cells: Vec<(usize, Rect)>,
    body_origin: Rect,
    occupied_area: Option<Rect>,
}

impl TableRenderer {
    pub fn new(model: TableModel, range_start: usize, is_original_non_split: bool) -> Self {
        let rows = model.row_count;
        let cols = model.columns;
        TableRenderer {
            model,
            range_start,
            is_original_non_split,
            column_widths: Vec::new(),
            heights: Vec::new(),
            grids: BorderGrids::new(rows, cols),
            header_renderer: None,
            footer_renderer: None,
            placed_cells: Vec::new(),
            body_origin: Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 },
            occupied_area: None,
        }
    }

    pub fn occupied_area(&self) -> Option<Rect> {
        self.occupied_area
    }

    /// Lays the renderer out into `area`. May be called a second time (a
    /// keep-together retry with `forced_placement` set); state is cleared
    /// at each entry.
    pub fn layout(&mut self, area: Rect) -> Result<LayoutOutcome, TableError> {
        self.model.validate()?;
        debug!(rows = self.model.row_count, cols = self.model.columns, ?area, "table layout start");

        self.heights.clear();
        self.grids = BorderGrids::new(self.model.row_count, self.model.columns);
        self.placed_cells.clear();

        let margin_top = if self.is_original_non_split { self.model.margin_top } else { 0.0 };
        let margin_bottom = if self.model.is_complete { self.model.margin_bottom } else { 0.0 };

        let mut remaining = Rect {
            x: area.x,
            y: area.y - margin_top,
            width: area.width,
            height: (area.height - margin_top - margin_bottom).max(0.0),
        };

        // --- header ---
        let show_header = self.model.header.is_some()
            && (!self.is_original_non_split || (self.range_start == 0 && !self.model.skip_first_header));
        let mut header_height = 0.0;
        if show_header {
            let header_model = (*self.model.header.clone().unwrap()).clone();
            let mut header_renderer = TableRenderer::new(header_model, 0, true);
            match header_renderer.layout(remaining)? {
                LayoutOutcome::Full { occupied_area } => {
                    header_height = occupied_area.height;
                    remaining.y -= header_height;
                    remaining.height -= header_height;
                    self.header_renderer = Some(Box::new(header_renderer));
                }
                _ => {
                    return Ok(LayoutOutcome::Nothing {
                        cause: TableError::HeaderOrFooterDoesNotFit { is_header: true }.to_string(),
                    });
                }
            }
        }

        // --- footer (reserved at the bottom, laid out eagerly so its height can be subtracted) ---
        // A footer is always reserved unless dropping it on this exact call
        // would let the remaining rows fit without it (spec §4.4.2): eliding
        // unconditionally whenever `is_complete && skip_last_footer` is set
        // would suppress it on every continuation of a complete table, not
        // just the genuinely final one.
        let mut footer_height = 0.0;
        let mut footer_renderer: Option<TableRenderer> = None;
        if let Some(footer_model_box) = self.model.footer.clone() {
            let would_elide = self.model.is_complete
                && self.model.skip_last_footer
                && self.can_fit_in_area(remaining);
            if would_elide {
                debug!("eliding last footer: remaining rows fit the area without it");
            } else {
                let footer_model = (*footer_model_box).clone();
                let mut fr = TableRenderer::new(footer_model, 0, true);
                match fr.layout(remaining)? {
                    LayoutOutcome::Full { occupied_area } => {
                        footer_height = occupied_area.height;
                        remaining.height -= footer_height;
                        footer_renderer = Some(fr);
                    }
                    _ => {
                        return Ok(LayoutOutcome::Nothing {
                            cause: TableError::HeaderOrFooterDoesNotFit { is_header: false }.to_string(),
                        });
                    }
                }
            }
        }

        self.body_origin = remaining;

        let left_w = self.model.table_borders.left.map(|b| b.width).unwrap_or(0.0);
        let right_w = self.model.table_borders.right.map(|b| b.width).unwrap_or(0.0);
        self.column_widths = resolve_column_widths(remaining.width, &self.model.column_widths, left_w, right_w)?;
        trace!(widths = ?self.column_widths, "column widths resolved");

        let mut anchor: HashMap<(usize, usize), usize> = HashMap::new();
        for (i, c) in self.model.cells.iter().enumerate() {
            anchor.insert((c.anchor_row(), c.col), i);
        }

        let cols = self.model.columns;
        let row_count = self.model.row_count;
        let body_top = remaining.y;

        let mut split_row: Option<usize> = None;
        let mut split_results: Vec<(usize, ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, Option<String>)> = Vec::new();
        let mut late_arrivals: Vec<(usize, ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, Option<String>, f64)> = Vec::new();

        'rows: for r in 0..row_count {
            let heights_so_far: f64 = self.heights.iter().sum();
            let remaining_height = (remaining.height - heights_so_far).max(0.0);
            let row_top = body_top - heights_so_far;
            let mut row_results: Vec<(usize, ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, Option<String>, f64)> = Vec::new();
            let mut any_bad = false;

            for c in 0..cols {
                let idx = match anchor.get(&(r, c)) {
                    Some(&i) => i,
                    None => continue,
                };
                let (row0, colspan, rowspan) = {
                    let cell = &self.model.cells[idx];
                    (cell.row, cell.colspan, cell.rowspan)
                };
                let cell_x = self.column_widths[..c].iter().sum::<f64>() + remaining.x;
                let cell_width: f64 = self.column_widths[c..c + colspan].iter().sum();
                let rowspan_offset: f64 = self.heights[row0.min(self.heights.len())..r.min(self.heights.len())].iter().sum();
                let cell_top = body_top - self.heights[..row0.min(self.heights.len())].iter().sum::<f64>();
                let cell_area = Rect {
                    x: cell_x,
                    y: cell_top,
                    width: cell_width,
                    height: rowspan_offset + remaining_height,
                };

                self.collapse_cell_borders(idx, r, c, colspan, rowspan, row0, row_count, cols);

                let result = self.model.cells[idx].content.layout(cell_area);
                let bad = result.status != ContentStatus::Full;
                any_bad |= bad;
                row_results.push((idx, result.status, result.occupied_area, result.split, result.overflow, result.cause_of_nothing, rowspan_offset));
            }

            if any_bad {
                split_row = Some(r);
                late_arrivals = self.late_arrivals(r, &anchor, body_top, remaining_height);
                split_results = row_results.into_iter().map(|(i, s, a, sp, ov, cause, _)| (i, s, a, sp, ov, cause)).collect();
                break 'rows;
            }

            let row_height = row_results
                .iter()
                .map(|(_, _, area, _, _, _, rowspan_offset)| area.height - rowspan_offset)
                .fold(0.0_f64, f64::max);
            self.heights.push(row_height);
            for (idx, _, area, _, _, _, rowspan_offset) in row_results {
                let cell_height = row_height + rowspan_offset;
                let placed = self.align_cell_rect(idx, area, cell_height);
                self.placed_cells.push((idx, placed));
            }
        }

        match split_row {
            None => {
                let body_height: f64 = self.heights.iter().sum();
                let occupied_height = body_height + header_height + footer_height
                    + (self.model.table_borders.top.map(|b| b.width).unwrap_or(0.0)
                        + self.model.table_borders.bottom.map(|b| b.width).unwrap_or(0.0))
                        / 2.0;
                if let Some(fr) = footer_renderer.as_mut() {
                    // The footer was measured at the body's top; slide it
                    // down to sit flush against the committed body.
                    fr.translate(0.0, -body_height);
                }
                self.footer_renderer = footer_renderer.map(Box::new);
                let occupied = Rect { x: area.x, y: area.y, width: area.width, height: occupied_height };
                self.occupied_area = Some(occupied);
                debug!(?occupied, "table layout full");
                Ok(LayoutOutcome::Full { occupied_area: occupied })
            }
            Some(r_split) => {
                self.footer_renderer = footer_renderer.map(Box::new);
                self.build_split(r_split, split_results, late_arrivals, header_height, footer_height, area)
            }
        }
    }

    fn collapse_cell_borders(&mut self, idx: usize, r: usize, c: usize, colspan: usize, rowspan: usize, row0: usize, row_count: usize, cols: usize) {
        let cell_borders = self.model.cells[idx].borders;
        let table_borders = self.model.table_borders;

        let table_top = if row0 == 0 { table_borders.top } else { None };
        let table_bottom = if r == row_count - 1 { table_borders.bottom } else { None };
        let table_left = if c == 0 { table_borders.left } else { None };
        let table_right = if c + colspan == cols { table_borders.right } else { None };

        let top_candidate = collapse(cell_borders.top, table_top);
        self.grids.write_h(row0, c, colspan, top_candidate);
        let bottom_candidate = collapse(cell_borders.bottom, table_bottom);
        self.grids.write_h(r + 1, c, colspan, bottom_candidate);
        let left_candidate = collapse(cell_borders.left, table_left);
        self.grids.write_v(c, row0, rowspan, left_candidate);
        let right_candidate = collapse(cell_borders.right, table_right);
        self.grids.write_v(c + colspan, row0, rowspan, right_candidate);
    }

    /// Adjusts a dispatched cell's occupied rect for its slot according to
    /// `valign`. `cell_height` is the full height of the row(s) the cell
    /// spans; `area` is what `CellContent::layout` actually reported.
    fn align_cell_rect(&self, idx: usize, area: Rect, cell_height: f64) -> Rect {
        let extra = (cell_height - area.height).max(0.0);
        let dy = match self.model.cells[idx].valign {
            super::VerticalAlign::Top => 0.0,
            super::VerticalAlign::Middle => extra / 2.0,
            super::VerticalAlign::Bottom => extra,
        };
        Rect { x: area.x, y: area.y - dy, width: area.width, height: area.height }
    }

    /// Late-arrivals scan (spec §4.4.1): at the row where a split occurs, a
    /// column with nothing anchored there may be covered by a rowspan cell
    /// whose anchor lies further down the table — without this scan that
    /// cell would sit invisible until a continuation renders it, even
    /// though part of it could already be shown. Bottom-aligned crossing
    /// cells are dispatched now against the space left in this area so they
    /// are at least partially placed; the result only changes committed
    /// output when it comes back `Partial` (see `build_split`).
    fn late_arrivals(
        &mut self,
        r: usize,
        anchor: &HashMap<(usize, usize), usize>,
        body_top: f64,
        remaining_height: f64,
    ) -> Vec<(usize, ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, Option<String>, f64)> {
        let cols = self.model.columns;
        let row_count = self.model.row_count;
        let body_x = self.body_origin.x;
        let mut found = Vec::new();

        for c in 0..cols {
            if anchor.contains_key(&(r, c)) {
                continue;
            }
            let next = (r + 1..row_count).find_map(|r2| anchor.get(&(r2, c)).copied());
            let idx = match next {
                Some(i) => i,
                None => continue,
            };
            let (row0, colspan) = {
                let cell = &self.model.cells[idx];
                (cell.row, cell.colspan)
            };
            if row0 > r || self.model.cells[idx].valign != super::VerticalAlign::Bottom {
                continue;
            }

            let cell_x = self.column_widths[..c].iter().sum::<f64>() + body_x;
            let cell_width: f64 = self.column_widths[c..c + colspan].iter().sum();
            let rowspan_offset: f64 = self.heights[row0.min(self.heights.len())..r.min(self.heights.len())].iter().sum();
            let cell_top = body_top - self.heights[..row0.min(self.heights.len())].iter().sum::<f64>();
            let cell_area = Rect {
                x: cell_x,
                y: cell_top,
                width: cell_width,
                height: rowspan_offset + remaining_height,
            };
            let result = self.model.cells[idx].content.layout(cell_area);
            trace!(col = c, row = r, "late arrival dispatched for bottom-aligned crossing cell");
            found.push((idx, result.status, result.occupied_area, result.split, result.overflow, result.cause_of_nothing, rowspan_offset));
        }

        found
    }

    #[allow(clippy::too_many_arguments)]
    fn build_split(
        &mut self,
        r_split: usize,
        results: Vec<(usize, ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, Option<String>)>,
        late_arrivals: Vec<(usize, ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, Option<String>, f64)>,
        header_height: f64,
        footer_height: f64,
        area: Rect,
    ) -> Result<LayoutOutcome, TableError> {
        let mut committed_model = TableModel::new(self.model.columns, self.model.column_widths.clone());
        committed_model.table_borders = self.model.table_borders;
        committed_model.is_complete = false;
        committed_model.margin_bottom = 0.0;
        committed_model.margin_top = self.model.margin_top;

        let mut continuation_model = TableModel::new(self.model.columns, self.model.column_widths.clone());
        continuation_model.table_borders = self.model.table_borders;
        continuation_model.is_complete = self.model.is_complete;
        continuation_model.skip_first_header = true;
        continuation_model.skip_last_footer = self.model.skip_last_footer;
        continuation_model.forced_placement = self.model.forced_placement;
        continuation_model.keep_together = self.model.keep_together;
        continuation_model.margin_top = 0.0;
        continuation_model.margin_bottom = self.model.margin_bottom;

        let area_by_idx: HashMap<usize, Rect> = self.placed_cells.iter().cloned().collect();
        let mut committed_placed: Vec<(usize, Rect)> = Vec::new();

        // Cells fully before the split row are already committed.
        for (orig_idx, cell) in self.model.cells.iter().enumerate() {
            if cell.anchor_row() < r_split {
                committed_model.add_cell(cell.clone()).ok();
                if let Some(&rect) = area_by_idx.get(&orig_idx) {
                    committed_placed.push((committed_model.cells.len() - 1, rect));
                }
            }
        }

        let mut has_content = false;
        let mut first_cause: Option<String> = None;
        let mut partial_row_height = 0.0_f64;

        for (idx, status, occ_area, split, overflow, cause) in results {
            let cell = self.model.cells[idx].clone();
            if cell.row < r_split {
                // Crossing cell (rowspan > 1): committed holds no child for it
                // (an "enlarge" shell — the row heights above already account
                // for it); the continuation re-emits it with a contracted span.
                let remaining_rowspan = cell.rowspan - (r_split - cell.row);
                let mut c2 = cell;
                c2.row = 0;
                c2.rowspan = remaining_rowspan.max(1);
                continuation_model.add_cell(c2).ok();
                continue;
            }

            match status {
                ContentStatus::Partial => {
                    has_content = true;
                    partial_row_height = partial_row_height.max(occ_area.height);
                    let mut committed_cell = cell.clone();
                    committed_cell.row = r_split;
                    committed_cell.rowspan = 1;
                    committed_cell.borders.bottom = None;
                    committed_cell.content = split.unwrap_or_else(|| cell.content.clone_box());
                    committed_model.add_cell(committed_cell).ok();
                    committed_placed.push((committed_model.cells.len() - 1, occ_area));

                    let mut overflow_cell = cell;
                    overflow_cell.row = 0;
                    overflow_cell.rowspan = 1;
                    overflow_cell.borders.top = None;
                    overflow_cell.content = overflow.unwrap_or_else(|| overflow_cell.content.clone_box());
                    continuation_model.add_cell(overflow_cell).ok();
                }
                ContentStatus::Nothing => {
                    if first_cause.is_none() {
                        first_cause = cause.clone();
                    }
                    let mut overflow_cell = cell;
                    overflow_cell.row = 0;
                    continuation_model.add_cell(overflow_cell).ok();
                }
                ContentStatus::Full => {
                    // The row as a whole didn't commit; re-attempt wholesale.
                    let mut overflow_cell = cell;
                    overflow_cell.row = 0;
                    continuation_model.add_cell(overflow_cell).ok();
                }
            }
        }

        // Rows beyond the split row were never dispatched at all (the
        // outer loop broke before reaching them); left untouched they
        // would simply vanish instead of carrying into the continuation.
        let late_by_idx: HashMap<usize, (ContentStatus, Rect, Option<Box<dyn super::CellContent>>, Option<Box<dyn super::CellContent>>, f64)> = late_arrivals
            .into_iter()
            .map(|(idx, status, occ_area, split, overflow, _cause, rowspan_offset)| (idx, (status, occ_area, split, overflow, rowspan_offset)))
            .collect();

        for (orig_idx, cell) in self.model.cells.iter().enumerate() {
            if cell.anchor_row() <= r_split {
                continue;
            }
            if cell.row <= r_split {
                let remaining_rowspan = (cell.rowspan - (r_split - cell.row)).max(1);
                if let Some((ContentStatus::Partial, occ_area, split, overflow, rowspan_offset)) = late_by_idx.get(&orig_idx) {
                    has_content = true;
                    partial_row_height = partial_row_height.max(occ_area.height - *rowspan_offset);

                    let mut committed_cell = cell.clone();
                    committed_cell.row = r_split;
                    committed_cell.rowspan = 1;
                    committed_cell.borders.bottom = None;
                    committed_cell.content = split.clone().unwrap_or_else(|| cell.content.clone_box());
                    committed_model.add_cell(committed_cell).ok();
                    committed_placed.push((committed_model.cells.len() - 1, *occ_area));

                    let mut overflow_cell = cell.clone();
                    overflow_cell.row = 0;
                    overflow_cell.rowspan = remaining_rowspan.saturating_sub(1).max(1);
                    overflow_cell.borders.top = None;
                    overflow_cell.content = overflow.clone().unwrap_or_else(|| cell.content.clone_box());
                    continuation_model.add_cell(overflow_cell).ok();
                    continue;
                }

                let mut c2 = cell.clone();
                c2.row = 0;
                c2.rowspan = remaining_rowspan;
                continuation_model.add_cell(c2).ok();
            } else {
                // Entirely future content: never offered to this area.
                let mut c2 = cell.clone();
                c2.row = cell.row - r_split;
                continuation_model.add_cell(c2).ok();
            }
        }

        if !has_content && self.model.forced_placement {
            has_content = true;
        }

        let nothing_committed = !has_content && r_split == 0 && committed_model.cells.is_empty();

        if self.model.keep_together && !self.model.forced_placement {
            let cause = first_cause.unwrap_or_else(|| "row does not fit and keep_together forbids splitting".into());
            warn!(cause = %cause, "keep_together refused a split");
            return Ok(LayoutOutcome::Nothing { cause });
        }

        if nothing_committed {
            let cause = first_cause.unwrap_or_else(|| "no rows fit in the offered area".into());
            return Ok(LayoutOutcome::Nothing { cause });
        }

        committed_model.row_count = r_split + if has_content { 1 } else { 0 };
        let shift = committed_model.row_count;
        continuation_model.row_count = (self.model.row_count - shift).max(continuation_model.row_count);

        let mut committed_heights = self.heights.clone();
        if has_content {
            committed_heights.push(partial_row_height);
        }
        let committed_body_height: f64 = committed_heights.iter().sum();

        let mut committed = TableRenderer::new(committed_model, self.range_start, self.is_original_non_split);
        committed.column_widths = self.column_widths.clone();
        committed.heights = committed_heights;
        committed.grids = self.grids.clone();
        committed.body_origin = self.body_origin;
        committed.placed_cells = committed_placed;
        committed.header_renderer = self.header_renderer.take();
        if let Some(fr) = self.footer_renderer.as_mut() {
            // Measured at the body's top like the `Full` branch's footer;
            // slide it down to sit flush against the committed body.
            fr.translate(0.0, -committed_body_height);
        }
        committed.footer_renderer = self.footer_renderer.take();
        committed.occupied_area = Some(Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: committed_body_height + header_height + footer_height,
        });

        let continuation = TableRenderer::new(continuation_model, self.range_start + shift, false);

        let occupied = committed.occupied_area.unwrap();
        self.occupied_area = Some(occupied);

        debug!(r_split, committed_rows = shift, "table layout partial");

        Ok(LayoutOutcome::Partial {
            occupied_area: occupied,
            committed: Box::new(committed),
            continuation: Box::new(continuation),
        })
    }

    /// Dry-run fit probe (spec §4.5): true iff every remaining cell would
    /// report `Full` in `area`. Does not mutate the renderer.
    pub fn can_fit_in_area(&self, area: Rect) -> bool {
        let mut probe = TableModel::new(self.model.columns, self.model.column_widths.clone());
        probe.table_borders = self.model.table_borders;
        probe.row_count = self.model.row_count;
        for cell in &self.model.cells {
            probe.add_cell(cell.clone()).ok();
        }
        let mut renderer = TableRenderer::new(probe, self.range_start, self.is_original_non_split);
        matches!(renderer.layout(area), Ok(LayoutOutcome::Full { .. }))
    }

    /// Translates this renderer and its header/footer by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if let Some(area) = self.occupied_area.as_mut() {
            area.x += dx;
            area.y += dy;
        }
        self.body_origin.x += dx;
        self.body_origin.y += dy;
        if let Some(h) = self.header_renderer.as_mut() {
            h.translate(dx, dy);
        }
        if let Some(f) = self.footer_renderer.as_mut() {
            f.translate(dx, dy);
        }
    }

    /// Paints header, body cells, collapsed borders, then footer.
    pub fn draw(&self, output: &mut Vec<u8>, tt_fonts: &mut [TrueTypeFont], used: &mut UsedFonts) {
        if let Some(header) = &self.header_renderer {
            let wrap = self.range_start != 0 || !self.is_original_non_split;
            if wrap {
                output.extend_from_slice(b"/Artifact BMC\n");
            }
            header.draw(output, tt_fonts, used);
            if wrap {
                output.extend_from_slice(b"EMC\n");
            }
        }

        for (idx, rect) in &self.placed_cells {
            if let Some(cell) = self.model.cells.get(*idx) {
                let mut sink = ContentSink { output, tt_fonts, used };
                cell.content.draw(*rect, &mut sink);
            }
        }

        self.draw_borders(output);

        if let Some(footer) = &self.footer_renderer {
            let wrap = !self.model.is_complete || self.model.skip_last_footer;
            if wrap {
                output.extend_from_slice(b"/Artifact BMC\n");
            }
            footer.draw(output, tt_fonts, used);
            if wrap {
                output.extend_from_slice(b"EMC\n");
            }
        }
    }

    fn draw_borders(&self, output: &mut Vec<u8>) {
        use super::borders::PdfContentTarget;
        let mut target = PdfContentTarget { output };

        let rows = self.heights.len();
        if rows == 0 {
            return;
        }
        let mut row_ys = Vec::with_capacity(rows + 1);
        let mut y = self.body_origin.y;
        row_ys.push(y);
        for h in &self.heights {
            y -= h;
            row_ys.push(y);
        }

        let mut col_xs = Vec::with_capacity(self.column_widths.len() + 1);
        let mut x = self.body_origin.x;
        col_xs.push(x);
        for w in &self.column_widths {
            x += w;
            col_xs.push(x);
        }

        for (i, row) in self.grids.h.iter().enumerate().take(rows + 1) {
            if i == 0 || i == rows {
                continue;
            }
            draw_horizontal(row, &col_xs, row_ys[i], &mut target);
        }
        for (c, col) in self.grids.v.iter().enumerate() {
            if c == 0 || c == self.column_widths.len() {
                continue;
            }
            let col = &col[..rows.min(col.len())];
            draw_vertical(col, &row_ys, col_xs[c], &mut target);
        }

        if let Some(top) = self.grids.h.first() {
            draw_horizontal(top, &col_xs, row_ys[0], &mut target);
        }
        if let Some(bottom) = self.grids.h.get(rows) {
            draw_horizontal(bottom, &col_xs, row_ys[rows], &mut target);
        }
        if let Some(left) = self.grids.v.first() {
            let left = &left[..rows.min(left.len())];
            draw_vertical(left, &row_ys, col_xs[0], &mut target);
        }
        if let Some(right) = self.grids.v.get(self.column_widths.len()) {
            let right = &right[..rows.min(right.len())];
            draw_vertical(right, &row_ys, *col_xs.last().unwrap(), &mut target);
        }
    }
}

