//! Integration tests for the paginated table layout engine: column-width
//! resolution, border collapsing, rowspan bookkeeping, and split/overflow
//! across page-sized areas.

use pdf_core::{
    BorderSpec, Borders, CellContent, ColumnWidth, ContentSink, ContentStatus, LayoutOutcome,
    LayoutResult, Rect, TableCell, TableModel, TableRenderer, TextCellContent, TextContentStyle,
    VerticalAlign,
};

/// Deterministic test content: reports `Full` once `area.height` reaches
/// `needed`, otherwise `Partial` (consuming the whole offered area and
/// carrying the rest as overflow) or `Nothing` when asked to refuse splits.
#[derive(Debug, Clone)]
struct FixedContent {
    needed: f64,
    splittable: bool,
}

impl FixedContent {
    fn new(needed: f64) -> Self {
        FixedContent { needed, splittable: true }
    }

    fn unsplittable(needed: f64) -> Self {
        FixedContent { needed, splittable: false }
    }
}

impl CellContent for FixedContent {
    fn layout(&mut self, area: Rect) -> LayoutResult {
        if area.height + 1e-9 >= self.needed {
            return LayoutResult::full(Rect { x: area.x, y: area.y, width: area.width, height: self.needed });
        }
        if !self.splittable || area.height <= 0.0 {
            return LayoutResult::nothing("fixed content does not fit");
        }
        let occupied = Rect { x: area.x, y: area.y, width: area.width, height: area.height };
        LayoutResult {
            status: ContentStatus::Partial,
            occupied_area: occupied,
            split: Some(Box::new(FixedContent { needed: area.height, splittable: true })),
            overflow: Some(Box::new(FixedContent { needed: self.needed - area.height, splittable: true })),
            cause_of_nothing: None,
        }
    }

    fn draw(&self, _area: Rect, _sink: &mut ContentSink) {}

    fn clone_box(&self) -> Box<dyn CellContent> {
        Box::new(self.clone())
    }
}

fn fixed_cell(row: usize, col: usize, needed: f64, borders: Borders) -> TableCell {
    let mut cell = TableCell::new(row, col, Box::new(FixedContent::new(needed)));
    cell.borders = borders;
    cell
}

fn all_borders_1pt() -> Borders {
    let line = Some(BorderSpec::new(1.0, pdf_core::Color::rgb(0.0, 0.0, 0.0)));
    Borders { top: line, right: line, bottom: line, left: line }
}

fn equal_widths(n: usize) -> Vec<ColumnWidth> {
    vec![ColumnWidth::Percent(100.0 / n as f64); n]
}

/// Page-sized area in this crate's convention: `(x, y)` is the top-left
/// corner, height extends downward.
fn page_area(width: f64, height: f64) -> Rect {
    Rect { x: 0.0, width, y: height, height }
}

fn describe(outcome: &LayoutOutcome) -> String {
    match outcome {
        LayoutOutcome::Full { occupied_area } => format!("Full({occupied_area:?})"),
        LayoutOutcome::Partial { occupied_area, .. } => format!("Partial({occupied_area:?})"),
        LayoutOutcome::Nothing { cause } => format!("Nothing({cause})"),
    }
}

/// Content that reports `Full` at a fixed height regardless of the area
/// offered, and records the rect it was last `draw()`n at so a test can
/// inspect where the renderer actually placed it.
#[derive(Clone)]
struct RecordingContent {
    needed_height: f64,
    drawn_at: std::rc::Rc<std::cell::RefCell<Option<Rect>>>,
}

impl RecordingContent {
    fn new(needed_height: f64) -> (Self, std::rc::Rc<std::cell::RefCell<Option<Rect>>>) {
        let drawn_at = std::rc::Rc::new(std::cell::RefCell::new(None));
        (RecordingContent { needed_height, drawn_at: drawn_at.clone() }, drawn_at)
    }
}

impl CellContent for RecordingContent {
    fn layout(&mut self, area: Rect) -> LayoutResult {
        LayoutResult::full(Rect { x: area.x, y: area.y, width: area.width, height: self.needed_height })
    }

    fn draw(&self, area: Rect, _sink: &mut ContentSink) {
        *self.drawn_at.borrow_mut() = Some(area);
    }

    fn clone_box(&self) -> Box<dyn CellContent> {
        Box::new(self.clone())
    }
}

// --- S1: uniform 3x3 grid, all borders 1pt ---------------------------------

#[test]
fn s1_uniform_grid_fits_and_reports_heights() {
    let mut model = TableModel::new(3, equal_widths(3));
    for r in 0..3 {
        for c in 0..3 {
            model.add_cell(fixed_cell(r, c, 20.0, all_borders_1pt())).unwrap();
        }
    }

    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 100.0)).unwrap();

    match outcome {
        LayoutOutcome::Full { occupied_area } => {
            assert_eq!(occupied_area.width, 100.0);
            // Three 20pt rows plus half of the top/bottom table border (1pt each).
            assert!((occupied_area.height - 61.0).abs() < 1e-9, "{}", occupied_area.height);
        }
        other => panic!("expected Full, got {}", describe(&other)),
    }
}

// --- S2: a rowspan-2 cell straddling a page split --------------------------

#[test]
fn s2_rowspan_cell_contracts_across_a_split() {
    let mut model = TableModel::new(3, equal_widths(3));
    model.add_cell(fixed_cell(0, 0, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(0, 1, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(0, 2, 20.0, Borders::default())).unwrap();

    model.add_cell(fixed_cell(1, 0, 20.0, Borders::default())).unwrap();
    // Spans rows 1-2; needs both rows' worth of height to report Full.
    let mut spanning = TableCell::new(1, 1, Box::new(FixedContent::unsplittable(40.0)));
    spanning.rowspan = 2;
    model.add_cell(spanning).unwrap();
    model.add_cell(fixed_cell(1, 2, 20.0, Borders::default())).unwrap();

    model.add_cell(fixed_cell(2, 0, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(2, 2, 20.0, Borders::default())).unwrap();

    model.add_cell(fixed_cell(3, 0, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(3, 1, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(3, 2, 20.0, Borders::default())).unwrap();

    // Exactly two rows' worth of height: rows 0 and 1 commit, row 2 doesn't.
    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(90.0, 40.0)).unwrap();

    match outcome {
        LayoutOutcome::Partial { committed, continuation, .. } => {
            assert!(committed.occupied_area().is_some());
            assert!(continuation.occupied_area().is_none());
        }
        other => panic!("expected Partial, got {}", describe(&other)),
    }
}

// --- A row strictly after the split row must still reach the continuation --

#[test]
fn s2b_row_strictly_after_split_carries_to_continuation() {
    let mut model = TableModel::new(1, equal_widths(1));
    for r in 0..4 {
        model.add_cell(fixed_cell(r, 0, 20.0, Borders::default())).unwrap();
    }

    // Exactly two rows' worth of height: rows 0-1 commit, the split lands on
    // row 2 with zero height left over, leaving rows 2 and 3 both unplaced.
    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 40.0)).unwrap();

    let continuation = match outcome {
        LayoutOutcome::Partial { continuation, .. } => continuation,
        other => panic!("expected Partial, got {}", describe(&other)),
    };

    // Both remaining rows (not just the one at the split row) must still be
    // present in the continuation: laid out into a fresh area sized for
    // exactly two 20pt rows, it should report Full at 40pt, not 20pt.
    let mut continuation = *continuation;
    let outcome = continuation.layout(page_area(100.0, 40.0)).unwrap();
    match outcome {
        LayoutOutcome::Full { occupied_area } => {
            assert!((occupied_area.height - 40.0).abs() < 1e-9, "{}", occupied_area.height);
        }
        other => panic!("expected Full, got {}", describe(&other)),
    }
}

// --- S3: border-collapse tie (wider border wins, cell wins a tie) ----------

#[test]
fn s3_wider_border_wins_on_shared_edge() {
    use pdf_core::tables::borders::collapse;

    let thin = BorderSpec::new(0.5, pdf_core::Color::gray(0.5));
    let thick = BorderSpec::new(2.0, pdf_core::Color::gray(0.5));

    assert_eq!(collapse(Some(thin), Some(thick)), Some(thick));
    assert_eq!(collapse(Some(thick), Some(thin)), Some(thick));

    // On a tie, the cell's own border beats the table's.
    let cell_tie = BorderSpec::new(1.0, pdf_core::Color::rgb(1.0, 0.0, 0.0));
    let table_tie = BorderSpec::new(1.0, pdf_core::Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(collapse(Some(cell_tie), Some(table_tie)), Some(cell_tie));
}

// --- S4: footer is dropped on the final, complete page ---------------------

#[test]
fn s4_footer_is_skipped_when_the_table_completes() {
    let mut footer = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    footer.add_cell(fixed_cell(0, 0, 10.0, Borders::default())).unwrap();

    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    model.add_cell(fixed_cell(0, 0, 20.0, Borders::default())).unwrap();
    model.skip_last_footer = true;
    let model = model.with_footer(footer);

    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 100.0)).unwrap();

    match outcome {
        LayoutOutcome::Full { occupied_area } => {
            // Only the body row's height; the footer never got a budget.
            assert!((occupied_area.height - 20.0).abs() < 1e-9, "{}", occupied_area.height);
        }
        other => panic!("expected Full, got {}", describe(&other)),
    }
}

#[test]
fn s4_footer_renders_on_a_page_that_is_not_the_last() {
    let mut footer = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    footer.add_cell(fixed_cell(0, 0, 10.0, Borders::default())).unwrap();

    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    for r in 0..5 {
        model.add_cell(fixed_cell(r, 0, 20.0, Borders::default())).unwrap();
    }
    model.is_complete = false;
    model.skip_last_footer = true;
    let model = model.with_footer(footer);

    // Room for two body rows only; this is not the final page so the footer
    // still reserves space and renders.
    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 50.0)).unwrap();

    match outcome {
        LayoutOutcome::Partial { occupied_area, .. } => {
            // Two 20pt rows plus the 10pt footer.
            assert!((occupied_area.height - 50.0).abs() < 1e-9, "{}", occupied_area.height);
        }
        other => panic!("expected Partial, got {}", describe(&other)),
    }
}

#[test]
fn s4_footer_skipped_only_on_the_genuinely_last_page() {
    // A *complete* table (is_complete stays true through every continuation)
    // that needs three pages. `skip_last_footer` must suppress the footer on
    // page 3 only — not on every page just because `is_complete` is set,
    // which would also be true of pages 1 and 2 since a split's continuation
    // model inherits `is_complete` from its parent.
    let mut footer = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    footer.add_cell(fixed_cell(0, 0, 10.0, Borders::default())).unwrap();

    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    for r in 0..5 {
        model.add_cell(fixed_cell(r, 0, 20.0, Borders::default())).unwrap();
    }
    model.skip_last_footer = true;
    let model = model.with_footer(footer);

    let mut renderer = TableRenderer::new(model, 0, true);

    // Page 1: rows 0-1 (40pt) plus the 10pt footer = 50pt. Three rows remain.
    match renderer.layout(page_area(100.0, 50.0)).unwrap() {
        LayoutOutcome::Partial { occupied_area, continuation, .. } => {
            assert!((occupied_area.height - 50.0).abs() < 1e-9, "{}", occupied_area.height);
            renderer = *continuation;
        }
        other => panic!("expected Partial on page 1, got {}", describe(&other)),
    }

    // Page 2: two more rows (40pt) plus the footer again = 50pt. One row
    // remains; this is still not the last page.
    match renderer.layout(page_area(100.0, 50.0)).unwrap() {
        LayoutOutcome::Partial { occupied_area, continuation, .. } => {
            assert!((occupied_area.height - 50.0).abs() < 1e-9, "{}", occupied_area.height);
            renderer = *continuation;
        }
        other => panic!("expected Partial on page 2, got {}", describe(&other)),
    }

    // Page 3: the last row alone fits without the footer, so it is elided.
    match renderer.layout(page_area(100.0, 50.0)).unwrap() {
        LayoutOutcome::Full { occupied_area } => {
            assert!((occupied_area.height - 20.0).abs() < 1e-9, "{}", occupied_area.height);
        }
        other => panic!("expected Full on page 3, got {}", describe(&other)),
    }
}

// --- S6: keep_together refuses to split a table that doesn't fully fit ----

#[test]
fn s6_keep_together_refuses_a_split() {
    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    model.add_cell(fixed_cell(0, 0, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(1, 0, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(2, 0, 20.0, Borders::default())).unwrap();
    model.keep_together = true;

    // Only room for row 0; row 1 fails and keep_together forbids committing
    // a partial table.
    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 20.0)).unwrap();

    match outcome {
        LayoutOutcome::Nothing { .. } => {}
        other => panic!("expected Nothing, got {}", describe(&other)),
    }
}

#[test]
fn s6_forced_placement_overrides_keep_together() {
    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    model.add_cell(fixed_cell(0, 0, 20.0, Borders::default())).unwrap();
    model.add_cell(fixed_cell(1, 0, 20.0, Borders::default())).unwrap();
    model.keep_together = true;
    model.forced_placement = true;

    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 20.0)).unwrap();

    match outcome {
        LayoutOutcome::Partial { .. } => {}
        other => panic!("expected Partial, got {}", describe(&other)),
    }
}

// --- Universal invariants ---------------------------------------------------

#[test]
fn heights_sum_to_the_occupied_body_height() {
    let mut model = TableModel::new(2, equal_widths(2));
    for r in 0..4 {
        for c in 0..2 {
            model.add_cell(fixed_cell(r, c, 15.0, Borders::default())).unwrap();
        }
    }

    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 200.0)).unwrap();
    match outcome {
        LayoutOutcome::Full { occupied_area } => {
            assert!((occupied_area.height - 60.0).abs() < 1e-9);
        }
        other => panic!("expected Full, got {}", describe(&other)),
    }
}

#[test]
fn occupied_width_never_exceeds_the_offered_area() {
    let mut model = TableModel::new(3, equal_widths(3));
    for c in 0..3 {
        model.add_cell(fixed_cell(0, c, 10.0, Borders::default())).unwrap();
    }
    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(250.0, 50.0)).unwrap();
    match outcome {
        LayoutOutcome::Full { occupied_area } => assert!(occupied_area.width <= 250.0 + 1e-9),
        other => panic!("expected Full, got {}", describe(&other)),
    }
}

#[test]
fn can_fit_in_area_agrees_with_layout() {
    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    model.add_cell(fixed_cell(0, 0, 30.0, Borders::default())).unwrap();
    let mut renderer = TableRenderer::new(model.clone(), 0, true);

    assert!(renderer.can_fit_in_area(page_area(100.0, 50.0)));
    assert!(!renderer.can_fit_in_area(page_area(100.0, 10.0)));

    let outcome = renderer.layout(page_area(100.0, 50.0)).unwrap();
    assert!(matches!(outcome, LayoutOutcome::Full { .. }));
}

#[test]
fn a_full_fit_is_idempotent_across_repeated_layout_calls() {
    let mut model = TableModel::new(2, equal_widths(2));
    for c in 0..2 {
        model.add_cell(fixed_cell(0, c, 10.0, Borders::default())).unwrap();
    }
    let mut renderer = TableRenderer::new(model, 0, true);
    let first = renderer.layout(page_area(100.0, 50.0)).unwrap();
    let second = renderer.layout(page_area(100.0, 50.0)).unwrap();
    match (first, second) {
        (LayoutOutcome::Full { occupied_area: a }, LayoutOutcome::Full { occupied_area: b }) => {
            assert_eq!(a.height, b.height);
            assert_eq!(a.width, b.width);
        }
        _ => panic!("expected both layouts to report Full"),
    }
}

// --- Row-height equalisation & vertical alignment ---------------------------

#[test]
fn s7_bottom_valign_shifts_shorter_cell_down_within_the_row() {
    let (tall, tall_rect) = RecordingContent::new(30.0);
    let (short, short_rect) = RecordingContent::new(10.0);

    let mut model = TableModel::new(2, equal_widths(2));
    model.add_cell(TableCell::new(0, 0, Box::new(tall))).unwrap();
    let mut short_cell = TableCell::new(0, 1, Box::new(short));
    short_cell.valign = VerticalAlign::Bottom;
    model.add_cell(short_cell).unwrap();

    let mut renderer = TableRenderer::new(model, 0, true);
    let outcome = renderer.layout(page_area(100.0, 30.0)).unwrap();
    assert!(matches!(outcome, LayoutOutcome::Full { .. }), "{}", describe(&outcome));

    let mut used = pdf_core::textflow::UsedFonts::default();
    let mut out = Vec::new();
    renderer.draw(&mut out, &mut [], &mut used);

    let tall_rect = tall_rect.borrow().expect("tall cell should have drawn");
    let short_rect = short_rect.borrow().expect("short cell should have drawn");

    // Top-aligned (default) content sits flush with the row's top edge.
    assert_eq!(tall_rect.height, 30.0);
    // Bottom-aligned content is pushed down by the row's leftover height
    // (30 - 10); y decreases toward the bottom of the page in this crate's
    // top-left-origin convention, so the shorter cell ends up at a smaller y.
    assert_eq!(short_rect.height, 10.0);
    assert!((tall_rect.y - short_rect.y - 20.0).abs() < 1e-9, "tall.y={} short.y={}", tall_rect.y, short_rect.y);
}

// --- End-to-end with real text content and a header -------------------------

#[test]
fn text_table_with_header_paginates_across_two_areas() {
    let header_style = TextContentStyle { padding: 2.0, ..TextContentStyle::default() };
    let mut header = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    header.add_cell(TableCell::new(0, 0, Box::new(TextCellContent::new("Name", header_style)))).unwrap();

    let body_style = TextContentStyle { padding: 2.0, font_size: 10.0, ..TextContentStyle::default() };
    let mut model = TableModel::new(1, vec![ColumnWidth::Percent(100.0)]);
    model.is_complete = false;
    for r in 0..20 {
        model
            .add_cell(TableCell::new(r, 0, Box::new(TextCellContent::new(format!("row {r}"), body_style.clone()))))
            .unwrap();
    }
    let model = model.with_header(header).unwrap();

    let mut renderer = TableRenderer::new(model, 0, true);
    let mut pages = 0;
    loop {
        pages += 1;
        match renderer.layout(page_area(100.0, 60.0)).unwrap() {
            LayoutOutcome::Full { .. } => break,
            LayoutOutcome::Partial { continuation, .. } => {
                renderer = *continuation;
            }
            LayoutOutcome::Nothing { cause } => panic!("table did not fit: {cause}"),
        }
        assert!(pages < 50, "runaway pagination");
    }
    assert!(pages > 1, "20 rows at 60pt/page should require more than one page");
}
