//! Paginated table layout: column-width solving, collapsing borders,
//! rowspan/colspan bookkeeping, and split/overflow across page areas.

pub mod borders;
pub mod columns;
pub mod content;
pub mod error;
pub mod renderer;

pub use borders::{BorderGrids, DrawTarget, PdfContentTarget};
pub use content::{CellContent, ContentSink, ContentStatus, LayoutResult, TextCellContent, TextContentStyle};
pub use error::TableError;
pub use renderer::{LayoutOutcome, TableRenderer};

use crate::graphics::Color;

/// A column's width, before resolution into absolute points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Percent(f64),
    Point(f64),
}

/// A single border side: stroke width and color. `None` at the call site
/// means "no border" — the collapse sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSpec {
    pub width: f64,
    pub color: Color,
}

impl BorderSpec {
    pub fn new(width: f64, color: Color) -> Self {
        BorderSpec { width, color }
    }
}

/// The four border sides of a cell or table edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Borders {
    pub top: Option<BorderSpec>,
    pub right: Option<BorderSpec>,
    pub bottom: Option<BorderSpec>,
    pub left: Option<BorderSpec>,
}

/// Vertical placement of a cell's content within its allotted row height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// A single logical cell: its grid origin, span, borders, alignment and
/// opaque content.
#[derive(Debug)]
pub struct TableCell {
    /// Row the cell originates at (top row it occupies).
    pub row: usize,
    pub col: usize,
    pub rowspan: usize,
    pub colspan: usize,
    pub borders: Borders,
    pub valign: VerticalAlign,
    pub content: Box<dyn CellContent>,
}

impl TableCell {
    pub fn new(row: usize, col: usize, content: Box<dyn CellContent>) -> Self {
        TableCell {
            row,
            col,
            rowspan: 1,
            colspan: 1,
            borders: Borders::default(),
            valign: VerticalAlign::Top,
            content,
        }
    }

    /// The row this cell is anchored at in the grid: its bottom-left corner,
    /// i.e. the last row it spans.
    pub fn anchor_row(&self) -> usize {
        self.row + self.rowspan - 1
    }
}

impl Clone for TableCell {
    fn clone(&self) -> Self {
        TableCell {
            row: self.row,
            col: self.col,
            rowspan: self.rowspan,
            colspan: self.colspan,
            borders: self.borders,
            valign: self.valign,
            content: self.content.clone_box(),
        }
    }
}

/// A logical table: column layout, cells, optional header/footer, and the
/// configuration flags the renderer consults.
#[derive(Clone)]
pub struct TableModel {
    pub columns: usize,
    pub row_count: usize,
    pub column_widths: Vec<ColumnWidth>,
    pub cells: Vec<TableCell>,
    pub table_borders: Borders,
    pub header: Option<Box<TableModel>>,
    pub footer: Option<Box<TableModel>>,

    /// No more rows will be appended after this model is laid out.
    pub is_complete: bool,
    pub skip_first_header: bool,
    pub skip_last_footer: bool,

    pub forced_placement: bool,
    pub keep_together: bool,
    pub fill_available_area: bool,
    pub fill_available_area_on_split: bool,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub height: Option<f64>,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl TableModel {
    pub fn new(columns: usize, column_widths: Vec<ColumnWidth>) -> Self {
        TableModel {
            columns,
            row_count: 0,
            column_widths,
            cells: Vec::new(),
            table_borders: Borders::default(),
            header: None,
            footer: None,
            is_complete: true,
            skip_first_header: false,
            skip_last_footer: false,
            forced_placement: false,
            keep_together: false,
            fill_available_area: false,
            fill_available_area_on_split: false,
            min_height: None,
            max_height: None,
            height: None,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    /// Adds a cell and extends `row_count` to cover its span.
    pub fn add_cell(&mut self, cell: TableCell) -> Result<(), TableError> {
        if cell.rowspan == 0 || cell.colspan == 0 {
            return Err(TableError::ZeroSpan { row: cell.row, col: cell.col });
        }
        if cell.col + cell.colspan > self.columns {
            return Err(TableError::CellOutOfBounds { row: cell.row, col: cell.col });
        }
        let anchor = cell.anchor_row();
        if self.cells.iter().any(|c| c.anchor_row() == anchor && c.col == cell.col) {
            return Err(TableError::OverlappingCells { row: anchor, col: cell.col });
        }
        self.row_count = self.row_count.max(anchor + 1);
        self.cells.push(cell);
        Ok(())
    }

    pub fn with_header(mut self, header: TableModel) -> Result<Self, TableError> {
        if header.header.is_some() {
            return Err(TableError::NestedHeader);
        }
        self.header = Some(Box::new(header));
        Ok(self)
    }

    pub fn with_footer(mut self, footer: TableModel) -> Self {
        self.footer = Some(Box::new(footer));
        self
    }

    fn validate(&self) -> Result<(), TableError> {
        for cell in &self.cells {
            if cell.rowspan == 0 || cell.colspan == 0 {
                return Err(TableError::ZeroSpan { row: cell.row, col: cell.col });
            }
            if cell.anchor_row() >= self.row_count || cell.col + cell.colspan > self.columns {
                return Err(TableError::CellOutOfBounds { row: cell.row, col: cell.col });
            }
        }
        Ok(())
    }
}
