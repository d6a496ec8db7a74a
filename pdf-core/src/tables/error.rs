use std::fmt;

/// Errors surfaced by the table layout engine.
///
/// Mirrors `PdfReadError`'s style: a plain enum with a hand-written
/// `Display`/`Error` impl, no input ever panics the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// A cell's `row + rowspan` or `col + colspan` runs past the table bounds.
    CellOutOfBounds { row: usize, col: usize },
    /// Two cells claim the same grid anchor `(row, col)`.
    OverlappingCells { row: usize, col: usize },
    /// `rowspan` or `colspan` was given as zero.
    ZeroSpan { row: usize, col: usize },
    /// The column-width units summed to zero (or negative) after resolution.
    ZeroColumnWidth,
    /// A header model itself declared a header (recursion guard).
    NestedHeader,
    /// A header or footer could not be laid out in the initial area.
    HeaderOrFooterDoesNotFit { is_header: bool },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::CellOutOfBounds { row, col } => {
                write!(f, "cell at (row {row}, col {col}) extends past the table bounds")
            }
            TableError::OverlappingCells { row, col } => {
                write!(f, "two cells claim the grid anchor (row {row}, col {col})")
            }
            TableError::ZeroSpan { row, col } => {
                write!(f, "cell at (row {row}, col {col}) has a zero rowspan or colspan")
            }
            TableError::ZeroColumnWidth => {
                write!(f, "column widths resolved to a zero or negative total width")
            }
            TableError::NestedHeader => {
                write!(f, "a header table may not itself declare a header")
            }
            TableError::HeaderOrFooterDoesNotFit { is_header } => {
                let which = if *is_header { "header" } else { "footer" };
                write!(f, "the {which} does not fit in the initial layout area")
            }
        }
    }
}

impl std::error::Error for TableError {}
