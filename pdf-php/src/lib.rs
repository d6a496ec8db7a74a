use std::fs::File;
use std::io::{BufWriter, Write};

use ext_php_rs::prelude::*;
use ext_php_rs::types::Zval;

use pdf_core::{
    BorderSpec, Borders, BuiltinFont, Color, ColumnWidth, FitResult, FontRef, LayoutOutcome,
    PdfDocument, Rect, TableCell, TableModel, TableRenderer, TextCellContent, TextContentStyle,
    TextFlow, TextStyle,
};

// ----------------------------------------------------------
// Color
// ----------------------------------------------------------

/// PHP class: Color
///
/// ```php
/// $red = new Color(1.0, 0.0, 0.0);
/// $gray = Color::gray(0.5);
/// ```
#[php_class(name = "Color")]
pub struct PhpColor {
    #[prop]
    pub r: f64,
    #[prop]
    pub g: f64,
    #[prop]
    pub b: f64,
}

#[php_impl]
impl PhpColor {
    pub fn __construct(r: f64, g: f64, b: f64) -> Self {
        PhpColor { r, g, b }
    }

    pub fn gray(level: f64) -> Self {
        PhpColor { r: level, g: level, b: level }
    }
}

impl PhpColor {
    fn to_core(&self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }
}

// ----------------------------------------------------------
// TextStyle
// ----------------------------------------------------------

/// PHP class: TextStyle
///
/// ```php
/// $style = new TextStyle("Helvetica-Bold", 14.0);
/// ```
#[php_class(name = "TextStyle")]
pub struct PhpTextStyle {
    #[prop]
    pub font_name: String,
    #[prop]
    pub font_size: f64,
}

#[php_impl]
impl PhpTextStyle {
    pub fn __construct(font: Option<String>, font_size: Option<f64>) -> Self {
        PhpTextStyle {
            font_name: font.unwrap_or_else(|| "Helvetica".to_string()),
            font_size: font_size.unwrap_or(12.0),
        }
    }
}

impl PhpTextStyle {
    fn to_core(&self) -> Result<TextStyle, String> {
        let builtin = BuiltinFont::from_name(&self.font_name).ok_or_else(|| {
            format!(
                "Unknown font: '{}'. Valid names: \
                 Helvetica, Helvetica-Bold, Helvetica-Oblique, Helvetica-BoldOblique, \
                 Times-Roman, Times-Bold, Times-Italic, Times-BoldItalic, \
                 Courier, Courier-Bold, Courier-Oblique, Courier-BoldOblique, \
                 Symbol, ZapfDingbats",
                self.font_name,
            )
        })?;
        Ok(TextStyle { font: FontRef::Builtin(builtin), font_size: self.font_size })
    }
}

// ----------------------------------------------------------
// Rect
// ----------------------------------------------------------

/// PHP class: Rect
///
/// ```php
/// $rect = new Rect(72.0, 720.0, 468.0, 648.0);
/// ```
#[php_class(name = "Rect")]
pub struct PhpRect {
    #[prop]
    pub x: f64,
    #[prop]
    pub y: f64,
    #[prop]
    pub width: f64,
    #[prop]
    pub height: f64,
}

#[php_impl]
impl PhpRect {
    pub fn __construct(x: f64, y: f64, width: f64, height: f64) -> Self {
        PhpRect { x, y, width, height }
    }
}

impl PhpRect {
    fn to_core(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ----------------------------------------------------------
// TextFlow
// ----------------------------------------------------------

/// PHP class: TextFlow
///
/// ```php
/// $tf = new TextFlow();
/// $tf->addText("Hello ", new TextStyle());
/// $tf->addText("Bold", new TextStyle("Helvetica-Bold"));
/// ```
#[php_class(name = "TextFlow")]
pub struct PhpTextFlow {
    inner: TextFlow,
}

#[php_impl]
impl PhpTextFlow {
    pub fn __construct() -> Self {
        PhpTextFlow { inner: TextFlow::new() }
    }

    pub fn add_text(&mut self, text: &str, style: &PhpTextStyle) -> Result<(), String> {
        let core_style = style.to_core()?;
        self.inner.add_text(text, &core_style);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

// ----------------------------------------------------------
// Table bindings
//
// `TableCell::content` is `Box<dyn CellContent>`, a trait object that can't
// cross the FFI boundary. The PHP surface is restricted to text cells
// (`TextCellContent`) built up through a flat builder, which covers the
// reporting use case PHP callers need.
// ----------------------------------------------------------

fn parse_border(width: f64, color: Option<&PhpColor>) -> Option<BorderSpec> {
    if width <= 0.0 {
        return None;
    }
    let color = color.map(|c| c.to_core()).unwrap_or_else(|| Color::rgb(0.0, 0.0, 0.0));
    Some(BorderSpec::new(width, color))
}

/// PHP class: TableModel
///
/// ```php
/// $model = new TableModel([100.0, 200.0, 100.0]);
/// $model->setBorders(0.5, new Color(0.6, 0.6, 0.6));
/// $model->addCell(0, 0, 1, 1, "Name", new TextStyle("Helvetica-Bold", 10.0));
/// $renderer = TableRenderer::fromModel($model);
/// ```
#[php_class(name = "TableModel")]
pub struct PhpTableModel {
    column_widths: Vec<f64>,
    cells: Vec<(usize, usize, usize, usize, String, TextContentStyle)>,
    table_border_width: f64,
    table_border_color: Option<PhpColor>,
    keep_together: bool,
    is_complete: bool,
    skip_first_header: bool,
    skip_last_footer: bool,
}

#[php_impl]
impl PhpTableModel {
    pub fn __construct(column_widths: Vec<f64>) -> Self {
        PhpTableModel {
            column_widths,
            cells: Vec::new(),
            table_border_width: 0.0,
            table_border_color: None,
            keep_together: false,
            is_complete: true,
            skip_first_header: false,
            skip_last_footer: false,
        }
    }

    pub fn set_borders(&mut self, width: f64, color: Option<&PhpColor>) {
        self.table_border_width = width;
        self.table_border_color =
            color.map(|c| PhpColor { r: c.r, g: c.g, b: c.b });
    }

    pub fn set_keep_together(&mut self, keep_together: bool) {
        self.keep_together = keep_together;
    }

    pub fn set_complete(&mut self, is_complete: bool) {
        self.is_complete = is_complete;
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_cell(
        &mut self,
        row: i64,
        col: i64,
        rowspan: i64,
        colspan: i64,
        text: &str,
        style: &PhpTextStyle,
    ) -> Result<(), String> {
        let core_style = style.to_core()?;
        self.cells.push((
            row.max(0) as usize,
            col.max(0) as usize,
            rowspan.max(1) as usize,
            colspan.max(1) as usize,
            text.to_string(),
            TextContentStyle {
                font: core_style.font,
                font_size: core_style.font_size,
                text_color: None,
                padding: 2.0,
                word_break: pdf_core::WordBreak::BreakAll,
            },
        ));
        Ok(())
    }

    fn build_core(&self) -> TableModel {
        let widths = self.column_widths.iter().map(|w| ColumnWidth::Point(*w)).collect();
        let mut model = TableModel::new(self.column_widths.len(), widths);
        let border = parse_border(self.table_border_width, self.table_border_color.as_ref());
        model.table_borders = Borders { top: border, right: border, bottom: border, left: border };
        model.keep_together = self.keep_together;
        model.is_complete = self.is_complete;
        model.skip_first_header = self.skip_first_header;
        model.skip_last_footer = self.skip_last_footer;
        for (row, col, rowspan, colspan, text, style) in &self.cells {
            let mut cell = TableCell::new(*row, *col, Box::new(TextCellContent::new(text.clone(), style.clone())));
            cell.rowspan = *rowspan;
            cell.colspan = *colspan;
            cell.borders = model.table_borders;
            model.add_cell(cell).ok();
        }
        model
    }
}

/// PHP class: TableRenderer
///
/// Wraps a `pdf_core::TableRenderer` across the page-boundary loop a
/// multi-page table needs: each `fit()` call lays the remaining rows out
/// into one page's rect and draws whatever committed; `isDone()` reports
/// whether another page is needed.
///
/// ```php
/// $renderer = TableRenderer::fromModel($model);
/// while (!$renderer->isDone()) {
///     $status = $renderer->fit($doc, $rect);
///     if ($status !== "partial") break;
///     $doc->endPage();
///     $doc->beginPage(612.0, 792.0);
/// }
/// ```
#[php_class(name = "TableRenderer")]
pub struct PhpTableRenderer {
    inner: Option<TableRenderer>,
}

#[php_impl]
impl PhpTableRenderer {
    pub fn from_model(model: &PhpTableModel) -> Self {
        PhpTableRenderer { inner: Some(TableRenderer::new(model.build_core(), 0, true)) }
    }

    pub fn is_done(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns "full", "partial", or "nothing: <cause>".
    pub fn fit(&mut self, doc: &mut PhpPdfDocument, rect: &PhpRect) -> Result<String, String> {
        let mut renderer = self.inner.take().ok_or_else(|| "fit: table already finished".to_string())?;
        let core_rect = rect.to_core();
        let status = with_doc!(doc, fit, d => {
            match d.fit_table_renderer(&mut renderer, &core_rect)
                .map_err(|e| format!("fit_table_renderer failed: {}", e))? {
                LayoutOutcome::Full { .. } => "full".to_string(),
                LayoutOutcome::Partial { continuation, .. } => {
                    self.inner = Some(*continuation);
                    "partial".to_string()
                }
                LayoutOutcome::Nothing { cause } => format!("nothing: {cause}"),
            }
        });
        Ok(status)
    }
}

/// PHP class: PdfDocument
///
/// ```php
/// $doc = PdfDocument::create("out.pdf");
/// $doc = PdfDocument::createInMemory();
/// ```
#[php_class(name = "PdfDocument")]
pub struct PhpPdfDocument {
    inner: Option<DocumentInner>,
}

/// Concrete inner types since PdfDocument<W> is generic.
enum DocumentInner {
    File(PdfDocument<BufWriter<File>>),
    Memory(PdfDocument<Vec<u8>>),
}

/// Dispatch a method call to the correct variant.
macro_rules! with_doc {
    ($self:expr, $name:ident, $doc:ident => $body:expr) => {
        match $self.inner.as_mut() {
            Some(inner) => match inner {
                DocumentInner::File($doc) => $body,
                DocumentInner::Memory($doc) => $body,
            },
            None => {
                return Err(format!("{}: document already ended", stringify!($name)));
            }
        }
    };
}

#[php_impl]
impl PhpPdfDocument {
    pub fn create(path: &str) -> Result<Self, String> {
        let doc = PdfDocument::create(path).map_err(|e| format!("create failed: {}", e))?;
        Ok(PhpPdfDocument { inner: Some(DocumentInner::File(doc)) })
    }

    pub fn create_in_memory() -> Result<Self, String> {
        let doc = PdfDocument::new(Vec::new()).map_err(|e| format!("create_in_memory failed: {}", e))?;
        Ok(PhpPdfDocument { inner: Some(DocumentInner::Memory(doc)) })
    }

    pub fn set_info(&mut self, key: &str, value: &str) -> Result<(), String> {
        with_doc!(self, set_info, doc => {
            doc.set_info(key, value);
            Ok(())
        })
    }

    pub fn begin_page(&mut self, width: f64, height: f64) -> Result<(), String> {
        with_doc!(self, begin_page, doc => {
            doc.begin_page(width, height);
            Ok(())
        })
    }

    pub fn place_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), String> {
        with_doc!(self, place_text, doc => {
            doc.place_text(text, x, y);
            Ok(())
        })
    }

    pub fn place_text_styled(&mut self, text: &str, x: f64, y: f64, style: &PhpTextStyle) -> Result<(), String> {
        let core_style = style.to_core()?;
        with_doc!(self, place_text_styled, doc => {
            doc.place_text_styled(text, x, y, &core_style);
            Ok(())
        })
    }

    pub fn fit_textflow(&mut self, flow: &mut PhpTextFlow, rect: &PhpRect) -> Result<String, String> {
        let core_rect = rect.to_core();
        with_doc!(self, fit_textflow, doc => {
            let result = doc.fit_textflow(&mut flow.inner, &core_rect)
                .map_err(|e| format!("fit_textflow failed: {}", e))?;
            Ok(match result {
                FitResult::Stop => "stop".to_string(),
                FitResult::BoxFull => "box_full".to_string(),
                FitResult::BoxEmpty => "box_empty".to_string(),
            })
        })
    }

    pub fn end_page(&mut self) -> Result<(), String> {
        with_doc!(self, end_page, doc => {
            doc.end_page().map_err(|e| format!("end_page failed: {}", e))
        })
    }

    /// End the document. Returns null for file-based docs, or a binary
    /// string for in-memory docs.
    pub fn end_document(&mut self) -> Result<Zval, String> {
        let inner = self.inner.take().ok_or_else(|| "end_document: document already ended".to_string())?;
        match inner {
            DocumentInner::File(doc) => {
                let mut writer = doc.end_document().map_err(|e| format!("end_document failed: {}", e))?;
                writer.flush().map_err(|e| format!("end_document flush failed: {}", e))?;
                let mut zval = Zval::new();
                zval.set_null();
                Ok(zval)
            }
            DocumentInner::Memory(doc) => {
                let bytes = doc.end_document().map_err(|e| format!("end_document failed: {}", e))?;
                let mut zval = Zval::new();
                zval.set_binary(bytes);
                Ok(zval)
            }
        }
    }
}

#[php_module]
pub fn get_module(module: ModuleBuilder) -> ModuleBuilder {
    module
}
