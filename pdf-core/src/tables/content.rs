use crate::fonts::{BuiltinFont, FontRef};
use crate::graphics::Color;
use crate::textflow::{
    break_word, line_height_for, measure_word, Rect, TextStyle, UsedFonts, WordBreak,
};
use crate::truetype::TrueTypeFont;
use crate::writer::escape_pdf_string;

/// How a cell reports the outcome of trying to lay itself out in an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStatus {
    /// The full content fit; nothing is left over.
    Full,
    /// Only part of the content fit; `split`/`overflow` carry the rest.
    Partial,
    /// Nothing fit at all.
    Nothing,
}

/// Result of a single `CellContent::layout` call.
#[derive(Debug)]
pub struct LayoutResult {
    pub status: ContentStatus,
    pub occupied_area: Rect,
    pub split: Option<Box<dyn CellContent>>,
    pub overflow: Option<Box<dyn CellContent>>,
    pub cause_of_nothing: Option<String>,
}

impl LayoutResult {
    pub fn full(occupied_area: Rect) -> Self {
        LayoutResult {
            status: ContentStatus::Full,
            occupied_area,
            split: None,
            overflow: None,
            cause_of_nothing: None,
        }
    }

    pub fn nothing(cause: impl Into<String>) -> Self {
        LayoutResult {
            status: ContentStatus::Nothing,
            occupied_area: Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 },
            split: None,
            overflow: None,
            cause_of_nothing: Some(cause.into()),
        }
    }
}

/// Sink a cell content implementation paints itself into. Bundles the
/// document-level font resources a PDF content stream needs to reference.
pub struct ContentSink<'a> {
    pub output: &'a mut Vec<u8>,
    pub tt_fonts: &'a mut [TrueTypeFont],
    pub used: &'a mut UsedFonts,
}

/// The black-box cell content collaborator. The table engine dispatches
/// cells to this trait and never inspects what's inside.
pub trait CellContent: std::fmt::Debug {
    /// Attempt to lay the content out within `area`. May be called again
    /// with a different area (e.g. a keep-together retry), so implementors
    /// must not assume a single call.
    fn layout(&mut self, area: Rect) -> LayoutResult;

    /// Paint whatever was committed by the most recent `Full`/`Partial`
    /// `layout` call into `sink`, anchored at `area` (the same area, or the
    /// `occupied_area` reported by `layout`).
    fn draw(&self, area: Rect, sink: &mut ContentSink);

    /// Deep-clone behind the trait object (`Box<dyn CellContent>` can't
    /// derive `Clone`).
    fn clone_box(&self) -> Box<dyn CellContent>;
}

impl Clone for Box<dyn CellContent> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}

/// Style applied to a `TextCellContent`.
#[derive(Debug, Clone)]
pub struct TextContentStyle {
    pub font: FontRef,
    pub font_size: f64,
    pub text_color: Option<Color>,
    pub padding: f64,
    pub word_break: WordBreak,
}

impl Default for TextContentStyle {
    fn default() -> Self {
        TextContentStyle {
            font: FontRef::Builtin(BuiltinFont::Helvetica),
            font_size: 10.0,
            text_color: None,
            padding: 2.0,
            word_break: WordBreak::BreakAll,
        }
    }
}

/// The text content collaborator, built from the crate's word-wrap and
/// glyph-metrics machinery. Wraps once on the first `layout` call, then
/// reports `Full`/`Partial`/`Nothing` against however many wrapped lines
/// fit the offered height; a `Partial` result hands the unfit lines to a
/// fresh `TextCellContent` as its `overflow`.
#[derive(Debug, Clone)]
pub struct TextCellContent {
    text: String,
    style: TextContentStyle,
    lines: Option<Vec<String>>,
    placed: Vec<String>,
}

impl TextCellContent {
    pub fn new(text: impl Into<String>, style: TextContentStyle) -> Self {
        TextCellContent {
            text: text.into(),
            style,
            lines: None,
            placed: Vec::new(),
        }
    }

    fn wrapped_lines(&mut self, avail_width: f64, tt_fonts: &[TrueTypeFont]) -> &[String] {
        if self.lines.is_none() {
            let ts = TextStyle { font: self.style.font, font_size: self.style.font_size };
            self.lines = Some(wrap_text(&self.text, avail_width, &ts, self.style.word_break, tt_fonts));
        }
        self.lines.as_ref().unwrap()
    }
}

impl CellContent for TextCellContent {
    fn layout(&mut self, area: Rect) -> LayoutResult {
        // TrueType metrics would require access to the document's font
        // table; builtin fonts (the common case) measure without it.
        let tt_fonts: &[TrueTypeFont] = &[];
        let avail_width = (area.width - 2.0 * self.style.padding).max(0.0);
        let avail_height = (area.height - 2.0 * self.style.padding).max(0.0);
        let ts = TextStyle { font: self.style.font, font_size: self.style.font_size };
        let lh = line_height_for(&ts, tt_fonts);

        let total_lines = self.wrapped_lines(avail_width, tt_fonts).len();
        let max_lines = if lh <= 0.0 { 0 } else { (avail_height / lh).floor() as usize };

        if max_lines == 0 {
            return LayoutResult::nothing("no room for a single line of text");
        }

        if max_lines >= total_lines {
            self.placed = self.lines.clone().unwrap_or_default();
            let occupied_height = total_lines as f64 * lh + 2.0 * self.style.padding;
            return LayoutResult::full(Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: occupied_height.min(area.height),
            });
        }

        let lines = self.lines.clone().unwrap_or_default();
        let (fitting, rest) = lines.split_at(max_lines);

        let mut split = TextCellContent::new(String::new(), self.style.clone());
        split.lines = Some(fitting.to_vec());
        split.placed = fitting.to_vec();

        let mut overflow = TextCellContent::new(rest.join(" "), self.style.clone());
        overflow.lines = Some(rest.to_vec());

        let occupied_height = max_lines as f64 * lh + 2.0 * self.style.padding;
        LayoutResult {
            status: ContentStatus::Partial,
            occupied_area: Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: occupied_height,
            },
            split: Some(Box::new(split)),
            overflow: Some(Box::new(overflow)),
            cause_of_nothing: None,
        }
    }

    fn draw(&self, area: Rect, sink: &mut ContentSink) {
        if self.placed.is_empty() {
            return;
        }
        let ts = TextStyle { font: self.style.font, font_size: self.style.font_size };
        let lh = line_height_for(&ts, sink.tt_fonts);

        sink.output.extend_from_slice(b"q\nBT\n");

        let color = self.style.text_color.unwrap_or_else(|| Color::rgb(0.0, 0.0, 0.0));
        sink.output.extend_from_slice(
            format!(
                "{} {} {} rg\n",
                crate::document::format_coord(color.r),
                crate::document::format_coord(color.g),
                crate::document::format_coord(color.b),
            )
            .as_bytes(),
        );

        let font_name = pdf_font_name(ts.font, sink.tt_fonts);
        sink.output.extend_from_slice(
            format!("/{} {} Tf\n", font_name, crate::document::format_coord(self.style.font_size))
                .as_bytes(),
        );
        record_font(&ts.font, sink.used);

        let text_x = area.x + self.style.padding;
        let first_line_y = area.y - self.style.padding - self.style.font_size;
        sink.output.extend_from_slice(
            format!(
                "{} {} Td\n",
                crate::document::format_coord(text_x),
                crate::document::format_coord(first_line_y),
            )
            .as_bytes(),
        );

        for (i, line) in self.placed.iter().enumerate() {
            if i > 0 {
                sink.output.extend_from_slice(format!("0 {} Td\n", crate::document::format_coord(-lh)).as_bytes());
            }
            emit_cell_text(line, ts.font, sink.tt_fonts, sink.output);
        }

        sink.output.extend_from_slice(b"ET\nQ\n");
    }

    fn clone_box(&self) -> Box<dyn CellContent> {
        Box::new(self.clone())
    }
}

fn pdf_font_name(font: FontRef, tt_fonts: &[TrueTypeFont]) -> String {
    match font {
        FontRef::Builtin(b) => b.pdf_name().to_string(),
        FontRef::TrueType(id) => tt_fonts[id.0].pdf_name.clone(),
    }
}

fn record_font(font: &FontRef, used: &mut UsedFonts) {
    match font {
        FontRef::Builtin(b) => {
            used.builtin.insert(*b);
        }
        FontRef::TrueType(id) => {
            used.truetype.insert(id.0);
        }
    }
}

fn emit_cell_text(text: &str, font: FontRef, tt_fonts: &mut [TrueTypeFont], output: &mut Vec<u8>) {
    if text.is_empty() {
        return;
    }
    match font {
        FontRef::Builtin(_) => {
            let escaped = escape_pdf_string(text);
            output.extend_from_slice(format!("({}) Tj\n", escaped).as_bytes());
        }
        FontRef::TrueType(id) => {
            let hex = tt_fonts[id.0].encode_text_hex(text);
            output.extend_from_slice(format!("{} Tj\n", hex).as_bytes());
        }
    }
}

fn wrap_text(
    text: &str,
    avail_width: f64,
    style: &TextStyle,
    word_break: WordBreak,
    tt_fonts: &[TrueTypeFont],
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for para in text.split('\n') {
        wrap_paragraph(para.trim(), avail_width, style, word_break, tt_fonts, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(
    text: &str,
    avail_width: f64,
    style: &TextStyle,
    word_break: WordBreak,
    tt_fonts: &[TrueTypeFont],
    out: &mut Vec<String>,
) {
    if text.is_empty() {
        out.push(String::new());
        return;
    }
    let mut current_line = String::new();
    let mut line_width = 0.0_f64;

    for word in text.split_whitespace() {
        let word_w = measure_word(word, style, tt_fonts);
        let space_w = if current_line.is_empty() { 0.0 } else { measure_word(" ", style, tt_fonts) };
        let needed = line_width + space_w + word_w;

        if needed > avail_width && !current_line.is_empty() {
            out.push(current_line.clone());
            current_line = String::new();
            line_width = 0.0;
            place_word_on_line(word, avail_width, style, word_break, tt_fonts, &mut current_line, &mut line_width, out);
        } else if word_w > avail_width && word_break != WordBreak::Normal && current_line.is_empty() {
            place_word_on_line(word, avail_width, style, word_break, tt_fonts, &mut current_line, &mut line_width, out);
        } else {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
            line_width = needed;
        }
    }
    if !current_line.is_empty() {
        out.push(current_line);
    }
}

fn place_word_on_line(
    word: &str,
    avail_width: f64,
    style: &TextStyle,
    word_break: WordBreak,
    tt_fonts: &[TrueTypeFont],
    current_line: &mut String,
    line_width: &mut f64,
    out: &mut Vec<String>,
) {
    let word_w = measure_word(word, style, tt_fonts);

    if word_w <= avail_width || word_break == WordBreak::Normal {
        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
        *line_width += word_w;
        return;
    }

    let pieces = break_word(word, avail_width, style, word_break, tt_fonts);
    let last_idx = pieces.len().saturating_sub(1);
    for (i, piece) in pieces.into_iter().enumerate() {
        if i < last_idx {
            out.push(piece);
        } else {
            *current_line = piece.clone();
            *line_width = measure_word(&piece, style, tt_fonts);
        }
    }
}
