/// Example: simulated database report rendered as a paginated, bordered
/// table with a header row repeated on every page.
///
/// Demonstrates `TableModel`/`TableRenderer`: column-width resolution,
/// border collapsing, and splitting a table across page boundaries via
/// `PdfDocument::fit_table_renderer`.
///
/// Run with:
///   cargo run --example generate_tables -p pdf-examples
///
/// Opens output at: examples/output/rust-tables.pdf
use pdf_core::{
    BorderSpec, Borders, BuiltinFont, Color, ColumnWidth, FontRef, LayoutOutcome, PdfDocument,
    Rect, TableCell, TableModel, TextCellContent, TextContentStyle,
};

const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 72.0;

const TABLE_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const TABLE_TOP: f64 = PAGE_HEIGHT - MARGIN;
const TABLE_BOTTOM: f64 = MARGIN;
const TABLE_HEIGHT: f64 = TABLE_TOP - TABLE_BOTTOM;

const COLUMNS: usize = 5;

fn grid_border() -> Borders {
    let line = Some(BorderSpec::new(0.5, Color::gray(0.6)));
    Borders { top: line, right: line, bottom: line, left: line }
}

fn header_style() -> TextContentStyle {
    TextContentStyle {
        font: FontRef::Builtin(BuiltinFont::HelveticaBold),
        font_size: 9.0,
        text_color: Some(Color::rgb(1.0, 1.0, 1.0)),
        padding: 5.0,
        ..TextContentStyle::default()
    }
}

fn body_style() -> TextContentStyle {
    TextContentStyle { font_size: 9.0, padding: 5.0, ..TextContentStyle::default() }
}

fn column_widths() -> Vec<ColumnWidth> {
    vec![
        ColumnWidth::Point(40.0),
        ColumnWidth::Point(120.0),
        ColumnWidth::Point(130.0),
        ColumnWidth::Point(90.0),
        ColumnWidth::Point(88.0),
    ]
}

fn header_model() -> TableModel {
    let mut header = TableModel::new(COLUMNS, column_widths());
    let style = header_style();
    for (c, label) in ["ID", "Name", "Department", "Status", "Amount ($)"].iter().enumerate() {
        let mut cell =
            TableCell::new(0, c, Box::new(TextCellContent::new(*label, style.clone())));
        cell.borders = grid_border();
        header.add_cell(cell).expect("header cell");
    }
    header
}

/// Build 160 simulated database rows as raw field strings.
fn db_rows() -> Vec<[String; COLUMNS]> {
    let departments = ["Engineering", "Marketing", "Sales", "HR", "Finance", "Operations"];
    let statuses = ["Active", "Inactive", "Pending", "Suspended", "Active"];
    let names = [
        "Alice Johnson", "Bob Smith", "Carol White", "David Brown", "Emma Davis",
        "Frank Miller", "Grace Wilson", "Henry Moore", "Iris Taylor", "Jack Anderson",
    ];

    (0..160_usize)
        .map(|i| {
            [
                format!("{}", i + 1),
                names[i % names.len()].to_string(),
                departments[i % departments.len()].to_string(),
                statuses[i % statuses.len()].to_string(),
                format!("{:.2}", 1000.0 + (i as f64 * 137.5) % 9000.0),
            ]
        })
        .collect()
}

fn build_model(rows: &[[String; COLUMNS]]) -> TableModel {
    let mut model = TableModel::new(COLUMNS, column_widths());
    model.table_borders = grid_border();
    let style = body_style();
    for (r, row) in rows.iter().enumerate() {
        for (c, field) in row.iter().enumerate() {
            let mut cell =
                TableCell::new(r, c, Box::new(TextCellContent::new(field.clone(), style.clone())));
            cell.borders = grid_border();
            model.add_cell(cell).expect("data cell");
        }
    }
    model.with_header(header_model()).expect("attach header")
}

fn page_rect() -> Rect {
    Rect { x: MARGIN, y: TABLE_TOP, width: TABLE_WIDTH, height: TABLE_HEIGHT }
}

fn main() {
    std::fs::create_dir_all("examples/output").unwrap();
    let path = "examples/output/rust-tables.pdf";
    let mut doc = PdfDocument::create(path).expect("create PDF");
    doc.set_info("Title", "Database Report Example");
    doc.set_info("Creator", "rust-pdf generate_tables example");

    let rows = db_rows();
    let mut renderer = pdf_core::TableRenderer::new(build_model(&rows), 0, true);

    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
    loop {
        match doc.fit_table_renderer(&mut renderer, &page_rect()).expect("fit_table_renderer") {
            LayoutOutcome::Full { .. } => break,
            LayoutOutcome::Partial { continuation, .. } => {
                doc.end_page().expect("end_page");
                doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
                renderer = *continuation;
            }
            LayoutOutcome::Nothing { cause } => {
                eprintln!("Warning: table did not fit: {}", cause);
                break;
            }
        }
    }

    doc.end_page().expect("end_page");
    doc.end_document().expect("end_document");

    println!("Written to {}", path);
}
