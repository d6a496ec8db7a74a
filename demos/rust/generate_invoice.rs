/// Invoice example — single-page invoice layout.
///
/// Demonstrates the primary library use case: a document combining styled
/// text with a bordered line-items table built on `TableModel`/`TableRenderer`.
///
/// Run with:
///   cargo run --example generate_invoice -p pdf-examples
///
/// Opens output at: examples/output/rust-invoice.pdf
use pdf_core::{
    BorderSpec, Borders, BuiltinFont, Color, ColumnWidth, FontRef, LayoutOutcome, PdfDocument,
    Rect, TableCell, TableModel, TextCellContent, TextContentStyle, TextStyle,
};

const PAGE_W: f64 = 612.0;
const PAGE_H: f64 = 792.0;
const MARGIN: f64 = 72.0;

fn bold(sz: f64) -> TextStyle {
    TextStyle { font: FontRef::Builtin(BuiltinFont::HelveticaBold), font_size: sz }
}

fn regular(sz: f64) -> TextStyle {
    TextStyle { font: FontRef::Builtin(BuiltinFont::Helvetica), font_size: sz }
}

/// Format a monetary value with thousands separator: 9600.00 -> "$9,600.00"
fn fmt_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u64;
    let dollars = cents / 100;
    let cents_part = cents % 100;

    let s = dollars.to_string();
    let with_commas = s
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join(",");

    format!("${}.{:02}", with_commas, cents_part)
}

struct LineItem {
    description: &'static str,
    qty: u32,
    unit_price: f64,
}

impl LineItem {
    fn total(&self) -> f64 {
        self.qty as f64 * self.unit_price
    }
}

const ITEMS: &[LineItem] = &[
    LineItem { description: "Web Development Services", qty: 40, unit_price: 150.00 },
    LineItem { description: "UI/UX Design", qty: 20, unit_price: 125.00 },
    LineItem { description: "Server Setup & Configuration", qty: 1, unit_price: 500.00 },
    LineItem { description: "Monthly Maintenance", qty: 3, unit_price: 200.00 },
    LineItem { description: "Brand Identity & Style Guide", qty: 1, unit_price: 2_500.00 },
    LineItem { description: "SEO Optimization Package", qty: 1, unit_price: 800.00 },
    LineItem { description: "CMS Training Sessions", qty: 4, unit_price: 150.00 },
    LineItem { description: "Cloud Infrastructure Setup", qty: 1, unit_price: 1_200.00 },
    LineItem { description: "Security Audit", qty: 1, unit_price: 1_500.00 },
    LineItem { description: "Mobile App Development", qty: 80, unit_price: 150.00 },
    LineItem { description: "Annual Support Contract", qty: 1, unit_price: 3_600.00 },
];

fn draw_letterhead<W: std::io::Write>(doc: &mut PdfDocument<W>) {
    doc.place_text_styled("NovaPeak Solutions", MARGIN, 765.0, &bold(14.0));
    doc.place_text_styled("456 Innovation Drive, Suite 200", MARGIN, 751.0, &regular(9.0));
    doc.place_text_styled("San Francisco, CA 94102", MARGIN, 740.0, &regular(9.0));
    doc.place_text_styled("info@novapeak.io | (415) 555-9200", MARGIN, 729.0, &regular(9.0));

    doc.place_text_styled("INVOICE", 420.0, 765.0, &bold(22.0));
    doc.place_text_styled("Invoice #: INV-2024-0042", 420.0, 748.0, &regular(9.0));
    doc.place_text_styled("Date: January 15, 2024", 420.0, 736.0, &regular(9.0));
    doc.place_text_styled("Due Date: February 15, 2024", 420.0, 724.0, &regular(9.0));
}

fn draw_bill_to<W: std::io::Write>(doc: &mut PdfDocument<W>) {
    doc.place_text_styled("BILL TO", MARGIN, 700.0, &bold(8.0));
    doc.place_text_styled("Acme Corporation", MARGIN, 688.0, &bold(11.0));
    doc.place_text_styled("123 Business Ave", MARGIN, 676.0, &regular(9.0));
    doc.place_text_styled("New York, NY 10001", MARGIN, 665.0, &regular(9.0));
    doc.place_text_styled("accounts@acme.com", MARGIN, 654.0, &regular(9.0));
}

fn grid_border() -> Borders {
    let line = Some(BorderSpec::new(0.5, Color::gray(0.7)));
    Borders { top: line, right: line, bottom: line, left: line }
}

/// Description | Qty | Unit Price | Total (sum = 468pt)
fn line_item_widths() -> Vec<ColumnWidth> {
    vec![
        ColumnWidth::Point(250.0),
        ColumnWidth::Point(50.0),
        ColumnWidth::Point(90.0),
        ColumnWidth::Point(78.0),
    ]
}

fn line_items_model() -> TableModel {
    let header_style = TextContentStyle {
        font: FontRef::Builtin(BuiltinFont::HelveticaBold),
        font_size: 9.0,
        padding: 5.0,
        ..TextContentStyle::default()
    };
    let mut header = TableModel::new(4, line_item_widths());
    for (c, label) in ["DESCRIPTION", "QTY", "UNIT PRICE", "TOTAL"].iter().enumerate() {
        let mut cell =
            TableCell::new(0, c, Box::new(TextCellContent::new(*label, header_style.clone())));
        cell.borders = grid_border();
        header.add_cell(cell).expect("header cell");
    }

    let body_style = TextContentStyle { font_size: 9.0, padding: 5.0, ..TextContentStyle::default() };
    let mut model = TableModel::new(4, line_item_widths());
    model.table_borders = grid_border();
    for (r, item) in ITEMS.iter().enumerate() {
        let fields = [
            item.description.to_string(),
            item.qty.to_string(),
            fmt_money(item.unit_price),
            fmt_money(item.total()),
        ];
        for (c, field) in fields.into_iter().enumerate() {
            let mut cell =
                TableCell::new(r, c, Box::new(TextCellContent::new(field, body_style.clone())));
            cell.borders = grid_border();
            model.add_cell(cell).expect("item cell");
        }
    }
    model.with_header(header).expect("attach header")
}

/// Borderless 2-column totals table aligned under the line items' TOTAL column.
fn totals_model(subtotal: f64, tax: f64, total: f64) -> TableModel {
    let label_style = TextContentStyle { font_size: 9.0, padding: 4.0, ..TextContentStyle::default() };
    let bold_style = TextContentStyle {
        font: FontRef::Builtin(BuiltinFont::HelveticaBold),
        font_size: 9.0,
        padding: 4.0,
        ..TextContentStyle::default()
    };

    let widths = vec![ColumnWidth::Point(100.0), ColumnWidth::Point(78.0)];
    let mut model = TableModel::new(2, widths);

    let rows: [(&str, String, bool); 3] = [
        ("Subtotal:", fmt_money(subtotal), false),
        ("Tax (8%):", fmt_money(tax), false),
        ("TOTAL:", fmt_money(total), true),
    ];
    for (r, (label, amount, emphasize)) in rows.into_iter().enumerate() {
        let style = if emphasize { bold_style.clone() } else { label_style.clone() };
        model
            .add_cell(TableCell::new(r, 0, Box::new(TextCellContent::new(label, style.clone()))))
            .expect("label cell");
        model
            .add_cell(TableCell::new(r, 1, Box::new(TextCellContent::new(amount, style))))
            .expect("amount cell");
    }
    model
}

fn run_table<W: std::io::Write>(doc: &mut PdfDocument<W>, model: TableModel, rect: Rect) -> f64 {
    let mut renderer = pdf_core::TableRenderer::new(model, 0, true);
    match doc.fit_table_renderer(&mut renderer, &rect).expect("fit_table_renderer") {
        LayoutOutcome::Full { occupied_area } => occupied_area.y - occupied_area.height,
        LayoutOutcome::Partial { occupied_area, .. } => {
            eprintln!("Warning: invoice table split across a page boundary");
            occupied_area.y - occupied_area.height
        }
        LayoutOutcome::Nothing { cause } => {
            eprintln!("Warning: table did not fit: {}", cause);
            rect.y
        }
    }
}

fn draw_footer<W: std::io::Write>(doc: &mut PdfDocument<W>) {
    doc.place_text_styled(
        "Payment Terms: Net 30 | Please make checks payable to NovaPeak Solutions",
        MARGIN, 94.0, &regular(8.0),
    );
    doc.place_text_styled("Thank you for your business!", MARGIN, 80.0, &regular(9.0));
}

fn main() {
    std::fs::create_dir_all("examples/output").unwrap();
    let path = "examples/output/rust-invoice.pdf";
    let mut doc = PdfDocument::create(path).expect("create PDF");
    doc.set_info("Title", "Invoice INV-2024-0042");
    doc.set_info("Creator", "NovaPeak Solutions invoice example");

    doc.begin_page(PAGE_W, PAGE_H);
    draw_letterhead(&mut doc);
    draw_bill_to(&mut doc);

    let items_rect = Rect { x: MARGIN, y: 638.0, width: 468.0, height: 420.0 };
    let table_bottom = run_table(&mut doc, line_items_model(), items_rect);

    let subtotal: f64 = ITEMS.iter().map(|i| i.total()).sum();
    let tax = subtotal * 0.08;
    let total = subtotal + tax;
    let totals_rect = Rect { x: 362.0, y: table_bottom - 10.0, width: 178.0, height: 80.0 };
    run_table(&mut doc, totals_model(subtotal, tax, total), totals_rect);

    draw_footer(&mut doc);
    doc.end_page().expect("end_page");
    doc.end_document().expect("end_document");

    println!("Written to {}", path);
}
