/// Example: large PDF report from the Sakila SQLite database.
///
/// Queries rental history and renders it as a multi-page landscape table via
/// `TableModel`/`TableRenderer`. The header row repeats on every page.
///
/// Run with:
///   cargo run --example generate_sakila -p pdf-examples -- /path/to/sakila.db
///
/// Output: examples/output/rust-sakila.pdf
use pdf_core::{
    BorderSpec, Borders, BuiltinFont, Color, ColumnWidth, FontRef, LayoutOutcome, PdfDocument,
    Rect, TableCell, TableModel, TextCellContent, TextContentStyle,
};
use rusqlite::{params, Connection};

const PAGE_WIDTH: f64 = 792.0; // landscape
const PAGE_HEIGHT: f64 = 612.0;
const MARGIN: f64 = 36.0;

const TABLE_X: f64 = MARGIN;
const TABLE_TOP: f64 = PAGE_HEIGHT - MARGIN;
const TABLE_BOTTOM: f64 = MARGIN;
const TABLE_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const TABLE_HEIGHT: f64 = TABLE_TOP - TABLE_BOTTOM;

const COLUMNS: usize = 13;

// Column widths sum to TABLE_WIDTH (720.0):
// ID | Date | Film Title | Year | Rating | Category | Length |
// First Name | Last Name | Email | Address | City | Postal Code
const COL_WIDTHS: [f64; COLUMNS] = [
    30.0, 68.0, 85.0, 32.0, 35.0, 60.0, 38.0, 52.0, 52.0, 100.0, 75.0, 55.0, 38.0,
];

const HEADERS: [&str; COLUMNS] = [
    "ID", "Date", "Film Title", "Year", "Rating", "Category", "Length", "First Name", "Last Name",
    "Email", "Address", "City", "Postal",
];

const SQL: &str = "
    SELECT
        r.rental_id,
        r.rental_date,
        f.title,
        f.release_year,
        f.rating,
        cat.name AS category,
        f.length AS film_length,
        c.first_name,
        c.last_name,
        c.email,
        a.address,
        cty.city,
        a.postal_code
    FROM rental r
    JOIN customer c ON r.customer_id = c.customer_id
    JOIN address a ON c.address_id = a.address_id
    JOIN city cty ON cty.city_id = a.city_id
    JOIN film f ON r.inventory_id = f.film_id
    JOIN film_category fc ON f.film_id = fc.film_id
    JOIN category cat ON fc.category_id = cat.category_id
";

fn grid_border() -> Borders {
    let line = Some(BorderSpec::new(0.5, Color::gray(0.65)));
    Borders { top: line, right: line, bottom: line, left: line }
}

fn column_widths() -> Vec<ColumnWidth> {
    COL_WIDTHS.iter().map(|w| ColumnWidth::Point(*w)).collect()
}

fn header_model() -> TableModel {
    let mut header = TableModel::new(COLUMNS, column_widths());
    let style = TextContentStyle {
        font: FontRef::Builtin(BuiltinFont::HelveticaBold),
        font_size: 7.0,
        text_color: Some(Color::rgb(1.0, 1.0, 1.0)),
        padding: 3.0,
        ..TextContentStyle::default()
    };
    for (c, label) in HEADERS.iter().enumerate() {
        let mut cell =
            TableCell::new(0, c, Box::new(TextCellContent::new(*label, style.clone())));
        cell.borders = grid_border();
        header.add_cell(cell).expect("header cell");
    }
    header
}

fn table_rect() -> Rect {
    Rect { x: TABLE_X, y: TABLE_TOP, width: TABLE_WIDTH, height: TABLE_HEIGHT }
}

fn build_model(rows: &[Vec<String>]) -> TableModel {
    let mut model = TableModel::new(COLUMNS, column_widths());
    model.table_borders = grid_border();
    let style = TextContentStyle { font_size: 7.0, padding: 3.0, ..TextContentStyle::default() };
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

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: generate_sakila <path/to/sakila.db>");
        std::process::exit(1);
    }
    let db_path = &args[1];

    std::fs::create_dir_all("examples/output").unwrap();
    let out_path = "examples/output/rust-sakila.pdf";

    let conn = Connection::open(db_path).expect("open database");
    let mut doc = PdfDocument::create(out_path).expect("create PDF");
    doc.set_info("Title", "Sakila Rental Report");
    doc.set_info("Creator", "rust-pdf generate_sakila example");

    let mut stmt = conn.prepare(SQL).expect("prepare SQL");
    let rows: Vec<Vec<String>> = stmt
        .query_map(params![], |row| {
            Ok((0..COLUMNS)
                .map(|i| {
                    let val: rusqlite::types::Value = row.get(i).unwrap();
                    match val {
                        rusqlite::types::Value::Null => String::new(),
                        rusqlite::types::Value::Integer(n) => n.to_string(),
                        rusqlite::types::Value::Real(f) => f.to_string(),
                        rusqlite::types::Value::Text(s) => s,
                        rusqlite::types::Value::Blob(_) => String::from("[blob]"),
                    }
                })
                .collect::<Vec<String>>())
        })
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("collect rows");

    let total_rows = rows.len();
    let mut renderer = pdf_core::TableRenderer::new(build_model(&rows), 0, true);
    let mut pages = 0usize;

    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
    pages += 1;
    loop {
        match doc.fit_table_renderer(&mut renderer, &table_rect()).expect("fit_table_renderer") {
            LayoutOutcome::Full { .. } => break,
            LayoutOutcome::Partial { continuation, .. } => {
                doc.end_page().expect("end_page");
                doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT);
                pages += 1;
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

    println!("Written to {} ({} pages, {} rows)", out_path, pages, total_rows);
}
