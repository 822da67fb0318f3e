//! PDF rendering for invoices.
//!
//! A single A4 layout: centered header, invoice number and date, bill-to
//! block, item table, right-aligned summary, payment method, footer. Long
//! item lists spill onto continuation pages.
//!
//! Amounts print as `Rs.` rather than the rupee sign; the built-in Helvetica
//! font has no glyph for it.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};
use thiserror::Error;

use skinaura_core::Price;

use super::InvoiceDocument;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_BOTTOM: f32 = 20.0;
const RIGHT_EDGE: f32 = 180.0;
const ROW_STEP: f32 = 7.0;

// Item table column offsets from the left edge, in mm.
const COL_ITEM: f32 = MARGIN_LEFT;
const COL_QTY: f32 = 105.0;
const COL_PRICE: f32 = 130.0;
const COL_TOTAL: f32 = 160.0;

/// Errors from PDF rendering.
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("pdf rendering failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Render the invoice to PDF bytes.
///
/// # Errors
///
/// Returns an error if the PDF library fails to embed a font or serialize
/// the document.
pub fn render(invoice: &InvoiceDocument) -> Result<Vec<u8>, InvoiceError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice INV-{}", invoice.order_id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "invoice",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut cursor = Cursor {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT - 20.0,
    };

    // Header.
    cursor.layer.set_fill_color(ink());
    cursor.centered(&bold, 20.0, "SkinAura");
    cursor.advance(10.0);
    cursor.centered(&bold, 16.0, "INVOICE");
    cursor.advance(10.0);

    cursor.left(&regular, 10.0, &format!("Invoice #: INV-{}", invoice.order_id));
    cursor.advance(5.0);
    cursor.left(&regular, 10.0, &format!("Date: {}", invoice.order_date));
    cursor.advance(10.0);

    // Bill-to block.
    let bill_to = &invoice.bill_to;
    cursor.left(&bold, 12.0, "Bill To:");
    cursor.advance(5.0);
    cursor.left(&regular, 10.0, &bill_to.full_name);
    cursor.advance(5.0);
    cursor.left(&regular, 10.0, &bill_to.address_line1);
    cursor.advance(5.0);
    if let Some(line2) = bill_to
        .address_line2
        .as_deref()
        .filter(|l| !l.trim().is_empty())
    {
        cursor.left(&regular, 10.0, line2);
        cursor.advance(5.0);
    }
    cursor.left(
        &regular,
        10.0,
        &format!("{}, {} - {}", bill_to.city, bill_to.state, bill_to.zip_code),
    );
    cursor.advance(5.0);
    cursor.left(&regular, 10.0, &format!("Phone: {}", bill_to.phone_number));
    cursor.advance(10.0);

    // Item table.
    table_row(&mut cursor, &bold, "Item", "Quantity", "Price", "Total");
    cursor.advance(ROW_STEP);
    for line in &invoice.lines {
        cursor.ensure_room(ROW_STEP);
        table_row(
            &mut cursor,
            &regular,
            &line.name,
            &line.quantity.to_string(),
            &money(line.unit_price),
            &money(line.line_total),
        );
        cursor.advance(ROW_STEP);
    }
    cursor.advance(5.0);

    // Summary, right-hand side.
    cursor.ensure_room(40.0);
    cursor.at(&bold, 10.0, 140.0, "Summary");
    cursor.advance(ROW_STEP);
    summary_row(&mut cursor, &regular, 10.0, "Subtotal:", invoice.subtotal);
    cursor.advance(ROW_STEP);
    summary_row(&mut cursor, &regular, 10.0, "Shipping:", invoice.shipping_cost);
    cursor.advance(10.0);
    summary_row(&mut cursor, &bold, 12.0, "Total:", invoice.total);
    cursor.advance(11.0);

    cursor.left(
        &regular,
        10.0,
        &format!("Payment Method: {}", invoice.payment_method),
    );
    cursor.advance(15.0);

    // Footer.
    cursor.ensure_room(5.0);
    cursor.layer.set_fill_color(muted());
    cursor.centered(&regular, 9.0, "Thank you for shopping with SkinAura!");

    Ok(doc.save_to_bytes()?)
}

fn table_row(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    item: &str,
    qty: &str,
    price: &str,
    total: &str,
) {
    cursor.at(font, 10.0, COL_ITEM, item);
    cursor.at(font, 10.0, COL_QTY, qty);
    cursor.at(font, 10.0, COL_PRICE, price);
    cursor.at(font, 10.0, COL_TOTAL, total);
}

fn summary_row(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    size: f32,
    label: &str,
    amount: Price,
) {
    cursor.at(font, size, 140.0, label);
    cursor.right_aligned(font, size, &money(amount));
}

/// Format for print, `Rs. 1,299.00`.
fn money(price: Price) -> String {
    format!("Rs. {}", price.display().trim_start_matches('₹'))
}

/// Rough glyph width for Helvetica, enough for centering and right-aligning
/// short labels.
#[allow(clippy::cast_precision_loss)]
fn text_width_mm(text: &str, size: f32) -> f32 {
    let pt_to_mm = 0.352_778;
    text.chars().count() as f32 * size * 0.5 * pt_to_mm
}

struct Cursor<'a> {
    doc: &'a printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn left(&self, font: &IndirectFontRef, size: f32, text: &str) {
        self.at(font, size, MARGIN_LEFT, text);
    }

    fn at(&self, font: &IndirectFontRef, size: f32, x: f32, text: &str) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn centered(&self, font: &IndirectFontRef, size: f32, text: &str) {
        let x = (PAGE_WIDTH - text_width_mm(text, size)) / 2.0;
        self.at(font, size, x, text);
    }

    fn right_aligned(&self, font: &IndirectFontRef, size: f32, text: &str) {
        let x = RIGHT_EDGE - text_width_mm(text, size);
        self.at(font, size, x, text);
    }

    fn advance(&mut self, step: f32) {
        self.y -= step;
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed >= MARGIN_BOTTOM {
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "invoice");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.layer.set_fill_color(ink());
        self.y = PAGE_HEIGHT - 20.0;
    }
}

fn ink() -> Color {
    Color::Rgb(Rgb::new(44.0 / 255.0, 62.0 / 255.0, 80.0 / 255.0, None))
}

fn muted() -> Color {
    Color::Rgb(Rgb::new(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::InvoiceLine;
    use crate::models::address::fixtures::valid_address;
    use skinaura_core::PaymentMethod;

    fn document(line_count: usize) -> InvoiceDocument {
        let lines: Vec<InvoiceLine> = (0..line_count)
            .map(|i| InvoiceLine {
                name: format!("Product {i}"),
                quantity: 1,
                unit_price: Price::from_rupees(899),
                line_total: Price::from_rupees(899),
            })
            .collect();
        let subtotal: Price = lines.iter().map(|l| l.line_total).sum();
        InvoiceDocument {
            order_id: "ORD-0042137".to_owned(),
            order_date: "August 23, 2026".to_owned(),
            lines,
            bill_to: valid_address(),
            subtotal,
            shipping_cost: Price::ZERO,
            total: subtotal,
            payment_method: PaymentMethod::Online,
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render(&document(2)).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    /// Page count from the page tree's `/Count` entry.
    fn page_count(bytes: &[u8]) -> usize {
        let text = String::from_utf8_lossy(bytes);
        text.match_indices("/Count ")
            .filter_map(|(i, marker)| {
                text[i + marker.len()..]
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
                    .parse()
                    .ok()
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_render_paginates_long_item_lists() {
        let short = render(&document(2)).expect("render short");
        let long = render(&document(60)).expect("render long");
        assert_eq!(page_count(&short), 1);
        // The table spilled onto continuation pages.
        assert!(page_count(&long) > 1);
    }

    #[test]
    fn test_money_uses_ascii_currency_marker() {
        assert_eq!(money(Price::from_rupees(1299)), "Rs. 1,299.00");
    }
}
