//! # Receipts
//!
//! Renders a submitted order as HTML (input for the external PDF renderer)
//! or as plain text for the terminal.
//!
//! Line totals are recomputed from the frozen price and quantity; the grand
//! total printed is the order's own `Total` so the receipt matches what the
//! backend recorded.

use std::fmt::{self, Write};

use chrono::TimeZone;

use crate::types::{Order, OrderLine};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Escapes text for inclusion in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn line_total_text(line: &OrderLine) -> String {
    line.line_total()
        .map(|total| total.to_decimal_string())
        .unwrap_or_else(|| "-".to_string())
}

fn grand_total_text(order: &Order) -> String {
    match order.total_amount() {
        Some(total) => total.to_decimal_string(),
        None => order.total.as_text().into_owned(),
    }
}

/// Renders a standalone HTML receipt.
///
/// `zone` decides the printed local date and time.
pub fn render_receipt_html<Tz>(order: &Order, store_name: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let created = order.created_at.with_timezone(zone).format(DATE_FORMAT);

    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Receipt {id}</title>\n\
         <style>body{{font-family:sans-serif}}table{{width:100%;border-collapse:collapse}}\
         td,th{{padding:4px;border-bottom:1px solid #ccc;text-align:left}}\
         .num{{text-align:right}}</style>\n</head>\n<body>\n\
         <h1>{store}</h1>\n<p>Order {id}<br>{created}</p>\n\
         <table>\n<tr><th>Product</th><th class=\"num\">Qty</th>\
         <th class=\"num\">Price</th><th class=\"num\">Amount</th></tr>\n",
        id = escape_html(&order.id),
        store = escape_html(store_name),
        created = created,
    );

    for line in &order.products {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td></tr>",
            escape_html(&line.product_name),
            line.quantity,
            escape_html(&line.price.as_text()),
            line_total_text(line),
        );
    }

    let _ = write!(
        html,
        "</table>\n<h2>Total: ${}</h2>\n</body>\n</html>\n",
        escape_html(&grand_total_text(order)),
    );
    html
}

/// Renders a fixed-width text receipt.
pub fn render_receipt_text<Tz>(order: &Order, store_name: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let created = order.created_at.with_timezone(zone).format(DATE_FORMAT);

    let mut text = String::new();
    let _ = writeln!(text, "{store_name}");
    let _ = writeln!(text, "Order {}  {}", order.id, created);
    let _ = writeln!(text, "{}", "-".repeat(40));
    for line in &order.products {
        let _ = writeln!(
            text,
            "{:<22} {:>3} x {:>6} {:>6}",
            line.product_name,
            line.quantity,
            line.price.as_text(),
            line_total_text(line),
        );
    }
    let _ = writeln!(text, "{}", "-".repeat(40));
    let _ = writeln!(text, "Total: ${}", grand_total_text(order));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DecimalText;
    use chrono::Utc;

    fn sample_order() -> Order {
        Order {
            id: "42".to_string(),
            created_at: "2026-10-18T14:30:00Z".parse().unwrap(),
            products: vec![
                OrderLine {
                    product_id: "1".into(),
                    product_name: "Bánh mì <special>".into(),
                    price: DecimalText::Text("2.50".into()),
                    quantity: 2,
                },
                OrderLine {
                    product_id: "2".into(),
                    product_name: "Tea".into(),
                    price: DecimalText::Text("oops".into()),
                    quantity: 1,
                },
            ],
            total: DecimalText::Text("5.00".into()),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_html_receipt() {
        let html = render_receipt_html(&sample_order(), "Corner Café", &Utc);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Corner Café</h1>"));
        assert!(html.contains("2026-10-18 14:30"));
        assert!(html.contains("Bánh mì &lt;special&gt;"));
        assert!(html.contains("<td class=\"num\">5.00</td>"));
        assert!(html.contains("<td class=\"num\">-</td>"));
        assert!(html.contains("Total: $5.00"));
    }

    #[test]
    fn test_text_receipt_uses_zone() {
        let zone = chrono::FixedOffset::east_opt(7 * 3600).unwrap();
        let text = render_receipt_text(&sample_order(), "Corner Café", &zone);

        assert!(text.starts_with("Corner Café\n"));
        assert!(text.contains("Order 42  2026-10-18 21:30"));
        assert!(text.ends_with("Total: $5.00\n"));
    }
}
