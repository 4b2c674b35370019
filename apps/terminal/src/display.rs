//! # Text Rendering
//!
//! Turns command results into what the cashier reads on screen.

use std::fmt::Write;

use chrono::Local;
use tally_core::{ChartSeries, OrderSummary, StatsSummary};

use crate::commands::auth::SessionDto;
use crate::commands::history::OrderRecordDto;
use crate::commands::order::{CheckoutResult, OrderView};
use crate::commands::product::ProductDto;
use crate::commands::receipt::ReceiptOutput;

const BAR_WIDTH: i64 = 30;

pub fn products(products: &[ProductDto]) -> String {
    if products.is_empty() {
        return "No products available. Try `products` again to refresh.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<28} {:>10}", "ID", "PRODUCT", "PRICE");
    for product in products {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:>10}",
            product.id,
            truncate(&product.name, 28),
            format!("${}", product.price)
        );
    }
    out
}

/// Product detail view.
pub fn product(product: &ProductDto) -> String {
    let image = if product.image.is_empty() {
        "-"
    } else {
        product.image.as_str()
    };
    format!(
        "{}\n  ID:    {}\n  Price: ${}\n  Image: {}\n",
        product.name, product.id, product.price, image
    )
}

pub fn order(view: &OrderView) -> String {
    if view.items.is_empty() {
        return "Order is empty.\n".to_string();
    }

    let mut out = String::new();
    for item in &view.items {
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:>3} x {:>8} = {:>9}",
            item.product_id,
            truncate(&item.name, 24),
            item.quantity,
            item.unit_price,
            item.line_total
        );
    }
    let _ = writeln!(
        out,
        "{} products, {} units, total ${}",
        view.item_count, view.total_quantity, view.total
    );
    out
}

/// One-line status shown after the order changes.
pub fn order_status(summary: &OrderSummary) -> String {
    format!(
        "[order] {} products, {} units, total {}\n",
        summary.item_count, summary.total_quantity, summary.total
    )
}

pub fn checkout(result: &CheckoutResult) -> String {
    format!(
        "Order {} submitted, total ${}.\n",
        result.order_id, result.total
    )
}

pub fn history(records: &[OrderRecordDto]) -> String {
    if records.is_empty() {
        return "No orders yet.\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let total = if record.total.is_empty() {
            "-".to_string()
        } else {
            format!("${}", record.total)
        };
        let _ = writeln!(
            out,
            "{:<38} {}  {:>3} lines  {:>10}",
            record.id,
            record.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            record.item_count,
            total
        );
    }
    out
}

pub fn stats(summary: &StatsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Orders today:  {}", summary.orders_today);
    let _ = writeln!(out, "Revenue today: {}", summary.revenue_today);
    let _ = writeln!(out, "\nDaily revenue");
    out.push_str(&chart(&summary.daily));
    let _ = writeln!(out, "\nHourly revenue (today)");
    out.push_str(&chart(&summary.hourly));
    out
}

/// Horizontal bar chart, bars scaled to the largest value.
fn chart(series: &ChartSeries) -> String {
    let max = series.max_value().value();
    let mut out = String::new();
    for (label, value) in series.points() {
        let width = if max > 0 {
            (value.value().max(0) * BAR_WIDTH / max) as usize
        } else {
            0
        };
        let _ = writeln!(out, "{label:>10} | {:<30} {value}", "█".repeat(width));
    }
    out
}

pub fn session(session: Option<&SessionDto>) -> String {
    match session {
        Some(s) => format!(
            "Logged in as {} ({}) at {:.5}, {:.5}; {} logins recorded.\n",
            s.name, s.username, s.latitude, s.longitude, s.login_count
        ),
        None => "Not logged in.\n".to_string(),
    }
}

pub fn receipt(output: &ReceiptOutput) -> String {
    match output {
        ReceiptOutput::Written { path } => format!("Receipt written to {}\n", path.display()),
        ReceiptOutput::Text { body } => body.clone(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
