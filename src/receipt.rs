//! Receipt
//!
//! Renders a placed [`Order`] as a bordered item table followed by the
//! summary block: subtotal, shipping, tax, the discount when a promo code
//! was applied, and the total. Product names are looked up in the catalog;
//! a line whose product has since been removed falls back to its
//! snapshotted product id.

use std::{fmt::Write, io};

use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartError, LineItem},
    catalog::Catalog,
    orders::Order,
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error totalling a cart line.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the order receipt to the given sink.
///
/// # Errors
///
/// Returns an error if a line cannot be totalled or the sink fails.
pub fn write_receipt(
    mut out: impl io::Write,
    order: &Order<'_>,
    catalog: &Catalog<'_>,
) -> Result<(), ReceiptError> {
    writeln!(out, "\nOrder {} ({})", order.id(), order.status()).map_err(|_err| ReceiptError::IO)?;

    let mut builder = Builder::default();
    let mut color_ops: SmallVec<[(usize, usize, Color); 16]> = smallvec![];

    builder.push_record(["", "Item", "Options", "Qty", "Unit Price", "Total"]);

    for (line_idx, line) in order.lines().iter().enumerate() {
        let name = catalog
            .get(line.product())
            .map_or_else(|| line.product_id().to_string(), |product| product.name.clone());

        let row = line_idx + 1;

        builder.push_record([
            format!("#{row:<3}"),
            name,
            options_display(line),
            line.quantity().to_string(),
            format!("{}", line.unit_price()),
            format!("{}", line.line_total()?),
        ]);

        color_ops.push((row, 2, color_dark_grey()));
    }

    write_receipt_table(&mut out, builder, color_ops)?;

    write_receipt_summary(&mut out, order)?;

    Ok(())
}

/// Renders the order receipt to a string.
///
/// # Errors
///
/// Returns an error if a line cannot be totalled.
pub fn render(order: &Order<'_>, catalog: &Catalog<'_>) -> Result<String, ReceiptError> {
    let mut out = Vec::new();

    write_receipt(&mut out, order, catalog)?;

    String::from_utf8(out).map_err(|_err| ReceiptError::IO)
}

fn options_display(line: &LineItem<'_>) -> String {
    let mut parts: SmallVec<[String; 2]> = smallvec![];

    if let Some(size) = line.size() {
        parts.push(format!("Size {size}"));
    }

    if let Some(color) = line.color() {
        parts.push(color.to_string());
    }

    parts.join(" / ")
}

fn write_receipt_table(
    out: &mut impl io::Write,
    builder: Builder,
    color_ops: SmallVec<[(usize, usize, Color); 16]>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(out: &mut impl io::Write, order: &Order<'_>) -> Result<(), ReceiptError> {
    let summary = order.summary();

    let subtotal_label = " Subtotal:";
    let shipping_label = " Shipping:";
    let tax_label = " Tax:";
    let discount_label = " Discount:";
    let total_label = " \x1b[1mTotal:\x1b[0m";

    let subtotal_val = format!("{}  ", summary.subtotal());

    let shipping_val = if summary.has_free_shipping() {
        "\x1b[32mFREE\x1b[0m  ".to_string()
    } else {
        format!("{}  ", summary.shipping())
    };

    let tax_val = format!("{}  ", summary.tax());

    let discount_val = summary.promo().is_applied().then(|| {
        let code = summary.promo().code().unwrap_or_default();

        format!("\x1b[32m-{} ({code})\x1b[0m  ", summary.discount())
    });

    let total_val = format!("{}  ", summary.total());

    let label_width = visible_width(subtotal_label)
        .max(visible_width(shipping_label))
        .max(visible_width(tax_label))
        .max(visible_width(discount_label))
        .max(visible_width(total_label));

    let value_width = visible_width(&subtotal_val)
        .max(visible_width(&shipping_val))
        .max(visible_width(&tax_val))
        .max(discount_val.as_deref().map_or(0, visible_width))
        .max(visible_width(&total_val));

    write_summary_line(out, subtotal_label, &subtotal_val, label_width, value_width)?;
    write_summary_line(out, shipping_label, &shipping_val, label_width, value_width)?;
    write_summary_line(out, tax_label, &tax_val, label_width, value_width)?;

    if let Some(discount_val) = discount_val {
        write_summary_line(out, discount_label, &discount_val, label_width, value_width)?;
    }

    write_summary_line(
        out,
        total_label,
        &format!("\x1b[1m{total_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
///
/// Box-drawing characters occupy the Unicode range U+2500..U+257F. This
/// function scans each character, grouping consecutive border characters and
/// emitting a single grey escape sequence around each run, leaving cell
/// content untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_vis = visible_width(label);
    let value_vis = visible_width(value);

    // 2 chars of spacing between label and value column.
    let label_pad = label_col_width.saturating_sub(label_vis);
    let value_pad = value_col_width.saturating_sub(value_vis);

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
