//! Invoice and purchase-order arithmetic.
//!
//! All amounts are integer cents. Discounts are whole percents per line, tax is
//! expressed in basis points on the discounted subtotal, and every division
//! rounds half away from zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{Invoice, InvoiceStatus, LineItem, PurchaseOrder};

const PERCENT: i128 = 100;
const BASIS_POINTS: i128 = 10_000;

fn round_div(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

fn clamp_cents(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Quantity times unit price, before discount.
pub fn line_gross(item: &LineItem) -> i64 {
    clamp_cents(i128::from(item.quantity) * i128::from(item.unit_price))
}

/// Discount taken off a single line.
pub fn line_discount(item: &LineItem) -> i64 {
    let percent = i128::from(item.discount_percent.min(100));
    clamp_cents(round_div(i128::from(line_gross(item)) * percent, PERCENT))
}

/// Line amount after its discount.
pub fn line_total(item: &LineItem) -> i64 {
    line_gross(item).saturating_sub(line_discount(item))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of discounted line totals.
    pub subtotal: i64,
    /// Sum of per-line discounts, for display.
    pub discount: i64,
    pub tax: i64,
    pub total: i64,
}

impl DocumentTotals {
    pub fn compute(items: &[LineItem], tax_rate_bps: u32) -> Self {
        let (subtotal, discount) = items.iter().fold((0i64, 0i64), |(sub, disc), item| {
            (
                sub.saturating_add(line_total(item)),
                disc.saturating_add(line_discount(item)),
            )
        });
        let tax = clamp_cents(round_div(
            i128::from(subtotal) * i128::from(tax_rate_bps),
            BASIS_POINTS,
        ));
        Self {
            subtotal,
            discount,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }

    pub fn of_invoice(invoice: &Invoice) -> Self {
        Self::compute(&invoice.line_items, invoice.tax_rate_bps)
    }

    pub fn of_purchase_order(order: &PurchaseOrder) -> Self {
        Self::compute(&order.line_items, order.tax_rate_bps)
    }
}

/// The status an invoice should display on `today`.
///
/// Paid wins over everything; a sent invoice past its due date reads as
/// overdue; otherwise the stored status stands.
pub fn effective_invoice_status(invoice: &Invoice, today: NaiveDate) -> InvoiceStatus {
    if invoice.paid_at.is_some() || invoice.status == InvoiceStatus::Paid {
        return InvoiceStatus::Paid;
    }
    match invoice.status {
        InvoiceStatus::Sent if invoice.due_date < today => InvoiceStatus::Overdue,
        status => status,
    }
}

/// Sum of outstanding (unpaid, non-void) invoice totals.
pub fn outstanding_balance(invoices: &[Invoice], today: NaiveDate) -> i64 {
    invoices
        .iter()
        .filter(|invoice| {
            matches!(
                effective_invoice_status(invoice, today),
                InvoiceStatus::Sent | InvoiceStatus::Overdue
            )
        })
        .map(|invoice| DocumentTotals::of_invoice(invoice).total)
        .fold(0i64, i64::saturating_add)
}
