//! Invoice and purchase-order detail views (the printable pages).

use std::sync::Arc;

use serde::Serialize;
use tracing::{info_span, Instrument};

use studio_core::finance::{effective_invoice_status, DocumentTotals};
use studio_core::format::{due_label, format_date, format_money};
use studio_core::ids::{InvoiceId, PurchaseOrderId};
use studio_core::ports::{BackendError, ClockPort, RecordRepositoryPort};
use studio_core::records::{Invoice, InvoiceStatus, PurchaseOrder};

/// A line as printed: amounts already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintedLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: String,
    pub discount_percent: u8,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDetail {
    pub invoice: Invoice,
    pub status: InvoiceStatus,
    pub totals: DocumentTotals,
    pub lines: Vec<PrintedLine>,
    pub issue_date: String,
    pub due: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderDetail {
    pub order: PurchaseOrder,
    pub totals: DocumentTotals,
    pub lines: Vec<PrintedLine>,
    pub order_date: String,
    pub total: String,
}

fn printed_lines(items: &[studio_core::records::LineItem], currency: Option<&str>) -> Vec<PrintedLine> {
    items
        .iter()
        .map(|item| PrintedLine {
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: format_money(item.unit_price, currency),
            discount_percent: item.discount_percent,
            amount: format_money(studio_core::finance::line_total(item), currency),
        })
        .collect()
}

pub struct GetInvoiceDetail {
    invoices: Arc<dyn RecordRepositoryPort<Invoice>>,
    clock: Arc<dyn ClockPort>,
}

impl GetInvoiceDetail {
    pub fn from_ports(
        invoices: Arc<dyn RecordRepositoryPort<Invoice>>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self { invoices, clock }
    }

    pub async fn execute(&self, id: &InvoiceId) -> Result<InvoiceDetail, BackendError> {
        let span = info_span!("usecase.finance.invoice_detail", invoice_id = %id);
        let invoice = self.invoices.get(id).instrument(span).await?;
        let today = self.clock.today();
        let currency = invoice.currency.clone();
        let totals = DocumentTotals::of_invoice(&invoice);
        let status = effective_invoice_status(&invoice, today);
        let due = match status {
            InvoiceStatus::Paid => "Paid".to_string(),
            InvoiceStatus::Void => "Void".to_string(),
            _ => due_label(invoice.due_date, today),
        };
        Ok(InvoiceDetail {
            status,
            lines: printed_lines(&invoice.line_items, currency.as_deref()),
            issue_date: format_date(invoice.issue_date),
            due,
            total: format_money(totals.total, currency.as_deref()),
            totals,
            invoice,
        })
    }
}

pub struct GetPurchaseOrderDetail {
    orders: Arc<dyn RecordRepositoryPort<PurchaseOrder>>,
}

impl GetPurchaseOrderDetail {
    pub fn from_ports(orders: Arc<dyn RecordRepositoryPort<PurchaseOrder>>) -> Self {
        Self { orders }
    }

    pub async fn execute(&self, id: &PurchaseOrderId) -> Result<PurchaseOrderDetail, BackendError> {
        let span = info_span!("usecase.finance.purchase_order_detail", purchase_order_id = %id);
        let order = self.orders.get(id).instrument(span).await?;
        let currency = order.currency.clone();
        let totals = DocumentTotals::of_purchase_order(&order);
        Ok(PurchaseOrderDetail {
            lines: printed_lines(&order.line_items, currency.as_deref()),
            order_date: format_date(order.order_date),
            total: format_money(totals.total, currency.as_deref()),
            totals,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{FixedClock, MemoryRepo};
    use chrono::{NaiveDate, TimeZone, Utc};
    use studio_core::records::{LineItem, PurchaseOrderStatus};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[tokio::test]
    async fn invoice_detail_formats_totals_and_overdue_label() {
        let invoice = Invoice {
            id: InvoiceId::new("inv-1"),
            number: "INV-1001".into(),
            client_name: "Pruitt House".into(),
            project_id: None,
            status: InvoiceStatus::Sent,
            issue_date: date(3, 1),
            due_date: date(3, 8),
            line_items: vec![
                LineItem::new("Design consultation", 4, 17_500),
                LineItem::new("Velvet sofa", 1, 320_000).with_discount(10),
            ],
            tax_rate_bps: 800,
            currency: None,
            paid_at: None,
            notes: None,
        };
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()));
        let use_case = GetInvoiceDetail::from_ports(Arc::new(MemoryRepo::new(vec![invoice])), clock);

        let detail = use_case.execute(&InvoiceId::new("inv-1")).await.unwrap();
        assert_eq!(detail.status, InvoiceStatus::Overdue);
        assert_eq!(detail.due, "Overdue by 2 days");
        assert_eq!(detail.issue_date, "Mar 1, 2025");
        // 70_000 + 288_000 = 358_000; tax 28_640
        assert_eq!(detail.totals.subtotal, 358_000);
        assert_eq!(detail.total, "$3,866.40");
        assert_eq!(detail.lines[1].amount, "$2,880.00");
    }

    #[tokio::test]
    async fn missing_invoice_is_not_found() {
        let use_case = GetInvoiceDetail::from_ports(
            Arc::new(MemoryRepo::<Invoice>::new(vec![])),
            Arc::new(FixedClock(Utc::now())),
        );
        assert_eq!(
            use_case.execute(&InvoiceId::new("nope")).await,
            Err(BackendError::NotFound)
        );
    }

    #[tokio::test]
    async fn purchase_order_detail_shares_line_math() {
        let order = PurchaseOrder {
            id: PurchaseOrderId::new("po-1"),
            number: "PO-77".into(),
            vendor: "Hearth Furniture".into(),
            project_id: None,
            status: PurchaseOrderStatus::Ordered,
            order_date: date(4, 2),
            expected_date: None,
            line_items: vec![LineItem::new("Dining chairs", 6, 42_000)],
            tax_rate_bps: 0,
            currency: Some("EUR".into()),
        };
        let use_case = GetPurchaseOrderDetail::from_ports(Arc::new(MemoryRepo::new(vec![order])));
        let detail = use_case.execute(&PurchaseOrderId::new("po-1")).await.unwrap();
        assert_eq!(detail.total, "€2,520.00");
        assert_eq!(detail.order_date, "Apr 2, 2025");
    }
}
