//! Invoice and purchase order detail commands
//! 发票与采购单详情命令

use tracing::{info_span, Instrument};

use studio_app::usecases::{InvoiceDetail, PurchaseOrderDetail};
use studio_core::ids::{InvoiceId, PurchaseOrderId};

use super::CommandError;
use crate::bootstrap::AppRuntime;

pub async fn get_invoice_detail(
    runtime: &AppRuntime,
    id: InvoiceId,
) -> Result<InvoiceDetail, CommandError> {
    let span = info_span!("command.finance.invoice_detail", id = %id);
    async { Ok(runtime.usecases().get_invoice_detail().execute(&id).await?) }
        .instrument(span)
        .await
}

pub async fn get_purchase_order_detail(
    runtime: &AppRuntime,
    id: PurchaseOrderId,
) -> Result<PurchaseOrderDetail, CommandError> {
    let span = info_span!("command.finance.purchase_order_detail", id = %id);
    async { Ok(runtime.usecases().get_purchase_order_detail().execute(&id).await?) }
        .instrument(span)
        .await
}
