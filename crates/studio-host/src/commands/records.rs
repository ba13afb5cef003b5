//! List-screen and record mutation commands
//! 列表页与记录增删改命令
//!
//! Reads always resolve to a [`ListView`]: a failed fetch is a `failed` view,
//! not a command error. Mutations return the backend error after the use case
//! has shown its toast.

use serde::Serialize;
use tracing::{info_span, Instrument};

use studio_core::finance::effective_invoice_status;
use studio_core::query::{filter_by_search, ListQuery, ListView, PageRequest};
use studio_core::records::{
    Contact, ContactSortKey, Invoice, InvoiceSortKey, InvoiceStatus, Lead, LeadSortKey, LeadStatus,
    Product, Project, ProjectSortKey, ProjectStatus, PurchaseOrder, PurchaseOrderSortKey,
    PurchaseOrderStatus, TimeEntry, TimeEntrySortKey,
};
use studio_core::storage::ObjectKey;

use super::dto::TimeEntryDto;
use super::CommandError;
use crate::bootstrap::{AppRuntime, RecordTable};

pub async fn list_contacts(
    runtime: &AppRuntime,
    query: ListQuery<ContactSortKey>,
) -> Result<ListView<Contact>, CommandError> {
    let span = info_span!("command.records.list_contacts", search = %query.search);
    async { Ok(runtime.usecases().list_records::<Contact>().execute(&query).await) }
        .instrument(span)
        .await
}

pub async fn list_leads(
    runtime: &AppRuntime,
    query: ListQuery<LeadSortKey, LeadStatus>,
) -> Result<ListView<Lead>, CommandError> {
    let span = info_span!("command.records.list_leads", search = %query.search);
    async {
        let uc = runtime.usecases().list_records::<Lead>();
        Ok(uc.execute_with_status(&query).await)
    }
    .instrument(span)
    .await
}

/// Invoices are filtered on their derived status, so `overdue` matches sent
/// invoices past their due date.
pub async fn list_invoices(
    runtime: &AppRuntime,
    query: ListQuery<InvoiceSortKey, InvoiceStatus>,
) -> Result<ListView<Invoice>, CommandError> {
    let span = info_span!("command.records.list_invoices", search = %query.search);
    async {
        let today = runtime.deps.clock.today();
        let fetched = runtime
            .usecases()
            .list_records::<Invoice>()
            .fetch_all()
            .await
            .map(|invoices| {
                invoices
                    .into_iter()
                    .map(|mut invoice| {
                        invoice.status = effective_invoice_status(&invoice, today);
                        invoice
                    })
                    .collect::<Vec<_>>()
            });
        Ok(query.resolve_with_status(fetched))
    }
    .instrument(span)
    .await
}

pub async fn list_purchase_orders(
    runtime: &AppRuntime,
    query: ListQuery<PurchaseOrderSortKey, PurchaseOrderStatus>,
) -> Result<ListView<PurchaseOrder>, CommandError> {
    let span = info_span!("command.records.list_purchase_orders", search = %query.search);
    async {
        let uc = runtime.usecases().list_records::<PurchaseOrder>();
        Ok(uc.execute_with_status(&query).await)
    }
    .instrument(span)
    .await
}

pub async fn list_projects(
    runtime: &AppRuntime,
    query: ListQuery<ProjectSortKey, ProjectStatus>,
) -> Result<ListView<Project>, CommandError> {
    let span = info_span!("command.records.list_projects", search = %query.search);
    async {
        let uc = runtime.usecases().list_records::<Project>();
        Ok(uc.execute_with_status(&query).await)
    }
    .instrument(span)
    .await
}

pub async fn list_time_entries(
    runtime: &AppRuntime,
    query: ListQuery<TimeEntrySortKey>,
) -> Result<ListView<TimeEntryDto>, CommandError> {
    let span = info_span!("command.records.list_time_entries", search = %query.search);
    async {
        let view = runtime
            .usecases()
            .list_records::<TimeEntry>()
            .execute(&query)
            .await;
        Ok(view.map(TimeEntryDto::from))
    }
    .instrument(span)
    .await
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardDto {
    #[serde(flatten)]
    pub product: Product,
    /// Public URL of the cover image, when it has one.
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductGridDto {
    pub view: ListView<ProductCardDto>,
    pub page: u32,
    pub page_size: u32,
    /// Rows across all server pages, before the search filter.
    pub total: u64,
    pub total_pages: u32,
}

/// The product library grid: one server-side page, searched client-side.
pub async fn list_products(
    runtime: &AppRuntime,
    page: u32,
    search: String,
) -> Result<ProductGridDto, CommandError> {
    let span = info_span!("command.records.list_products", page, search = %search);
    async {
        let request = PageRequest::new(page, runtime.config().product_page_size)?;
        let usecases = runtime.usecases();
        let attachments = usecases.manage_attachments();
        let card = |product: Product| ProductCardDto {
            image_url: product
                .image_path
                .as_deref()
                .and_then(|path| ObjectKey::parse(path).ok())
                .and_then(|key| attachments.public_url(&key).ok()),
            product,
        };

        let (view, total, total_pages) =
            match usecases.list_records::<Product>().fetch_page(request).await {
                Err(err) => (
                    ListView::Failed {
                        message: err.to_string(),
                    },
                    0,
                    0,
                ),
                Ok(fetched) if fetched.items.is_empty() => {
                    (ListView::Empty, fetched.total, fetched.total_pages())
                }
                Ok(fetched) => {
                    let total_pages = fetched.total_pages();
                    let matches = filter_by_search(fetched.items, &search);
                    let view = if matches.is_empty() {
                        ListView::NoMatches {
                            query: search.clone(),
                        }
                    } else {
                        ListView::Ready {
                            total: matches.len() as u64,
                            items: matches,
                        }
                    };
                    (view, fetched.total, total_pages)
                }
            };

        Ok(ProductGridDto {
            view: view.map(card),
            page: request.page(),
            page_size: request.page_size(),
            total,
            total_pages,
        })
    }
    .instrument(span)
    .await
}

pub async fn get_record<R: RecordTable>(
    runtime: &AppRuntime,
    id: R::Id,
) -> Result<R, CommandError> {
    let span = info_span!("command.records.get", table = R::TABLE, id = %id);
    async { Ok(runtime.usecases().list_records::<R>().get(&id).await?) }
        .instrument(span)
        .await
}

pub async fn create_record<R: RecordTable>(
    runtime: &AppRuntime,
    record: R,
) -> Result<R, CommandError> {
    let span = info_span!("command.records.create", table = R::TABLE);
    async { Ok(runtime.usecases().mutate_record::<R>().create(&record).await?) }
        .instrument(span)
        .await
}

pub async fn update_record<R: RecordTable>(
    runtime: &AppRuntime,
    record: R,
) -> Result<R, CommandError> {
    let span = info_span!("command.records.update", table = R::TABLE, id = %record.id());
    async { Ok(runtime.usecases().mutate_record::<R>().update(&record).await?) }
        .instrument(span)
        .await
}

pub async fn delete_record<R: RecordTable>(
    runtime: &AppRuntime,
    id: R::Id,
) -> Result<(), CommandError> {
    let span = info_span!("command.records.delete", table = R::TABLE, id = %id);
    async { Ok(runtime.usecases().mutate_record::<R>().delete(&id).await?) }
        .instrument(span)
        .await
}
