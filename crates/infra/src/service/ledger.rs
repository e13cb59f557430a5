//! Finance ledger, bulk import and the dashboard summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use lodgex_activity::{AuditAction, Level};
use lodgex_bookings::{Booking, BookingStatus, Channel};
use lodgex_core::{DomainError, FinanceRecordId, Money};
use lodgex_finance::{FinanceRecord, LedgerTotals, NewFinanceRecord};
use lodgex_tasks::TaskStatus;

use super::CrmService;
use crate::error::ServiceResult;
use crate::remote::Collection;

/// Records to import as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub finance: Vec<FinanceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub bookings: usize,
    pub finance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub net_income: Money,
    /// Confirmed and pending bookings.
    pub active_bookings: usize,
    /// Percent, rounded.
    pub occupancy_rate: u32,
    pub open_tasks: usize,
    pub tasks_by_status: BTreeMap<&'static str, usize>,
    pub bookings_by_channel: BTreeMap<&'static str, usize>,
}

impl CrmService {
    pub fn list_finance(&self) -> ServiceResult<Vec<FinanceRecord>> {
        Ok(self.store.finance().list()?)
    }

    #[instrument(skip(self, input), fields(kind = ?input.kind), err)]
    pub async fn create_finance_record(&self, actor: &str, input: NewFinanceRecord) -> ServiceResult<FinanceRecord> {
        let record = FinanceRecord::record(FinanceRecordId::new(), input, Self::today())?;
        self.store.finance().upsert(record.clone())?;
        self.mirror(Collection::Finance, &record).await;

        self.audit(
            actor,
            AuditAction::Create,
            "Finance",
            format!("Added {:?} record: {}", record.kind, record.description),
        )
        .await?;
        Ok(record)
    }

    #[instrument(skip(self), fields(record_id = %id), err)]
    pub async fn delete_finance_record(&self, actor: &str, id: FinanceRecordId) -> ServiceResult<()> {
        self.store
            .finance()
            .remove(id)?
            .ok_or_else(|| DomainError::not_found(format!("finance record {id}")))?;
        self.mirror_delete(Collection::Finance, id).await;

        self.audit(actor, AuditAction::Delete, "Finance", format!("Deleted finance record {id}"))
            .await?;
        Ok(())
    }

    /// Write each record as given, without creation side effects. Bookings still pass
    /// the id and availability guards; the first refused record stops the import and
    /// leaves earlier records in place.
    #[instrument(
        skip(self, batch),
        fields(bookings = batch.bookings.len(), finance = batch.finance.len()),
        err
    )]
    pub async fn import(&self, actor: &str, batch: ImportBatch) -> ServiceResult<ImportSummary> {
        let summary = ImportSummary {
            bookings: batch.bookings.len(),
            finance: batch.finance.len(),
        };

        for booking in batch.bookings {
            self.import_booking(booking).await?;
        }
        for record in batch.finance {
            self.store.finance().upsert(record.clone())?;
            self.mirror(Collection::Finance, &record).await;
        }

        if summary.bookings > 0 {
            self.audit(
                actor,
                AuditAction::Create,
                "Booking",
                format!("Bulk imported {} bookings", summary.bookings),
            )
            .await?;
        }
        if summary.finance > 0 {
            self.audit(
                actor,
                AuditAction::Create,
                "Finance",
                format!("Bulk imported {} finance records", summary.finance),
            )
            .await?;
        }
        self.notify(
            "Import Successful",
            format!(
                "Imported {} bookings and {} finance records.",
                summary.bookings, summary.finance
            ),
            Level::Success,
        )
        .await?;
        info!("import finished");
        Ok(summary)
    }

    pub fn dashboard(&self) -> ServiceResult<DashboardSummary> {
        let totals = LedgerTotals::of(&self.store.finance().list()?);
        let bookings = self.store.bookings().list()?;
        let tasks = self.store.tasks().list()?;
        let property_count = self.store.properties().list()?.len();

        let active_bookings = bookings
            .iter()
            .filter(|b| matches!(b.status, BookingStatus::Confirmed | BookingStatus::Pending))
            .count();
        let occupancy_rate = occupancy(active_bookings, property_count);

        let tasks_by_status = TaskStatus::ALL
            .into_iter()
            .map(|s| (s.as_str(), tasks.iter().filter(|t| t.status == s).count()))
            .collect();
        let bookings_by_channel = Channel::ALL
            .into_iter()
            .map(|c| (c.as_str(), bookings.iter().filter(|b| b.channel == c).count()))
            .collect();

        Ok(DashboardSummary {
            total_revenue: totals.revenue,
            total_expenses: totals.expenses,
            net_income: totals.net,
            active_bookings,
            occupancy_rate,
            open_tasks: tasks.iter().filter(|t| t.is_open()).count(),
            tasks_by_status,
            bookings_by_channel,
        })
    }
}

/// Active bookings per property as a percent. Not clamped: several bookings on one
/// property can push it past 100.
fn occupancy(active: usize, properties: usize) -> u32 {
    ((active as f64 / properties.max(1) as f64) * 100.0).round() as u32
}
