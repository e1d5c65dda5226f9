//! Monthly ZIS income against expenditure.

use masjid_records::{ZisEntry, ZisSummary};
use serde::Serialize;
use tracing::debug;

use crate::api::MasjidApi;
use crate::client::ApiError;
use crate::resources::{PeriodFilter, ZisFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceReport {
    pub month: u32,
    pub year: i32,
    pub income: ZisSummary,
    pub expenditure_total: f64,
    pub balance: f64,
}

impl FinanceReport {
    pub fn new(month: u32, year: i32, income: ZisSummary, expenditure_total: f64) -> Self {
        Self {
            month,
            year,
            balance: income.total - expenditure_total,
            income,
            expenditure_total,
        }
    }
}

/// Build the report from the period-filtered lists. Entries outside the
/// period are dropped again in case the backend ignored the filter.
pub async fn monthly_report(
    api: &MasjidApi,
    month: u32,
    year: i32,
) -> Result<FinanceReport, ApiError> {
    let entries: Vec<ZisEntry> = api.zis().list(&ZisFilter::month(month, year)).await?;
    let expenditures = api
        .expenditures()
        .list(&PeriodFilter::month(month, year))
        .await?;

    let income = ZisSummary::from_entries(entries.iter().filter(|e| e.in_period(month, year)));
    let expenditure_total = expenditures
        .iter()
        .filter(|e| e.in_period(month, year))
        .map(|e| e.amount)
        .sum();

    debug!(
        month,
        year,
        entries = entries.len(),
        expenditures = expenditures.len(),
        "Finance report computed"
    );
    Ok(FinanceReport::new(month, year, income, expenditure_total))
}
