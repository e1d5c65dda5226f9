//! Financial records: ZIS income and expenditures.
//!
//! Amounts are rupiah values carried as JSON numbers.

use crate::id::RecordId;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The three categories of charitable giving tracked as income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZisType {
    Zakat,
    Infaq,
    Shodaqoh,
}

impl ZisType {
    pub const ALL: [ZisType; 3] = [ZisType::Zakat, ZisType::Infaq, ZisType::Shodaqoh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zakat => "zakat",
            Self::Infaq => "infaq",
            Self::Shodaqoh => "shodaqoh",
        }
    }
}

impl std::str::FromStr for ZisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zakat" => Ok(Self::Zakat),
            "infaq" | "infak" => Ok(Self::Infaq),
            "shodaqoh" | "sedekah" | "sodaqoh" => Ok(Self::Shodaqoh),
            other => Err(format!("unknown ZIS type: {}", other)),
        }
    }
}

/// True when `date` falls inside the given calendar month.
fn in_month(date: NaiveDate, month: u32, year: i32) -> bool {
    date.month() == month && date.year() == year
}

// =============================================================================
// ZIS income
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZisEntry {
    pub id: RecordId,
    #[serde(default)]
    pub donor_name: Option<String>,
    pub zis_type: ZisType,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ZisEntry {
    pub fn in_period(&self, month: u32, year: i32) -> bool {
        in_month(self.date, month, year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZisEntryDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    pub zis_type: ZisType,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Default for ZisEntryDraft {
    fn default() -> Self {
        Self {
            donor_name: None,
            zis_type: ZisType::Infaq,
            amount: 0.0,
            date: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZisEntryPatch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub donor_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zis_type: Option<ZisType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub notes: Option<Option<String>>,
}

impl From<&ZisEntry> for ZisEntryDraft {
    fn from(r: &ZisEntry) -> Self {
        Self {
            donor_name: r.donor_name.clone(),
            zis_type: r.zis_type,
            amount: r.amount,
            date: Some(r.date),
            notes: r.notes.clone(),
        }
    }
}

impl From<ZisEntryDraft> for ZisEntryPatch {
    fn from(d: ZisEntryDraft) -> Self {
        Self {
            donor_name: Some(d.donor_name),
            zis_type: Some(d.zis_type),
            amount: Some(d.amount),
            date: d.date,
            notes: Some(d.notes),
        }
    }
}

// =============================================================================
// Expenditure
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expenditure {
    pub id: RecordId,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Expenditure {
    pub fn in_period(&self, month: u32, year: i32) -> bool {
        in_month(self.date, month, year)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenditureDraft {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenditurePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub notes: Option<Option<String>>,
}

impl From<&Expenditure> for ExpenditureDraft {
    fn from(r: &Expenditure) -> Self {
        Self {
            description: r.description.clone(),
            category: r.category.clone(),
            amount: r.amount,
            date: Some(r.date),
            notes: r.notes.clone(),
        }
    }
}

impl From<ExpenditureDraft> for ExpenditurePatch {
    fn from(d: ExpenditureDraft) -> Self {
        Self {
            description: Some(d.description),
            category: Some(d.category),
            amount: Some(d.amount),
            date: d.date,
            notes: Some(d.notes),
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Per-type ZIS totals for a period, as returned by `GET /zis/summary`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZisSummary {
    #[serde(default)]
    pub zakat: f64,
    #[serde(default)]
    pub infaq: f64,
    #[serde(default)]
    pub shodaqoh: f64,
    #[serde(default)]
    pub total: f64,
}

impl ZisSummary {
    /// Recompute the totals from a listing of entries.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ZisEntry>) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.zis_type {
                ZisType::Zakat => summary.zakat += entry.amount,
                ZisType::Infaq => summary.infaq += entry.amount,
                ZisType::Shodaqoh => summary.shodaqoh += entry.amount,
            }
            summary.total += entry.amount;
        }
        summary
    }

    pub fn amount_for(&self, zis_type: ZisType) -> f64 {
        match zis_type {
            ZisType::Zakat => self.zakat,
            ZisType::Infaq => self.infaq,
            ZisType::Shodaqoh => self.shodaqoh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, zis_type: ZisType, amount: f64, date: &str) -> ZisEntry {
        ZisEntry {
            id: RecordId::from(id),
            donor_name: None,
            zis_type,
            amount,
            date: date.parse().unwrap(),
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_summary_totals_match_entries() {
        let entries = vec![
            entry("1", ZisType::Zakat, 2_500_000.0, "2025-03-02"),
            entry("2", ZisType::Infaq, 150_000.0, "2025-03-07"),
            entry("3", ZisType::Infaq, 50_000.0, "2025-03-14"),
            entry("4", ZisType::Shodaqoh, 75_000.0, "2025-03-21"),
        ];
        let summary = ZisSummary::from_entries(&entries);
        assert_eq!(summary.zakat, 2_500_000.0);
        assert_eq!(summary.infaq, 200_000.0);
        assert_eq!(summary.shodaqoh, 75_000.0);
        assert_eq!(
            summary.total,
            summary.zakat + summary.infaq + summary.shodaqoh
        );
    }

    #[test]
    fn test_in_period_checks_month_and_year() {
        let e = entry("1", ZisType::Zakat, 10.0, "2025-03-31");
        assert!(e.in_period(3, 2025));
        assert!(!e.in_period(3, 2024));
        assert!(!e.in_period(4, 2025));
    }

    #[test]
    fn test_zis_type_parsing_accepts_common_spellings() {
        assert_eq!("Infak".parse::<ZisType>().unwrap(), ZisType::Infaq);
        assert_eq!("sedekah".parse::<ZisType>().unwrap(), ZisType::Shodaqoh);
        assert!("wakaf".parse::<ZisType>().is_err());
    }
}
