//! List query parameters.
//!
//! Values are passed through to the backend as-is; unset fields are left out
//! of the query string. Validation is the backend's job.

use masjid_records::ZisType;
use serde::{Deserialize, Serialize};

/// Resources without list filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoFilter {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
}

impl ActiveFilter {
    pub fn active_only() -> Self {
        Self {
            active_only: Some(true),
        }
    }
}

/// Agenda and special events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_only: Option<bool>,
}

/// Month/year filter for expenditures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl PeriodFilter {
    pub fn month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZisFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zis_type: Option<ZisType>,
}

impl ZisFilter {
    pub fn month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            zis_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_query<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn test_unset_filters_are_omitted() {
        assert_eq!(to_query(&EventFilter::default()), serde_json::json!({}));
        assert_eq!(to_query(&NoFilter {}), serde_json::json!({}));
    }

    #[test]
    fn test_filter_parses_from_partial_json() {
        let filter: EventFilter = serde_json::from_str(r#"{"upcoming_only": true}"#).unwrap();
        assert_eq!(filter.upcoming_only, Some(true));
        assert_eq!(filter.active_only, None);
    }

    #[test]
    fn test_zis_filter_fields() {
        let filter = ZisFilter {
            zis_type: Some(ZisType::Zakat),
            ..ZisFilter::month(3, 2025)
        };
        assert_eq!(
            to_query(&filter),
            serde_json::json!({"month": 3, "year": 2025, "zis_type": "zakat"})
        );
    }
}
