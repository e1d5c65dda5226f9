//! Singleton records and read-only views.
//!
//! Singletons have no id and no create/delete; they are read with `GET` and
//! written back with `PUT`. Fields this crate does not model are kept in
//! `extra` so that a read-modify-write cycle does not drop them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mosque identity: name, address, imagery and geo-coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MosqueIdentity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub elevation: f64,
    /// Hours from UTC (7 for WIB, 8 for WITA, 9 for WIT)
    #[serde(default)]
    pub timezone_offset: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Prayer time calculation and iqamah settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrayerSettings {
    #[serde(default)]
    pub calculation_method: Option<String>,
    #[serde(default)]
    pub asr_method: Option<String>,
    /// Minute corrections per prayer (`fajr`, `dhuhr`, ...)
    #[serde(default)]
    pub adjustments: Map<String, Value>,
    /// Minutes between adhan and iqamah per prayer
    #[serde(default)]
    pub iqamah_minutes: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Display-screen layout settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub show_running_text: Option<bool>,
    #[serde(default)]
    pub show_quotes: Option<bool>,
    #[serde(default)]
    pub slide_interval_seconds: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// QRIS donation code shown on the display. Only the image and metadata are
/// stored; payment processing is out of reach of the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QrisSettings {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub nmid: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Google Sheets export configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub income_sheet: Option<String>,
    #[serde(default)]
    pub expenditure_sheet: Option<String>,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub last_synced_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `POST /sheets/sync`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default)]
    pub income_rows: u64,
    #[serde(default)]
    pub expenditure_rows: u64,
    #[serde(default)]
    pub synced_at: Option<String>,
}

/// Prayer schedule for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub date: NaiveDate,
    #[serde(default)]
    pub imsak: Option<String>,
    pub fajr: String,
    #[serde(default)]
    pub sunrise: Option<String>,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

/// Counters shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub agenda: u64,
    #[serde(default)]
    pub announcements: u64,
    #[serde(default)]
    pub articles: u64,
    #[serde(default)]
    pub gallery: u64,
    #[serde(default)]
    pub zis_total: f64,
    #[serde(default)]
    pub expenditure_total: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_keeps_unmodelled_fields() {
        let json = r#"{
            "name": "Masjid Al-Ikhlas",
            "latitude": -6.2,
            "longitude": 106.8,
            "elevation": 8,
            "timezone_offset": 7,
            "whatsapp": "+62 812 0000 0000"
        }"#;
        let identity: MosqueIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.name, "Masjid Al-Ikhlas");
        assert_eq!(identity.timezone_offset, 7.0);

        let back = serde_json::to_value(&identity).unwrap();
        assert_eq!(back["whatsapp"], "+62 812 0000 0000");
    }

    #[test]
    fn test_prayer_times_parse() {
        let json = r#"{
            "date": "2025-03-01",
            "imsak": "04:27",
            "fajr": "04:37",
            "sunrise": "05:52",
            "dhuhr": "12:03",
            "asr": "15:14",
            "maghrib": "18:11",
            "isha": "19:21"
        }"#;
        let times: PrayerTimes = serde_json::from_str(json).unwrap();
        assert_eq!(times.maghrib, "18:11");
        assert_eq!(times.imsak.as_deref(), Some("04:27"));
    }
}
