//! Backend API surface.
//!
//! [`MasjidApi`] hands out one typed façade per resource, all sharing the
//! same [`ApiClient`] (and therefore the same session).

pub mod auth;
pub mod upload;

pub use auth::AuthApi;
pub use upload::UploadApi;

use chrono::NaiveDate;
use masjid_records::{
    Agenda, Announcement, Article, ContentSlide, DashboardStats, Expenditure, GalleryItem,
    LayoutSettings, MosqueIdentity, Pengurus, PrayerSettings, PrayerTimes, QrisSettings, Quote,
    RunningText, SheetsConfig, SpecialEvent, SyncResult, User, ZisEntry, ZisSummary,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::client::{ApiClient, ApiError, Navigator, RoutePolicy};
use crate::resources::{PeriodFilter, ResourceClient, SingletonClient};
use crate::session::Session;

/// Entry point to every resource the dashboard manages.
#[derive(Clone, Debug)]
pub struct MasjidApi {
    client: ApiClient,
}

impl MasjidApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn connect(
        origin: &str,
        session: Session,
        navigator: Arc<dyn Navigator>,
        routes: RoutePolicy,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(origin, session, navigator, routes)?))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone())
    }

    pub fn uploads(&self) -> UploadApi {
        UploadApi::new(self.client.clone())
    }

    pub fn prayer_times(&self) -> PrayerTimesApi {
        PrayerTimesApi::new(self.client.clone())
    }

    pub fn sheets(&self) -> SheetsApi {
        SheetsApi::new(self.client.clone())
    }

    pub fn stats(&self) -> StatsApi {
        StatsApi::new(self.client.clone())
    }

    /// Generic façade for any collection resource.
    pub fn resource<R: crate::resources::Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.client.clone())
    }

    pub fn singleton<S: crate::resources::Singleton>(&self) -> SingletonClient<S> {
        SingletonClient::new(self.client.clone())
    }

    // =========================================================================
    // Named shortcuts
    // =========================================================================

    pub fn agenda(&self) -> ResourceClient<Agenda> {
        self.resource()
    }

    pub fn announcements(&self) -> ResourceClient<Announcement> {
        self.resource()
    }

    pub fn articles(&self) -> ResourceClient<Article> {
        self.resource()
    }

    pub fn gallery(&self) -> ResourceClient<GalleryItem> {
        self.resource()
    }

    pub fn pengurus(&self) -> ResourceClient<Pengurus> {
        self.resource()
    }

    pub fn quotes(&self) -> ResourceClient<Quote> {
        self.resource()
    }

    pub fn running_text(&self) -> ResourceClient<RunningText> {
        self.resource()
    }

    pub fn special_events(&self) -> ResourceClient<SpecialEvent> {
        self.resource()
    }

    pub fn content(&self) -> ResourceClient<ContentSlide> {
        self.resource()
    }

    pub fn zis(&self) -> ResourceClient<ZisEntry> {
        self.resource()
    }

    pub fn expenditures(&self) -> ResourceClient<Expenditure> {
        self.resource()
    }

    pub fn users(&self) -> ResourceClient<User> {
        self.resource()
    }

    pub fn identity(&self) -> SingletonClient<MosqueIdentity> {
        self.singleton()
    }

    pub fn prayer_settings(&self) -> SingletonClient<PrayerSettings> {
        self.singleton()
    }

    pub fn layout_settings(&self) -> SingletonClient<LayoutSettings> {
        self.singleton()
    }

    pub fn qris(&self) -> SingletonClient<QrisSettings> {
        self.singleton()
    }
}

/// Computed prayer schedules. Read-only.
#[derive(Clone, Debug)]
pub struct PrayerTimesApi {
    api: ApiClient,
}

#[derive(Serialize)]
struct DateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
}

impl PrayerTimesApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /prayer-times?date=`; the backend picks today when `date` is `None`.
    pub async fn daily(&self, date: Option<NaiveDate>) -> Result<PrayerTimes, ApiError> {
        self.api.get_with("prayer-times", &DateQuery { date }).await
    }

    /// `GET /prayer-times/monthly?month=&year=`
    pub async fn monthly(&self, month: u32, year: i32) -> Result<Vec<PrayerTimes>, ApiError> {
        self.api
            .get_with("prayer-times/monthly", &PeriodFilter::month(month, year))
            .await
    }
}

/// Google Sheets export: configuration plus a sync trigger.
#[derive(Clone, Debug)]
pub struct SheetsApi {
    api: ApiClient,
}

impl SheetsApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn config(&self) -> SingletonClient<SheetsConfig> {
        SingletonClient::new(self.api.clone())
    }

    /// `POST /sheets/sync`; pushes income and expenditure rows to the sheet.
    pub async fn sync(&self) -> Result<SyncResult, ApiError> {
        let result: SyncResult = self.api.post_action("sheets/sync").await?;
        info!(
            income_rows = result.income_rows,
            expenditure_rows = result.expenditure_rows,
            "Google Sheets sync finished"
        );
        Ok(result)
    }
}

/// Dashboard counters and finance summaries.
#[derive(Clone, Debug)]
pub struct StatsApi {
    api: ApiClient,
}

impl StatsApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /stats/dashboard`
    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        self.api.get("stats/dashboard").await
    }

    /// `GET /zis/summary?month=&year=`
    pub async fn zis_summary(&self, filter: &PeriodFilter) -> Result<ZisSummary, ApiError> {
        self.api.get_with("zis/summary", filter).await
    }
}
