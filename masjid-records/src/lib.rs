//! Wire records for the mosque information dashboard.
//!
//! This crate defines the JSON shapes that cross the boundary between:
//! - the dashboard client (`masjid-admin`) - reads and mutates records
//! - the backend REST API - owns and persists every record
//!
//! # Modules
//! - [`id`] - Opaque record identifiers
//! - [`auth`] - Session credential and login/register payloads
//! - [`content`] - Display content records (agenda, announcements, slides, ...)
//! - [`nullable`] - Clearable patch fields
//! - [`finance`] - ZIS income, expenditures and period summaries
//! - [`settings`] - Singleton records (identity, prayer/layout/QRIS settings, Sheets)
//! - [`users`] - Dashboard user accounts

pub mod auth;
pub mod content;
pub mod finance;
pub mod id;
pub mod nullable;
pub mod settings;
pub mod users;

// Re-export commonly used types at crate root
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, Role, UserInfo};
pub use content::{
    Agenda, AgendaDraft, AgendaPatch, Announcement, AnnouncementDraft, AnnouncementPatch, Article,
    ArticleDraft, ArticlePatch, ContentSlide, ContentSlideDraft, ContentSlidePatch, GalleryItem,
    GalleryItemDraft, GalleryItemPatch, Pengurus, PengurusDraft, PengurusPatch, Quote, QuoteDraft,
    QuotePatch, RunningText, RunningTextDraft, RunningTextPatch, SlideKind, SpecialEvent,
    SpecialEventDraft, SpecialEventPatch,
};
pub use finance::{
    Expenditure, ExpenditureDraft, ExpenditurePatch, ZisEntry, ZisEntryDraft, ZisEntryPatch,
    ZisSummary, ZisType,
};
pub use id::RecordId;
pub use settings::{
    DashboardStats, LayoutSettings, MosqueIdentity, PrayerSettings, PrayerTimes, QrisSettings,
    SheetsConfig, SyncResult, UploadedFile,
};
pub use users::{User, UserDraft, UserPatch};
