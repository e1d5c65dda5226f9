//! Resource bindings: path, bodies, filters and required fields per record type.

use masjid_records::{
    Agenda, AgendaDraft, AgendaPatch, Announcement, AnnouncementDraft, AnnouncementPatch, Article,
    ArticleDraft, ArticlePatch, ContentSlide, ContentSlideDraft, ContentSlidePatch, Expenditure,
    ExpenditureDraft, ExpenditurePatch, GalleryItem, GalleryItemDraft, GalleryItemPatch,
    LayoutSettings, MosqueIdentity, Pengurus, PengurusDraft, PengurusPatch, PrayerSettings,
    QrisSettings, Quote, QuoteDraft, QuotePatch, RecordId, RunningText, RunningTextDraft,
    RunningTextPatch, SheetsConfig, SlideKind, SpecialEvent, SpecialEventDraft, SpecialEventPatch,
    User, UserDraft, UserPatch, ZisEntry, ZisEntryDraft, ZisEntryPatch,
};

use super::filters::{ActiveFilter, ArticleFilter, EventFilter, NoFilter, PeriodFilter, ZisFilter};
use super::{Resource, Singleton, Toggle, Validate};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn blank_opt(value: &Option<String>) -> bool {
    value.as_deref().map(blank).unwrap_or(true)
}

/// Money must be a finite amount above zero; NaN fails every comparison.
fn not_positive(amount: f64) -> bool {
    !amount.is_finite() || amount <= 0.0
}

/// Collect the names whose check is true.
fn missing(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| *name)
        .collect()
}

/// Implements `Resource` + `Toggle` for records whose toggle flag is `is_active`.
macro_rules! active_resource {
    ($record:ty, $draft:ty, $patch:ty, $filter:ty, $path:literal, $label:literal) => {
        impl Resource for $record {
            const PATH: &'static str = $path;
            const LABEL: &'static str = $label;
            type Draft = $draft;
            type Patch = $patch;
            type Filter = $filter;

            fn id(&self) -> &RecordId {
                &self.id
            }
        }

        impl Toggle for $record {
            fn is_active(&self) -> bool {
                self.is_active
            }

            fn active_patch(active: bool) -> $patch {
                <$patch>::from_active(active)
            }
        }
    };
}

/// `{is_active: <flag>}` and nothing else.
trait ActivePatch: Default {
    fn from_active(active: bool) -> Self;
}

macro_rules! active_patch {
    ($($patch:ty),* $(,)?) => {
        $(
            impl ActivePatch for $patch {
                fn from_active(active: bool) -> Self {
                    Self {
                        is_active: Some(active),
                        ..Default::default()
                    }
                }
            }
        )*
    };
}

active_patch!(
    AgendaPatch,
    AnnouncementPatch,
    GalleryItemPatch,
    PengurusPatch,
    QuotePatch,
    RunningTextPatch,
    SpecialEventPatch,
    ContentSlidePatch,
    UserPatch,
);

active_resource!(Agenda, AgendaDraft, AgendaPatch, EventFilter, "agenda", "Agenda");
active_resource!(
    Announcement,
    AnnouncementDraft,
    AnnouncementPatch,
    ActiveFilter,
    "announcements",
    "Pengumuman"
);
active_resource!(
    GalleryItem,
    GalleryItemDraft,
    GalleryItemPatch,
    ActiveFilter,
    "gallery",
    "Galeri"
);
active_resource!(
    Pengurus,
    PengurusDraft,
    PengurusPatch,
    ActiveFilter,
    "pengurus",
    "Pengurus"
);
active_resource!(Quote, QuoteDraft, QuotePatch, ActiveFilter, "quotes", "Kutipan");
active_resource!(
    RunningText,
    RunningTextDraft,
    RunningTextPatch,
    ActiveFilter,
    "running-text",
    "Running text"
);
active_resource!(
    SpecialEvent,
    SpecialEventDraft,
    SpecialEventPatch,
    EventFilter,
    "special-events",
    "Acara khusus"
);
active_resource!(
    ContentSlide,
    ContentSlideDraft,
    ContentSlidePatch,
    ActiveFilter,
    "content",
    "Konten"
);

// =============================================================================
// Resources with their own flag or protection rules
// =============================================================================

impl Resource for Article {
    const PATH: &'static str = "articles";
    const LABEL: &'static str = "Artikel";
    type Draft = ArticleDraft;
    type Patch = ArticlePatch;
    type Filter = ArticleFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Toggle for Article {
    fn is_active(&self) -> bool {
        self.is_published
    }

    fn active_patch(active: bool) -> ArticlePatch {
        ArticlePatch {
            is_published: Some(active),
            ..Default::default()
        }
    }
}

impl Resource for ZisEntry {
    const PATH: &'static str = "zis";
    const LABEL: &'static str = "Data ZIS";
    type Draft = ZisEntryDraft;
    type Patch = ZisEntryPatch;
    type Filter = ZisFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Resource for Expenditure {
    const PATH: &'static str = "expenditures";
    const LABEL: &'static str = "Pengeluaran";
    type Draft = ExpenditureDraft;
    type Patch = ExpenditurePatch;
    type Filter = PeriodFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Resource for User {
    const PATH: &'static str = "users";
    const LABEL: &'static str = "Pengguna";
    type Draft = UserDraft;
    type Patch = UserPatch;
    type Filter = NoFilter;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn is_protected(&self) -> bool {
        self.is_bootstrap_admin()
    }
}

impl Toggle for User {
    fn is_active(&self) -> bool {
        self.is_active
    }

    fn active_patch(active: bool) -> UserPatch {
        UserPatch::from_active(active)
    }
}

// =============================================================================
// Required fields
// =============================================================================

impl Validate for AgendaDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("title", blank(&self.title)),
            ("event_date", self.event_date.is_none()),
        ])
    }
}

impl Validate for AnnouncementDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("title", blank(&self.title)),
            ("content", blank(&self.content)),
        ])
    }
}

impl Validate for ArticleDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("title", blank(&self.title)),
            ("content", blank(&self.content)),
        ])
    }
}

impl Validate for GalleryItemDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("title", blank(&self.title)),
            ("image_url", blank(&self.image_url)),
        ])
    }
}

impl Validate for PengurusDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("name", blank(&self.name)),
            ("position", blank(&self.position)),
        ])
    }
}

impl Validate for QuoteDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[("text", blank(&self.text))])
    }
}

impl Validate for RunningTextDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[("text", blank(&self.text))])
    }
}

impl Validate for SpecialEventDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("title", blank(&self.title)),
            ("event_date", self.event_date.is_none()),
        ])
    }
}

impl Validate for ContentSlideDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        let needs_media = matches!(self.content_type, SlideKind::Image | SlideKind::Video);
        missing(&[
            ("title", blank(&self.title)),
            ("media_url", needs_media && blank_opt(&self.media_url)),
            (
                "body",
                self.content_type == SlideKind::Text && blank_opt(&self.body),
            ),
        ])
    }
}

impl Validate for ZisEntryDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("amount", not_positive(self.amount)),
            ("date", self.date.is_none()),
        ])
    }
}

impl Validate for ExpenditureDraft {
    fn missing_fields(&self, _editing: bool) -> Vec<&'static str> {
        missing(&[
            ("description", blank(&self.description)),
            ("amount", not_positive(self.amount)),
            ("date", self.date.is_none()),
        ])
    }
}

impl Validate for UserDraft {
    fn missing_fields(&self, editing: bool) -> Vec<&'static str> {
        missing(&[
            ("username", blank(&self.username)),
            ("name", blank(&self.name)),
            // Password is only required for new accounts
            ("password", !editing && blank(&self.password)),
        ])
    }
}

// =============================================================================
// Singletons
// =============================================================================

impl Singleton for MosqueIdentity {
    const PATH: &'static str = "mosque/identity";
}

impl Singleton for PrayerSettings {
    const PATH: &'static str = "settings/prayer";
}

impl Singleton for LayoutSettings {
    const PATH: &'static str = "settings/layout";
}

impl Singleton for QrisSettings {
    const PATH: &'static str = "settings/qris";
}

impl Singleton for SheetsConfig {
    const PATH: &'static str = "sheets/config";
}
