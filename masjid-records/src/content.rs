//! Display content records.
//!
//! Each resource comes in three shapes:
//! - the record as returned by the backend (`Agenda`)
//! - the create/edit form body (`AgendaDraft`), pre-populated from a record when editing
//! - the partial update body (`AgendaPatch`), where `None` fields are left untouched
//!   and optional fields can be cleared (see [`crate::nullable`])
//!
//! Converting an edit form into a patch sends every field, so a value the
//! user emptied goes out as `null`.
//!
//! `order`/`priority` values are a display hint only; they are neither
//! contiguous nor unique.

use crate::id::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// =============================================================================
// Agenda
// =============================================================================

/// Scheduled mosque activity (kajian, rapat, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agenda {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgendaDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgendaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub event_time: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub location: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub speaker: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Agenda> for AgendaDraft {
    fn from(r: &Agenda) -> Self {
        Self {
            title: r.title.clone(),
            description: r.description.clone(),
            event_date: Some(r.event_date),
            event_time: r.event_time.clone(),
            location: r.location.clone(),
            speaker: r.speaker.clone(),
            is_active: Some(r.is_active),
        }
    }
}

impl From<AgendaDraft> for AgendaPatch {
    fn from(d: AgendaDraft) -> Self {
        Self {
            title: Some(d.title),
            description: Some(d.description),
            event_date: d.event_date,
            event_time: Some(d.event_time),
            location: Some(d.location),
            speaker: Some(d.speaker),
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Announcement
// =============================================================================

/// Announcement (pengumuman) shown on the display screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnouncementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Announcement> for AnnouncementDraft {
    fn from(r: &Announcement) -> Self {
        Self {
            title: r.title.clone(),
            content: r.content.clone(),
            category: r.category.clone(),
            priority: Some(r.priority),
            start_date: r.start_date,
            end_date: r.end_date,
            is_active: Some(r.is_active),
        }
    }
}

impl From<AnnouncementDraft> for AnnouncementPatch {
    fn from(d: AnnouncementDraft) -> Self {
        Self {
            title: Some(d.title),
            content: Some(d.content),
            category: Some(d.category),
            priority: d.priority,
            start_date: Some(d.start_date),
            end_date: Some(d.end_date),
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Article
// =============================================================================

/// Long-form article. Uses `is_published` instead of `is_active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub excerpt: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub author: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl From<&Article> for ArticleDraft {
    fn from(r: &Article) -> Self {
        Self {
            title: r.title.clone(),
            content: r.content.clone(),
            excerpt: r.excerpt.clone(),
            image_url: r.image_url.clone(),
            author: r.author.clone(),
            is_published: Some(r.is_published),
        }
    }
}

impl From<ArticleDraft> for ArticlePatch {
    fn from(d: ArticleDraft) -> Self {
        Self {
            title: Some(d.title),
            content: Some(d.content),
            excerpt: Some(d.excerpt),
            image_url: Some(d.image_url),
            author: Some(d.author),
            is_published: d.is_published,
        }
    }
}

// =============================================================================
// Gallery
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GalleryItemDraft {
    pub title: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GalleryItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&GalleryItem> for GalleryItemDraft {
    fn from(r: &GalleryItem) -> Self {
        Self {
            title: r.title.clone(),
            image_url: r.image_url.clone(),
            description: r.description.clone(),
            category: r.category.clone(),
            order: Some(r.order),
            is_active: Some(r.is_active),
        }
    }
}

impl From<GalleryItemDraft> for GalleryItemPatch {
    fn from(d: GalleryItemDraft) -> Self {
        Self {
            title: Some(d.title),
            image_url: Some(d.image_url),
            description: Some(d.description),
            category: Some(d.category),
            order: d.order,
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Pengurus
// =============================================================================

/// Member of the mosque management committee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pengurus {
    pub id: RecordId,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PengurusDraft {
    pub name: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PengurusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub phone: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub photo_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Pengurus> for PengurusDraft {
    fn from(r: &Pengurus) -> Self {
        Self {
            name: r.name.clone(),
            position: r.position.clone(),
            phone: r.phone.clone(),
            photo_url: r.photo_url.clone(),
            order: Some(r.order),
            is_active: Some(r.is_active),
        }
    }
}

impl From<PengurusDraft> for PengurusPatch {
    fn from(d: PengurusDraft) -> Self {
        Self {
            name: Some(d.name),
            position: Some(d.position),
            phone: Some(d.phone),
            photo_url: Some(d.photo_url),
            order: d.order,
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub source: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Quote> for QuoteDraft {
    fn from(r: &Quote) -> Self {
        Self {
            text: r.text.clone(),
            source: r.source.clone(),
            order: Some(r.order),
            is_active: Some(r.is_active),
        }
    }
}

impl From<QuoteDraft> for QuotePatch {
    fn from(d: QuoteDraft) -> Self {
        Self {
            text: Some(d.text),
            source: Some(d.source),
            order: d.order,
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Running text
// =============================================================================

/// One line of the scrolling ticker on the display screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningText {
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunningTextDraft {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunningTextPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&RunningText> for RunningTextDraft {
    fn from(r: &RunningText) -> Self {
        Self {
            text: r.text.clone(),
            order: Some(r.order),
            is_active: Some(r.is_active),
        }
    }
}

impl From<RunningTextDraft> for RunningTextPatch {
    fn from(d: RunningTextDraft) -> Self {
        Self {
            text: Some(d.text),
            order: d.order,
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Special event
// =============================================================================

/// Special event (Idul Fitri, Isra Mi'raj, ...) highlighted on the display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialEvent {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecialEventDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecialEventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub event_time: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub image_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&SpecialEvent> for SpecialEventDraft {
    fn from(r: &SpecialEvent) -> Self {
        Self {
            title: r.title.clone(),
            description: r.description.clone(),
            event_date: Some(r.event_date),
            event_time: r.event_time.clone(),
            image_url: r.image_url.clone(),
            is_active: Some(r.is_active),
        }
    }
}

impl From<SpecialEventDraft> for SpecialEventPatch {
    fn from(d: SpecialEventDraft) -> Self {
        Self {
            title: Some(d.title),
            description: Some(d.description),
            event_date: d.event_date,
            event_time: Some(d.event_time),
            image_url: Some(d.image_url),
            is_active: d.is_active,
        }
    }
}

// =============================================================================
// Content slide
// =============================================================================

/// Kind of slide rotated on the display screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    #[default]
    Image,
    Text,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSlide {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content_type: SlideKind,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default = "default_slide_duration")]
    pub duration_seconds: u32,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_slide_duration() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentSlideDraft {
    pub title: String,
    pub content_type: SlideKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentSlidePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<SlideKind>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub body: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::nullable::deserialize"
    )]
    pub media_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&ContentSlide> for ContentSlideDraft {
    fn from(r: &ContentSlide) -> Self {
        Self {
            title: r.title.clone(),
            content_type: r.content_type,
            body: r.body.clone(),
            media_url: r.media_url.clone(),
            duration_seconds: Some(r.duration_seconds),
            order: Some(r.order),
            is_active: Some(r.is_active),
        }
    }
}

impl From<ContentSlideDraft> for ContentSlidePatch {
    fn from(d: ContentSlideDraft) -> Self {
        Self {
            title: Some(d.title),
            content_type: Some(d.content_type),
            body: Some(d.body),
            media_url: Some(d.media_url),
            duration_seconds: d.duration_seconds,
            order: d.order,
            is_active: d.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agenda_draft_omits_unset_fields() {
        let draft = AgendaDraft {
            title: "Kajian Jumat".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 1, 10),
            event_time: Some("19:30".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Kajian Jumat",
                "event_date": "2025-01-10",
                "event_time": "19:30"
            })
        );
    }

    #[test]
    fn test_toggle_patch_carries_only_flag() {
        let patch = AnnouncementPatch {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"is_active": false})
        );
    }

    #[test]
    fn test_record_defaults_when_backend_omits_flags() {
        let json = r#"{"id": 7, "text": "Jagalah kebersihan masjid"}"#;
        let rt: RunningText = serde_json::from_str(json).unwrap();
        assert!(rt.is_active);
        assert_eq!(rt.order, 0);
        assert!(rt.created_at.is_none());
    }

    #[test]
    fn test_edit_form_round_trips_into_full_patch() {
        let record = Pengurus {
            id: RecordId::from("p1"),
            name: "H. Ahmad".to_string(),
            position: "Ketua".to_string(),
            phone: None,
            photo_url: Some("/uploads/ahmad.jpg".to_string()),
            order: 1,
            is_active: true,
            created_at: None,
        };
        let patch = PengurusPatch::from(PengurusDraft::from(&record));
        assert_eq!(patch.name.as_deref(), Some("H. Ahmad"));
        assert_eq!(patch.position.as_deref(), Some("Ketua"));
        assert_eq!(
            patch.photo_url,
            Some(Some("/uploads/ahmad.jpg".to_string()))
        );
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.is_active, Some(true));
    }

    #[test]
    fn test_emptied_edit_field_is_sent_as_null() {
        let record = Agenda {
            id: RecordId::from(4),
            title: "Tabligh".to_string(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            event_time: None,
            location: Some("Halaman".to_string()),
            speaker: None,
            is_active: true,
            created_at: None,
        };
        let mut form = AgendaDraft::from(&record);
        form.location = None;
        let json = serde_json::to_value(AgendaPatch::from(form)).unwrap();
        assert_eq!(json["location"], serde_json::Value::Null);
        assert!(json.as_object().unwrap().contains_key("location"));
        assert_eq!(json["title"], "Tabligh");
    }
}
