//! Masjid Admin - API client and session layer
//!
//! Client side of the mosque admin dashboard backend.
//!
//! This library provides:
//! - Bearer-token HTTP client with session eviction on 401
//! - Typed CRUD façades for every dashboard resource
//! - Page controllers (list, create/edit dialog, delete confirmation)
//! - Monthly ZIS finance report

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod finance;
pub mod resources;
pub mod session;

pub use api::MasjidApi;
pub use client::{ApiClient, ApiError, MemoryNavigator, Navigator, RoutePolicy};
pub use controller::{CrudController, Dialog, Notice, NoticeLevel, Outcome, Phase, SingletonEditor};
pub use finance::{monthly_report, FinanceReport};
pub use resources::{Resource, ResourceClient, Singleton, SingletonClient, Toggle, Validate};
pub use session::{FileStorage, MemoryStorage, Session, SessionStorage, StorageError};

pub use masjid_records as records;
