//! Typed resource façades over the HTTP client.
//!
//! One generic [`ResourceClient`] serves every collection resource; the
//! per-resource differences (path, form/patch bodies, list filters) live in
//! the [`Resource`] impls in [`catalog`]. Singletons (identity, settings) go
//! through [`SingletonClient`].

pub mod catalog;
pub mod filters;

pub use filters::{ActiveFilter, ArticleFilter, EventFilter, NoFilter, PeriodFilter, ZisFilter};

use masjid_records::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

use crate::client::{ApiClient, ApiError};

/// A collection resource served at `/<PATH>` and `/<PATH>/{id}`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path under the API prefix, without slashes
    const PATH: &'static str;
    /// Name used in user notifications
    const LABEL: &'static str;

    /// Create/edit form body, pre-populated from a record when editing
    type Draft: Serialize
        + DeserializeOwned
        + Clone
        + Default
        + Validate
        + Send
        + Sync
        + for<'a> From<&'a Self>;
    /// Partial update body; unset fields stay untouched at the backend
    type Patch: Serialize + DeserializeOwned + Default + Send + Sync + From<Self::Draft>;
    /// List query parameters
    type Filter: Serialize + DeserializeOwned + Default + Clone + Send + Sync;

    fn id(&self) -> &RecordId;

    /// Records the dashboard refuses to delete. UI guardrail only.
    fn is_protected(&self) -> bool {
        false
    }
}

/// Resources with an active/published flag that can be flipped on its own.
pub trait Toggle: Resource {
    fn is_active(&self) -> bool;
    fn active_patch(active: bool) -> Self::Patch;
}

/// Advisory required-field checks run before any request is sent.
pub trait Validate {
    /// Names of required fields that are missing. `editing` is true when the
    /// form updates an existing record.
    fn missing_fields(&self, editing: bool) -> Vec<&'static str>;

    fn validate(&self, editing: bool) -> Result<(), ApiError> {
        let missing = self.missing_fields(editing);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(format!(
                "Kolom wajib belum diisi: {}",
                missing.join(", ")
            )))
        }
    }
}

/// list/create/update/delete for one resource type.
pub struct ResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn item_path(id: &RecordId) -> String {
        format!("{}/{}", R::PATH, urlencoding::encode(id.as_str()))
    }

    /// `GET /<resource>?<filter>`
    pub async fn list(&self, filter: &R::Filter) -> Result<Vec<R>, ApiError> {
        self.api.get_with(R::PATH, filter).await
    }

    /// `POST /<resource>`; the backend assigns the id.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        self.api.post(R::PATH, draft).await
    }

    /// `PUT /<resource>/{id}` with only the fields set in `patch`.
    pub async fn update(&self, id: &RecordId, patch: &R::Patch) -> Result<R, ApiError> {
        self.api.put(&Self::item_path(id), patch).await
    }

    /// `DELETE /<resource>/{id}`; returns whatever the backend answered.
    pub async fn delete(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.api.delete(&Self::item_path(id)).await
    }
}

impl<R: Toggle> ResourceClient<R> {
    /// Flip only the active/published flag.
    pub async fn set_active(&self, id: &RecordId, active: bool) -> Result<R, ApiError> {
        self.update(id, &R::active_patch(active)).await
    }
}

/// Read/update-only record with no id.
pub trait Singleton: Serialize + DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;
}

pub struct SingletonClient<S> {
    api: ApiClient,
    _record: PhantomData<fn() -> S>,
}

impl<S> Clone for SingletonClient<S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _record: PhantomData,
        }
    }
}

impl<S: Singleton> SingletonClient<S> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _record: PhantomData,
        }
    }

    pub async fn get(&self) -> Result<S, ApiError> {
        self.api.get(S::PATH).await
    }

    pub async fn update(&self, record: &S) -> Result<S, ApiError> {
        self.api.put(S::PATH, record).await
    }

    /// `PUT` an arbitrary subset of fields.
    pub async fn patch(&self, fields: &Value) -> Result<S, ApiError> {
        self.api.put(S::PATH, fields).await
    }
}
