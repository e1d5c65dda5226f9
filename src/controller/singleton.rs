//! Editor for read/update-only records (identity, settings pages).

use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Notice, Outcome, Phase};
use crate::resources::{Singleton, SingletonClient};

struct EditorState<S> {
    phase: Phase,
    form: Option<S>,
    notices: Vec<Notice>,
}

pub struct SingletonEditor<S: Singleton> {
    client: SingletonClient<S>,
    label: &'static str,
    state: Arc<RwLock<EditorState<S>>>,
}

impl<S: Singleton> Clone for SingletonEditor<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            label: self.label,
            state: self.state.clone(),
        }
    }
}

impl<S: Singleton + Clone> SingletonEditor<S> {
    pub fn new(client: SingletonClient<S>, label: &'static str) -> Self {
        Self {
            client,
            label,
            state: Arc::new(RwLock::new(EditorState {
                phase: Phase::Loading,
                form: None,
                notices: Vec::new(),
            })),
        }
    }

    pub async fn phase(&self) -> Phase {
        self.state.read().await.phase
    }

    pub async fn form(&self) -> Option<S> {
        self.state.read().await.form.clone()
    }

    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().await.notices)
    }

    /// Fetch the record into the form. Refused while a save is in flight,
    /// since the answer would race the save's own.
    pub async fn load(&self) -> bool {
        {
            let mut state = self.state.write().await;
            if state.phase == Phase::Saving {
                return false;
            }
            state.phase = Phase::Loading;
        }
        let result = self.client.get().await;
        let mut state = self.state.write().await;
        if state.phase == Phase::Loading {
            state.phase = Phase::Ready;
        }
        match result {
            Ok(record) => {
                state.form = Some(record);
                true
            }
            Err(e) => {
                state.notices.push(Notice::error(e.user_message()));
                false
            }
        }
    }

    pub async fn edit(&self, change: impl FnOnce(&mut S)) -> bool {
        match self.state.write().await.form.as_mut() {
            Some(form) => {
                change(form);
                true
            }
            None => false,
        }
    }

    /// Write the form back and replace it with the server's answer.
    pub async fn save(&self) -> Outcome {
        let form = {
            let mut state = self.state.write().await;
            if state.phase != Phase::Ready {
                return Outcome::Busy;
            }
            let Some(form) = state.form.clone() else {
                return Outcome::Idle;
            };
            state.phase = Phase::Saving;
            form
        };

        let result = self.client.update(&form).await;
        let mut state = self.state.write().await;
        state.phase = Phase::Ready;
        match result {
            Ok(saved) => {
                state.form = Some(saved);
                state
                    .notices
                    .push(Notice::success(format!("{} berhasil disimpan", self.label)));
                Outcome::Saved
            }
            Err(e) => {
                state.notices.push(Notice::error(e.user_message()));
                Outcome::Failed(e)
            }
        }
    }
}
