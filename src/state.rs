// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::store::QuizStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<QuizStore>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<QuizStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
