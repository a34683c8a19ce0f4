use leptos::prelude::*;
use studyapp::StudyApi;

use crate::auth::{AuthContext, use_auth};
use crate::config::{AppConfig, use_config};
use crate::web::FetchHttpClient;

pub type BrowserApi = StudyApi<FetchHttpClient>;

/// Builds API clients carrying the current session's token.
///
/// Grab it during component setup; call [`ApiContext::client`] inside
/// handlers and tasks, where context lookups are not available.
#[derive(Clone, Copy)]
pub struct ApiContext {
    config: AppConfig,
    auth: AuthContext,
}

impl ApiContext {
    pub fn new(config: AppConfig, auth: AuthContext) -> Self {
        Self { config, auth }
    }

    /// Fresh client for one call; the token is read at call time, so a
    /// client built before logout never outlives it.
    pub fn client(&self) -> BrowserApi {
        let session = self.auth.session_untracked();
        StudyApi::new(self.config.api_base_url, FetchHttpClient).with_token(session.token())
    }
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().unwrap_or_else(|| ApiContext::new(use_config(), use_auth()))
}
