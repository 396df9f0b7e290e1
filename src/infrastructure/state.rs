//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::PendingOverrideStore;
use crate::application::services::{
    OverrideControlService, PendingOverrideService, RollDispatchInterceptor, RollService,
};
use crate::domain::services::ResultSource;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::create_override_store;
use crate::infrastructure::random::SystemRandom;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub roll_service: RollService,
    /// `None` when the override feature could not be installed
    pub override_control: Option<OverrideControlService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let random: Arc<dyn ResultSource> = Arc::new(SystemRandom::new());

        let store: Option<Arc<dyn PendingOverrideStore>> = if config.override_store.enabled {
            match create_override_store(&config.override_store, &config.world_id).await {
                Ok(store) => Some(store as Arc<dyn PendingOverrideStore>),
                Err(e) => {
                    tracing::error!(
                        "Failed to install d20 override, rolls will not be modified: {:#}",
                        e
                    );
                    None
                }
            }
        } else {
            tracing::info!("d20 override disabled by configuration");
            None
        };

        Ok(Self::with_parts(config, random, store))
    }

    /// Wire services around an already built store and result source.
    pub fn with_parts(
        config: AppConfig,
        random: Arc<dyn ResultSource>,
        store: Option<Arc<dyn PendingOverrideStore>>,
    ) -> Self {
        let mut roll_service = RollService::new(random);
        let mut override_control = None;

        if let Some(store) = store {
            let overrides = Arc::new(PendingOverrideService::new(store));
            roll_service =
                roll_service.with_interceptor(RollDispatchInterceptor::new(overrides.clone()));
            override_control = Some(OverrideControlService::new(overrides));
        }

        Self {
            config,
            roll_service,
            override_control,
        }
    }
}
