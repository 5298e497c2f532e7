use std::sync::Arc;

use crate::core::{config::Settings, redis::RedisHandle, reference::ReferenceData};
use crate::repositories::store::Store;
use crate::services::ai_client::TextGenerator;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    reference: ReferenceData,
    store: Arc<dyn Store>,
    generator: Arc<dyn TextGenerator>,
    redis: RedisHandle,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        store: Arc<dyn Store>,
        generator: Arc<dyn TextGenerator>,
        redis: RedisHandle,
    ) -> Self {
        let reference = ReferenceData::from_settings(&settings);
        Self { inner: Arc::new(InnerState { settings, reference, store, generator, redis }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn reference(&self) -> &ReferenceData {
        &self.inner.reference
    }

    pub(crate) fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    pub(crate) fn generator(&self) -> &dyn TextGenerator {
        self.inner.generator.as_ref()
    }

    pub(crate) fn redis(&self) -> &RedisHandle {
        &self.inner.redis
    }
}
