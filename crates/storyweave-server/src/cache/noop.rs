use std::time::Duration;

use async_trait::async_trait;
use storyweave_shared::models::WidgetResponse;

use super::{CacheError, WidgetCache};

/// Cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWidgetCache;

#[async_trait]
impl WidgetCache for NoopWidgetCache {
    fn backend_name(&self) -> &'static str {
        "none"
    }

    async fn get(&self, _key: &str) -> Result<Option<WidgetResponse>, CacheError> {
        Ok(None)
    }

    async fn put(
        &self,
        _key: &str,
        _response: &WidgetResponse,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Ok(())
    }
}
