use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use storyweave_shared::models::WidgetResponse;

use super::{CacheError, WidgetCache};

#[derive(Debug, Clone)]
struct CachedWidget {
    response: Arc<WidgetResponse>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
#[derive(Debug)]
struct PerEntryTtl;

impl Expiry<String, CachedWidget> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedWidget,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process widget cache with per-entry TTL and bounded capacity.
#[derive(Debug, Clone)]
pub struct MokaWidgetCache {
    inner: Cache<String, CachedWidget>,
}

impl MokaWidgetCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

#[async_trait]
impl WidgetCache for MokaWidgetCache {
    fn backend_name(&self) -> &'static str {
        "moka"
    }

    async fn get(&self, key: &str) -> Result<Option<WidgetResponse>, CacheError> {
        Ok(self
            .inner
            .get(key)
            .await
            .map(|cached| cached.response.as_ref().clone()))
    }

    async fn put(
        &self,
        key: &str,
        response: &WidgetResponse,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.inner
            .insert(
                key.to_string(),
                CachedWidget {
                    response: Arc::new(response.clone()),
                    ttl,
                },
            )
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyweave_shared::models::{WidgetDescription, WidgetType};

    fn response(id: &str) -> WidgetResponse {
        WidgetResponse {
            widget_id: id.to_string(),
            widget_data: WidgetDescription::new(WidgetType::Quiz, "Quiz"),
            react_code: "code".to_string(),
            embed_code: "embed".to_string(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = MokaWidgetCache::new(16);
        assert!(cache.get("widget:quiz").await.unwrap().is_none());

        cache
            .put("widget:quiz", &response("w1"), Duration::from_secs(60))
            .await
            .unwrap();

        let hit = cache.get("widget:quiz").await.unwrap().unwrap();
        assert_eq!(hit, response("w1"));
        assert!(cache.get("widget:form").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache = MokaWidgetCache::new(16);
        cache
            .put("widget:quiz", &response("w1"), Duration::from_millis(50))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get("widget:quiz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = MokaWidgetCache::new(16);
        let ttl = Duration::from_secs(60);
        cache.put("k", &response("w1"), ttl).await.unwrap();
        cache.put("k", &response("w2"), ttl).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().unwrap().widget_id, "w2");
    }
}
