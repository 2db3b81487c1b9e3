use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use secrecy::{ExposeSecret, SecretString};
use storyweave_shared::models::WidgetResponse;

use super::{CacheError, WidgetCache};

/// Upper bound on the initial connection attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Widget cache backed by redis. Values are JSON with `SETEX` expiry.
///
/// The connection URL may carry a password, so it is never stored, logged or
/// included in errors.
#[derive(Clone)]
pub struct RedisWidgetCache {
    manager: ConnectionManager,
}

impl RedisWidgetCache {
    /// Connect to `url`, failing if the server is not reachable.
    pub async fn connect(url: &SecretString) -> Result<Self, CacheError> {
        let client = redis::Client::open(url.expose_secret()).map_err(backend_error)?;
        let manager = tokio::time::timeout(CONNECT_TIMEOUT, client.get_connection_manager())
            .await
            .map_err(|_| {
                CacheError::Backend(format!(
                    "timed out connecting to redis after {}s",
                    CONNECT_TIMEOUT.as_secs()
                ))
            })?
            .map_err(backend_error)?;

        Ok(Self { manager })
    }
}

impl fmt::Debug for RedisWidgetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisWidgetCache").finish_non_exhaustive()
    }
}

#[async_trait]
impl WidgetCache for RedisWidgetCache {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<WidgetResponse>, CacheError> {
        let mut conn = self.manager.clone();
        let payload: Option<String> = conn.get(key).await.map_err(backend_error)?;
        payload
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(CacheError::from)
    }

    async fn put(
        &self,
        key: &str,
        response: &WidgetResponse,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(response)?;
        let mut conn = self.manager.clone();
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        let () = conn
            .set_ex(key, payload, seconds)
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

fn backend_error(e: redis::RedisError) -> CacheError {
    CacheError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let err = RedisWidgetCache::connect(&SecretString::from("definitely not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::Backend(_)));
    }

    #[tokio::test]
    async fn test_connect_error_does_not_echo_password() {
        let url = SecretString::from("redis://:hunter2@localhost:notaport");
        let err = RedisWidgetCache::connect(&url).await.unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
        assert!(!format!("{err:?}").contains("hunter2"));
    }
}
