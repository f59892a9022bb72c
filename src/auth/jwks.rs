use std::collections::HashMap;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::AuthError;

#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

struct CachedKeys {
    fetched_at: Instant,
    keys: HashMap<String, Jwk>,
}

/// TTL-bounded cache of the identity provider's public keys, keyed by kid.
/// A lookup miss or an expired set forces a re-fetch; fetch failures never
/// evict a still-usable set.
pub struct JwksCache {
    url: String,
    ttl: Duration,
    http: reqwest::Client,
    state: RwLock<Option<CachedKeys>>,
}

impl JwksCache {
    pub fn new(url: String, ttl: Duration) -> Self {
        Self {
            url,
            ttl,
            http: reqwest::Client::new(),
            state: RwLock::new(None),
        }
    }

    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(jwk) = self.cached(kid).await {
            return decoding_key_from_jwk(&jwk);
        }

        let jwk = self.refresh(kid).await?;
        decoding_key_from_jwk(&jwk)
    }

    async fn cached(&self, kid: &str) -> Option<Jwk> {
        let state = self.state.read().await;
        let cached = state.as_ref()?;
        if cached.fetched_at.elapsed() > self.ttl {
            return None;
        }
        cached.keys.get(kid).cloned()
    }

    async fn refresh(&self, kid: &str) -> Result<Jwk, AuthError> {
        let mut state = self.state.write().await;

        // Another request may have refreshed while we waited for the lock
        if let Some(cached) = state.as_ref() {
            if cached.fetched_at.elapsed() <= self.ttl {
                if let Some(jwk) = cached.keys.get(kid) {
                    return Ok(jwk.clone());
                }
            }
        }

        let response = self
            .http
            .get(&self.url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AuthError::KeySetFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::KeySetFetch(e.to_string()))?;

        let key_set: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::KeySetFetch(e.to_string()))?;

        debug!("fetched {} signing keys", key_set.keys.len());

        let keys: HashMap<String, Jwk> =
            key_set.keys.into_iter().map(|k| (k.kid.clone(), k)).collect();
        let jwk = keys.get(kid).cloned();
        *state = Some(CachedKeys { fetched_at: Instant::now(), keys });

        jwk.ok_or(AuthError::UnknownKey)
    }
}

fn decoding_key_from_jwk(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    if jwk.kty != "RSA" {
        return Err(AuthError::UnknownKey);
    }
    let (n, e) = match (&jwk.n, &jwk.e) {
        (Some(n), Some(e)) => (n, e),
        _ => return Err(AuthError::UnknownKey),
    };
    DecodingKey::from_rsa_components(n, e).map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwk_set_parses_provider_shape() {
        let body = r#"{
            "keys": [
                {"kty": "RSA", "kid": "key-1", "use": "sig", "n": "abc", "e": "AQAB"},
                {"kty": "EC", "kid": "key-2"}
            ]
        }"#;
        let set: JwkSet = serde_json::from_str(body).unwrap();
        assert_eq!(set.keys.len(), 2);
        assert_eq!(set.keys[0].kid, "key-1");
        assert_eq!(set.keys[0].key_use.as_deref(), Some("sig"));
    }

    #[test]
    fn non_rsa_keys_are_rejected() {
        let jwk = Jwk {
            kty: "EC".to_string(),
            kid: "key-2".to_string(),
            key_use: None,
            n: None,
            e: None,
        };
        assert!(matches!(decoding_key_from_jwk(&jwk), Err(AuthError::UnknownKey)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_surfaces_fetch_error() {
        let cache = JwksCache::new(
            "http://127.0.0.1:1/jwks.json".to_string(),
            Duration::from_secs(60),
        );
        assert!(matches!(
            cache.decoding_key("any").await,
            Err(AuthError::KeySetFetch(_))
        ));
    }
}
