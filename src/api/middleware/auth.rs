use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Configured shared secret, registered as app data.
#[derive(Clone, Debug, Default)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_configured(&self) -> bool {
        !self.0.is_empty()
    }

    /// Constant-time comparison against a presented key.
    pub fn matches(&self, presented: &[u8]) -> bool {
        self.is_configured() && bool::from(self.0.as_bytes().ct_eq(presented))
    }
}

pub struct ApiKeyAuth;

impl ApiKeyAuth {
    /// 写操作 API 身份验证中间件
    ///
    /// An empty configured key disables the write API entirely (404).
    pub async fn check(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        let api_key = req
            .app_data::<web::Data<ApiKey>>()
            .map(|k| k.get_ref().clone())
            .unwrap_or_default();

        // 未配置密钥，视为禁用
        if !api_key.is_configured() {
            debug!("API key not configured - write API disabled");
            return Ok(req.into_response(
                HttpResponse::NotFound()
                    .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                    .body("Not Found"),
            ));
        }

        let presented = req
            .headers()
            .get(API_KEY_HEADER)
            .map(|h| h.as_bytes())
            .unwrap_or_default();

        if api_key.matches(presented) {
            debug!("API key authentication succeeded");
            return next.call(req).await;
        }

        info!("API key authentication failed: key mismatch or missing {} header", API_KEY_HEADER);
        Ok(req.into_response(
            HttpResponse::Unauthorized().json(serde_json::json!({ "error": "wrong api key" })),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_matches() {
        let key = ApiKey::new("s3cret");
        assert!(key.matches(b"s3cret"));
        assert!(!key.matches(b"s3cre"));
        assert!(!key.matches(b"s3cret!"));
        assert!(!key.matches(b""));
    }

    #[test]
    fn test_empty_key_never_matches() {
        let key = ApiKey::default();
        assert!(!key.is_configured());
        assert!(!key.matches(b""));
    }
}
