//! Link management service
//!
//! Create / resolve / remove semantics on top of [`KvStore`], shared by the
//! HTTP handlers and the CLI.
//!
//! Every operation is a single linear pass. `resolve` and `remove` check
//! existence and then act in a second transaction; a concurrent delete or
//! expiry between the two steps is tolerated and surfaces as a store error.

use tracing::{debug, error, info};

use crate::errors::{Result, TinylinkError};
use crate::storage::KvStore;
use crate::utils::{MAX_CODE_LENGTH, generate_random_code, is_valid_short_code};

/// Request to create (or overwrite) a link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Desired code; generated when `None` or empty
    pub code: Option<String>,
    /// Target URL
    pub url: String,
    /// Expiry in minutes as received from the caller; `None` or empty = never
    pub expiry: Option<String>,
}

/// Parse the raw expiry field into minutes.
///
/// Absent or empty means no expiry (0). Anything else must be an integer
/// of at least 1.
pub fn parse_expiry_minutes(raw: Option<&str>) -> Result<u32> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(0),
    };

    let minutes: i64 = raw
        .parse()
        .map_err(|_| TinylinkError::validation("expiry must be a number"))?;

    if minutes < 1 {
        return Err(TinylinkError::validation("expiry must be greater than 0"));
    }

    u32::try_from(minutes).map_err(|_| TinylinkError::validation("expiry is too large"))
}

pub struct LinkService {
    store: KvStore,
    code_length: usize,
}

impl LinkService {
    pub fn new(store: KvStore, code_length: usize) -> Self {
        Self {
            store,
            code_length: code_length.clamp(1, MAX_CODE_LENGTH),
        }
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Create a link and return its code.
    ///
    /// An explicit code overwrites whatever is stored under it. Generated
    /// codes are not checked against existing records either.
    pub fn create(&self, req: CreateLinkRequest) -> Result<String> {
        if req.url.is_empty() {
            return Err(TinylinkError::validation("url required"));
        }

        let expiry_minutes = parse_expiry_minutes(req.expiry.as_deref())?;

        let code = match req.code.filter(|c| !c.is_empty()) {
            Some(c) => {
                if !is_valid_short_code(&c) {
                    return Err(TinylinkError::validation(format!(
                        "Invalid short code '{}'. Only ASCII letters and digits are allowed (max {} characters).",
                        c, MAX_CODE_LENGTH
                    )));
                }
                c
            }
            None => generate_random_code(self.code_length).map_err(|e| {
                error!("LinkService: failed to generate short code: {}", e);
                e
            })?,
        };

        self.store
            .set(&code, &req.url, expiry_minutes)
            .map_err(|e| {
                error!("LinkService: failed to store '{}': {}", code, e);
                e
            })?;

        info!(
            "LinkService: created link '{}' -> '{}' (expiry: {} min)",
            code, req.url, expiry_minutes
        );
        Ok(code)
    }

    /// Resolve a code to its target URL.
    pub fn resolve(&self, code: &str) -> Result<String> {
        if !self.store.exists(code)? {
            debug!("LinkService: '{}' not found", code);
            return Err(TinylinkError::not_found(format!("Link '{}' not found", code)));
        }

        self.store.get(code)
    }

    /// Remove a link; `NotFound` when there is no live record for `code`.
    pub fn remove(&self, code: &str) -> Result<()> {
        if !self.store.exists(code)? {
            return Err(TinylinkError::not_found(format!("Link '{}' not found", code)));
        }

        self.store.delete(code)?;

        info!("LinkService: deleted '{}'", code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expiry_absent() {
        assert_eq!(parse_expiry_minutes(None).unwrap(), 0);
        assert_eq!(parse_expiry_minutes(Some("")).unwrap(), 0);
    }

    #[test]
    fn test_parse_expiry_valid() {
        assert_eq!(parse_expiry_minutes(Some("1")).unwrap(), 1);
        assert_eq!(parse_expiry_minutes(Some("1440")).unwrap(), 1440);
    }

    #[test]
    fn test_parse_expiry_invalid() {
        for raw in ["abc", "-1", "0", "1.5", " 5", "99999999999"] {
            let err = parse_expiry_minutes(Some(raw)).unwrap_err();
            assert!(
                matches!(err, TinylinkError::Validation(_)),
                "expected validation error for {:?}",
                raw
            );
        }
    }
}
