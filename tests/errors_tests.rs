use actix_web::http::StatusCode;
use std::error::Error;
use tinylink::errors::{Result, TinylinkError};

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = TinylinkError::validation("url required");

        assert!(matches!(error, TinylinkError::Validation(_)));
        assert!(error.to_string().contains("Validation Error"));
        assert!(error.to_string().contains("url required"));
    }

    #[test]
    fn test_not_found_error() {
        let error = TinylinkError::not_found("no link for 'abc'");

        assert!(matches!(error, TinylinkError::NotFound(_)));
        assert!(error.to_string().contains("Resource Not Found"));
        assert!(error.to_string().contains("abc"));
    }

    #[test]
    fn test_store_errors() {
        let read = TinylinkError::store_read("read failed");
        let write = TinylinkError::store_write("write failed");
        let open = TinylinkError::store_open("locked");

        assert!(matches!(read, TinylinkError::StoreRead(_)));
        assert!(matches!(write, TinylinkError::StoreWrite(_)));
        assert!(matches!(open, TinylinkError::StoreOpen(_)));
        assert!(open.to_string().contains("Store Open Error"));
    }

    #[test]
    fn test_random_source_and_config_errors() {
        let rng = TinylinkError::random_source("entropy unavailable");
        let cfg = TinylinkError::config("missing file");

        assert!(matches!(rng, TinylinkError::RandomSource(_)));
        assert!(matches!(cfg, TinylinkError::Config(_)));
    }

    #[test]
    fn test_constructor_accepts_string() {
        let error = TinylinkError::validation(format!("code '{}' invalid", "a/b"));
        assert_eq!(error.message(), "code 'a/b' invalid");
    }
}

#[cfg(test)]
mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            TinylinkError::validation(""),
            TinylinkError::not_found(""),
            TinylinkError::store_read(""),
            TinylinkError::store_write(""),
            TinylinkError::random_source(""),
            TinylinkError::store_open(""),
            TinylinkError::config(""),
        ];

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, ["E001", "E002", "E003", "E004", "E005", "E006", "E007"]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TinylinkError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TinylinkError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        for internal in [
            TinylinkError::store_read("x"),
            TinylinkError::store_write("x"),
            TinylinkError::random_source("x"),
        ] {
            assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

#[cfg(test)]
mod error_format_tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        let error = TinylinkError::store_write("disk full");
        assert_eq!(error.format_simple(), "Store Write Error: disk full");
    }

    #[test]
    fn test_format_colored_contains_parts() {
        colored::control::set_override(false);
        let error = TinylinkError::not_found("gone");
        let out = error.format_colored();

        assert!(out.contains("[ERROR]"));
        assert!(out.contains("E002"));
        assert!(out.contains("gone"));
    }

    #[test]
    fn test_is_std_error() {
        let error = TinylinkError::validation("bad");
        let dyn_err: &dyn Error = &error;
        assert!(dyn_err.source().is_none());
    }

    #[test]
    fn test_result_alias() {
        fn fails() -> Result<()> {
            Err(TinylinkError::validation("nope"))
        }
        assert!(fails().is_err());
    }
}
