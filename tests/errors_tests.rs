use actix_web::ResponseError;
use actix_web::body::MessageBody;
use actix_web::http::StatusCode;
use std::error::Error;
use tinylink::errors::{Result, TinylinkError};

fn body_text(error: &TinylinkError) -> String {
    let bytes = error.error_response().into_body().try_into_bytes().unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = TinylinkError::validation("bad url");

        assert!(matches!(error, TinylinkError::Validation(_)));
        assert_eq!(error.code(), "E001");
        assert!(error.to_string().contains("Validation Error"));
        assert!(error.to_string().contains("bad url"));
    }

    #[test]
    fn test_not_found_error() {
        let error = TinylinkError::not_found("no such code");

        assert!(matches!(error, TinylinkError::NotFound(_)));
        assert_eq!(error.code(), "E002");
        assert_eq!(error.message(), "no such code");
    }

    #[test]
    fn test_store_capacity_error() {
        let error = TinylinkError::store_capacity("full");

        assert!(matches!(error, TinylinkError::StoreCapacity(_)));
        assert_eq!(error.code(), "E003");
    }

    #[test]
    fn test_key_collision_error() {
        let error = TinylinkError::key_collision("gave up");

        assert!(matches!(error, TinylinkError::KeyCollision(_)));
        assert_eq!(error.code(), "E004");
    }

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            TinylinkError::validation(""),
            TinylinkError::not_found(""),
            TinylinkError::store_capacity(""),
            TinylinkError::key_collision(""),
            TinylinkError::config(""),
            TinylinkError::file_operation(""),
            TinylinkError::serialization(""),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let error: TinylinkError = io_error.into();

        assert!(matches!(error, TinylinkError::FileOperation(_)));
        assert!(error.to_string().contains("missing file"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err();
        let error: TinylinkError = json_error.into();

        assert!(matches!(error, TinylinkError::Serialization(_)));
    }

    #[test]
    fn test_config_error_conversion() {
        let config_error = config::ConfigError::Message("bad key".to_string());
        let error: TinylinkError = config_error.into();

        assert!(matches!(error, TinylinkError::Config(_)));
        assert!(error.message().contains("bad key"));
    }
}

#[cfg(test)]
mod error_trait_tests {
    use super::*;

    #[test]
    fn test_error_trait_implementation() {
        let error = TinylinkError::validation("test");
        let error_trait: &dyn Error = &error;

        assert!(!error_trait.to_string().is_empty());
        assert!(error_trait.source().is_none());
    }

    #[test]
    fn test_send_sync_traits() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<TinylinkError>();
        assert_sync::<TinylinkError>();
    }

    #[test]
    fn test_result_and_then() {
        let result: Result<u64> = Ok(10);
        let chained = result.and_then(|x| {
            if x > 5 {
                Ok(x * 2)
            } else {
                Err(TinylinkError::validation("too small"))
            }
        });

        assert_eq!(chained.unwrap(), 20);
    }

    #[test]
    fn test_format_colored_contains_code_and_message() {
        let error = TinylinkError::config("port in use");
        let rendered = error.format_colored();

        assert!(rendered.contains("E005"));
        assert!(rendered.contains("port in use"));
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400_with_plain_message() {
        let error = TinylinkError::not_found("Bad request: no url found for this shortner abc");

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(!error.is_internal());
        assert_eq!(
            body_text(&error),
            "Bad request: no url found for this shortner abc"
        );

        let error = TinylinkError::validation("Bad request: unsupported scheme");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_are_500_without_details() {
        for error in [
            TinylinkError::store_capacity("store is full (1000 entries)"),
            TinylinkError::key_collision("no free short code after 5 attempts"),
        ] {
            assert!(error.is_internal());
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = body_text(&error);
            assert_eq!(body, format!("Internal server error ({})", error.code()));
            assert!(!body.contains(error.message()));
        }
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = TinylinkError::validation("x").error_response();
        let content_type = response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }
}
