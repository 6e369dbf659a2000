//! 错误类型测试

use actix_web::ResponseError;
use actix_web::body::MessageBody;
use actix_web::http::StatusCode;

use wordgate::errors::WordgateError;

#[test]
fn test_error_codes_are_unique() {
    let errors = [
        WordgateError::validation("x"),
        WordgateError::not_found("x"),
        WordgateError::resolution("x"),
        WordgateError::lookup("x"),
        WordgateError::database_config("x"),
        WordgateError::database_connection("x"),
        WordgateError::database_operation("x"),
        WordgateError::serialization("x"),
        WordgateError::file_operation("x"),
    ];

    let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_http_status_mapping() {
    assert_eq!(
        WordgateError::validation("Word is required").http_status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        WordgateError::not_found("No result found").http_status(),
        StatusCode::NOT_FOUND
    );
    for err in [
        WordgateError::resolution("x"),
        WordgateError::lookup("x"),
        WordgateError::database_operation("x"),
    ] {
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test]
fn test_error_response_is_plain_message() {
    let resp = WordgateError::lookup("connection refused").error_response();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );

    let body = resp.into_body().try_into_bytes().unwrap();
    assert_eq!(body, "connection refused");
}

#[test]
fn test_display_includes_type_and_message() {
    let err = WordgateError::not_found("No result found");
    let text = err.to_string();
    assert!(text.contains("No result found"));
    assert!(text.contains(err.error_type()));
}

#[test]
fn test_from_serde_json_error() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let err: WordgateError = parse_err.into();
    assert!(matches!(err, WordgateError::Serialization(_)));
}

#[test]
fn test_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: WordgateError = io_err.into();
    assert!(matches!(err, WordgateError::FileOperation(_)));
}
