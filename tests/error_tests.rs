//! Tests for error classification.

use taleweaver::error::{classify, ClassifiedError, ErrorKind};

#[test]
fn status_classification_matches_the_mapping_table() {
    struct Case {
        status: u16,
        expected_kind: ErrorKind,
        expected_message: &'static str,
    }

    let cases = vec![
        Case {
            status: 400,
            expected_kind: ErrorKind::Validation,
            expected_message: "입력하신 정보가 올바르지 않습니다. 다시 확인해 주세요.",
        },
        Case {
            status: 401,
            expected_kind: ErrorKind::Api,
            expected_message: "인증이 만료되었습니다. 다시 로그인해 주세요.",
        },
        Case {
            status: 403,
            expected_kind: ErrorKind::Api,
            expected_message: "접근 권한이 없습니다.",
        },
        Case {
            status: 404,
            expected_kind: ErrorKind::Api,
            expected_message: "요청한 리소스를 찾을 수 없습니다.",
        },
        Case {
            status: 408,
            expected_kind: ErrorKind::Timeout,
            expected_message: "요청 시간이 초과되었습니다. 잠시 후 다시 시도해 주세요.",
        },
        Case {
            status: 429,
            expected_kind: ErrorKind::Api,
            expected_message: "요청이 너무 많습니다. 잠시 후 다시 시도해 주세요.",
        },
        Case {
            status: 500,
            expected_kind: ErrorKind::Api,
            expected_message: "서버에 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.",
        },
        Case {
            status: 502,
            expected_kind: ErrorKind::Api,
            expected_message: "서버 응답이 올바르지 않습니다. 잠시 후 다시 시도해 주세요.",
        },
        Case {
            status: 503,
            expected_kind: ErrorKind::Api,
            expected_message: "서비스를 일시적으로 사용할 수 없습니다. 잠시 후 다시 시도해 주세요.",
        },
    ];

    for case in cases {
        let err = ClassifiedError::from_status(case.status, "raw detail");
        assert_eq!(err.kind(), case.expected_kind, "status {}", case.status);
        assert_eq!(err.message(), case.expected_message, "status {}", case.status);
        assert_eq!(err.status_code(), Some(case.status));
    }
}

#[test]
fn detail_is_only_set_when_explicitly_attached() {
    let err = ClassifiedError::from_status(404, "fallback text");
    assert_eq!(err.detail(), None);

    let err = ClassifiedError::from_status(404, "no such story").with_detail("no such story");
    assert_eq!(err.detail(), Some("no such story"));
    assert_eq!(err.message(), "요청한 리소스를 찾을 수 없습니다.");
}

#[test]
fn unmapped_statuses_classify_as_api_never_unknown() {
    for status in [402, 409, 410, 418, 451, 501, 504, 511] {
        let err = ClassifiedError::from_status(status, "boom");
        assert_eq!(err.kind(), ErrorKind::Api, "status {status}");
        assert_eq!(err.message(), format!("({status}): boom"));
        assert_eq!(err.status_code(), Some(status));
    }
}

#[test]
fn display_shows_the_user_facing_message() {
    let err = ClassifiedError::from_status(404, "missing");
    assert_eq!(err.to_string(), "요청한 리소스를 찾을 수 없습니다.");
}

#[test]
fn transport_errors_without_response_never_panic() {
    // Builder-level failure: no status, no connection involved. Must
    // degrade to Unknown rather than propagate a new failure.
    let raw = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let err = ClassifiedError::from_transport(raw);
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert!(!err.message().is_empty());
    assert_eq!(err.status_code(), None);
}

#[test]
fn default_messages_cover_every_kind_except_unknown() {
    let kinds = [
        ErrorKind::Network,
        ErrorKind::Validation,
        ErrorKind::Api,
        ErrorKind::Timeout,
        ErrorKind::Storage,
        ErrorKind::Upload,
        ErrorKind::Generation,
    ];
    for kind in kinds {
        assert!(kind.default_message().is_some(), "{kind:?}");
    }
    assert_eq!(ErrorKind::Unknown.default_message(), None);
}

#[test]
fn error_kind_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&ErrorKind::Network).unwrap(),
        "\"network\""
    );
    assert_eq!(
        serde_json::to_string(&ErrorKind::Generation).unwrap(),
        "\"generation\""
    );
}

#[test]
fn user_message_for_status_matches_constructed_errors() {
    assert_eq!(
        classify::user_message_for_status(503, "down"),
        ClassifiedError::from_status(503, "down").message(),
    );
    assert_eq!(classify::user_message_for_status(418, "tea"), "(418): tea");
}
