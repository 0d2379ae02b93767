//! Status-code classification and the localized message table.

use super::ErrorKind;

pub const NETWORK_MESSAGE: &str = "네트워크 연결을 확인해 주세요.";
pub const VALIDATION_MESSAGE: &str = "입력하신 정보가 올바르지 않습니다. 다시 확인해 주세요.";
pub const API_MESSAGE: &str = "요청을 처리하지 못했습니다. 잠시 후 다시 시도해 주세요.";
pub const TIMEOUT_MESSAGE: &str = "요청 시간이 초과되었습니다. 잠시 후 다시 시도해 주세요.";
pub const STORAGE_MESSAGE: &str = "저장 공간에 문제가 발생했습니다.";
pub const UPLOAD_MESSAGE: &str = "사진 업로드에 실패했습니다. 다시 시도해 주세요.";
pub const GENERATION_MESSAGE: &str = "동화 생성에 실패했습니다. 잠시 후 다시 시도해 주세요.";
pub const GENERIC_MESSAGE: &str = "알 수 없는 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";
pub const CANCELLED_MESSAGE: &str = "요청이 취소되었습니다.";

const UNAUTHORIZED_MESSAGE: &str = "인증이 만료되었습니다. 다시 로그인해 주세요.";
const FORBIDDEN_MESSAGE: &str = "접근 권한이 없습니다.";
const NOT_FOUND_MESSAGE: &str = "요청한 리소스를 찾을 수 없습니다.";
const RATE_LIMIT_MESSAGE: &str = "요청이 너무 많습니다. 잠시 후 다시 시도해 주세요.";
const SERVER_ERROR_MESSAGE: &str = "서버에 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";
const BAD_GATEWAY_MESSAGE: &str = "서버 응답이 올바르지 않습니다. 잠시 후 다시 시도해 주세요.";
const UNAVAILABLE_MESSAGE: &str = "서비스를 일시적으로 사용할 수 없습니다. 잠시 후 다시 시도해 주세요.";

/// Map an HTTP status to an error kind and localized user message.
///
/// Statuses outside the table always classify as `Api` (never `Unknown`)
/// with a `"({status}): {message}"` string so the code stays visible.
pub(crate) fn classify_status(status: u16, raw_message: &str) -> (ErrorKind, String) {
    match status {
        400 => (ErrorKind::Validation, VALIDATION_MESSAGE.to_string()),
        401 => (ErrorKind::Api, UNAUTHORIZED_MESSAGE.to_string()),
        403 => (ErrorKind::Api, FORBIDDEN_MESSAGE.to_string()),
        404 => (ErrorKind::Api, NOT_FOUND_MESSAGE.to_string()),
        408 => (ErrorKind::Timeout, TIMEOUT_MESSAGE.to_string()),
        429 => (ErrorKind::Api, RATE_LIMIT_MESSAGE.to_string()),
        500 => (ErrorKind::Api, SERVER_ERROR_MESSAGE.to_string()),
        502 => (ErrorKind::Api, BAD_GATEWAY_MESSAGE.to_string()),
        503 => (ErrorKind::Api, UNAVAILABLE_MESSAGE.to_string()),
        _ => (ErrorKind::Api, format!("({status}): {raw_message}")),
    }
}

/// Localized message for a status code, without constructing an error.
pub fn user_message_for_status(status: u16, raw_message: &str) -> String {
    classify_status(status, raw_message).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_statuses_use_the_localized_table() {
        let cases: [(u16, ErrorKind, &str); 9] = [
            (400, ErrorKind::Validation, VALIDATION_MESSAGE),
            (401, ErrorKind::Api, UNAUTHORIZED_MESSAGE),
            (403, ErrorKind::Api, FORBIDDEN_MESSAGE),
            (404, ErrorKind::Api, NOT_FOUND_MESSAGE),
            (408, ErrorKind::Timeout, TIMEOUT_MESSAGE),
            (429, ErrorKind::Api, RATE_LIMIT_MESSAGE),
            (500, ErrorKind::Api, SERVER_ERROR_MESSAGE),
            (502, ErrorKind::Api, BAD_GATEWAY_MESSAGE),
            (503, ErrorKind::Api, UNAVAILABLE_MESSAGE),
        ];
        for (status, kind, message) in cases {
            let (got_kind, got_message) = classify_status(status, "raw");
            assert_eq!(got_kind, kind, "status {status}");
            assert_eq!(got_message, message, "status {status}");
        }
    }

    #[test]
    fn unmapped_statuses_embed_code_and_message() {
        let (kind, message) = classify_status(418, "I'm a teapot");
        assert_eq!(kind, ErrorKind::Api);
        assert_eq!(message, "(418): I'm a teapot");

        let (kind, _) = classify_status(511, "auth required");
        assert_eq!(kind, ErrorKind::Api);
    }
}
