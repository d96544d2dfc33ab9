//! 에러 타입 — 도메인별 에러 정의

/// Solaudit 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SolauditError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 리포트 조회/업로드/삭제 에러
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// 데이터 형식 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 리포트 작업 에러
///
/// 백엔드와의 통신 결과를 사용자 관점 분류로 나눕니다.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 잘못된 입력 (파일 미선택, 확장자 오류) — 네트워크 호출 전에 걸러짐
    #[error("validation failed: {0}")]
    Validation(String),

    /// 백엔드가 404를 반환
    #[error("not found: {0}")]
    NotFound(String),

    /// 응답 자체를 받지 못함
    #[error("backend unreachable: {0}")]
    Connectivity(String),

    /// 그 외 non-2xx 응답
    #[error("backend returned {status}: {detail}")]
    Application { status: u16, detail: String },

    /// 2xx 응답이지만 본문 형식이 예상과 다름
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

/// 데이터 형식 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 리포트 ID 형식 오류
    #[error("invalid report id: '{0}'")]
    ReportId(String),

    /// 알 수 없는 정렬 키
    #[error("unknown sort field: '{0}' (expected: contract_name, number_of_vulnerabilities, submission_date)")]
    SortField(String),

    /// 알 수 없는 정렬 방향
    #[error("unknown sort order: '{0}' (expected: asc, desc)")]
    SortOrder(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_top_level() {
        let err: SolauditError = ConfigError::FileNotFound {
            path: "solaudit.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, SolauditError::Config(_)));
        assert!(err.to_string().contains("solaudit.toml"));
    }

    #[test]
    fn application_error_display_includes_status() {
        let err = ReportError::Application {
            status: 500,
            detail: "Internal server error. Please try again.".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("Internal server error"));
    }

    #[test]
    fn parse_error_lists_expected_values() {
        let err = ParseError::SortField("severity".to_owned());
        let msg = err.to_string();
        assert!(msg.contains("severity"));
        assert!(msg.contains("submission_date"));
    }
}
