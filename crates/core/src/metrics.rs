//! 메트릭 상수 및 설명 등록
//!
//! 클라이언트가 기록하는 메트릭의 이름과 설명을 한곳에서 정의합니다.
//! 호출부는 이 상수로 `metrics::counter!()`, `metrics::histogram!()`을
//! 호출합니다. 레코더가 설치되지 않으면 기록은 무시됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `solaudit_`
//! - 영역: `client_`, `upload_`, `reports_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(solaudit_core::metrics::REPORTS_DELETED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 엔드포인트 레이블 키 (create_report, list_reports, get_report, delete_report)
pub const LABEL_ENDPOINT: &str = "endpoint";

/// 결과 레이블 키 (success, not_found, connectivity, application, decode)
pub const LABEL_RESULT: &str = "result";

/// 거부 사유 레이블 키 (no_file, extension)
pub const LABEL_REASON: &str = "reason";

// ─── Transport 메트릭 ──────────────────────────────────────────────

/// 백엔드 요청 수 (counter, labels: endpoint, result)
pub const CLIENT_REQUESTS_TOTAL: &str = "solaudit_client_requests_total";

/// 백엔드 요청 소요 시간 (histogram, 초, label: endpoint)
pub const CLIENT_REQUEST_DURATION_SECONDS: &str = "solaudit_client_request_duration_seconds";

/// 응답을 받지 못한 요청 수 (counter)
pub const CLIENT_CONNECTIVITY_ERRORS_TOTAL: &str = "solaudit_client_connectivity_errors_total";

// ─── Workflow 메트릭 ───────────────────────────────────────────────

/// 네트워크 호출 전에 거부된 업로드 수 (counter, label: reason)
pub const UPLOAD_REJECTED_TOTAL: &str = "solaudit_upload_rejected_total";

/// 삭제 완료된 리포트 수 (counter)
pub const REPORTS_DELETED_TOTAL: &str = "solaudit_reports_deleted_total";

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 레코더 설치 후 한 번 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        CLIENT_REQUESTS_TOTAL,
        "Total number of report store requests by endpoint and outcome"
    );
    describe_histogram!(
        CLIENT_REQUEST_DURATION_SECONDS,
        "Report store request latency in seconds"
    );
    describe_counter!(
        CLIENT_CONNECTIVITY_ERRORS_TOTAL,
        "Total number of requests that received no response"
    );
    describe_counter!(
        UPLOAD_REJECTED_TOTAL,
        "Total number of uploads rejected before any network call"
    );
    describe_counter!(
        REPORTS_DELETED_TOTAL,
        "Total number of reports deleted by the user"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METRIC_NAMES: &[&str] = &[
        CLIENT_REQUESTS_TOTAL,
        CLIENT_REQUEST_DURATION_SECONDS,
        CLIENT_CONNECTIVITY_ERRORS_TOTAL,
        UPLOAD_REJECTED_TOTAL,
        REPORTS_DELETED_TOTAL,
    ];

    #[test]
    fn all_metrics_start_with_solaudit_prefix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.starts_with("solaudit_"),
                "Metric '{name}' does not start with 'solaudit_' prefix"
            );
        }
    }

    #[test]
    fn describe_all_does_not_panic() {
        describe_all();
    }

    #[test]
    fn label_keys_are_lowercase() {
        for label in [LABEL_ENDPOINT, LABEL_RESULT, LABEL_REASON] {
            assert_eq!(label.to_lowercase(), label);
        }
    }
}
