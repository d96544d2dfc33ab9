//! 사용자에게 보여주는 메시지
//!
//! 에러 종류별 문구를 한곳에 모아 두고, 각 작업(업로드, 목록, 상세)이
//! 어떤 문구를 고르는지 결정합니다.

use crate::error::{ClientError, ValidationError};

/// 응답을 받지 못했을 때 항상 같은 문구를 사용합니다.
pub const CONNECTIVITY: &str = "Server connection error. We are currently experiencing connectivity issues with the server. Please try again later.";

pub const NO_FILE_SELECTED: &str = "Please select a file before uploading.";
pub const INVALID_EXTENSION: &str =
    "Invalid file extension. Please upload only .sol files for auditing.";
pub const INVALID_ENCODING: &str = "Invalid input data encoding format. Please try again.";
pub const UPLOAD_FAILED: &str = "An error occurred while processing the file";
pub const UPLOAD_SUCCEEDED: &str = "Your smart contract has been audited successfully.";

pub const NO_REPORTS_YET: &str =
    "No reports have been uploaded yet. Please upload a report to view details.";
pub const FETCH_FAILED: &str = "An error occurred while fetching reports. Please try again later.";
pub const NO_MATCHING_REPORTS: &str = "No reports found";

pub const REPORT_NOT_FOUND: &str = "No reports found. Please upload a report to view details.";
pub const NO_VULNERABILITIES: &str = "No vulnerabilities found.";

pub const REPORT_DELETED: &str = "Report deleted successfully.";

/// 로컬 검증 실패 문구
pub fn validation(err: &ValidationError) -> String {
    match err {
        ValidationError::NoFileSelected => NO_FILE_SELECTED.to_owned(),
        ValidationError::InvalidExtension { allowed, .. } => match allowed.as_slice() {
            [only] if only.eq_ignore_ascii_case("sol") => INVALID_EXTENSION.to_owned(),
            _ => {
                let list = allowed
                    .iter()
                    .map(|ext| format!(".{}", ext.trim_start_matches('.')))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Invalid file extension. Please upload only {list} files for auditing.")
            }
        },
    }
}

/// 업로드 실패 문구
///
/// 422는 고정 문구, 그 외에는 서버 상세 > 연결 문구 > 기본 문구 순서로 고릅니다.
pub fn upload_failure(err: &ClientError) -> String {
    match err {
        ClientError::Validation(v) => validation(v),
        ClientError::Application { status: 422, .. } => INVALID_ENCODING.to_owned(),
        ClientError::Connectivity(_) => CONNECTIVITY.to_owned(),
        other => other.server_detail().unwrap_or(UPLOAD_FAILED).to_owned(),
    }
}

/// 목록 조회 실패 문구
pub fn list_failure(err: &ClientError) -> &'static str {
    match err {
        ClientError::NotFound { .. } => NO_REPORTS_YET,
        ClientError::Connectivity(_) => CONNECTIVITY,
        _ => FETCH_FAILED,
    }
}

/// 상세 조회 실패 문구
pub fn detail_failure(err: &ClientError) -> &'static str {
    match err {
        ClientError::NotFound { .. } => REPORT_NOT_FOUND,
        ClientError::Connectivity(_) => CONNECTIVITY,
        _ => FETCH_FAILED,
    }
}
