//! 클라이언트 에러 타입
//!
//! [`ClientError`]는 리포트 저장소와의 통신 및 업로드 검증에서 발생하는
//! 모든 에러를 표현합니다. `From<ClientError> for SolauditError` 변환이
//! 구현되어 있어 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use solaudit_core::error::{ConfigError, ReportError, SolauditError};

/// 업로드 전 로컬 검증 실패
///
/// 네트워크 호출 전에 걸러지며 전송 계층에 도달하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// 파일이 선택되지 않음
    #[error("no file selected")]
    NoFileSelected,

    /// 허용되지 않은 확장자
    #[error("invalid extension: '{file_name}'")]
    InvalidExtension {
        /// 선택된 파일명
        file_name: String,
        /// 허용 확장자 목록
        allowed: Vec<String>,
    },
}

/// 클라이언트 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 로컬 검증 실패
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 백엔드가 404를 반환
    #[error("not found")]
    NotFound {
        /// 응답 본문의 `detail` 필드
        detail: Option<String>,
    },

    /// 응답을 받지 못함 (연결 실패, 타임아웃 등)
    #[error("backend unreachable: {0}")]
    Connectivity(String),

    /// 그 외 non-2xx 응답
    #[error("backend returned status {status}")]
    Application {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문의 `detail` 필드
        detail: Option<String>,
    },

    /// 성공 응답의 본문을 해석할 수 없음
    #[error("invalid response body: {0}")]
    Decode(String),

    /// 클라이언트 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 업로드 파일 읽기 실패
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// 응답 자체를 받지 못한 경우인지 여부
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// 응답 상태 코드 (응답을 받은 경우만)
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 서버가 제공한 상세 메시지
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::NotFound { detail } | Self::Application { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// 메트릭 `result` 레이블 값
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Connectivity(_) => "connectivity",
            Self::Application { .. } => "application",
            Self::Decode(_) => "decode",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

impl From<ClientError> for SolauditError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(v) => {
                SolauditError::Report(ReportError::Validation(v.to_string()))
            }
            ClientError::NotFound { detail } => SolauditError::Report(ReportError::NotFound(
                detail.unwrap_or_else(|| "not found".to_owned()),
            )),
            ClientError::Connectivity(msg) => {
                SolauditError::Report(ReportError::Connectivity(msg))
            }
            ClientError::Application { status, detail } => {
                SolauditError::Report(ReportError::Application {
                    status,
                    detail: detail.unwrap_or_default(),
                })
            }
            ClientError::Decode(msg) => SolauditError::Report(ReportError::InvalidResponse(msg)),
            ClientError::Config { field, reason } => {
                SolauditError::Config(ConfigError::InvalidValue { field, reason })
            }
            ClientError::Io(e) => SolauditError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ClientError::from(ValidationError::InvalidExtension {
            file_name: "notes.txt".to_owned(),
            allowed: vec!["sol".to_owned()],
        });
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn status_and_detail_accessors() {
        let err = ClientError::Application {
            status: 422,
            detail: Some("bad encoding".to_owned()),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.server_detail(), Some("bad encoding"));
        assert!(!err.is_connectivity());

        let err = ClientError::NotFound { detail: None };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_detail(), None);

        let err = ClientError::Connectivity("connection refused".to_owned());
        assert_eq!(err.status(), None);
        assert!(err.is_connectivity());
    }

    #[test]
    fn converts_to_report_error_kinds() {
        let err: SolauditError = ClientError::Connectivity("refused".to_owned()).into();
        assert!(matches!(
            err,
            SolauditError::Report(ReportError::Connectivity(_))
        ));

        let err: SolauditError = ClientError::NotFound { detail: None }.into();
        assert!(matches!(err, SolauditError::Report(ReportError::NotFound(_))));

        let err: SolauditError = ClientError::from(ValidationError::NoFileSelected).into();
        assert!(matches!(
            err,
            SolauditError::Report(ReportError::Validation(_))
        ));
    }

    #[test]
    fn config_error_converts_to_config() {
        let err: SolauditError = ClientError::Config {
            field: "base_url".to_owned(),
            reason: "relative url".to_owned(),
        }
        .into();
        assert!(matches!(err, SolauditError::Config(_)));
    }
}
