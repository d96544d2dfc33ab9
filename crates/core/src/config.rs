//! 설정 관리 — solaudit.toml 파싱 및 런타임 설정
//!
//! [`SolauditConfig`]는 클라이언트 전체 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SOLAUDIT_BACKEND_BASE_URL=http://api:8000` 형식)
//! 3. 설정 파일 (`solaudit.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), solaudit_core::error::SolauditError> {
//! use solaudit_core::config::SolauditConfig;
//!
//! let config = SolauditConfig::load("solaudit.toml").await?;
//! let config = SolauditConfig::parse("[backend]\nbase_url = \"http://api:8000\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, SolauditError};
use crate::types::{SortField, SortOrder};

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "solaudit.toml";

/// Solaudit 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolauditConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 백엔드 연결 설정
    #[serde(default)]
    pub backend: BackendConfig,
    /// 리포트 목록 기본값
    #[serde(default)]
    pub reports: ReportsConfig,
    /// 업로드 검증 설정
    #[serde(default)]
    pub upload: UploadConfig,
}

impl SolauditConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SolauditError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일을 로드하되, 파일이 없으면 기본값에서 시작합니다.
    ///
    /// 환경변수 오버라이드는 두 경우 모두 적용됩니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SolauditError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(SolauditError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SolauditError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SolauditError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SolauditError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SolauditError> {
        toml::from_str(toml_str).map_err(|e| {
            SolauditError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SOLAUDIT_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "SOLAUDIT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SOLAUDIT_GENERAL_LOG_FORMAT");

        override_string(&mut self.backend.base_url, "SOLAUDIT_BACKEND_BASE_URL");
        override_opt_u64(
            &mut self.backend.timeout_secs,
            "SOLAUDIT_BACKEND_TIMEOUT_SECS",
        );
        override_opt_u64(
            &mut self.backend.connect_timeout_secs,
            "SOLAUDIT_BACKEND_CONNECT_TIMEOUT_SECS",
        );

        override_string(
            &mut self.reports.default_sort_field,
            "SOLAUDIT_REPORTS_DEFAULT_SORT_FIELD",
        );
        override_string(
            &mut self.reports.default_sort_order,
            "SOLAUDIT_REPORTS_DEFAULT_SORT_ORDER",
        );

        override_csv(
            &mut self.upload.allowed_extensions,
            "SOLAUDIT_UPLOAD_ALLOWED_EXTENSIONS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SolauditError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        let url = url::Url::parse(&self.backend.base_url)
            .map_err(|e| invalid("backend.base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "backend.base_url",
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
            ));
        }

        if self.backend.timeout_secs == Some(0) {
            return Err(invalid("backend.timeout_secs", "must be greater than 0"));
        }
        if self.backend.connect_timeout_secs == Some(0) {
            return Err(invalid(
                "backend.connect_timeout_secs",
                "must be greater than 0",
            ));
        }

        self.reports.sort_field()?;
        self.reports.sort_order()?;

        if self.upload.allowed_extensions.is_empty()
            || self
                .upload
                .allowed_extensions
                .iter()
                .any(|ext| ext.trim().trim_start_matches('.').is_empty())
        {
            return Err(invalid(
                "upload.allowed_extensions",
                "must list at least one non-empty extension",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> SolauditError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.into(),
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 백엔드 연결 설정
///
/// 타임아웃을 지정하지 않으면 HTTP 클라이언트 기본값을 따릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 리포트 저장소 API 주소
    pub base_url: String,
    /// 요청 전체 타임아웃 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// 연결 타임아웃 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// 리포트 목록 기본값
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// 초기 정렬 키
    pub default_sort_field: String,
    /// 초기 정렬 방향
    pub default_sort_order: String,
}

impl ReportsConfig {
    pub fn sort_field(&self) -> Result<SortField, SolauditError> {
        self.default_sort_field
            .parse()
            .map_err(|e: crate::error::ParseError| {
                invalid("reports.default_sort_field", e.to_string())
            })
    }

    pub fn sort_order(&self) -> Result<SortOrder, SolauditError> {
        self.default_sort_order
            .parse()
            .map_err(|e: crate::error::ParseError| {
                invalid("reports.default_sort_order", e.to_string())
            })
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_sort_field: SortField::default().as_str().to_owned(),
            default_sort_order: SortOrder::default().as_str().to_owned(),
        }
    }
}

/// 업로드 검증 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// 허용 확장자 (점 없이, 대소문자 무시)
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["sol".to_owned()],
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_u64(target: &mut Option<u64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
