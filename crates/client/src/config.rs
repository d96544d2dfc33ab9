//! 클라이언트 설정
//!
//! [`ClientConfig`]는 core의 [`SolauditConfig`](solaudit_core::config::SolauditConfig)에서
//! 파생되며, 문자열 설정을 타입이 있는 값으로 바꿔 둡니다.
//!
//! # 사용 예시
//! ```ignore
//! use solaudit_core::config::SolauditConfig;
//! use solaudit_client::config::ClientConfig;
//!
//! let core_config = SolauditConfig::default();
//! let config = ClientConfig::from_core(&core_config)?;
//! ```

use std::time::Duration;

use solaudit_core::config::SolauditConfig;
use solaudit_core::types::{SortField, SortOrder};
use url::Url;

use crate::error::ClientError;

/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 리포트 저장소 API 주소
    pub base_url: String,
    /// 요청 전체 타임아웃 (초, 없으면 전송 계층 기본값)
    pub timeout_secs: Option<u64>,
    /// 연결 타임아웃 (초, 없으면 전송 계층 기본값)
    pub connect_timeout_secs: Option<u64>,
    /// 업로드 허용 확장자
    pub allowed_extensions: Vec<String>,
    /// 목록 초기 정렬 키
    pub sort_field: SortField,
    /// 목록 초기 정렬 방향
    pub sort_order: SortOrder,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout_secs: None,
            connect_timeout_secs: None,
            allowed_extensions: vec!["sol".to_owned()],
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ClientConfig {
    /// core 설정에서 클라이언트 설정을 생성합니다.
    pub fn from_core(core: &SolauditConfig) -> Result<Self, ClientError> {
        let sort_field = core.reports.sort_field().map_err(|e| ClientError::Config {
            field: "reports.default_sort_field".to_owned(),
            reason: e.to_string(),
        })?;
        let sort_order = core.reports.sort_order().map_err(|e| ClientError::Config {
            field: "reports.default_sort_order".to_owned(),
            reason: e.to_string(),
        })?;

        let config = Self {
            base_url: core.backend.base_url.clone(),
            timeout_secs: core.backend.timeout_secs,
            connect_timeout_secs: core.backend.connect_timeout_secs,
            allowed_extensions: core.upload.allowed_extensions.clone(),
            sort_field,
            sort_order,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// 경로 결합에 쓰는 기준 URL (항상 `/`로 끝남)
    pub fn endpoint_base(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::Config {
            field: "base_url".to_owned(),
            reason: e.to_string(),
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ClientError> {
        let url = self.endpoint_base()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config {
                field: "base_url".to_owned(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.timeout_secs == Some(0) || self.connect_timeout_secs == Some(0) {
            return Err(ClientError::Config {
                field: "timeout_secs".to_owned(),
                reason: "timeouts must be greater than 0".to_owned(),
            });
        }

        if self.allowed_extensions.is_empty() {
            return Err(ClientError::Config {
                field: "allowed_extensions".to_owned(),
                reason: "at least one extension is required".to_owned(),
            });
        }

        Ok(())
    }
}

/// 클라이언트 설정 빌더
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = Some(secs);
        self
    }

    pub fn allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.allowed_extensions = extensions;
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.config.sort_field = field;
        self.config.sort_order = order;
        self
    }

    /// 설정을 검증하고 `ClientConfig`를 생성합니다.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
