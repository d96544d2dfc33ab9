//! 리포트 저장소 API 추상화
//!
//! [`ReportStore`] trait은 백엔드 호출의 단일 진입점입니다. 실제 코드는
//! [`HttpReportStore`]를, 테스트는 `MockReportStore`를 사용합니다.
//!
//! # 에러 분류
//!
//! - 응답을 받지 못함 (연결 실패, 타임아웃): `ClientError::Connectivity`
//! - 404: `ClientError::NotFound`
//! - 그 외 non-2xx: `ClientError::Application` (본문의 `detail` 문자열 포함)
//! - 2xx지만 본문 해석 실패: `ClientError::Decode`
//!
//! # Endpoints
//!
//! | 작업 | 요청 |
//! |---|---|
//! | 리포트 생성 | `POST upload_contract` (multipart, 필드 `contract`) |
//! | 목록 | `GET reports/` |
//! | 상세 | `GET reports/{id}` |
//! | 삭제 | `DELETE reports/{id}` |

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use solaudit_core::metrics::{
    CLIENT_CONNECTIVITY_ERRORS_TOTAL, CLIENT_REQUEST_DURATION_SECONDS, CLIENT_REQUESTS_TOTAL,
    LABEL_ENDPOINT, LABEL_RESULT,
};
use solaudit_core::types::{ReportDetail, ReportId, ReportSummary, UploadReceipt};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::error::ClientError;
use crate::upload::ContractUpload;

/// multipart 폼에서 파일을 담는 필드 이름
pub const UPLOAD_FIELD: &str = "contract";

/// 리포트 저장소 작업
///
/// `Send + Sync + 'static`이므로 `Arc`로 여러 화면에서 공유할 수 있습니다.
pub trait ReportStore: Send + Sync + 'static {
    /// 컨트랙트 파일을 업로드하고 분석 결과 리포트를 생성합니다.
    fn create_report(
        &self,
        upload: ContractUpload,
    ) -> impl Future<Output = Result<UploadReceipt, ClientError>> + Send;

    /// 모든 리포트 요약을 조회합니다.
    ///
    /// 200 응답의 본문이 배열이 아니면 빈 목록을 돌려줍니다.
    fn list_reports(
        &self,
    ) -> impl Future<Output = Result<Vec<ReportSummary>, ClientError>> + Send;

    /// 리포트 상세를 조회합니다.
    fn get_report(
        &self,
        id: ReportId,
    ) -> impl Future<Output = Result<ReportDetail, ClientError>> + Send;

    /// 리포트를 삭제합니다.
    fn delete_report(&self, id: ReportId) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// `reqwest` 기반 구현
///
/// 타임아웃은 설정에 있을 때만 적용하고 재시도는 하지 않습니다.
#[derive(Debug, Clone)]
pub struct HttpReportStore {
    client: reqwest::Client,
    base: Url,
}

impl HttpReportStore {
    /// 클라이언트 설정으로 생성합니다.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(|e| ClientError::Config {
            field: "backend".to_owned(),
            reason: format!("failed to build http client: {e}"),
        })?;

        Ok(Self {
            client,
            base: config.endpoint_base()?,
        })
    }

    /// 기본 설정에 주소만 바꿔 생성합니다 (테스트, 프록시용).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let config = ClientConfigBuilder::new().base_url(base_url).build()?;
        Self::new(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|e| ClientError::Config {
            field: "base_url".to_owned(),
            reason: format!("cannot join '{path}': {e}"),
        })
    }

    /// 요청을 보내고 상태 코드로 결과를 분류합니다.
    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let started = Instant::now();
        let result = request.send().await;
        histogram!(CLIENT_REQUEST_DURATION_SECONDS, LABEL_ENDPOINT => endpoint)
            .record(started.elapsed().as_secs_f64());

        match result {
            Err(e) => {
                counter!(CLIENT_CONNECTIVITY_ERRORS_TOTAL).increment(1);
                debug!(endpoint, error = %e, "no response from report store");
                Err(ClientError::Connectivity(e.to_string()))
            }
            Ok(response) if response.status().is_success() => {
                debug!(endpoint, status = response.status().as_u16(), "report store responded");
                Ok(response)
            }
            Ok(response) => Err(error_from_response(response).await),
        }
    }

    /// 요청을 보내고 본문을 해석한 뒤 결과를 메트릭에 기록합니다.
    async fn call<T, F, Fut>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        decode: F,
    ) -> Result<T, ClientError>
    where
        F: FnOnce(Response) -> Fut + Send,
        Fut: Future<Output = Result<T, ClientError>> + Send,
        T: Send,
    {
        let result = match self.send(endpoint, request).await {
            Ok(response) => decode(response).await,
            Err(e) => Err(e),
        };
        let label = match &result {
            Ok(_) => "success",
            Err(e) => e.kind_label(),
        };
        counter!(CLIENT_REQUESTS_TOTAL, LABEL_ENDPOINT => endpoint, LABEL_RESULT => label)
            .increment(1);
        result
    }
}

impl ReportStore for HttpReportStore {
    async fn create_report(&self, upload: ContractUpload) -> Result<UploadReceipt, ClientError> {
        let url = self.endpoint("upload_contract")?;
        let (file_name, bytes) = upload.into_parts();
        debug!(file_name = %file_name, size = bytes.len(), "uploading contract");

        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part(UPLOAD_FIELD, part);
        let request = self.client.post(url).multipart(form);
        self.call("create_report", request, decode_json::<UploadReceipt>).await
    }

    async fn list_reports(&self) -> Result<Vec<ReportSummary>, ClientError> {
        let url = self.endpoint("reports/")?;
        let request = self.client.get(url);
        self.call("list_reports", request, decode_list).await
    }

    async fn get_report(&self, id: ReportId) -> Result<ReportDetail, ClientError> {
        let url = self.endpoint(&format!("reports/{id}"))?;
        let request = self.client.get(url);
        self.call("get_report", request, decode_json::<ReportDetail>).await
    }

    async fn delete_report(&self, id: ReportId) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("reports/{id}"))?;
        let request = self.client.delete(url);
        self.call("delete_report", request, discard).await
    }
}

/// 에러 응답을 분류합니다. 본문의 `detail`이 문자열일 때만 사용합니다.
async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let detail = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_owned)),
        Err(e) => {
            debug!(status = status.as_u16(), error = %e, "failed to read error body");
            None
        }
    };
    debug!(status = status.as_u16(), detail = ?detail, "report store returned an error");

    if status == StatusCode::NOT_FOUND {
        ClientError::NotFound { detail }
    } else {
        ClientError::Application {
            status: status.as_u16(),
            detail,
        }
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// 목록 본문은 배열이 아니면 빈 목록으로 취급합니다.
async fn decode_list(response: Response) -> Result<Vec<ReportSummary>, ClientError> {
    let body = response
        .bytes()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
    if !value.is_array() {
        warn!("report list body is not an array, treating as empty");
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn discard(_response: Response) -> Result<(), ClientError> {
    Ok(())
}

#[cfg(test)]
pub use mock::{MockFailure, MockReportStore};


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_under_base_path() {
        let store = HttpReportStore::with_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(
            store.endpoint("reports/").unwrap().as_str(),
            "http://localhost:8000/api/reports/"
        );
        assert_eq!(
            store.endpoint("reports/42").unwrap().as_str(),
            "http://localhost:8000/api/reports/42"
        );
        assert_eq!(
            store.endpoint("upload_contract").unwrap().as_str(),
            "http://localhost:8000/api/upload_contract"
        );
    }

    #[test]
    fn with_base_url_rejects_invalid_url() {
        assert!(HttpReportStore::with_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn mock_store_counts_calls() {
        let store = MockReportStore::new();
        store.list_reports().await.unwrap();
        store.delete_report(ReportId::new(1)).await.unwrap();
        assert_eq!(store.list_calls(), 1);
        assert_eq!(store.delete_calls(), 1);
        assert_eq!(store.total_calls(), 2);
    }

    #[tokio::test]
    async fn mock_store_failure_applies_to_all_calls() {
        let store = MockReportStore::new().failing_with(MockFailure::Connectivity);
        let err = store.list_reports().await.unwrap_err();
        assert!(err.is_connectivity());
        let err = store.get_report(ReportId::new(1)).await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
