//! 업로드 워크플로
//!
//! 선택된 파일의 확장자를 확인하고, 리포트 저장소에 제출한 뒤,
//! 성공하면 새 리포트의 상세 화면으로 이동합니다.
//!
//! 확장자 검사는 빠른 거부용이며 최종 검증은 서버가 합니다.
//! 검증에 실패한 업로드는 네트워크 호출을 하지 않습니다.

use std::path::Path;
use std::sync::Arc;

use metrics::counter;
use solaudit_core::metrics::{LABEL_REASON, UPLOAD_REJECTED_TOTAL};
use solaudit_core::types::ReportId;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ValidationError};
use crate::loading::LoadingFlag;
use crate::messages;
use crate::notify::{Notification, Notifier};
use crate::route::Route;
use crate::transport::ReportStore;

/// 업로드할 컨트랙트 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl ContractUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// 디스크에서 파일을 읽습니다. 파일명은 경로의 마지막 구성요소입니다.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.file_name, self.bytes)
    }
}

/// 파일 선택 여부와 확장자를 확인합니다.
///
/// 마지막 `.` 뒤의 문자열이 허용 목록 중 하나와 대소문자 구분 없이 같아야 합니다.
/// `.`이 없는 파일명은 거부합니다.
pub fn validate_selection(
    file_name: Option<&str>,
    allowed: &[String],
) -> Result<(), ValidationError> {
    let Some(file_name) = file_name else {
        return Err(ValidationError::NoFileSelected);
    };

    let accepted = file_name.rsplit_once('.').is_some_and(|(_, ext)| {
        allowed
            .iter()
            .any(|a| ext.eq_ignore_ascii_case(a.trim().trim_start_matches('.')))
    });
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::InvalidExtension {
            file_name: file_name.to_owned(),
            allowed: allowed.to_vec(),
        })
    }
}

/// 검증 후 제출하는 워크플로
pub struct UploadWorkflow<S: ReportStore> {
    store: Arc<S>,
    allowed_extensions: Vec<String>,
    loading: LoadingFlag,
}

impl<S: ReportStore> UploadWorkflow<S> {
    pub fn new(store: Arc<S>, config: &ClientConfig) -> Self {
        Self {
            store,
            allowed_extensions: config.allowed_extensions.clone(),
            loading: LoadingFlag::new(),
        }
    }

    /// 제출 중 여부를 관찰하는 플래그
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// 경로의 파일명을 먼저 검증한 뒤 파일을 읽습니다.
    ///
    /// 확장자가 맞지 않으면 파일을 열지 않습니다.
    pub async fn read_checked(&self, path: impl AsRef<Path>) -> Result<ContractUpload, ClientError> {
        let path = path.as_ref();
        let file_name = path.file_name().map(|n| n.to_string_lossy());
        validate_selection(file_name.as_deref(), &self.allowed_extensions).map_err(reject)?;
        ContractUpload::from_path(path).await
    }

    /// 파일을 검증하고 제출합니다.
    ///
    /// 검증을 통과하면 정확히 한 번 네트워크 호출을 하며, 그동안 로딩 플래그가 켜집니다.
    pub async fn submit(&self, selection: Option<ContractUpload>) -> Result<ReportId, ClientError> {
        let Some(upload) = selection else {
            return Err(reject(ValidationError::NoFileSelected));
        };
        validate_selection(Some(upload.file_name()), &self.allowed_extensions).map_err(reject)?;

        let _guard = self.loading.begin();
        info!(file_name = upload.file_name(), size = upload.len(), "submitting contract for audit");
        let receipt = self.store.create_report(upload).await?;
        info!(report_id = %receipt.report_id, "contract audited");
        Ok(receipt.report_id)
    }
}

/// 거부 사유를 메트릭과 로그에 남깁니다.
fn reject(e: ValidationError) -> ClientError {
    let reason = match e {
        ValidationError::NoFileSelected => "no_file",
        ValidationError::InvalidExtension { .. } => "extension",
    };
    counter!(UPLOAD_REJECTED_TOTAL, LABEL_REASON => reason).increment(1);
    info!(reason, "upload rejected before submission");
    e.into()
}

/// 홈 화면의 업로드 폼 상태
pub struct UploadForm<S: ReportStore> {
    workflow: UploadWorkflow<S>,
    notifier: Arc<dyn Notifier>,
    selected: Option<ContractUpload>,
    error: Option<String>,
}

impl<S: ReportStore> UploadForm<S> {
    pub fn new(workflow: UploadWorkflow<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            workflow,
            notifier,
            selected: None,
            error: None,
        }
    }

    /// 파일을 선택하면 이전 에러가 지워집니다.
    pub fn select(&mut self, upload: ContractUpload) {
        self.selected = Some(upload);
        self.error = None;
    }

    pub fn selected(&self) -> Option<&ContractUpload> {
        self.selected.as_ref()
    }

    /// 폼 아래에 표시할 에러 문구
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.workflow.loading().is_loading()
    }

    /// 제출합니다. 성공하면 이동할 화면을 돌려주고 성공 알림을 띄웁니다.
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;
        match self.workflow.submit(self.selected.clone()).await {
            Ok(id) => {
                self.notifier
                    .notify(Notification::success(messages::UPLOAD_SUCCEEDED));
                Some(Route::ReportDetail(id))
            }
            Err(e) => {
                warn!(error = %e, "upload failed");
                self.error = Some(messages::upload_failure(&e));
                None
            }
        }
    }
}
