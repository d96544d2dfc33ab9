#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`transport`]: 리포트 저장소 trait과 HTTP 구현 (연결 실패와 에러 응답 구분)
//! - [`upload`]: 확장자 검증 후 컨트랙트 업로드, 업로드 폼 상태
//! - [`query`]: 검색어 필터링과 정렬 (순수 함수)
//! - [`search`]: 검색/정렬 입력과 정렬 메뉴 상태
//! - [`reports`]: 조회/삭제 오케스트레이션, 리포트 목록 화면 상태
//! - [`detail`]: 리포트 상세 화면 상태와 출력 문서
//! - [`markup`]: 취약점 설명의 경량 마크업 렌더링
//! - [`route`]: 화면 경로 해석
//! - [`notify`]: 사용자 알림
//! - [`messages`]: 사용자에게 보이는 문구
//! - [`loading`], [`generation`]: 로딩 플래그와 요청 세대 가드
//! - [`config`]: 클라이언트 설정 (core 설정에서 변환)
//! - [`error`]: 도메인 에러 타입
//!
//! # 흐름
//!
//! ```text
//! UploadForm -> UploadWorkflow --\
//! ReportHistory -> ReportService --> ReportStore (HttpReportStore) -> backend
//! ReportDetailView -> ReportService -/
//! ```

pub mod config;
pub mod detail;
pub mod error;
pub mod generation;
pub mod loading;
pub mod markup;
pub mod messages;
pub mod notify;
pub mod query;
pub mod reports;
pub mod route;
pub mod search;
pub mod transport;
pub mod upload;

// --- 주요 타입 re-export ---

// 저장소
pub use transport::{HttpReportStore, ReportStore};

// 설정
pub use config::{ClientConfig, ClientConfigBuilder};

// 에러
pub use error::{ClientError, ValidationError};

// 화면 상태
pub use detail::{DetailDocument, ReportDetailView};
pub use reports::{DeleteOutcome, ReportCollection, ReportHistory, ReportService};
pub use search::{SearchControls, SortMenu};
pub use upload::{ContractUpload, UploadForm, UploadWorkflow};

// 공용 구성요소
pub use loading::LoadingFlag;
pub use notify::{Notification, NotificationLevel, Notifications, Notifier};
pub use route::Route;
