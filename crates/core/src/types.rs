//! 도메인 타입 — 감사 리포트 데이터 모델
//!
//! 백엔드가 돌려주는 JSON 구조를 그대로 표현합니다.
//! 클라이언트는 받은 리포트의 필드를 수정하지 않으며, 다시 조회하거나
//! 로컬 목록에서 제거할 뿐입니다.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;

/// 백엔드가 쓰는 날짜 형식 (`DD-MM-YYYY`) 과 ISO 대체 형식
const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d"];

/// 백엔드가 쓰는 시각 형식 (`HH:MM AM`) 과 24시간 대체 형식
const TIME_FORMATS: &[&str] = &["%I:%M %p", "%H:%M:%S", "%H:%M"];

/// 리포트 식별자
///
/// 서버가 발급하며 변경되지 않습니다. JSON에서는 정수 또는
/// 숫자 문자열 모두 허용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl ReportId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ReportId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ReportId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseError::ReportId(s.to_owned()))
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// 리포트 요약 (목록 조회 결과의 한 행)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// 리포트 ID
    pub report_id: ReportId,
    /// 제출된 컨트랙트 파일명
    pub contract_name: String,
    /// 제출 날짜 (예: `16-10-2026`)
    pub submission_date: String,
    /// 제출 시각 (예: `03:45 PM`)
    pub submission_time: String,
    /// 발견된 취약점 수
    pub number_of_vulnerabilities: u32,
}

impl ReportSummary {
    /// 제출 날짜와 시각을 하나의 시점으로 합칩니다.
    ///
    /// 두 필드 중 하나라도 알려진 형식이 아니면 `None`을 반환합니다.
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        let date = DATE_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(self.submission_date.trim(), f).ok())?;
        let time = TIME_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(self.submission_time.trim(), f).ok())?;
        Some(date.and_time(time))
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({} {}, {} vulnerabilities)",
            self.report_id,
            self.contract_name,
            self.submission_date,
            self.submission_time,
            self.number_of_vulnerabilities,
        )
    }
}

/// 리포트 상세
///
/// 요약 필드와 함께 취약점 상세 목록을 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub summary: ReportSummary,
    /// 취약점 상세 (순서 유지)
    #[serde(default)]
    pub vulnerabilities_details: Vec<Vulnerability>,
}

impl ReportDetail {
    /// 취약점이 하나도 없는 리포트인지 여부 (표시 분기용)
    pub fn has_no_vulnerabilities(&self) -> bool {
        self.summary.number_of_vulnerabilities == 0
    }

    /// 모든 취약점의 결과 수 합계
    pub fn total_results(&self) -> usize {
        self.vulnerabilities_details
            .iter()
            .map(|v| v.results.len())
            .sum()
    }
}

/// 취약점 한 종류
///
/// 텍스트 필드에는 가벼운 마크업(링크, 강조, 코드)이 들어 있을 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(default, deserialize_with = "nullable_string")]
    pub vulnerability_type: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub impact: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub confidence: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub recommendation: String,
    /// 구체적인 발생 위치 목록
    #[serde(default)]
    pub results: Vec<VulnerabilityResult>,
}

impl Vulnerability {
    /// `1 result` / `N results`
    pub fn result_label(&self) -> String {
        match self.results.len() {
            1 => "1 result".to_owned(),
            n => format!("{n} results"),
        }
    }
}

/// 취약점의 구체적인 발생 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityResult {
    /// 설명 (줄바꿈 포함 가능)
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    /// 소스 위치
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
}

/// 업로드 성공 응답 (`201 Created`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub report_id: ReportId,
    #[serde(default)]
    pub message: Option<String>,
}

/// 정렬 키
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// 컨트랙트 이름
    ContractName,
    /// 취약점 수
    NumberOfVulnerabilities,
    /// 제출 날짜 + 시각
    #[default]
    SubmissionDate,
}

impl SortField {
    pub const ALL: [SortField; 3] = [
        SortField::ContractName,
        SortField::NumberOfVulnerabilities,
        SortField::SubmissionDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContractName => "contract_name",
            Self::NumberOfVulnerabilities => "number_of_vulnerabilities",
            Self::SubmissionDate => "submission_date",
        }
    }

    /// 메뉴에 표시하는 이름
    pub fn label(&self) -> &'static str {
        match self {
            Self::ContractName => "Contract Name",
            Self::NumberOfVulnerabilities => "Number of vulnerabilities",
            Self::SubmissionDate => "Date",
        }
    }
}

impl FromStr for SortField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contract_name" => Ok(Self::ContractName),
            "number_of_vulnerabilities" => Ok(Self::NumberOfVulnerabilities),
            "submission_date" => Ok(Self::SubmissionDate),
            _ => Err(ParseError::SortField(s.to_owned())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// 오름차순
    Asc,
    /// 내림차순
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// 오름차순 기준 비교 결과에 방향을 적용합니다.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseError::SortOrder(s.to_owned())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
