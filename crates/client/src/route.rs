//! 경로 라우팅
//!
//! URL 경로를 화면으로 매핑합니다. 정적 세그먼트는 대소문자를 구분하지 않고,
//! 끝의 `/`, 쿼리 문자열, 프래그먼트는 무시합니다.

use std::fmt;

use solaudit_core::types::ReportId;

/// 화면
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` — 홈 + 업로드
    Home,
    /// `/about`
    About,
    /// `/reports` — 목록, 검색, 정렬, 삭제
    Reports,
    /// `/reports/:id` — 상세, 삭제
    ReportDetail(ReportId),
    /// 그 외 모든 경로
    NotFound(String),
}

impl Route {
    /// 경로 문자열을 화면으로 해석합니다.
    pub fn parse(raw: &str) -> Self {
        let path = raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Self::Home,
            [page] if page.eq_ignore_ascii_case("about") => Self::About,
            [page] if page.eq_ignore_ascii_case("reports") => Self::Reports,
            [page, id] if page.eq_ignore_ascii_case("reports") => parse_id(id)
                .map(Self::ReportDetail)
                .unwrap_or_else(|| Self::NotFound(path.to_owned())),
            _ => Self::NotFound(path.to_owned()),
        }
    }

    /// 화면의 대표 경로
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::About => "/about".to_owned(),
            Self::Reports => "/reports".to_owned(),
            Self::ReportDetail(id) => format!("/reports/{id}"),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// 에러 화면에서 제공하는 복귀 경로
    pub fn home_link() -> Self {
        Self::Home
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(segment: &str) -> Option<ReportId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/reports"), Route::Reports);
        assert_eq!(Route::parse("/Reports/"), Route::Reports);
    }

    #[test]
    fn detail_route_with_numeric_id() {
        assert_eq!(
            Route::parse("/reports/42"),
            Route::ReportDetail(ReportId::new(42))
        );
        assert_eq!(
            Route::parse("/reports/42/?tab=results#top"),
            Route::ReportDetail(ReportId::new(42))
        );
    }

    #[test]
    fn non_numeric_id_is_not_found() {
        assert_eq!(
            Route::parse("/reports/abc"),
            Route::NotFound("/reports/abc".to_owned())
        );
        assert!(matches!(Route::parse("/reports/-1"), Route::NotFound(_)));
        assert!(matches!(
            Route::parse("/reports/99999999999999999999999"),
            Route::NotFound(_)
        ));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert!(matches!(Route::parse("/admin"), Route::NotFound(_)));
        assert!(matches!(Route::parse("/reports/1/edit"), Route::NotFound(_)));
    }

    #[test]
    fn path_round_trips_for_known_routes() {
        for route in [
            Route::Home,
            Route::About,
            Route::Reports,
            Route::ReportDetail(ReportId::new(7)),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(Route::home_link().to_string(), "/");
    }
}
