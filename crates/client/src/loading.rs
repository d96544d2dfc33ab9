//! 로딩 상태 플래그
//!
//! 요청 직전에 켜지고 어떤 경로로 끝나든 꺼져야 합니다.
//! [`LoadingFlag::begin`]이 돌려주는 가드가 drop될 때 플래그를 끄므로
//! 에러 반환, 패닉 unwind, future 취소 모두에서 상태가 복구됩니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 페이지 단위 로딩 플래그
///
/// 복제본은 같은 상태를 공유합니다 (렌더러나 테스트가 관찰용으로 보관).
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    active: Arc<AtomicBool>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 처음부터 로딩 중인 상태로 생성합니다 (상세 화면 초기 상태).
    pub fn started() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// 플래그를 켜고, 가드가 drop될 때 끕니다.
    #[must_use = "the flag is cleared as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        self.active.store(true, Ordering::Release);
        LoadingGuard {
            active: Arc::clone(&self.active),
        }
    }
}

/// [`LoadingFlag::begin`]의 RAII 가드
#[derive(Debug)]
pub struct LoadingGuard {
    active: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_sets_and_clears() {
        let flag = LoadingFlag::new();
        assert!(!flag.is_loading());
        {
            let _guard = flag.begin();
            assert!(flag.is_loading());
        }
        assert!(!flag.is_loading());
    }

    #[test]
    fn clones_observe_same_state() {
        let flag = LoadingFlag::new();
        let observer = flag.clone();
        let guard = flag.begin();
        assert!(observer.is_loading());
        drop(guard);
        assert!(!observer.is_loading());
    }

    #[test]
    fn started_flag_clears_after_first_guard() {
        let flag = LoadingFlag::started();
        assert!(flag.is_loading());
        drop(flag.begin());
        assert!(!flag.is_loading());
    }

    #[test]
    fn cleared_on_early_error_return() {
        fn failing(flag: &LoadingFlag) -> Result<u32, std::num::ParseIntError> {
            let _guard = flag.begin();
            let parsed = "boom".parse::<u32>()?;
            Ok(parsed)
        }
        let flag = LoadingFlag::new();
        assert!(failing(&flag).is_err());
        assert!(!flag.is_loading());
    }

    #[tokio::test]
    async fn cleared_when_future_is_dropped() {
        let flag = LoadingFlag::new();
        let observer = flag.clone();
        let pending = async move {
            let _guard = flag.begin();
            std::future::pending::<()>().await;
        };
        let handle = tokio::spawn(pending);
        tokio::task::yield_now().await;
        assert!(observer.is_loading());
        handle.abort();
        let _ = handle.await;
        assert!(!observer.is_loading());
    }
}
