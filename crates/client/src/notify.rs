//! 사용자 알림
//!
//! 작업 성공을 알리는 짧은 메시지입니다. 화면 전환 뒤에도 보여야 하는
//! 알림은 `persistent`로 표시합니다.

use std::sync::{Arc, Mutex, PoisonError};

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// 알림 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// 화면 전환 후에도 유지할지 여부
    pub persistent: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            persistent: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            persistent: false,
        }
    }

    /// 화면 전환 후에도 유지되도록 표시합니다.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

/// 알림 출력 대상
///
/// 프론트엔드(터미널 등)가 구현하고, 각 화면에 주입됩니다.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// 알림을 메모리에 모아 두는 구현
///
/// 복제본은 같은 목록을 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 쌓인 알림의 복사본
    pub fn snapshot(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 쌓인 알림을 모두 꺼냅니다.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for Notifications {
    fn notify(&self, notification: Notification) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
