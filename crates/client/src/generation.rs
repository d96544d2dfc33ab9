//! 요청 세대 카운터
//!
//! 화면이 새 요청을 시작할 때마다 세대를 올리고, 응답이 돌아왔을 때
//! 자기 세대가 최신이 아니면 버립니다. 느린 이전 응답이 새 상태를
//! 덮어쓰지 않게 합니다.

/// 요청에 붙는 세대 번호
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// 화면 단위 세대 카운터
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: u64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 세대를 시작하고 그 티켓을 돌려줍니다.
    pub fn begin(&mut self) -> RequestTicket {
        self.current = self.current.wrapping_add(1);
        RequestTicket(self.current)
    }

    /// 티켓이 가장 최근에 발급된 것인지 여부
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_is_current() {
        let mut generation = RequestGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(second.generation() > first.generation());
    }
}
