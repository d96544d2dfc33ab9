//! 경량 마크업 렌더링
//!
//! 취약점 설명에 섞여 오는 마크다운 부분집합을 터미널용 일반 텍스트로 바꿉니다.
//!
//! | 입력 | 출력 |
//! |---|---|
//! | `# 제목` | `제목` |
//! | `**강조**`, `__강조__`, `*강조*` | `강조` (`__`는 단어 안에서는 무시) |
//! | `` `code` `` | `` `code` `` (내부는 변환하지 않음) |
//! | ```` ``` ```` 블록 | 4칸 들여쓰기 |
//! | `- 항목`, `* 항목`, `+ 항목` | `• 항목` |
//! | `[text](url)` | [`LinkPolicy`]에 따라 `text (url)` 또는 `text` |
//! | `<https://..>` | `https://..` |

use std::sync::LazyLock;

use regex::{Captures, Regex};

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code regex is valid"));
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]\(([^)\s]+)(?:\s+[^)]*)?\)").expect("link regex is valid")
});
static AUTOLINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(https?://[^>\s]+)>").expect("autolink regex is valid"));
static STRONG_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(\S(?:[^*]*\S)?)\*\*").expect("strong emphasis regex is valid")
});
static STRONG_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__(\S(?:[^_]*\S)?)__").expect("underscore emphasis regex is valid")
});
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*)\*").expect("emphasis regex is valid"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.*?)\s*#*$").expect("heading regex is valid"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(.*)$").expect("bullet regex is valid"));

const CODE_INDENT: &str = "    ";
const BULLET_MARK: &str = "• ";

/// 링크 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// 따라갈 수 있도록 URL을 함께 표시
    Clickable,
    /// 링크 텍스트만 표시
    Disabled,
}

/// 줄바꿈 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreaks {
    /// 한 줄바꿈도 그대로 유지
    Hard,
    /// 빈 줄 사이의 연속된 줄을 한 문단으로 합침
    Soft,
}

/// 마크업 텍스트를 일반 텍스트로 렌더링합니다.
pub fn render(text: &str, links: LinkPolicy, breaks: LineBreaks) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open: Option<String> = None;
    let mut in_fence = false;

    for raw in text.lines() {
        let line = raw.trim_end();

        if line.trim_start().starts_with("```") {
            flush(&mut out, &mut open);
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            out.push(format!("{CODE_INDENT}{line}"));
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            flush(&mut out, &mut open);
            if out.last().is_some_and(|l| !l.is_empty()) {
                out.push(String::new());
            }
            continue;
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            flush(&mut out, &mut open);
            out.push(inline(group(&caps, 1), links));
            continue;
        }

        if let Some(caps) = BULLET.captures(trimmed) {
            flush(&mut out, &mut open);
            open = Some(format!("{BULLET_MARK}{}", inline(group(&caps, 1), links)));
            continue;
        }

        let rendered = inline(trimmed, links);
        match (breaks, open.as_mut()) {
            (LineBreaks::Soft, Some(paragraph)) => {
                paragraph.push(' ');
                paragraph.push_str(&rendered);
            }
            (LineBreaks::Soft, None) => open = Some(rendered),
            (LineBreaks::Hard, _) => {
                flush(&mut out, &mut open);
                out.push(rendered);
            }
        }
    }
    flush(&mut out, &mut open);

    while out.last().is_some_and(String::is_empty) {
        out.pop();
    }
    out.join("\n")
}

fn flush(out: &mut Vec<String>, open: &mut Option<String>) {
    if let Some(block) = open.take() {
        out.push(block);
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// 한 줄 안의 인라인 요소를 처리합니다. 코드 스팬 내부는 그대로 둡니다.
fn inline(text: &str, links: LinkPolicy) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in INLINE_CODE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&spans(&text[last..whole.start()], links));
        out.push('`');
        out.push_str(group(&caps, 1));
        out.push('`');
        last = whole.end();
    }
    out.push_str(&spans(&text[last..], links));
    out
}

fn spans(text: &str, links: LinkPolicy) -> String {
    let linked = LINK.replace_all(text, |caps: &Captures<'_>| {
        let label = group(caps, 1);
        let target = group(caps, 2);
        match links {
            LinkPolicy::Clickable if label.is_empty() || label == target => target.to_owned(),
            LinkPolicy::Clickable => format!("{label} ({target})"),
            LinkPolicy::Disabled => label.to_owned(),
        }
    });
    let linked = AUTOLINK.replace_all(&linked, "$1");
    let strong = STRONG_STAR.replace_all(&linked, "$1");
    let strong = strip_underscore_strong(&strong);
    EMPHASIS.replace_all(&strong, "$1").into_owned()
}

/// `__강조__`는 바깥쪽이 단어 문자에 붙어 있지 않을 때만 강조로 봅니다.
///
/// `Proxy.__gap`, `foo__bar__baz` 같은 식별자는 그대로 둡니다.
fn strip_underscore_strong(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(caps) = STRONG_UNDERSCORE.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
            // 구분자는 ASCII이므로 한 바이트 뒤에서 다시 찾습니다.
            out.push_str(&text[pos..=whole.start()]);
            pos = whole.start() + 1;
            continue;
        }
        out.push_str(&text[pos..whole.start()]);
        out.push_str(group(&caps, 1));
        pos = whole.end();
    }
    out.push_str(&text[pos..]);
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
