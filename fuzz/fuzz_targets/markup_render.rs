#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use solaudit_client::markup::{self, LineBreaks, LinkPolicy};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    text: String,
    clickable: bool,
    hard_breaks: bool,
}

fuzz_target!(|input: FuzzInput| {
    let links = if input.clickable {
        LinkPolicy::Clickable
    } else {
        LinkPolicy::Disabled
    };
    let breaks = if input.hard_breaks {
        LineBreaks::Hard
    } else {
        LineBreaks::Soft
    };

    // 어떤 입력이든 패닉 없이 렌더링되어야 함
    let _ = markup::render(&input.text, links, breaks);
});
