#![no_main]

use libfuzzer_sys::fuzz_target;
use solaudit_client::Route;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let route = Route::parse(raw);

    // 해석된 대표 경로는 다시 같은 화면으로 해석되어야 함
    if !matches!(route, Route::NotFound(_)) {
        assert_eq!(Route::parse(&route.path()), route);
    }
});
