#![no_main]

use coded_errors::{Code, StructuredError, chain, definitions, with_code, with_default_code};
use libfuzzer_sys::fuzz_target;

// Input layout: first byte picks the option mix, the rest is split on 0xFF
// into message, code label and cause text.
fuzz_target!(|data: &[u8]| {
    let Some((&mode, rest)) = data.split_first() else {
        return;
    };
    let mut parts = rest.split(|&b| b == 0xFF).map(String::from_utf8_lossy);
    let message = parts.next().unwrap_or_default().into_owned();
    let label = parts.next().unwrap_or_default().into_owned();
    let cause = parts.next().unwrap_or_default().into_owned();

    let code = Code::new(label);
    let inner = StructuredError::new(cause, definitions::NOT_FOUND);
    let options = match mode % 4 {
        0 => vec![],
        1 => vec![with_code(code.clone())],
        2 => vec![with_default_code(code.clone())],
        _ => vec![with_default_code(code.clone()), with_code(code.clone())],
    };

    let err = StructuredError::wrap_with(inner, message, options);

    assert!(!err.message().is_empty());
    assert!(!err.code().is_empty());
    assert!(chain::contains_code(&err, &definitions::NOT_FOUND));
    if mode % 2 == 1 && !code.is_empty() {
        assert_eq!(err.code(), &code);
    } else {
        assert_eq!(err.code(), &definitions::NOT_FOUND);
    }
    let _ = err.to_string();
});
