#![no_main]

use coded_errors::{Code, MAX_FIELD_OUTPUT_LEN, StructuredError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    let depth = data.first().map_or(0, |b| usize::from(b % 8));

    let mut err = StructuredError::new(text.clone(), Code::new(text.clone()));
    for _ in 0..depth {
        err = StructuredError::wrap(err, text.clone());
    }

    let mut line = String::new();
    err.log_entry().write_to(&mut line).expect("writing to a String cannot fail");
    assert!(line.len() <= (depth + 1) * (2 * MAX_FIELD_OUTPUT_LEN + 32));
});
