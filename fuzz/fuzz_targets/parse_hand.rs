#![no_main]

extern crate libfuzzer_sys;
extern crate railbird;

use libfuzzer_sys::fuzz_target;

use railbird::hand_history::batch;

fuzz_target!(|data: &[u8]| {
    let (text, _encoding_warning) = batch::decode_lossy(data);
    for result in batch::parse_iter(&text) {
        if let Ok(record) = result {
            assert!(record.big_blind > 0.0);
            assert!(!record.raw_text.is_empty());
        }
    }
});
