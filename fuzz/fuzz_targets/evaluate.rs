#![no_main]

extern crate arbitrary;
extern crate libfuzzer_sys;
extern crate railbird;

use libfuzzer_sys::fuzz_target;

use railbird::core::{BoardCard, Card, evaluate};

#[derive(Debug, Clone, arbitrary::Arbitrary)]
struct Input {
    pub private: Vec<Card>,
    pub board: Vec<BoardCard>,
}

fuzz_target!(|input: Input| {
    let first = evaluate(&input.private, &input.board);
    let second = evaluate(&input.private, &input.board);
    assert_eq!(first, second);

    assert!(first.tie_breaks.len() <= 5);
    assert!(first.rank_index() >= -1);
    assert!(first.rank_index() <= 9);
});
