//! Driver that times repeated append/prepend against one container.
//!
//! Run with:
//!   cargo build --release --bin perf_append_prepend
//!   ./target/release/perf_append_prepend [repeat_count]
//!
//! The optional positional argument is the repeat count (default 10000).
//! Swap the alias below to drive the linked container instead.

use std::hint::black_box;

use linear_seq::DynamicArray;
#[allow(unused_imports)]
use linear_seq::LinkedSequence;

// type LinearSequence<T> = LinkedSequence<T>;
type LinearSequence<T> = DynamicArray<T>;

const DEFAULT_REPEAT_COUNT: u64 = 10_000;

fn run(times: u64) {
    let mut seq: LinearSequence<String> = LinearSequence::new();
    for _ in 0..times {
        seq.append(black_box(String::from("payload")));
    }
    for _ in 0..times {
        seq.prepend(black_box(String::from("payload")));
    }
    black_box(seq.len());
}

fn main() {
    // Follows the alias, so swapping it cannot leave the message stale.
    println!(
        "LinearSequence = {}",
        std::any::type_name::<LinearSequence<String>>()
    );

    let times = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("repeat count must be an integer"))
        .unwrap_or(DEFAULT_REPEAT_COUNT);
    run(times);

    println!("Finished!");
}
