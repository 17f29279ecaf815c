use anyhow::{Context, Result};

pub fn day6(input: &str) -> Result<(usize, usize)> {
    let stream = input.trim_end().as_bytes();
    Ok((
        find_marker(stream, 4).context("no start-of-packet marker")?,
        find_marker(stream, 14).context("no start-of-message marker")?,
    ))
}

/// 1-based position of the last character of the first window of `length`
/// pairwise-distinct characters.
fn find_marker(stream: &[u8], length: usize) -> Option<usize> {
    stream
        .windows(length)
        .position(all_distinct)
        .map(|position| position + length)
}

fn all_distinct(window: &[u8]) -> bool {
    let mut seen = 0u128;
    for &byte in window {
        let bit = 1u128 << (byte % 128);
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}
