use std::ops::RangeInclusive;

use anyhow::{Context, Result};

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let mut contained = 0;
    let mut overlapping = 0;

    for line in input.lines() {
        let (first, second) =
            parse_pair(line).with_context(|| format!("malformed assignment pair: {:?}", line))?;
        if contains(&first, &second) || contains(&second, &first) {
            contained += 1;
        }
        if first.start() <= second.end() && second.start() <= first.end() {
            overlapping += 1;
        }
    }

    Ok((contained, overlapping))
}

fn parse_pair(line: &str) -> Option<(RangeInclusive<u32>, RangeInclusive<u32>)> {
    let (first, second) = line.split_once(',')?;
    Some((parse_range(first)?, parse_range(second)?))
}

fn parse_range(s: &str) -> Option<RangeInclusive<u32>> {
    let (begin, end) = s.split_once('-')?;
    Some(begin.parse().ok()?..=end.parse().ok()?)
}

fn contains(outer: &RangeInclusive<u32>, inner: &RangeInclusive<u32>) -> bool {
    outer.start() <= inner.start() && inner.end() <= outer.end()
}
