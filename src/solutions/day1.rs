use anyhow::{Context, Result};

pub fn day1(input: &str) -> Result<(u64, u64)> {
    let mut totals = Vec::new();
    let mut current = 0;
    for line in input.lines() {
        if line.is_empty() {
            totals.push(current);
            current = 0;
        } else {
            current += line.parse::<u64>()?;
        }
    }
    totals.push(current);

    totals.sort_unstable_by(|a, b| b.cmp(a));
    let max = *totals.first().context("empty input")?;
    Ok((max, totals.iter().take(3).sum()))
}
