use anyhow::{bail, ensure, Context, Result};

pub fn day3(input: &str) -> Result<(u32, u32)> {
    let lines: Vec<&str> = input.lines().collect();

    let mut part1 = 0;
    for line in &lines {
        ensure!(line.len() % 2 == 0, "odd rucksack size: {:?}", line);
        let (first, second) = line.split_at(line.len() / 2);
        let shared = item_set(first)? & item_set(second)?;
        part1 += lowest_priority(shared)
            .with_context(|| format!("no item in both compartments of {:?}", line))?;
    }

    let mut part2 = 0;
    for group in lines.chunks_exact(3) {
        let mut badge = u64::MAX;
        for line in group {
            badge &= item_set(line)?;
        }
        part2 += lowest_priority(badge).context("no item shared by the whole group")?;
    }

    Ok((part1, part2))
}

/// Bitmask with bit `n` set iff an item of priority `n` is present.
fn item_set(items: &str) -> Result<u64> {
    let mut set = 0;
    for item in items.bytes() {
        set |= 1 << priority(item)?;
    }
    Ok(set)
}

fn priority(item: u8) -> Result<u32> {
    match item {
        b'a'..=b'z' => Ok((item - b'a') as u32 + 1),
        b'A'..=b'Z' => Ok((item - b'A') as u32 + 27),
        _ => bail!("invalid item {:?}", item as char),
    }
}

fn lowest_priority(set: u64) -> Option<u32> {
    (set != 0).then(|| set.trailing_zeros())
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day3() -> Result<()> {
        let example = indoc! {"
            vJrwpWtwJgWrhcsFMMfFFhFp
            jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL
            PmmdzqPrVvPwwTWBwg
            wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn
            ttgJtRGJQctTZtZT
            CrZsJsPPZsGzwwsLwLmpwMDw
        "};
        assert_eq!(day3(example)?, (157, 70));
        assert!(day3("abc1\n").is_err());
        Ok(())
    }
}
