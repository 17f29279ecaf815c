use anyhow::{bail, Context, Result};
use indexmap::IndexMap;

const TOTAL_SPACE: u64 = 70_000_000;
const NEEDED_SPACE: u64 = 30_000_000;

pub fn day7(input: &str) -> Result<(u64, u64)> {
    let sizes = directory_sizes(input)?;

    let part1 = sizes.values().filter(|&&size| size <= 100_000).sum();

    let used = *sizes.get("/").context("no root directory listed")?;
    let to_free = (used + NEEDED_SPACE).saturating_sub(TOTAL_SPACE);
    let part2 = sizes
        .values()
        .copied()
        .filter(|&size| size >= to_free)
        .min()
        .context("no directory large enough to free the needed space")?;

    Ok((part1, part2))
}

/// Total size of every directory in the session, keyed by absolute path.
/// A file's size counts towards the directory it is listed in and all of
/// that directory's ancestors.
fn directory_sizes(input: &str) -> Result<IndexMap<String, u64>> {
    let mut sizes = IndexMap::new();
    let mut cwd: Vec<&str> = Vec::new();

    for line in input.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["$", "cd", "/"] => cwd.clear(),
            ["$", "cd", ".."] => {
                cwd.pop().context("cd .. above the root")?;
            }
            ["$", "cd", name] => cwd.push(*name),
            ["$", "ls"] | ["dir", _] => {}
            [size, _name] => {
                let size: u64 = size
                    .parse()
                    .with_context(|| format!("malformed listing line: {:?}", line))?;
                for depth in 0..=cwd.len() {
                    *sizes.entry(path_of(&cwd[..depth])).or_insert(0) += size;
                }
            }
            _ => bail!("unrecognized terminal line: {:?}", line),
        }
    }

    Ok(sizes)
}

fn path_of(components: &[&str]) -> String {
    if components.is_empty() {
        return "/".to_string();
    }
    let mut path = String::new();
    for component in components {
        path.push('/');
        path.push_str(component);
    }
    path
}
