use anyhow::{ensure, Result};

pub fn day8(input: &str) -> Result<(usize, usize)> {
    let grid = parse(input)?;
    Ok((count_visible(&grid), best_scenic_score(&grid)))
}

struct TreeGrid {
    heights: Vec<u8>,
    width: usize,
    height: usize,
}

impl TreeGrid {
    fn get(&self, x: usize, y: usize) -> u8 {
        self.heights[y * self.width + x]
    }
}

fn parse(input: &str) -> Result<TreeGrid> {
    let mut heights = Vec::new();
    let mut width = 0;
    let mut rows = 0;

    for line in input.lines() {
        if rows == 0 {
            width = line.len();
        }
        ensure!(line.len() == width, "ragged row {}: {:?}", rows, line);
        for c in line.bytes() {
            ensure!(c.is_ascii_digit(), "invalid tree height {:?}", c as char);
            heights.push(c - b'0');
        }
        rows += 1;
    }
    ensure!(rows > 0, "empty tree grid");

    Ok(TreeGrid {
        heights,
        width,
        height: rows,
    })
}

fn count_visible(grid: &TreeGrid) -> usize {
    let mut count = 0;
    for y in 0..grid.height {
        for x in 0..grid.width {
            if is_visible(grid, x, y) {
                count += 1;
            }
        }
    }
    count
}

fn is_visible(grid: &TreeGrid, x: usize, y: usize) -> bool {
    let tree = grid.get(x, y);
    (0..x).all(|i| grid.get(i, y) < tree)
        || (x + 1..grid.width).all(|i| grid.get(i, y) < tree)
        || (0..y).all(|i| grid.get(x, i) < tree)
        || (y + 1..grid.height).all(|i| grid.get(x, i) < tree)
}

fn best_scenic_score(grid: &TreeGrid) -> usize {
    let mut best = 0;
    for y in 0..grid.height {
        for x in 0..grid.width {
            best = best.max(scenic_score(grid, x, y));
        }
    }
    best
}

fn scenic_score(grid: &TreeGrid, x: usize, y: usize) -> usize {
    let tree = grid.get(x, y);
    let west = viewing_distance(tree, (0..x).rev().map(|i| grid.get(i, y)));
    let east = viewing_distance(tree, (x + 1..grid.width).map(|i| grid.get(i, y)));
    let north = viewing_distance(tree, (0..y).rev().map(|i| grid.get(x, i)));
    let south = viewing_distance(tree, (y + 1..grid.height).map(|i| grid.get(x, i)));
    west * east * north * south
}

fn viewing_distance(tree: u8, others: impl Iterator<Item = u8>) -> usize {
    let mut distance = 0;
    for other in others {
        distance += 1;
        if other >= tree {
            break;
        }
    }
    distance
}
