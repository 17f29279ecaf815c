use std::collections::VecDeque;

use anyhow::{Context, Result};
use thiserror::Error;

pub fn day12(input: &str) -> Result<(u32, u32)> {
    let graph = Graph::parse(input)?;

    let from_start = graph.flood_from(graph.start());
    let part1 = from_start
        .get(graph.end())
        .with_context(|| format!("no path from {:?} to {:?}", graph.start(), graph.end()))?;

    // seeding every lowest cell at once gives the minimum over all of them
    let from_lowest = graph.flood_from_any(graph.lowest_cells());
    let part2 = from_lowest
        .get(graph.end())
        .context("end marker unreachable from every lowest cell")?;

    Ok((part1, part2))
}

/// Grid coordinate as `(row, col)`.
pub type Coord = (usize, usize);

#[derive(Debug, Error, PartialEq)]
pub enum MalformedGrid {
    #[error("empty grid")]
    Empty,
    #[error("row {row} is {len} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("invalid elevation {character:?} at {coord:?}")]
    InvalidElevation { character: char, coord: Coord },
    #[error("missing {0:?} marker")]
    MissingMarker(char),
    #[error("duplicate {marker:?} marker at {coord:?}")]
    DuplicateMarker { marker: char, coord: Coord },
}

/// Heightmap with unique start and end markers.
///
/// Elevations are fixed once the graph is built; all exploration state lives
/// in the [`Distances`] a flood returns, so any number of independent floods
/// can run over the same graph.
#[derive(Debug)]
pub struct Graph {
    heights: Vec<u8>,
    rows: usize,
    cols: usize,
    start: Coord,
    end: Coord,
}

impl Graph {
    /// Builds the graph from the character matrix: `a`-`z` map to
    /// elevations 1-26, the `S` marker is elevation 1 and the `E` marker
    /// elevation 26. Exactly one of each marker is required.
    pub fn parse(input: &str) -> Result<Self, MalformedGrid> {
        let mut heights = Vec::new();
        let mut cols = 0;
        let mut rows = 0;
        let mut start = None;
        let mut end = None;

        for (row, line) in input.lines().enumerate() {
            if row == 0 {
                cols = line.len();
            } else if line.len() != cols {
                return Err(MalformedGrid::RaggedRow {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
            for (col, character) in line.chars().enumerate() {
                let height = match character {
                    'S' => {
                        if start.replace((row, col)).is_some() {
                            return Err(MalformedGrid::DuplicateMarker {
                                marker: 'S',
                                coord: (row, col),
                            });
                        }
                        1
                    }
                    'E' => {
                        if end.replace((row, col)).is_some() {
                            return Err(MalformedGrid::DuplicateMarker {
                                marker: 'E',
                                coord: (row, col),
                            });
                        }
                        26
                    }
                    'a'..='z' => character as u8 - b'a' + 1,
                    _ => {
                        return Err(MalformedGrid::InvalidElevation {
                            character,
                            coord: (row, col),
                        })
                    }
                };
                heights.push(height);
            }
            rows += 1;
        }

        if rows == 0 || cols == 0 {
            return Err(MalformedGrid::Empty);
        }

        Ok(Graph {
            heights,
            rows,
            cols,
            start: start.ok_or(MalformedGrid::MissingMarker('S'))?,
            end: end.ok_or(MalformedGrid::MissingMarker('E'))?,
        })
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn height(&self, (row, col): Coord) -> u8 {
        self.heights[row * self.cols + col]
    }

    /// Coordinates of every cell at the grid's lowest elevation.
    pub fn lowest_cells(&self) -> Vec<Coord> {
        let Some(lowest) = self.heights.iter().copied().min() else {
            return Vec::new();
        };
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&coord| self.height(coord) == lowest)
            .collect()
    }

    fn neighbors(&self, (row, col): Coord) -> impl Iterator<Item = Coord> + '_ {
        [
            (row.wrapping_sub(1), col),
            (row + 1, col),
            (row, col.wrapping_sub(1)),
            (row, col + 1),
        ]
        .into_iter()
        .filter(move |&(r, c)| r < self.rows && c < self.cols)
    }

    /// A step may climb at most one elevation unit; any descent is legal.
    fn step_allowed(&self, from: Coord, to: Coord) -> bool {
        self.height(to) <= self.height(from) + 1
    }

    /// Breadth-first flood from a single source.
    pub fn flood_from(&self, source: Coord) -> Distances {
        self.flood_from_any([source])
    }

    /// Breadth-first flood seeded with every source at distance 0, which
    /// yields each cell's minimum distance to any of the sources.
    pub fn flood_from_any(&self, sources: impl IntoIterator<Item = Coord>) -> Distances {
        let mut distances = Distances {
            cols: self.cols,
            distances: vec![None; self.heights.len()],
        };
        let mut queue = VecDeque::new();

        for source in sources {
            if distances.set_if_closer(source, 0) {
                queue.push_back((source, 0));
            }
        }

        while let Some((cell, distance)) = queue.pop_front() {
            for neighbor in self.neighbors(cell) {
                if self.step_allowed(cell, neighbor) && distances.set_if_closer(neighbor, distance + 1)
                {
                    queue.push_back((neighbor, distance + 1));
                }
            }
        }

        distances
    }
}

/// Minimum step distances from a flood's sources. Cells the flood never
/// reached stay unset, which [`Distances::get`] keeps distinct from a
/// distance of zero.
#[derive(Debug)]
pub struct Distances {
    cols: usize,
    distances: Vec<Option<u32>>,
}

impl Distances {
    pub fn get(&self, (row, col): Coord) -> Option<u32> {
        self.distances[row * self.cols + col]
    }

    /// Records `distance` if the cell is unset or currently further away.
    fn set_if_closer(&mut self, (row, col): Coord, distance: u32) -> bool {
        let slot = &mut self.distances[row * self.cols + col];
        match *slot {
            Some(existing) if existing <= distance => false,
            _ => {
                *slot = Some(distance);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Sabqponm
        abcryxxl
        accszExk
        acctuvwj
        abdefghi
    "};

    #[test]
    fn test_day12() -> Result<()> {
        assert_eq!(day12(EXAMPLE)?, (31, 29));
        Ok(())
    }

    #[test]
    fn step_rule() -> Result<()> {
        // heights: S=1, e=5, f=6, g=7, a=1, E=26
        let graph = Graph::parse("SefgaE")?;
        assert!(graph.step_allowed((0, 1), (0, 2))); // 5 -> 6
        assert!(!graph.step_allowed((0, 1), (0, 3))); // 5 -> 7
        assert!(graph.step_allowed((0, 1), (0, 4))); // 5 -> 1
        assert!(graph.step_allowed((0, 3), (0, 0))); // 7 -> 1
        Ok(())
    }

    #[test]
    fn unreachable_end_keeps_the_sentinel() -> Result<()> {
        // S cannot climb to z, so E is never reached
        let graph = Graph::parse("SzE")?;
        let flood = graph.flood_from(graph.start());
        assert_eq!(flood.get(graph.start()), Some(0));
        assert_eq!(flood.get(graph.end()), None);
        assert!(day12("SzE").is_err());
        Ok(())
    }

    /// Fixed-point relaxation over all cells; slow but obviously correct.
    fn reference_distances(graph: &Graph, sources: &[Coord]) -> Vec<Option<u32>> {
        let mut distances = vec![None; graph.rows * graph.cols];
        for &(row, col) in sources {
            distances[row * graph.cols + col] = Some(0);
        }
        loop {
            let mut changed = false;
            for row in 0..graph.rows {
                for col in 0..graph.cols {
                    let Some(distance) = distances[row * graph.cols + col] else {
                        continue;
                    };
                    for (r, c) in graph.neighbors((row, col)) {
                        if !graph.step_allowed((row, col), (r, c)) {
                            continue;
                        }
                        let slot = &mut distances[r * graph.cols + c];
                        if slot.map_or(true, |existing| existing > distance + 1) {
                            *slot = Some(distance + 1);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                return distances;
            }
        }
    }

    const SYNTHETIC: [&str; 3] = [
        "SabcdefghijklmnopqrstuvwxyzE",
        "SzE",
        indoc! {"
            Saceg
            zzzzi
            Egeck
        "},
    ];

    #[test]
    fn bfs_matches_reference() -> Result<()> {
        for input in SYNTHETIC.into_iter().chain([EXAMPLE]) {
            let graph = Graph::parse(input)?;
            let flood = graph.flood_from(graph.start());
            let reference = reference_distances(&graph, &[graph.start()]);
            for row in 0..graph.rows {
                for col in 0..graph.cols {
                    assert_eq!(
                        flood.get((row, col)),
                        reference[row * graph.cols + col],
                        "distance mismatch at {:?} in {:?}",
                        (row, col),
                        input
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn multi_source_flood_is_pointwise_minimum() -> Result<()> {
        let graph = Graph::parse(EXAMPLE)?;
        let s1 = (0, 0);
        let s2 = (4, 7);
        let combined = graph.flood_from_any([s1, s2]);
        let first = graph.flood_from(s1);
        let second = graph.flood_from(s2);
        for row in 0..5 {
            for col in 0..8 {
                let expected = match (first.get((row, col)), second.get((row, col))) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
                assert_eq!(combined.get((row, col)), expected);
            }
        }
        Ok(())
    }

    #[test]
    fn flood_without_sources_reaches_nothing() -> Result<()> {
        let graph = Graph::parse("SaE")?;
        let flood = graph.flood_from_any([]);
        assert_eq!(flood.get((0, 0)), None);
        assert_eq!(flood.get((0, 2)), None);
        Ok(())
    }

    #[test]
    fn lowest_cells_include_the_start_marker() -> Result<()> {
        let graph = Graph::parse(EXAMPLE)?;
        let lowest = graph.lowest_cells();
        assert!(lowest.contains(&graph.start()));
        assert!(lowest.iter().all(|&coord| graph.height(coord) == 1));
        assert_eq!(lowest.len(), 6);
        Ok(())
    }

    #[test]
    fn malformed_grids() {
        assert_eq!(
            Graph::parse("").unwrap_err(),
            MalformedGrid::Empty
        );
        assert_eq!(
            Graph::parse("Sab").unwrap_err(),
            MalformedGrid::MissingMarker('E')
        );
        assert_eq!(
            Graph::parse("abE").unwrap_err(),
            MalformedGrid::MissingMarker('S')
        );
        assert_eq!(
            Graph::parse("SaEbE").unwrap_err(),
            MalformedGrid::DuplicateMarker {
                marker: 'E',
                coord: (0, 4)
            }
        );
        assert_eq!(
            Graph::parse("SS\naE").unwrap_err(),
            MalformedGrid::DuplicateMarker {
                marker: 'S',
                coord: (0, 1)
            }
        );
        assert_eq!(
            Graph::parse("Sa\nabE").unwrap_err(),
            MalformedGrid::RaggedRow {
                row: 1,
                len: 3,
                expected: 2
            }
        );
        assert_eq!(
            Graph::parse("S E").unwrap_err(),
            MalformedGrid::InvalidElevation {
                character: ' ',
                coord: (0, 1)
            }
        );
    }
}
