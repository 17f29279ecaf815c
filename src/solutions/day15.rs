use anyhow::{Context, Result};
use nalgebra::Vector2;
use rayon::prelude::*;
use regex::Regex;

const EXAMPLE_SENSOR_COUNT: usize = 14;
const EXAMPLE_ROW_TO_SEARCH: i64 = 10;
const ACTUAL_ROW_TO_SEARCH: i64 = 2_000_000;
const EXAMPLE_MAX_DIMENSION: i64 = 20;
const ACTUAL_MAX_DIMENSION: i64 = 4_000_000;
const TUNING_FREQUENCY_MULTIPLIER: i64 = 4_000_000;

pub fn day15(input: &str) -> Result<(usize, i64)> {
    let sensors = parse(input)?;

    // the example and the actual input search different rows and areas;
    // like the puzzle setup itself we tell them apart by sensor count
    let example = sensors.len() == EXAMPLE_SENSOR_COUNT;
    let row = if example {
        EXAMPLE_ROW_TO_SEARCH
    } else {
        ACTUAL_ROW_TO_SEARCH
    };
    let limit = if example {
        EXAMPLE_MAX_DIMENSION
    } else {
        ACTUAL_MAX_DIMENSION
    };

    let part1 = positions_without_beacon(&sensors, row);
    let beacon = find_distress_beacon(&sensors, limit)
        .context("no position outside every sensor range")?;

    Ok((part1, beacon.x * TUNING_FREQUENCY_MULTIPLIER + beacon.y))
}

struct Sensor {
    position: Vector2<i64>,
    beacon: Vector2<i64>,
    /// Manhattan distance to the closest beacon.
    range: i64,
}

fn parse(input: &str) -> Result<Vec<Sensor>> {
    let pattern =
        Regex::new(r"^Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)$")?;

    let mut sensors = Vec::new();
    for line in input.lines() {
        let (_, [sx, sy, bx, by]) = pattern
            .captures(line)
            .with_context(|| format!("malformed sensor line: {:?}", line))?
            .extract();
        let position = Vector2::new(sx.parse()?, sy.parse()?);
        let beacon = Vector2::new(bx.parse()?, by.parse()?);
        sensors.push(Sensor {
            position,
            beacon,
            range: manhattan(position, beacon),
        });
    }
    Ok(sensors)
}

fn manhattan(a: Vector2<i64>, b: Vector2<i64>) -> i64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Merged, sorted half-open `[start, end)` intervals of x covered by at
/// least one sensor on the given row.
fn covered_intervals(sensors: &[Sensor], row: i64) -> Vec<(i64, i64)> {
    let mut intervals: Vec<(i64, i64)> = sensors
        .iter()
        .filter_map(|sensor| {
            let spread = sensor.range - (sensor.position.y - row).abs();
            (spread >= 0).then(|| (sensor.position.x - spread, sensor.position.x + spread + 1))
        })
        .collect();
    intervals.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn positions_without_beacon(sensors: &[Sensor], row: i64) -> usize {
    let covered: i64 = covered_intervals(sensors, row)
        .iter()
        .map(|(start, end)| end - start)
        .sum();

    // known beacons sit inside their own sensor's interval
    let mut beacons_on_row: Vec<i64> = sensors
        .iter()
        .filter(|sensor| sensor.beacon.y == row)
        .map(|sensor| sensor.beacon.x)
        .collect();
    beacons_on_row.sort_unstable();
    beacons_on_row.dedup();

    covered as usize - beacons_on_row.len()
}

/// The single position in `[0, limit]²` no sensor covers.
fn find_distress_beacon(sensors: &[Sensor], limit: i64) -> Option<Vector2<i64>> {
    (0..limit + 1).into_par_iter().find_map_any(|row| {
        let mut x = 0;
        for (start, end) in covered_intervals(sensors, row) {
            if start > x {
                break;
            }
            x = x.max(end);
            if x > limit {
                return None;
            }
        }
        (x <= limit).then(|| Vector2::new(x, row))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Sensor at x=2, y=18: closest beacon is at x=-2, y=15
        Sensor at x=9, y=16: closest beacon is at x=10, y=16
        Sensor at x=13, y=2: closest beacon is at x=15, y=3
        Sensor at x=12, y=14: closest beacon is at x=10, y=16
        Sensor at x=10, y=20: closest beacon is at x=10, y=16
        Sensor at x=14, y=17: closest beacon is at x=10, y=16
        Sensor at x=8, y=7: closest beacon is at x=2, y=10
        Sensor at x=2, y=0: closest beacon is at x=2, y=10
        Sensor at x=0, y=11: closest beacon is at x=2, y=10
        Sensor at x=20, y=14: closest beacon is at x=25, y=17
        Sensor at x=17, y=20: closest beacon is at x=21, y=22
        Sensor at x=16, y=7: closest beacon is at x=15, y=3
        Sensor at x=14, y=3: closest beacon is at x=15, y=3
        Sensor at x=20, y=1: closest beacon is at x=15, y=3
    "};

    #[test]
    fn test_day15() -> Result<()> {
        assert_eq!(day15(EXAMPLE)?, (26, 56000011));
        Ok(())
    }

    #[test]
    fn intervals_merge_on_the_searched_row() -> Result<()> {
        let sensors = parse(EXAMPLE)?;
        // row 10 is fully covered from x=-2 to x=24
        assert_eq!(covered_intervals(&sensors, 10), vec![(-2, 25)]);
        Ok(())
    }

    #[test]
    fn distress_beacon_position() -> Result<()> {
        let sensors = parse(EXAMPLE)?;
        assert_eq!(
            find_distress_beacon(&sensors, 20),
            Some(Vector2::new(14, 11))
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_sensor_line() {
        assert!(day15("Sensor at x=1, y=2\n").is_err());
    }
}
