use anyhow::{ensure, Context, Result};
use nalgebra::Vector2;

pub fn day14(input: &str) -> Result<(usize, usize)> {
    let cave = Cave::parse(input)?;
    Ok((
        cave.clone().pour_until_overflow(),
        cave.pour_until_plugged(),
    ))
}

const SOURCE_X: i32 = 500;

#[derive(Clone, Copy, PartialEq)]
enum Tile {
    Air,
    Rock,
    Sand,
}

#[derive(Clone)]
struct Cave {
    tiles: Vec<Tile>,
    width: usize,
    /// Rows 0..height; the lowest rock sits at `height - 3`, the part-two
    /// floor at `height - 1`.
    height: usize,
    offset_x: i32,
}

impl Cave {
    fn parse(input: &str) -> Result<Self> {
        let mut paths = Vec::new();
        for line in input.lines() {
            let mut points = Vec::new();
            for point in line.split(" -> ") {
                let (x, y) = point
                    .split_once(',')
                    .with_context(|| format!("malformed point {:?}", point))?;
                let point = Vector2::new(x.parse::<i32>()?, y.parse::<i32>()?);
                ensure!(point.y >= 0, "rock above the sand source: {:?}", point);
                points.push(point);
            }
            paths.push(points);
        }

        let max_y = paths
            .iter()
            .flatten()
            .map(|point| point.y)
            .max()
            .context("no rock paths")?;
        let height = (max_y + 3) as usize;
        // wide enough for every rock and for sand piling against the floor
        let min_x = paths
            .iter()
            .flatten()
            .map(|point| point.x)
            .min()
            .unwrap_or(SOURCE_X)
            .min(SOURCE_X - max_y - 2);
        let max_x = paths
            .iter()
            .flatten()
            .map(|point| point.x)
            .max()
            .unwrap_or(SOURCE_X)
            .max(SOURCE_X + max_y + 2);
        let width = (max_x - min_x + 1) as usize;

        let mut cave = Cave {
            tiles: vec![Tile::Air; width * height],
            width,
            height,
            offset_x: min_x,
        };

        for path in &paths {
            for &point in path {
                cave.set(point, Tile::Rock);
            }
            for segment in path.windows(2) {
                let step = (segment[1] - segment[0]).map(|coord| coord.signum());
                ensure!(
                    step.x == 0 || step.y == 0,
                    "diagonal rock segment {:?} -> {:?}",
                    segment[0],
                    segment[1]
                );
                let mut point = segment[0] + step;
                while point != segment[1] {
                    cave.set(point, Tile::Rock);
                    point += step;
                }
            }
        }

        Ok(cave)
    }

    fn index(&self, point: Vector2<i32>) -> usize {
        point.y as usize * self.width + (point.x - self.offset_x) as usize
    }

    fn get(&self, point: Vector2<i32>) -> Tile {
        self.tiles[self.index(point)]
    }

    fn set(&mut self, point: Vector2<i32>, tile: Tile) {
        let index = self.index(point);
        self.tiles[index] = tile;
    }

    fn blocked(&self, point: Vector2<i32>, with_floor: bool) -> bool {
        if with_floor && point.y >= self.height as i32 - 1 {
            return true;
        }
        self.get(point) != Tile::Air
    }

    /// Lets one grain fall from the source: straight down, then down-left,
    /// then down-right. Returns where it comes to rest, or `None` once it
    /// falls past the lowest rock.
    fn drop_grain(&self, with_floor: bool) -> Option<Vector2<i32>> {
        let lowest_rock = self.height as i32 - 3;
        let mut grain = Vector2::new(SOURCE_X, 0);
        loop {
            if !with_floor && grain.y >= lowest_rock {
                return None;
            }
            let next = [Vector2::new(0, 1), Vector2::new(-1, 1), Vector2::new(1, 1)]
                .into_iter()
                .map(|step| grain + step)
                .find(|&candidate| !self.blocked(candidate, with_floor));
            match next {
                Some(candidate) => grain = candidate,
                None => return Some(grain),
            }
        }
    }

    fn pour_until_overflow(mut self) -> usize {
        let mut grains = 0;
        while let Some(rest) = self.drop_grain(false) {
            self.set(rest, Tile::Sand);
            grains += 1;
        }
        grains
    }

    fn pour_until_plugged(mut self) -> usize {
        let source = Vector2::new(SOURCE_X, 0);
        let mut grains = 0;
        while let Some(rest) = self.drop_grain(true) {
            self.set(rest, Tile::Sand);
            grains += 1;
            if rest == source {
                break;
            }
        }
        grains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        498,4 -> 498,6 -> 496,6
        503,4 -> 502,4 -> 502,9 -> 494,9
    "};

    #[test]
    fn test_day14() -> Result<()> {
        assert_eq!(day14(EXAMPLE)?, (24, 93));
        Ok(())
    }

    #[test]
    fn sand_slides_off_a_lone_rock() -> Result<()> {
        // nothing can come to rest on a single rock cell: every grain
        // slides off its edge and falls past it
        let (overflow, plugged) = day14("500,2 -> 500,2\n")?;
        assert_eq!(overflow, 0);
        // with the floor the full triangle fills around it: rows of width
        // 1, 3, 5 and 7, minus the rock cell
        assert_eq!(plugged, 15);
        Ok(())
    }

    #[test]
    fn rejects_diagonal_segments() {
        assert!(day14("494,3 -> 498,9\n").is_err());
    }
}
