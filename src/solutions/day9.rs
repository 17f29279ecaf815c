use anyhow::{bail, Context, Result};
use nalgebra::Vector2;
use rustc_hash::FxHashSet;

pub fn day9(input: &str) -> Result<(usize, usize)> {
    let motions = parse(input)?;
    Ok((simulate(&motions, 2), simulate(&motions, 10)))
}

struct Motion {
    direction: Vector2<i32>,
    steps: u32,
}

fn parse(input: &str) -> Result<Vec<Motion>> {
    let mut motions = Vec::new();
    for line in input.lines() {
        let (direction, steps) = line
            .split_once(' ')
            .with_context(|| format!("malformed motion: {:?}", line))?;
        let direction = match direction {
            "U" => Vector2::new(0, -1),
            "D" => Vector2::new(0, 1),
            "L" => Vector2::new(-1, 0),
            "R" => Vector2::new(1, 0),
            _ => bail!("unknown direction {:?}", direction),
        };
        motions.push(Motion {
            direction,
            steps: steps.parse()?,
        });
    }
    Ok(motions)
}

/// Moves the head knot step by step and drags the rest of the rope behind
/// it; returns the number of distinct positions the tail visits.
fn simulate(motions: &[Motion], knot_count: usize) -> usize {
    let mut knots = vec![Vector2::new(0, 0); knot_count];
    let mut visited = FxHashSet::default();
    visited.insert((0, 0));

    for motion in motions {
        for _ in 0..motion.steps {
            knots[0] += motion.direction;
            for i in 1..knots.len() {
                let offset: Vector2<i32> = knots[i - 1] - knots[i];
                if offset.x.abs() <= 1 && offset.y.abs() <= 1 {
                    // this knot stays put, so the rest of the rope does too
                    break;
                }
                knots[i] += offset.map(|c| c.signum());
            }
            let tail = knots[knots.len() - 1];
            visited.insert((tail.x, tail.y));
        }
    }

    visited.len()
}
