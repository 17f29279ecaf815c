use std::{
    fs,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};

use aoc2022::{DayResults, Solution, ALL_SOLUTIONS};

fn main() -> Result<()> {
    let inputs = collect_inputs("input")?;

    let mut total = Duration::default();
    for (i, (solution, (example, actual))) in ALL_SOLUTIONS
        .iter()
        .zip(inputs.examples.iter().zip(&inputs.actuals))
        .enumerate()
    {
        total += execute_day(i + 1, *solution, example, actual)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

struct Inputs {
    examples: Vec<String>,
    actuals: Vec<String>,
}

/// Pairs the days with their input files by sorted filename order, e.g.
/// `day01_example.txt`/`day01_actual.txt` for day 1.
fn collect_inputs(dir: &str) -> Result<Inputs> {
    let mut example_names = Vec::new();
    let mut actual_names = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read input directory {:?}", dir))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.contains("example") {
            example_names.push(name);
        } else if name.contains("actual") {
            actual_names.push(name);
        }
    }

    example_names.sort();
    actual_names.sort();

    Ok(Inputs {
        examples: read_all(dir, &example_names)?,
        actuals: read_all(dir, &actual_names)?,
    })
}

fn read_all(dir: &str, names: &[String]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| {
            fs::read_to_string(format!("{}/{}", dir, name))
                .with_context(|| format!("failed to read {}/{}", dir, name))
        })
        .collect()
}

fn execute_day(n: usize, solution: Solution, example: &str, actual: &str) -> Result<Duration> {
    println!("Day {}:", n);

    let start = Instant::now();
    let (first_example, second_example) =
        solution(example).with_context(|| format!("day {} failed on the example input", n))?;
    let (first, second) =
        solution(actual).with_context(|| format!("day {} failed on the actual input", n))?;
    let elapsed = start.elapsed();

    let results = DayResults {
        first_example,
        first,
        second_example,
        second,
    };

    println!("  Part 1 example: {}", results.first_example);
    println!("  Part 1: {}", results.first);
    println!("  Part 2 example: {}", results.second_example);
    println!("  Part 2: {}", results.second);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}
