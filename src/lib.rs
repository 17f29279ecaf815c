pub mod solutions;

use std::fmt::Display;

use anyhow::Result;

use solutions::*;

/// Answers of one day for both puzzle inputs.
pub struct DayResults {
    pub first_example: String,
    pub first: String,
    pub second_example: String,
    pub second: String,
}

/// Fixed answer text for a computation its author deliberately disabled.
pub const OMITTED: &str = "omitted for performance";

pub type Solution = fn(&str) -> Result<(String, String)>;

pub const ALL_SOLUTIONS: [Solution; 16] = [
    |input| stringified(day1(input)),
    |input| stringified(day2(input)),
    |input| stringified(day3(input)),
    |input| stringified(day4(input)),
    |input| stringified(day5(input)),
    |input| stringified(day6(input)),
    |input| stringified(day7(input)),
    |input| stringified(day8(input)),
    |input| stringified(day9(input)),
    |input| stringified(day10(input)),
    |input| stringified(day11(input)),
    |input| stringified(day12(input)),
    |input| stringified(day13(input)),
    |input| stringified(day14(input)),
    |input| stringified(day15(input)),
    |input| stringified(day16(input)),
];

fn stringified<S: Display, T: Display>(parts: Result<(S, T)>) -> Result<(String, String)> {
    parts.map(|(part1, part2)| (part1.to_string(), part2.to_string()))
}

pub fn load_input(name: &str) -> String {
    std::fs::read_to_string("input/".to_string() + name).unwrap()
}

pub fn default_input(n: usize) -> String {
    load_input(&format!("day{:02}_actual.txt", n))
}
