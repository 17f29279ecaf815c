mod day1;
mod day2;
mod day3;
mod day4;
mod day5;
mod day6;
mod day7;
mod day8;
mod day9;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;

pub use day1::day1;
pub use day2::day2;
pub use day3::day3;
pub use day4::day4;
pub use day5::day5;
pub use day6::day6;
pub use day7::day7;
pub use day8::day8;
pub use day9::day9;
pub use day10::day10;
pub use day11::day11;
pub use day12::day12;
pub use day13::day13;
pub use day14::day14;
pub use day15::day15;
pub use day16::day16;
