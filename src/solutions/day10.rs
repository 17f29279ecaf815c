use anyhow::{bail, Context, Result};

pub fn day10(input: &str) -> Result<(i64, String)> {
    let instructions = parse(input)?;

    let mut x: i64 = 1;
    let mut cycle: i64 = 0;
    let mut signal_strength_sum = 0;
    // leading newline so the render starts on its own line when printed
    let mut screen = String::from("\n");

    for instruction in &instructions {
        let (cycles, delta) = match instruction {
            Instruction::Noop => (1, 0),
            Instruction::Addx(operand) => (2, *operand),
        };
        for _ in 0..cycles {
            let column = cycle % 40;
            screen.push(if (column - x).abs() <= 1 { '#' } else { '.' });
            cycle += 1;
            if column == 39 {
                screen.push('\n');
            }
            if (cycle - 20) % 40 == 0 {
                signal_strength_sum += cycle * x;
            }
        }
        x += delta;
    }

    Ok((signal_strength_sum, screen))
}

enum Instruction {
    Noop,
    Addx(i64),
}

fn parse(input: &str) -> Result<Vec<Instruction>> {
    input
        .lines()
        .map(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            Ok(match words.as_slice() {
                ["noop"] => Instruction::Noop,
                ["addx", operand] => Instruction::Addx(
                    operand
                        .parse()
                        .with_context(|| format!("malformed operand: {:?}", line))?,
                ),
                _ => bail!("unknown instruction: {:?}", line),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        addx 15
        addx -11
        addx 6
        addx -3
        addx 5
        addx -1
        addx -8
        addx 13
        addx 4
        noop
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx -35
        addx 1
        addx 24
        addx -19
        addx 1
        addx 16
        addx -11
        noop
        noop
        addx 21
        addx -15
        noop
        noop
        addx -3
        addx 9
        addx 1
        addx -3
        addx 8
        addx 1
        addx 5
        noop
        noop
        noop
        noop
        noop
        addx -36
        noop
        addx 1
        addx 7
        noop
        noop
        noop
        addx 2
        addx 6
        noop
        noop
        noop
        noop
        noop
        addx 1
        noop
        noop
        addx 7
        addx 1
        noop
        addx -13
        addx 13
        addx 7
        noop
        addx 1
        addx -33
        noop
        noop
        noop
        addx 2
        noop
        noop
        noop
        addx 8
        noop
        addx -1
        addx 2
        addx 1
        noop
        addx 17
        addx -9
        addx 1
        addx 1
        addx -3
        addx 11
        noop
        noop
        addx 1
        noop
        addx 1
        noop
        noop
        addx -13
        addx -19
        addx 1
        addx 3
        addx 26
        addx -30
        addx 12
        addx -1
        addx 3
        addx 1
        noop
        noop
        noop
        addx -9
        addx 18
        addx 1
        addx 2
        noop
        noop
        addx 9
        noop
        noop
        noop
        addx -1
        addx 2
        addx -37
        addx 1
        addx 3
        noop
        addx 15
        addx -21
        addx 22
        addx -6
        addx 1
        noop
        addx 2
        addx 1
        noop
        addx -10
        noop
        noop
        addx 20
        addx 1
        addx 2
        addx 2
        addx -6
        addx -11
        noop
        noop
        noop
    "};

    #[test]
    fn test_day10() -> Result<()> {
        let (signal_strength_sum, screen) = day10(EXAMPLE)?;
        assert_eq!(signal_strength_sum, 13140);

        let render = indoc! {"
            ##..##..##..##..##..##..##..##..##..##..
            ###...###...###...###...###...###...###.
            ####....####....####....####....####....
            #####.....#####.....#####.....#####.....
            ######......######......######......####
            #######.......#######.......#######.....
        "};
        assert_eq!(screen, format!("\n{}", render));
        Ok(())
    }

    #[test]
    fn rejects_unknown_instruction() {
        assert!(day10("jmp 3\n").is_err());
    }
}
