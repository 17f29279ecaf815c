use anyhow::{bail, ensure, Context, Result};

pub fn day11(input: &str) -> Result<(u64, u64)> {
    let monkeys = parse(input)?;

    let part1 = monkey_business(monkeys.clone(), 20, Relief::DivideByThree);
    // worry levels only matter modulo the product of all divisibility tests
    let modulus = monkeys.iter().map(|monkey| monkey.divisor).product();
    let part2 = monkey_business(monkeys, 10_000, Relief::Modulo(modulus));

    Ok((part1, part2))
}

#[derive(Clone)]
struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    target_if_true: usize,
    target_if_false: usize,
}

#[derive(Clone, Copy)]
enum Operation {
    Add(u64),
    Mul(u64),
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> u64 {
        match self {
            Operation::Add(operand) => old + operand,
            Operation::Mul(operand) => old * operand,
            Operation::Square => old * old,
        }
    }
}

enum Relief {
    DivideByThree,
    Modulo(u64),
}

fn monkey_business(mut monkeys: Vec<Monkey>, rounds: usize, relief: Relief) -> u64 {
    let mut inspections = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for i in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[i].items);
            inspections[i] += items.len() as u64;
            for item in items {
                let worry = monkeys[i].operation.apply(item);
                let worry = match relief {
                    Relief::DivideByThree => worry / 3,
                    Relief::Modulo(modulus) => worry % modulus,
                };
                let target = if worry % monkeys[i].divisor == 0 {
                    monkeys[i].target_if_true
                } else {
                    monkeys[i].target_if_false
                };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspections.sort_unstable_by(|a, b| b.cmp(a));
    inspections[0] * inspections[1]
}

fn parse(input: &str) -> Result<Vec<Monkey>> {
    let lines: Vec<&str> = input.lines().collect();

    let mut monkeys = Vec::new();
    for block in lines.split(|line| line.is_empty()) {
        if block.is_empty() {
            continue;
        }
        let monkey = parse_monkey(block)
            .with_context(|| format!("malformed monkey {}", monkeys.len()))?;
        monkeys.push(monkey);
    }

    ensure!(monkeys.len() >= 2, "need at least two monkeys");
    for monkey in &monkeys {
        ensure!(monkey.divisor != 0, "monkey tests divisibility by zero");
        ensure!(
            monkey.target_if_true < monkeys.len() && monkey.target_if_false < monkeys.len(),
            "monkey throws to a monkey that does not exist"
        );
    }
    Ok(monkeys)
}

fn parse_monkey(block: &[&str]) -> Result<Monkey> {
    ensure!(block.len() == 6, "expected 6 lines, got {}", block.len());

    let items = block[1]
        .strip_prefix("  Starting items: ")
        .context("missing starting items")?
        .split(", ")
        .map(|item| Ok(item.parse::<u64>()?))
        .collect::<Result<Vec<_>>>()?;

    let operation = block[2]
        .strip_prefix("  Operation: new = old ")
        .context("missing operation")?;
    let operation = match operation.split_once(' ').context("missing operand")? {
        ("*", "old") => Operation::Square,
        ("+", operand) => Operation::Add(operand.parse()?),
        ("*", operand) => Operation::Mul(operand.parse()?),
        (operator, _) => bail!("unknown operator {:?}", operator),
    };

    Ok(Monkey {
        items,
        operation,
        divisor: trailing_number(block[3])?,
        target_if_true: trailing_number(block[4])? as usize,
        target_if_false: trailing_number(block[5])? as usize,
    })
}

fn trailing_number(line: &str) -> Result<u64> {
    Ok(line
        .rsplit(' ')
        .next()
        .with_context(|| format!("empty line in monkey block: {:?}", line))?
        .parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Monkey 0:
          Starting items: 79, 98
          Operation: new = old * 19
          Test: divisible by 23
            If true: throw to monkey 2
            If false: throw to monkey 3

        Monkey 1:
          Starting items: 54, 65, 75, 74
          Operation: new = old + 6
          Test: divisible by 19
            If true: throw to monkey 2
            If false: throw to monkey 0

        Monkey 2:
          Starting items: 79, 60, 97
          Operation: new = old * old
          Test: divisible by 13
            If true: throw to monkey 1
            If false: throw to monkey 3

        Monkey 3:
          Starting items: 74
          Operation: new = old + 3
          Test: divisible by 17
            If true: throw to monkey 0
            If false: throw to monkey 1
    "};

    #[test]
    fn test_day11() -> Result<()> {
        assert_eq!(day11(EXAMPLE)?, (10605, 2713310158));
        Ok(())
    }

    #[test]
    fn rejects_dangling_throw_target() {
        let block = EXAMPLE.replace("throw to monkey 3", "throw to monkey 9");
        assert!(day11(&block).is_err());
    }
}
