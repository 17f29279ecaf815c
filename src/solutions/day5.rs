use anyhow::{ensure, Context, Result};

pub fn day5(input: &str) -> Result<(String, String)> {
    let (mut stacks_one_by_one, orders) = parse(input)?;
    let mut stacks_as_block = stacks_one_by_one.clone();

    for order in &orders {
        order.apply_one_by_one(&mut stacks_one_by_one)?;
        order.apply_as_block(&mut stacks_as_block)?;
    }

    Ok((top_crates(&stacks_one_by_one), top_crates(&stacks_as_block)))
}

struct Order {
    quantity: usize,
    from: usize,
    to: usize,
}

impl Order {
    fn apply_one_by_one(&self, stacks: &mut [Vec<char>]) -> Result<()> {
        for _ in 0..self.quantity {
            let moved = stacks[self.from]
                .pop()
                .context("moved a crate from an empty stack")?;
            stacks[self.to].push(moved);
        }
        Ok(())
    }

    fn apply_as_block(&self, stacks: &mut [Vec<char>]) -> Result<()> {
        let split_at = stacks[self.from]
            .len()
            .checked_sub(self.quantity)
            .context("moved more crates than the stack holds")?;
        let moved = stacks[self.from].split_off(split_at);
        stacks[self.to].extend(moved);
        Ok(())
    }
}

fn parse(input: &str) -> Result<(Vec<Vec<char>>, Vec<Order>)> {
    let mut lines = input.lines();

    let mut crate_lines = Vec::new();
    let label_line = loop {
        let line = lines.next().context("missing stack label line")?;
        if line.as_bytes().get(1) == Some(&b'1') {
            break line;
        }
        crate_lines.push(line);
    };
    let count: usize = label_line
        .split_whitespace()
        .last()
        .context("empty stack label line")?
        .parse()?;

    // crates sit at columns 1, 5, 9, ...; build each stack bottom-up
    let mut stacks = vec![Vec::new(); count];
    for line in crate_lines.iter().rev() {
        let bytes = line.as_bytes();
        for (i, stack) in stacks.iter_mut().enumerate() {
            match bytes.get(1 + 4 * i) {
                Some(&label) if label != b' ' => stack.push(label as char),
                _ => {}
            }
        }
    }

    let mut orders = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let order = parse_order(line).with_context(|| format!("malformed order: {:?}", line))?;
        ensure!(
            order.from < count && order.to < count,
            "order references a stack beyond {}: {:?}",
            count,
            line
        );
        orders.push(order);
    }

    Ok((stacks, orders))
}

fn parse_order(line: &str) -> Option<Order> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["move", quantity, "from", from, "to", to] => Some(Order {
            quantity: quantity.parse().ok()?,
            from: from.parse::<usize>().ok()?.checked_sub(1)?,
            to: to.parse::<usize>().ok()?.checked_sub(1)?,
        }),
        _ => None,
    }
}

fn top_crates(stacks: &[Vec<char>]) -> String {
    stacks.iter().filter_map(|stack| stack.last()).collect()
}
