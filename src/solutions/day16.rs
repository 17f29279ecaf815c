use anyhow::{ensure, Context, Result};
use petgraph::{algo::floyd_warshall, graph::NodeIndex, Graph};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::OMITTED;

pub fn day16(input: &str) -> Result<(u32, &'static str)> {
    let network = Network::parse(input)?;
    let part1 = network.max_released_pressure(30);

    // TODO: part two needs the two-actor search: enumerate the best release
    // per opened-valve subset and combine disjoint subsets
    Ok((part1, OMITTED))
}

/// Tunnel network reduced to the valves that matter: `AA` (index 0) and
/// every valve with a positive flow rate, connected by shortest-path
/// distances over the full tunnel graph.
struct Network {
    distances: Vec<Vec<u32>>,
    flow_rates: Vec<u32>,
}

impl Network {
    fn parse(input: &str) -> Result<Self> {
        let pattern = Regex::new(
            r"^Valve ([A-Z]{2}) has flow rate=(\d+); tunnels? leads? to valves? ([A-Z, ]+)$",
        )?;

        let mut valves = Vec::new();
        for line in input.lines() {
            let (_, [label, rate, destinations]) = pattern
                .captures(line)
                .with_context(|| format!("malformed valve line: {:?}", line))?
                .extract();
            valves.push((
                label,
                rate.parse::<u32>()?,
                destinations.split(", ").collect::<Vec<_>>(),
            ));
        }

        let mut graph: Graph<&str, ()> = Graph::new();
        let mut indices: FxHashMap<&str, NodeIndex> = FxHashMap::default();
        for (label, _, _) in &valves {
            indices.insert(*label, graph.add_node(*label));
        }
        for (label, _, destinations) in &valves {
            for destination in destinations {
                let to = *indices
                    .get(destination)
                    .with_context(|| format!("unknown tunnel destination {:?}", destination))?;
                graph.add_edge(indices[label], to, ());
            }
        }

        let all_distances = floyd_warshall(&graph, |_| 1u32)
            .ok()
            .context("negative cycle in unit-weight graph")?;

        ensure!(indices.contains_key("AA"), "no valve AA");
        let mut labels: Vec<&str> = vec!["AA"];
        for (label, rate, _) in &valves {
            if *rate > 0 && *label != "AA" {
                labels.push(*label);
            }
        }
        ensure!(labels.len() <= 64, "too many working valves");

        let mut flow_rates = Vec::with_capacity(labels.len());
        let mut distances = Vec::with_capacity(labels.len());
        for &from in &labels {
            flow_rates.push(
                valves
                    .iter()
                    .find(|(label, ..)| *label == from)
                    .map(|(_, rate, _)| *rate)
                    .unwrap_or(0),
            );
            let mut row = Vec::with_capacity(labels.len());
            for &to in &labels {
                let distance = all_distances
                    .get(&(indices[from], indices[to]))
                    .copied()
                    .with_context(|| format!("no distance between {:?} and {:?}", from, to))?;
                row.push(distance);
            }
            distances.push(row);
        }

        Ok(Network {
            distances,
            flow_rates,
        })
    }

    /// Best total pressure releasable within `minutes`, starting at `AA`
    /// with every valve closed.
    fn max_released_pressure(&self, minutes: u32) -> u32 {
        self.search(0, minutes, 1, 0)
    }

    fn search(&self, at: usize, time_left: u32, opened: u64, released: u32) -> u32 {
        let mut best = released;
        for next in 0..self.flow_rates.len() {
            if opened & (1 << next) != 0 || self.flow_rates[next] == 0 {
                continue;
            }
            // one minute per tunnel step plus one to open the valve
            let Some(remaining) = self.distances[at][next]
                .checked_add(1)
                .and_then(|cost| time_left.checked_sub(cost))
            else {
                continue;
            };
            best = best.max(self.search(
                next,
                remaining,
                opened | (1 << next),
                released + remaining * self.flow_rates[next],
            ));
        }
        best
    }
}
