//! Sparse exchange-rate graph with inferred, memoized conversions.
//!
//! Edges live in an append-only list; lookups go through a `(from, to)`
//! index that remembers the first edge added for each pair. Every write,
//! whether from the initial load or from memoizing an inferred rate, goes
//! through [`ConversionGraph::add`].

use crate::core::currency::CurrencyCode;
use crate::core::edge::ConversionEdge;
use crate::core::error::{Result, TradeError};
use crate::core::exact::exact_mul;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

pub const DEFAULT_MAX_HOPS: usize = 8;

/// Shortest inferable path: one intermediate currency.
const MIN_HOPS: usize = 2;

/// How a missing rate is inferred from the known edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceStrategy {
    /// Follow the first edge leaving each currency until one closes on the
    /// target. Cheap, but may pick a hop that never reaches the target even
    /// when another route exists.
    #[default]
    FirstEdge,
    /// Breadth-first search for the path with the fewest hops.
    ShortestPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    pub strategy: InferenceStrategy,
    pub max_hops: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            strategy: InferenceStrategy::default(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversionGraph {
    edges: Vec<ConversionEdge>,
    index: HashMap<CurrencyCode, HashMap<CurrencyCode, usize>>,
    options: GraphOptions,
}

impl ConversionGraph {
    pub fn new(edges: impl IntoIterator<Item = ConversionEdge>) -> Self {
        Self::with_options(edges, GraphOptions::default())
    }

    pub fn with_options(
        edges: impl IntoIterator<Item = ConversionEdge>,
        options: GraphOptions,
    ) -> Self {
        let mut graph = ConversionGraph {
            edges: Vec::new(),
            index: HashMap::new(),
            options: GraphOptions {
                max_hops: options.max_hops.max(MIN_HOPS),
                ..options
            },
        };
        for edge in edges {
            graph.add(edge);
        }
        graph
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Appends an edge. Duplicates are kept; lookups keep returning the
    /// earliest edge for a pair.
    pub fn add(&mut self, edge: ConversionEdge) {
        let position = self.edges.len();
        self.index
            .entry(edge.from().clone())
            .or_default()
            .entry(edge.to().clone())
            .or_insert(position);
        self.edges.push(edge);
    }

    pub fn find_direct(&self, from: &str, to: &str) -> Option<&ConversionEdge> {
        self.index
            .get(from)
            .and_then(|targets| targets.get(to))
            .map(|&position| &self.edges[position])
    }

    pub fn edges_from<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a ConversionEdge> {
        self.edges.iter().filter(move |edge| edge.from() == from)
    }

    pub fn edges_to<'a>(&'a self, to: &'a str) -> impl Iterator<Item = &'a ConversionEdge> {
        self.edges.iter().filter(move |edge| edge.to() == to)
    }

    pub fn edges(&self) -> impl Iterator<Item = &ConversionEdge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Converts `amount` from one currency to another, inferring and
    /// memoizing the rate when no direct edge exists.
    pub fn convert(&mut self, from: &str, to: &str, amount: Decimal) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        let edge = self.resolve(from, to)?;
        exact_mul(amount, edge.rate())
            .map_err(|kind| TradeError::inexact_conversion(kind, from, to))
    }

    /// Returns the edge for `from -> to`, inferring it from a chain of known
    /// edges if needed. Inferred edges are added to the graph only when the
    /// whole chain resolves.
    pub fn resolve(&mut self, from: &str, to: &str) -> Result<ConversionEdge> {
        if let Some(edge) = self.find_direct(from, to) {
            debug!("Direct rate {from} -> {to}: {}", edge.rate());
            return Ok(edge.clone());
        }

        if self.edges_from(from).next().is_none() || self.edges_to(to).next().is_none() {
            debug!("No edge leaves {from} or reaches {to}");
            return Err(no_path(from, to));
        }

        let path = match self.options.strategy {
            InferenceStrategy::FirstEdge => self.first_edge_path(from, to)?,
            InferenceStrategy::ShortestPath => self.shortest_path(from, to)?,
        };
        debug!(
            "Inferred {from} -> {to} via {}",
            path.iter()
                .map(|edge| edge.to().as_str())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        self.memoize(from, to, &path)
    }

    fn first_edge_path(&self, from: &str, to: &str) -> Result<Vec<ConversionEdge>> {
        let mut path: Vec<ConversionEdge> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([from]);
        let mut current = from;

        loop {
            let hop = self
                .edges_from(current)
                .next()
                .ok_or_else(|| no_path(from, to))?;
            path.push(hop.clone());

            if let Some(closing) = self.find_direct(hop.to().as_str(), to) {
                path.push(closing.clone());
                return Ok(path);
            }

            // The next completed path would need at least two more edges.
            if path.len() + 1 >= self.options.max_hops || !visited.insert(hop.to().as_str()) {
                return Err(self.no_convergence(from, to));
            }
            current = hop.to().as_str();
        }
    }

    fn shortest_path(&self, from: &str, to: &str) -> Result<Vec<ConversionEdge>> {
        let mut parents: HashMap<&str, &ConversionEdge> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([from]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(from, 0)]);

        while let Some((currency, depth)) = queue.pop_front() {
            if depth >= self.options.max_hops {
                continue;
            }
            for edge in self.edges_from(currency) {
                let next = edge.to().as_str();
                if !visited.insert(next) {
                    continue;
                }
                parents.insert(next, edge);
                if next == to {
                    return Ok(unwind(&parents, from, to));
                }
                queue.push_back((next, depth + 1));
            }
        }

        Err(self.no_convergence(from, to))
    }

    fn memoize(&mut self, from: &str, to: &str, path: &[ConversionEdge]) -> Result<ConversionEdge> {
        let Some((last, hops)) = path.split_last() else {
            return Err(no_path(from, to));
        };

        // Compose every suffix first so a failure leaves the graph untouched.
        let mut inferred = Vec::with_capacity(hops.len());
        let mut rate = last.rate();
        for hop in hops.iter().rev() {
            rate = exact_mul(hop.rate(), rate)
                .map_err(|kind| TradeError::inexact_conversion(kind, from, to))?;
            inferred.push(ConversionEdge::new(hop.from().clone(), last.to().clone(), rate));
        }

        for edge in &inferred {
            debug!(
                "Memoizing inferred rate {} -> {}: {}",
                edge.from(),
                edge.to(),
                edge.rate()
            );
            self.add(edge.clone());
        }

        inferred.pop().ok_or_else(|| no_path(from, to))
    }

    fn no_convergence(&self, from: &str, to: &str) -> TradeError {
        TradeError::CycleOrUnreachablePath {
            from: from.to_string(),
            to: to.to_string(),
            max_hops: self.options.max_hops,
        }
    }
}

fn no_path(from: &str, to: &str) -> TradeError {
    TradeError::NoConversionPath {
        from: from.to_string(),
        to: to.to_string(),
    }
}

fn unwind(parents: &HashMap<&str, &ConversionEdge>, from: &str, to: &str) -> Vec<ConversionEdge> {
    let mut path = Vec::new();
    let mut current = to;
    while current != from {
        let Some(edge) = parents.get(current) else {
            break;
        };
        path.push((*edge).clone());
        current = edge.from().as_str();
    }
    path.reverse();
    path
}
