use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("illegal screen transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },
}

/// Allowed transitions between the screens of the application under test.
///
/// Replaces fluent page-object chaining (each step returning "the next page"
/// type) with an explicit graph: the suite declares its screens as an enum,
/// lists the legal edges once, and every navigation is checked against them
/// at the call site.
///
/// ```
/// use rendez::flow::{FlowGraph, Navigator};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Login, Dashboard, Booking }
///
/// let graph = FlowGraph::new()
///     .allow(Screen::Login, Screen::Dashboard)
///     .allow(Screen::Dashboard, Screen::Booking)
///     .allow(Screen::Booking, Screen::Dashboard);
///
/// let mut nav = Navigator::new(graph, Screen::Login);
/// nav.goto(Screen::Dashboard).unwrap();
/// assert!(nav.goto(Screen::Login).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowGraph<S> {
    edges: HashMap<S, HashSet<S>>,
}

impl<S: Copy + Eq + Hash + Debug> FlowGraph<S> {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    pub fn allow(mut self, from: S, to: S) -> Self {
        self.edges.entry(from).or_default().insert(to);
        self
    }

    pub fn is_allowed(&self, from: S, to: S) -> bool {
        self.edges.get(&from).is_some_and(|targets| targets.contains(&to))
    }
}

/// Tracks the current screen and rejects moves the graph does not permit.
#[derive(Debug, Clone)]
pub struct Navigator<S> {
    graph: FlowGraph<S>,
    current: S,
}

impl<S: Copy + Eq + Hash + Debug> Navigator<S> {
    pub fn new(graph: FlowGraph<S>, start: S) -> Self {
        Self {
            graph,
            current: start,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn goto(&mut self, to: S) -> Result<(), FlowError> {
        if !self.graph.is_allowed(self.current, to) {
            return Err(FlowError::IllegalTransition {
                from: format!("{:?}", self.current),
                to: format!("{:?}", to),
            });
        }
        tracing::debug!(from = ?self.current, to = ?to, "screen transition");
        self.current = to;
        Ok(())
    }
}
