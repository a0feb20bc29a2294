use std::collections::{HashMap, HashSet};

use hexstrike_core::{Hex, HexGrid};

use crate::cache::SearchCache;
use crate::keys::path_key;
use crate::queue::PriorityQueue;

/// A node of an A* search tree.
///
/// Nodes belong to a single search and are dropped when it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNode {
    pub hex: Hex,
    /// Cost of the best known path from the start.
    pub g: u32,
    /// Heuristic estimate to the goal.
    pub h: u32,
    /// `g + h`.
    pub f: u32,
    pub parent: Option<Hex>,
}

impl PathNode {
    fn new(hex: Hex, g: u32, h: u32, parent: Option<Hex>) -> Self {
        Self {
            hex,
            g,
            h,
            f: g + h,
            parent,
        }
    }

    fn relax(&mut self, g: u32, parent: Hex) {
        self.g = g;
        self.f = g + self.h;
        self.parent = Some(parent);
    }
}

/// Compute the shortest path from `start` to `goal` using A*.
///
/// Every step costs 1 and the heuristic is the hex distance to `goal`.
/// Neighbours are expanded only if `grid` has a tile there and accepts it as
/// traversable; the start tile itself is never checked. Returns the full
/// path (including both endpoints) or `None` if the goal is unreachable.
pub fn find_path<G: HexGrid + ?Sized>(start: Hex, goal: Hex, grid: &G) -> Option<Vec<Hex>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut nodes: HashMap<Hex, PathNode> = HashMap::new();
    let mut closed: HashSet<Hex> = HashSet::new();
    let mut open: PriorityQueue<Hex> = PriorityQueue::new();

    let first = PathNode::new(start, 0, start.distance(goal), None);
    open.enqueue(start, first.f);
    nodes.insert(start, first);

    while let Some(current) = open.dequeue() {
        // The goal is done only once it is dequeued, not when first seen.
        if current == goal {
            let path = reconstruct(&nodes, goal);
            log::trace!(
                "astar {start} -> {goal}: {} steps, {} nodes closed",
                path.len() - 1,
                closed.len()
            );
            return Some(path);
        }
        if !closed.insert(current) {
            continue;
        }
        let Some(current_g) = nodes.get(&current).map(|n| n.g) else {
            continue;
        };

        for next in current.neighbors() {
            if closed.contains(&next) {
                continue;
            }
            let Some(tile) = grid.tile(next) else {
                continue;
            };
            if !grid.is_traversable(&tile) {
                continue;
            }

            let tentative_g = current_g + 1;
            match nodes.get_mut(&next) {
                Some(node) => {
                    if tentative_g >= node.g {
                        continue;
                    }
                    node.relax(tentative_g, current);
                    let f = node.f;
                    if !open.update_priority(&next, f, |a, b| a == b) {
                        open.enqueue(next, f);
                    }
                }
                None => {
                    let node = PathNode::new(next, tentative_g, next.distance(goal), Some(current));
                    open.enqueue(next, node.f);
                    nodes.insert(next, node);
                }
            }
        }
    }

    log::trace!("astar {start} -> {goal}: no path, {} nodes closed", closed.len());
    None
}

fn reconstruct(nodes: &HashMap<Hex, PathNode>, goal: Hex) -> Vec<Hex> {
    let mut path = vec![goal];
    let mut cur = nodes.get(&goal).and_then(|n| n.parent);
    while let Some(hex) = cur {
        path.push(hex);
        cur = nodes.get(&hex).and_then(|n| n.parent);
    }
    path.reverse();
    path
}

/// Number of steps on the shortest path, or `None` if there is no path.
pub fn find_path_distance<G: HexGrid + ?Sized>(start: Hex, goal: Hex, grid: &G) -> Option<u32> {
    find_path(start, goal, grid).map(|p| p.len() as u32 - 1)
}

/// [`find_path`] memoized in the path cache of `cache`, if given.
pub fn find_path_cached<G: HexGrid + ?Sized>(
    start: Hex,
    goal: Hex,
    grid: &G,
    cache: Option<&mut SearchCache>,
) -> Option<Vec<Hex>> {
    let Some(cache) = cache else {
        return find_path(start, goal, grid);
    };
    let key = path_key(start, goal);
    if let Some(path) = cache.paths.get(&key) {
        log::trace!("path cache hit: {key}");
        return path;
    }
    let path = find_path(start, goal, grid);
    cache.paths.set(key, path.clone());
    path
}
