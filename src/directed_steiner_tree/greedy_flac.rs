use crate::directed_steiner_tree::edge_index::EdgeIndex;
use crate::directed_steiner_tree::fibonacci_heap::FibonacciHeap;
use crate::directed_steiner_tree::graph::Graph;
use crate::directed_steiner_tree::status::Status;
use num_traits::{AsPrimitive, NumAssign};
use std::collections::{HashSet, VecDeque};

// saturation instant plus a tiebreak preferring edges leaving the root
type SatKey = (f64, bool);

/// Greedy heuristic for the Directed Steiner Tree problem (GreedyFLAC).
///
/// Each pass of the inner FLAC algorithm grows a flow from the outstanding
/// terminals backward along entering edges, one volume unit per second per
/// source; an edge is saturated once it absorbed its cost. The saturated
/// edges reachable from the root form a low-density partial tree. The outer
/// loop commits that tree, zeroes its costs so later passes prefer to extend
/// it, retires the spanned terminals and repeats until none remain.
pub struct GreedyFlac<Cost> {
    edge_index: EdgeIndex<Cost>,
    root: usize,
    is_terminal: Vec<bool>,
    num_terminals: usize,

    // FLAC state, rebuilt by reinit at the start of every pass
    time: f64,
    saturated: Vec<bool>,
    sources: Vec<HashSet<usize>>,
    next_edge_pos: Vec<usize>,
    next_saturating_edge: Vec<Option<usize>>,
    heap: FibonacciHeap<SatKey>,
    handles: Vec<Option<usize>>,
    que: VecDeque<usize>,
}

impl<Cost> Default for GreedyFlac<Cost> {
    fn default() -> Self {
        GreedyFlac {
            edge_index: EdgeIndex::default(),
            root: 0,
            is_terminal: Vec::new(),
            num_terminals: 0,
            time: 0.0,
            saturated: Vec::new(),
            sources: Vec::new(),
            next_edge_pos: Vec::new(),
            next_saturating_edge: Vec::new(),
            heap: FibonacciHeap::default(),
            handles: Vec::new(),
            que: VecDeque::new(),
        }
    }
}

impl<Cost> GreedyFlac<Cost>
where
    Cost: NumAssign + Ord + Copy + AsPrimitive<f64>,
{
    pub fn new() -> Self {
        GreedyFlac::default()
    }

    pub fn solve(&mut self, root: usize, graph: &mut Graph<Cost>) -> Status {
        if root >= graph.num_nodes() {
            return Status::BadInput;
        }
        self.root = root;
        self.edge_index.build(graph);
        graph.clear_arborescence();

        self.is_terminal.clear();
        self.is_terminal.resize(graph.num_nodes(), false);
        self.num_terminals = 0;
        for &t in graph.terminals() {
            // the root spans itself; keeping it as a terminal would make the
            // greedy loop spin forever
            if t != root {
                self.is_terminal[t] = true;
                self.num_terminals += 1;
            }
        }

        while self.num_terminals > 0 {
            let (tree, reached) = match self.grow_partial_tree() {
                Some(result) => result,
                None => {
                    graph.clear_arborescence();
                    return Status::Infeasible;
                }
            };

            for &edge_id in &tree {
                graph.edges[edge_id].in_tree = true;
                self.edge_index.zero(edge_id);
            }
            for &t in &reached {
                self.is_terminal[t] = false;
                self.num_terminals -= 1;
            }
        }

        Status::Feasible
    }

    // One FLAC pass: the saturated tree hanging from the root and the
    // terminals it spans, or None if the heap drains before the root is
    // reached.
    fn grow_partial_tree(&mut self) -> Option<(Vec<usize>, Vec<usize>)> {
        self.reinit();

        loop {
            let ((time, _), v) = self.heap.pop_min()?;
            self.time = time;
            self.handles[v] = None;

            let edge_id = self.next_saturating_edge[v].unwrap();
            let u = self.edge_index.from(edge_id);

            if u == self.root {
                self.saturated[edge_id] = true;
                return Some(self.collect_tree());
            }

            let conflict = self.find_conflict(u, v);
            self.update_next_saturating_edge(v);
            if !conflict {
                self.saturate_and_update(edge_id);
            }
        }
    }

    fn reinit(&mut self) {
        let num_nodes = self.edge_index.num_nodes;

        self.time = 0.0;
        self.saturated.clear();
        self.saturated.resize(self.edge_index.num_edges, false);
        self.next_edge_pos.clear();
        self.next_edge_pos.resize(num_nodes, 0);
        self.next_saturating_edge.clear();
        self.next_saturating_edge.resize(num_nodes, None);
        self.handles.clear();
        self.handles.resize(num_nodes, None);
        self.heap.clear();
        for sources in self.sources.iter_mut() {
            sources.clear();
        }
        self.sources.truncate(num_nodes);
        self.sources.resize_with(num_nodes, HashSet::new);

        for v in 0..num_nodes {
            if self.is_terminal[v] {
                // each outstanding terminal feeds itself
                self.sources[v].insert(v);
                self.update_next_saturating_edge(v);
            }
        }
    }

    // Advance v to its next cheapest unsaturated entering edge and schedule
    // the instant that edge fills.
    fn update_next_saturating_edge(&mut self, v: usize) {
        let pos = self.next_edge_pos[v];
        let prev = self.next_saturating_edge[v];

        let edge_id = match self.edge_index.in_edges(v).get(pos) {
            Some(&edge_id) => edge_id,
            None => {
                // every entering edge of v is saturated already
                self.next_saturating_edge[v] = None;
                self.handles[v] = None;
                return;
            }
        };
        self.next_edge_pos[v] = pos + 1;
        self.next_saturating_edge[v] = Some(edge_id);

        // v's entering edges fill in parallel; when the previous candidate
        // saturated, this one had already absorbed the same volume
        let volume: f64 = match prev {
            Some(prev_id) => self.edge_index.cost(edge_id).as_() - self.edge_index.cost(prev_id).as_(),
            None => self.edge_index.cost(edge_id).as_(),
        };
        let rate = self.sources[v].len() as f64;
        let key = (self.time + volume / rate, self.edge_index.from(edge_id) != self.root);
        self.handles[v] = Some(self.heap.push(key, v));
    }

    // Saturating (u, v) would merge two flow components that are already
    // connected: walk backward from u over saturated edges and look for a
    // vertex the sources of v already feed.
    fn find_conflict(&mut self, u: usize, v: usize) -> bool {
        self.que.clear();
        self.que.push_back(u);

        while let Some(w) = self.que.pop_front() {
            if !self.sources[w].is_disjoint(&self.sources[v]) {
                return true;
            }
            for pos in 0..self.saturated_prefix_len(w) {
                let entering = self.edge_index.in_edges(w)[pos];
                if self.saturated[entering] {
                    self.que.push_back(self.edge_index.from(entering));
                }
            }
        }

        false
    }

    // Commit edge (u, v): v's sources now also feed u and every vertex u
    // feeds through saturated edges, so their schedules accelerate.
    fn saturate_and_update(&mut self, edge_id: usize) {
        let u = self.edge_index.from(edge_id);
        let v = self.edge_index.to(edge_id);
        let new_sources: Vec<usize> = self.sources[v].iter().copied().collect();

        self.que.clear();
        self.que.push_back(u);

        while let Some(w) = self.que.pop_front() {
            let prev_rate = self.sources[w].len();
            // disjoint union, find_conflict vetoed everything else
            self.sources[w].extend(new_sources.iter().copied());
            let new_rate = self.sources[w].len();

            if prev_rate == 0 {
                // w starts receiving flow now, schedule its first edge
                self.update_next_saturating_edge(w);
            } else if let Some(handle) = self.handles[w] {
                let (scheduled, tail_not_root) = self.heap.key(handle);
                let accelerated = self.time + (scheduled - self.time) * (prev_rate as f64 / new_rate as f64);
                self.heap.decrease_key(handle, (accelerated, tail_not_root));
            }

            for pos in 0..self.saturated_prefix_len(w) {
                let entering = self.edge_index.in_edges(w)[pos];
                if self.saturated[entering] {
                    self.que.push_back(self.edge_index.from(entering));
                }
            }
        }

        self.saturated[edge_id] = true;
    }

    // Entering edges of w strictly before its current candidate in sorted
    // order; saturated entering edges all sit in this prefix.
    #[inline]
    fn saturated_prefix_len(&self, w: usize) -> usize {
        match self.next_saturating_edge[w] {
            Some(_) => self.next_edge_pos[w] - 1,
            None => self.next_edge_pos[w],
        }
    }

    // Forward traversal over saturated edges from the root.
    fn collect_tree(&mut self) -> (Vec<usize>, Vec<usize>) {
        let mut tree = Vec::new();
        let mut reached = Vec::new();

        self.que.clear();
        self.que.push_back(self.root);
        while let Some(v) = self.que.pop_front() {
            if self.is_terminal[v] {
                reached.push(v);
            }
            for pos in 0..self.edge_index.out_edges(v).len() {
                let edge_id = self.edge_index.out_edges(v)[pos];
                if self.saturated[edge_id] {
                    tree.push(edge_id);
                    self.que.push_back(self.edge_index.to(edge_id));
                }
            }
        }

        (tree, reached)
    }
}
