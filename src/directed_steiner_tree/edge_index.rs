use crate::directed_steiner_tree::graph::Graph;
use num_traits::NumAssign;

// Working view of the instance owned by the solver for the duration of a
// solve: a private copy of the edge costs plus, for each vertex, its entering
// edges sorted by (cost, from, to, id). The graph's own costs stay untouched.
pub struct EdgeIndex<Cost> {
    pub num_nodes: usize,
    pub num_edges: usize,
    costs: Vec<Cost>,
    from: Vec<usize>,
    to: Vec<usize>,
    in_edges: Vec<Vec<usize>>,
    out_edges: Vec<Vec<usize>>,
}

impl<Cost> Default for EdgeIndex<Cost> {
    fn default() -> Self {
        EdgeIndex {
            num_nodes: 0,
            num_edges: 0,
            costs: Vec::new(),
            from: Vec::new(),
            to: Vec::new(),
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }
}

impl<Cost> EdgeIndex<Cost>
where
    Cost: NumAssign + Ord + Copy,
{
    pub fn build(&mut self, graph: &Graph<Cost>) {
        self.num_nodes = graph.num_nodes();
        self.num_edges = graph.num_edges();

        self.costs.clear();
        self.from.clear();
        self.to.clear();
        self.in_edges = vec![Vec::new(); self.num_nodes];
        self.out_edges = vec![Vec::new(); self.num_nodes];

        for (edge_id, edge) in graph.edges.iter().enumerate() {
            self.costs.push(edge.cost);
            self.from.push(edge.from);
            self.to.push(edge.to);
            self.in_edges[edge.to].push(edge_id);
            self.out_edges[edge.from].push(edge_id);
        }

        let mut in_edges = std::mem::take(&mut self.in_edges);
        for list in in_edges.iter_mut() {
            list.sort_unstable_by_key(|&edge_id| self.sort_key(edge_id));
        }
        self.in_edges = in_edges;
    }

    #[inline]
    pub fn cost(&self, edge_id: usize) -> Cost {
        self.costs[edge_id]
    }

    #[inline]
    pub fn from(&self, edge_id: usize) -> usize {
        self.from[edge_id]
    }

    #[inline]
    pub fn to(&self, edge_id: usize) -> usize {
        self.to[edge_id]
    }

    #[inline]
    pub fn in_edges(&self, v: usize) -> &[usize] {
        &self.in_edges[v]
    }

    #[inline]
    pub fn out_edges(&self, v: usize) -> &[usize] {
        &self.out_edges[v]
    }

    // Drop the cost of an edge to zero and move it to its new position in the
    // entering-edge list of its head. The list is ordered by the current
    // costs, so the removal must happen before the cost is written.
    pub fn zero(&mut self, edge_id: usize) {
        let head = self.to[edge_id];
        let mut list = std::mem::take(&mut self.in_edges[head]);

        let old_key = self.sort_key(edge_id);
        let pos = list.binary_search_by(|&x| self.sort_key(x).cmp(&old_key)).unwrap();
        debug_assert_eq!(list[pos], edge_id);
        list.remove(pos);

        self.costs[edge_id] = Cost::zero();

        let new_key = self.sort_key(edge_id);
        let pos = list.binary_search_by(|&x| self.sort_key(x).cmp(&new_key)).unwrap_err();
        list.insert(pos, edge_id);

        self.in_edges[head] = list;
    }

    #[inline]
    fn sort_key(&self, edge_id: usize) -> (Cost, usize, usize, usize) {
        (self.costs[edge_id], self.from[edge_id], self.to[edge_id], edge_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_index(num_nodes: usize, edges: &[(usize, usize, i64)]) -> EdgeIndex<i64> {
        let mut graph = Graph::default();
        graph.add_nodes(num_nodes);
        for &(from, to, cost) in edges {
            graph.add_directed_edge(from, to, cost).unwrap();
        }

        let mut index = EdgeIndex::default();
        index.build(&graph);
        index
    }

    fn assert_sorted(index: &EdgeIndex<i64>, v: usize) {
        let keys: Vec<_> = index.in_edges(v).iter().map(|&e| index.sort_key(e)).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn entering_edges_sorted_by_cost_then_endpoints() {
        // all enter vertex 3
        let index = build_index(4, &[(2, 3, 5), (0, 3, 5), (1, 3, 2), (0, 3, 9)]);

        assert_eq!(index.in_edges(3), &[2, 1, 0, 3]);
        assert_eq!(index.in_edges(0), &[] as &[usize]);
        assert_eq!(index.out_edges(0), &[1, 3]);
        assert_sorted(&index, 3);
    }

    #[test]
    fn zero_moves_edge_to_the_front() {
        let mut index = build_index(4, &[(0, 3, 4), (1, 3, 6), (2, 3, 8)]);
        assert_eq!(index.in_edges(3), &[0, 1, 2]);

        index.zero(2);
        assert_eq!(index.cost(2), 0);
        assert_eq!(index.in_edges(3), &[2, 0, 1]);
        assert_sorted(&index, 3);

        index.zero(0);
        assert_eq!(index.in_edges(3), &[0, 2, 1]);
        assert_sorted(&index, 3);
    }

    #[test]
    fn zero_is_stable_for_an_already_zero_edge() {
        let mut index = build_index(2, &[(0, 1, 0), (0, 1, 3)]);
        assert_eq!(index.in_edges(1), &[0, 1]);

        index.zero(1);
        assert_eq!(index.in_edges(1), &[0, 1]);

        index.zero(1);
        assert_eq!(index.in_edges(1), &[0, 1]);
        assert_sorted(&index, 1);
    }

    #[test]
    fn rebuild_resets_previous_state() {
        let mut index = build_index(3, &[(0, 2, 7), (1, 2, 1)]);
        index.zero(0);

        let mut graph = Graph::default();
        graph.add_nodes(2);
        graph.add_directed_edge(0, 1, 3).unwrap();
        index.build(&graph);

        assert_eq!(index.num_nodes, 2);
        assert_eq!(index.num_edges, 1);
        assert_eq!(index.cost(0), 3);
        assert_eq!(index.in_edges(1), &[0]);
    }
}
