use num_traits::NumAssign;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Cost> {
    pub from: usize,
    pub to: usize,
    pub cost: Cost,
    pub in_tree: bool,
}

#[derive(Default)]
pub struct Graph<Cost> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Cost>>,
    terminals: Vec<usize>,
}

impl<Cost> Graph<Cost>
where
    Cost: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_directed_edge(&mut self, from: usize, to: usize, cost: Cost) -> Option<usize> {
        if from >= self.num_nodes || to >= self.num_nodes || cost < Cost::zero() {
            return None;
        }

        self.edges.push(Edge { from, to, cost, in_tree: false });

        self.num_edges += 1;
        Some(self.num_edges - 1)
    }

    pub fn add_terminal(&mut self, v: usize) -> bool {
        if v >= self.num_nodes {
            return false;
        }
        if !self.terminals.contains(&v) {
            self.terminals.push(v);
        }
        true
    }

    pub fn terminals(&self) -> &[usize] {
        &self.terminals
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Cost>> {
        self.edges.get(edge_id).cloned()
    }

    // edge ids of the last computed solution
    pub fn arborescence(&self) -> Vec<usize> {
        (0..self.num_edges).filter(|&edge_id| self.edges[edge_id].in_tree).collect()
    }

    // priced with the costs the edges were added with
    pub fn arborescence_cost(&self) -> Cost {
        self.edges.iter().filter(|edge| edge.in_tree).fold(Cost::zero(), |cost, edge| cost + edge.cost)
    }

    pub(crate) fn clear_arborescence(&mut self) {
        for edge in self.edges.iter_mut() {
            edge.in_tree = false;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_nodes_and_edges() {
        let mut graph = Graph::<i64>::default();
        let nodes = graph.add_nodes(3);
        assert_eq!(nodes, vec![0, 1, 2]);
        assert_eq!(graph.add_node(), 3);
        assert_eq!(graph.num_nodes(), 4);

        assert_eq!(graph.add_directed_edge(0, 1, 5), Some(0));
        assert_eq!(graph.add_directed_edge(1, 3, 0), Some(1));
        assert_eq!(graph.num_edges(), 2);

        let edge = graph.get_edge(0).unwrap();
        assert_eq!((edge.from, edge.to, edge.cost), (0, 1, 5));
        assert!(!edge.in_tree);
        assert_eq!(graph.get_edge(2), None);
    }

    #[test]
    fn rejects_bad_edges() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(2);

        assert_eq!(graph.add_directed_edge(0, 2, 1), None);
        assert_eq!(graph.add_directed_edge(2, 0, 1), None);
        assert_eq!(graph.add_directed_edge(0, 1, -1), None);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn terminals_are_deduplicated() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(3);

        assert!(graph.add_terminal(1));
        assert!(graph.add_terminal(2));
        assert!(graph.add_terminal(1));
        assert!(!graph.add_terminal(3));
        assert_eq!(graph.terminals(), &[1, 2]);
    }

    #[test]
    fn arborescence_cost_uses_original_costs() {
        let mut graph = Graph::<i64>::default();
        graph.add_nodes(3);
        graph.add_directed_edge(0, 1, 4).unwrap();
        graph.add_directed_edge(1, 2, 3).unwrap();
        graph.add_directed_edge(0, 2, 9).unwrap();

        graph.edges[0].in_tree = true;
        graph.edges[1].in_tree = true;

        assert_eq!(graph.arborescence(), vec![0, 1]);
        assert_eq!(graph.arborescence_cost(), 7);

        graph.clear_arborescence();
        assert!(graph.arborescence().is_empty());
        assert_eq!(graph.arborescence_cost(), 0);
    }
}
