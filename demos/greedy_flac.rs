use steiner_algorithms::directed_steiner_tree::graph::Graph;
use steiner_algorithms::directed_steiner_tree::greedy_flac::GreedyFlac;
use steiner_algorithms::directed_steiner_tree::status::Status;

fn main() {
    let mut graph = Graph::default();
    graph.add_nodes(4);

    graph.add_directed_edge(0, 1, 10).unwrap();
    graph.add_directed_edge(1, 2, 1).unwrap();
    graph.add_directed_edge(1, 3, 1).unwrap();

    graph.add_terminal(2);
    graph.add_terminal(3);

    let status = GreedyFlac::new().solve(0, &mut graph);

    match status {
        Status::Feasible => {
            println!("arborescence cost:{}", graph.arborescence_cost());
            for edge_id in graph.arborescence() {
                println!("{:?}", graph.get_edge(edge_id).unwrap());
            }
        }
        _ => unreachable!(),
    }
}
