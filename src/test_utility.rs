use std::fs::read_to_string;
use std::path::Path;

pub struct SteinerInstance {
    pub num_nodes: usize,
    pub root: usize,
    pub terminals: Vec<usize>,
    pub edges: Vec<(usize, usize, i64)>,
}

// whitespace-separated tokens:
//   num_nodes num_edges root num_terminals
//   terminal * num_terminals
//   (from to cost) * num_edges
pub fn read_instance(path: &Path) -> SteinerInstance {
    let content = read_to_string(path).unwrap();
    let values: Vec<i64> = content.split_whitespace().map(|token| token.parse().unwrap()).collect();

    let num_nodes = values[0] as usize;
    let num_edges = values[1] as usize;
    let root = values[2] as usize;
    let num_terminals = values[3] as usize;

    let terminals = values[4..4 + num_terminals].iter().map(|&t| t as usize).collect();
    let edges = values[4 + num_terminals..]
        .chunks(3)
        .take(num_edges)
        .map(|chunk| (chunk[0] as usize, chunk[1] as usize, chunk[2]))
        .collect();

    SteinerInstance { num_nodes, root, terminals, edges }
}

pub fn read_expected(path: &Path) -> i64 {
    read_to_string(path).unwrap().trim().parse().unwrap()
}
