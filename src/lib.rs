pub mod directed_steiner_tree;

#[cfg(test)]
mod test_utility;
