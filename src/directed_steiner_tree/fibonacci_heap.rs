// Addressable min-heap: O(1) push, amortized O(1) decrease_key, amortized
// O(log n) pop_min. push returns a handle that stays valid until the heap is
// cleared; the caller must stop using a handle once its entry is popped.
pub struct FibonacciHeap<K> {
    nodes: Vec<Node<K>>,
    min: Option<usize>,
}

struct Node<K> {
    key: K,
    value: usize,
    parent: Option<usize>,
    child: Option<usize>,
    // circular sibling ring
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
}

impl<K> Default for FibonacciHeap<K> {
    fn default() -> Self {
        FibonacciHeap { nodes: Vec::new(), min: None }
    }
}

impl<K> FibonacciHeap<K>
where
    K: PartialOrd + Copy,
{
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    #[inline]
    pub fn key(&self, handle: usize) -> K {
        self.nodes[handle].key
    }

    pub fn push(&mut self, key: K, value: usize) -> usize {
        let handle = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            parent: None,
            child: None,
            left: handle,
            right: handle,
            degree: 0,
            marked: false,
        });
        self.add_root(handle);
        handle
    }

    pub fn pop_min(&mut self) -> Option<(K, usize)> {
        let min = self.min?;

        // gather the surviving roots and promote the minimum's children
        let mut roots = Vec::new();
        let mut x = self.nodes[min].right;
        while x != min {
            roots.push(x);
            x = self.nodes[x].right;
        }
        if let Some(child) = self.nodes[min].child {
            let mut y = child;
            loop {
                roots.push(y);
                self.nodes[y].parent = None;
                self.nodes[y].marked = false;
                y = self.nodes[y].right;
                if y == child {
                    break;
                }
            }
        }

        self.nodes[min].child = None;
        self.nodes[min].degree = 0;
        self.nodes[min].left = min;
        self.nodes[min].right = min;

        self.min = None;
        self.consolidate(&roots);

        Some((self.nodes[min].key, self.nodes[min].value))
    }

    pub fn decrease_key(&mut self, handle: usize, key: K) {
        debug_assert!(!(self.nodes[handle].key < key));
        self.nodes[handle].key = key;

        if let Some(parent) = self.nodes[handle].parent {
            if self.nodes[handle].key < self.nodes[parent].key {
                self.cut(handle, parent);
                self.cascading_cut(parent);
            }
        }

        let min = self.min.unwrap();
        if self.nodes[handle].key < self.nodes[min].key {
            self.min = Some(handle);
        }
    }

    // splice a detached tree root into the root ring
    fn add_root(&mut self, x: usize) {
        match self.min {
            None => {
                self.nodes[x].left = x;
                self.nodes[x].right = x;
                self.min = Some(x);
            }
            Some(min) => {
                let right = self.nodes[min].right;
                self.nodes[x].left = min;
                self.nodes[x].right = right;
                self.nodes[min].right = x;
                self.nodes[right].left = x;
                if self.nodes[x].key < self.nodes[min].key {
                    self.min = Some(x);
                }
            }
        }
    }

    fn consolidate(&mut self, roots: &[usize]) {
        let mut by_degree: Vec<Option<usize>> = Vec::new();

        for &root in roots {
            let mut x = root;
            self.nodes[x].left = x;
            self.nodes[x].right = x;

            let mut degree = self.nodes[x].degree;
            loop {
                if by_degree.len() <= degree {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(x);
                        break;
                    }
                    Some(y) => {
                        let (small, large) = if self.nodes[y].key < self.nodes[x].key { (y, x) } else { (x, y) };
                        self.add_child(small, large);
                        x = small;
                        degree = self.nodes[x].degree;
                    }
                }
            }
        }

        for root in by_degree.into_iter().flatten() {
            self.add_root(root);
        }
    }

    fn add_child(&mut self, parent: usize, child: usize) {
        self.nodes[child].parent = Some(parent);
        self.nodes[child].marked = false;
        match self.nodes[parent].child {
            None => {
                self.nodes[child].left = child;
                self.nodes[child].right = child;
                self.nodes[parent].child = Some(child);
            }
            Some(head) => {
                let right = self.nodes[head].right;
                self.nodes[child].left = head;
                self.nodes[child].right = right;
                self.nodes[head].right = child;
                self.nodes[right].left = child;
            }
        }
        self.nodes[parent].degree += 1;
    }

    // detach child from parent and promote it to the root ring
    fn cut(&mut self, child: usize, parent: usize) {
        if self.nodes[parent].child == Some(child) {
            let right = self.nodes[child].right;
            self.nodes[parent].child = if right == child { None } else { Some(right) };
        }
        let left = self.nodes[child].left;
        let right = self.nodes[child].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        self.nodes[parent].degree -= 1;
        self.nodes[child].parent = None;
        self.nodes[child].marked = false;
        self.nodes[child].left = child;
        self.nodes[child].right = child;
        self.add_root(child);
    }

    fn cascading_cut(&mut self, mut x: usize) {
        while let Some(parent) = self.nodes[x].parent {
            if !self.nodes[x].marked {
                self.nodes[x].marked = true;
                return;
            }
            self.cut(x, parent);
            x = parent;
        }
    }
}
