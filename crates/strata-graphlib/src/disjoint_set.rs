//! Union-find over dense `usize` keys.

/// A disjoint-set forest with path compression.
///
/// Unlike a rank-balanced union-find, [`DisjointSet::attach`] lets the caller pick which
/// representative survives. Layout code relies on that to keep the first member of a chain as
/// its root.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of `v`, compressing the path on the way.
    pub fn find(&mut self, v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = v;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Representative lookup without compression.
    pub fn root(&self, v: usize) -> usize {
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Merges the sets of `a` and `b`; the smaller representative survives.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (keep, drop) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[drop] = keep;
        true
    }

    /// Moves the set of `child` under the representative of `parent`.
    pub fn attach(&mut self, child: usize, parent: usize) -> bool {
        let rc = self.find(child);
        let rp = self.find(parent);
        if rc == rp {
            return false;
        }
        self.parent[rc] = rp;
        true
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
