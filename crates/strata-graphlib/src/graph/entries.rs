//! Internal storage entries for [`DiGraph`](super::DiGraph).

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) v: usize,
    pub(in crate::graph) w: usize,
    pub(in crate::graph) label: E,
}
