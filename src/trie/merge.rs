//! Structural merge and intersection over node pairs.
//!
//! Both walks recurse on the shapes of the two operands: aligned stems split
//! on their shared fragment, a stem meeting a fork routes into the side its
//! first unit selects, and two forks compare masks to decide which one is
//! closer to the root. Divergence joins the operands under a fresh fork.

use std::sync::Arc;

use super::node::{fork, frag, join, stem, take_arc, Node};
use super::unit::{common_prefix_len, KeyUnit};

fn merge_values<V, F>(a: Option<V>, b: Option<V>, f: &mut F) -> Option<V>
where
    F: FnMut(V, V) -> Option<V>,
{
    match (a, b) {
        (Some(x), Some(y)) => f(x, y),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Merges two tries. On keys present in both, `f` combines the values, the
/// first operand's value first; `None` drops the binding.
pub(super) fn merge_nodes<E, V, F>(a: Node<E, V>, b: Node<E, V>, f: &mut F) -> Node<E, V>
where
    E: KeyUnit,
    V: Clone,
    F: FnMut(V, V) -> Option<V>,
{
    match (a, b) {
        (Node::Empty, t) | (t, Node::Empty) => t,
        (
            Node::Stem {
                prefix: p1,
                value: v1,
                child: c1,
            },
            Node::Stem {
                prefix: p2,
                value: v2,
                child: c2,
            },
        ) => {
            let n = common_prefix_len(&p1, &p2);
            if n == p1.len() && n == p2.len() {
                let value = merge_values(v1, v2, f);
                let child = merge_nodes(take_arc(c1), take_arc(c2), f);
                stem(p1, value, Arc::new(child))
            } else if n == p1.len() {
                // The second stem continues below the first.
                let b = Node::Stem {
                    prefix: frag(&p2[n..]),
                    value: v2,
                    child: c2,
                };
                let child = merge_nodes(take_arc(c1), b, f);
                stem(p1, v1, Arc::new(child))
            } else if n == p2.len() {
                let a = Node::Stem {
                    prefix: frag(&p1[n..]),
                    value: v1,
                    child: c1,
                };
                let child = merge_nodes(a, take_arc(c2), f);
                stem(p2, v2, Arc::new(child))
            } else {
                // The fragments diverge after a shared part.
                let shared = frag(&p1[..n]);
                let r1 = frag(&p1[n..]);
                let r2 = frag(&p2[n..]);
                let (e1, e2) = (r1[0], r2[0]);
                let a = Node::Stem {
                    prefix: r1,
                    value: v1,
                    child: c1,
                };
                let b = Node::Stem {
                    prefix: r2,
                    value: v2,
                    child: c2,
                };
                stem(shared, None, Arc::new(join(e1, a, e2, b)))
            }
        }
        (
            Node::Stem {
                prefix,
                value,
                child,
            },
            Node::Fork {
                prefix: fp,
                mask,
                left,
                right,
            },
        ) => {
            if prefix.is_empty() {
                // Root stem holding the empty key's binding.
                let b = Node::Fork {
                    prefix: fp,
                    mask,
                    left,
                    right,
                };
                let child = merge_nodes(take_arc(child), b, f);
                stem(prefix, value, Arc::new(child))
            } else {
                let e = prefix[0];
                let a = Node::Stem {
                    prefix,
                    value,
                    child,
                };
                if !e.match_prefix(fp, mask) {
                    let b = Node::Fork {
                        prefix: fp,
                        mask,
                        left,
                        right,
                    };
                    join(e, a, fp, b)
                } else if e.zero_bit(mask) {
                    fork(fp, mask, Arc::new(merge_nodes(a, take_arc(left), f)), right)
                } else {
                    fork(fp, mask, left, Arc::new(merge_nodes(a, take_arc(right), f)))
                }
            }
        }
        (
            Node::Fork {
                prefix: fp,
                mask,
                left,
                right,
            },
            Node::Stem {
                prefix,
                value,
                child,
            },
        ) => {
            if prefix.is_empty() {
                let a = Node::Fork {
                    prefix: fp,
                    mask,
                    left,
                    right,
                };
                let child = merge_nodes(a, take_arc(child), f);
                stem(prefix, value, Arc::new(child))
            } else {
                let e = prefix[0];
                let b = Node::Stem {
                    prefix,
                    value,
                    child,
                };
                if !e.match_prefix(fp, mask) {
                    let a = Node::Fork {
                        prefix: fp,
                        mask,
                        left,
                        right,
                    };
                    join(fp, a, e, b)
                } else if e.zero_bit(mask) {
                    fork(fp, mask, Arc::new(merge_nodes(take_arc(left), b, f)), right)
                } else {
                    fork(fp, mask, left, Arc::new(merge_nodes(take_arc(right), b, f)))
                }
            }
        }
        (
            Node::Fork {
                prefix: p1,
                mask: m1,
                left: l1,
                right: r1,
            },
            Node::Fork {
                prefix: p2,
                mask: m2,
                left: l2,
                right: r2,
            },
        ) => {
            if m1 == m2 && p1 == p2 {
                let left = merge_nodes(take_arc(l1), take_arc(l2), f);
                let right = merge_nodes(take_arc(r1), take_arc(r2), f);
                fork(p1, m1, Arc::new(left), Arc::new(right))
            } else if m1 > m2 && p2.match_prefix(p1, m1) {
                // The second fork fits entirely inside one side of the first.
                let b = Node::Fork {
                    prefix: p2,
                    mask: m2,
                    left: l2,
                    right: r2,
                };
                if p2.zero_bit(m1) {
                    fork(p1, m1, Arc::new(merge_nodes(take_arc(l1), b, f)), r1)
                } else {
                    fork(p1, m1, l1, Arc::new(merge_nodes(take_arc(r1), b, f)))
                }
            } else if m2 > m1 && p1.match_prefix(p2, m2) {
                let a = Node::Fork {
                    prefix: p1,
                    mask: m1,
                    left: l1,
                    right: r1,
                };
                if p1.zero_bit(m2) {
                    fork(p2, m2, Arc::new(merge_nodes(a, take_arc(l2), f)), r2)
                } else {
                    fork(p2, m2, l2, Arc::new(merge_nodes(a, take_arc(r2), f)))
                }
            } else {
                let a = Node::Fork {
                    prefix: p1,
                    mask: m1,
                    left: l1,
                    right: r1,
                };
                let b = Node::Fork {
                    prefix: p2,
                    mask: m2,
                    left: l2,
                    right: r2,
                };
                join(p1, a, p2, b)
            }
        }
    }
}

/// Intersects two tries. Only keys present in both survive; `f` combines
/// the two values, the first operand's value first, and `None` drops the
/// binding.
pub(super) fn intersect_nodes<E, V, F>(a: &Node<E, V>, b: &Node<E, V>, f: &mut F) -> Node<E, V>
where
    E: KeyUnit,
    V: Clone,
    F: FnMut(&V, &V) -> Option<V>,
{
    match (a, b) {
        (Node::Empty, _) | (_, Node::Empty) => Node::Empty,
        (
            Node::Stem {
                prefix: p1,
                value: v1,
                child: c1,
            },
            Node::Stem {
                prefix: p2,
                value: v2,
                child: c2,
            },
        ) => {
            let n = common_prefix_len(p1, p2);
            if n == p1.len() && n == p2.len() {
                let value = match (v1, v2) {
                    (Some(x), Some(y)) => f(x, y),
                    _ => None,
                };
                stem(p1.clone(), value, Arc::new(intersect_nodes(c1, c2, f)))
            } else if n == p1.len() {
                // Surviving keys continue below the first stem's fragment;
                // its own binding has no counterpart in the second trie.
                let b = Node::Stem {
                    prefix: frag(&p2[n..]),
                    value: v2.clone(),
                    child: Arc::clone(c2),
                };
                stem(p1.clone(), None, Arc::new(intersect_nodes(c1, &b, f)))
            } else if n == p2.len() {
                let a = Node::Stem {
                    prefix: frag(&p1[n..]),
                    value: v1.clone(),
                    child: Arc::clone(c1),
                };
                stem(p2.clone(), None, Arc::new(intersect_nodes(&a, c2, f)))
            } else {
                Node::Empty
            }
        }
        (
            Node::Stem { prefix, child, .. },
            Node::Fork {
                prefix: fp,
                mask,
                left,
                right,
            },
        ) => {
            if prefix.is_empty() {
                intersect_nodes(child, b, f)
            } else {
                let e = prefix[0];
                if !e.match_prefix(*fp, *mask) {
                    Node::Empty
                } else if e.zero_bit(*mask) {
                    intersect_nodes(a, left, f)
                } else {
                    intersect_nodes(a, right, f)
                }
            }
        }
        (
            Node::Fork {
                prefix: fp,
                mask,
                left,
                right,
            },
            Node::Stem { prefix, child, .. },
        ) => {
            if prefix.is_empty() {
                intersect_nodes(a, child, f)
            } else {
                let e = prefix[0];
                if !e.match_prefix(*fp, *mask) {
                    Node::Empty
                } else if e.zero_bit(*mask) {
                    intersect_nodes(left, b, f)
                } else {
                    intersect_nodes(right, b, f)
                }
            }
        }
        (
            Node::Fork {
                prefix: p1,
                mask: m1,
                left: l1,
                right: r1,
            },
            Node::Fork {
                prefix: p2,
                mask: m2,
                left: l2,
                right: r2,
            },
        ) => {
            if m1 == m2 && p1 == p2 {
                let left = intersect_nodes(l1, l2, f);
                let right = intersect_nodes(r1, r2, f);
                fork(*p1, *m1, Arc::new(left), Arc::new(right))
            } else if m1 > m2 && p2.match_prefix(*p1, *m1) {
                let side = if p2.zero_bit(*m1) { l1 } else { r1 };
                intersect_nodes(side, b, f)
            } else if m2 > m1 && p1.match_prefix(*p2, *m2) {
                let side = if p1.zero_bit(*m2) { l2 } else { r2 };
                intersect_nodes(a, side, f)
            } else {
                Node::Empty
            }
        }
    }
}
