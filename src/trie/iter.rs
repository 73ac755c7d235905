//! Lazy enumeration over tries.
//!
//! All iterators keep an explicit stack of not-yet-visited subtries and
//! produce elements on demand. Bindings come out in key order: units compare
//! as unsigned numbers, shorter keys before their extensions.

use super::node::Node;
use super::unit::{common_prefix_len, KeyUnit};

enum Frame<'a, E: KeyUnit, V> {
    Visit(&'a Node<E, V>),
    /// Truncate the key buffer back to this depth when a stem is done.
    Ascend(usize),
}

/// Iterator over the bindings of a map, in key order.
pub struct Iter<'a, E: KeyUnit, V> {
    path: Vec<E>,
    stack: Vec<Frame<'a, E, V>>,
}

impl<'a, E: KeyUnit, V> Iter<'a, E, V> {
    pub(super) fn new(root: Option<&'a Node<E, V>>) -> Self {
        Iter {
            path: Vec::new(),
            stack: root.map(Frame::Visit).into_iter().collect(),
        }
    }
}

impl<'a, E: KeyUnit, V> Iterator for Iter<'a, E, V> {
    type Item = (Box<[E]>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Ascend(depth) => self.path.truncate(depth),
                Frame::Visit(Node::Empty) => {}
                Frame::Visit(Node::Stem {
                    prefix,
                    value,
                    child,
                }) => {
                    self.stack.push(Frame::Ascend(self.path.len()));
                    self.path.extend_from_slice(prefix);
                    self.stack.push(Frame::Visit(&**child));
                    if let Some(v) = value {
                        return Some((self.path.as_slice().into(), v));
                    }
                }
                Frame::Visit(Node::Fork { left, right, .. }) => {
                    self.stack.push(Frame::Visit(&**right));
                    self.stack.push(Frame::Visit(&**left));
                }
            }
        }
        None
    }
}

/// Iterator over the keys of a map, in key order.
pub struct Keys<'a, E: KeyUnit, V>(pub(super) Iter<'a, E, V>);

impl<E: KeyUnit, V> Iterator for Keys<'_, E, V> {
    type Item = Box<[E]>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

/// Iterator over the values of a map, in key order of their bindings.
pub struct Values<'a, E: KeyUnit, V> {
    stack: Vec<&'a Node<E, V>>,
}

impl<'a, E: KeyUnit, V> Values<'a, E, V> {
    pub(super) fn new(root: Option<&'a Node<E, V>>) -> Self {
        Values {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, E: KeyUnit, V> Iterator for Values<'a, E, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Empty => {}
                Node::Stem { value, child, .. } => {
                    self.stack.push(&**child);
                    if let Some(v) = value {
                        return Some(v);
                    }
                }
                Node::Fork { left, right, .. } => {
                    self.stack.push(&**right);
                    self.stack.push(&**left);
                }
            }
        }
        None
    }
}

/// Iterator over the stored keys that are prefixes of a query, shortest
/// first, each with its value and the unconsumed remainder of the query.
///
/// The walk descends one path of the trie and stops at the first point
/// where the query and the stored keys part ways, so exhausting the
/// iterator costs one key's worth of work, not one trie's.
pub struct Matches<'t, 'q, E: KeyUnit, V> {
    node: Option<&'t Node<E, V>>,
    query: &'q [E],
    consumed: usize,
}

impl<'t, 'q, E: KeyUnit, V> Matches<'t, 'q, E, V> {
    pub(super) fn new(root: Option<&'t Node<E, V>>, query: &'q [E]) -> Self {
        Matches {
            node: root,
            query,
            consumed: 0,
        }
    }
}

impl<'t, 'q, E: KeyUnit, V> Iterator for Matches<'t, 'q, E, V> {
    type Item = (&'q [E], &'t V, &'q [E]);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.node?;
            match node {
                Node::Empty => {
                    self.node = None;
                }
                Node::Stem {
                    prefix,
                    value,
                    child,
                } => {
                    let rest = &self.query[self.consumed..];
                    let n = common_prefix_len(rest, prefix);
                    if n < prefix.len() {
                        // The query ends or diverges inside the fragment;
                        // every key below is no prefix of it.
                        self.node = None;
                        continue;
                    }
                    self.consumed += n;
                    self.node = if self.consumed == self.query.len() {
                        None
                    } else {
                        Some(&**child)
                    };
                    if let Some(v) = value {
                        return Some((
                            &self.query[..self.consumed],
                            v,
                            &self.query[self.consumed..],
                        ));
                    }
                }
                Node::Fork {
                    prefix,
                    mask,
                    left,
                    right,
                } => {
                    let rest = &self.query[self.consumed..];
                    let Some(&e) = rest.first() else {
                        self.node = None;
                        continue;
                    };
                    if !e.match_prefix(*prefix, *mask) {
                        self.node = None;
                        continue;
                    }
                    self.node = Some(if e.zero_bit(*mask) { &**left } else { &**right });
                }
            }
        }
    }
}
