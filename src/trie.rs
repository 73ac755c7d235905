//! The Patricia trie map.
//!
//! A [`PatMap`] is built from three node shapes: stems carry a compressed
//! key fragment with an optional binding, forks branch on a single bit of
//! the first undecided key unit, and the empty node carries nothing. All
//! rewriting goes through the node constructors, which re-establish the
//! shape invariants, so equal binding sets always produce equal shapes.

pub mod iter;
mod merge;
mod node;
#[cfg(feature = "serde")]
mod ser;
pub mod unit;

use std::fmt;
use std::sync::Arc;

use iter::{Iter, Keys, Matches, Values};
use merge::{intersect_nodes, merge_nodes};
use node::{fork, frag, join, stem, take_arc, Node};
use unit::{common_prefix_len, KeyUnit};

/// A persistent map from unit strings to values, as a big-endian Patricia
/// trie with compressed edge labels.
///
/// Cloning is O(1) and clones share structure; every update rebuilds only
/// the spine from the root to the touched binding and leaves all other
/// subtries shared. Two maps holding the same bindings always have the same
/// shape, so `==` compares contents.
///
/// Read-only operations need no bounds on the value type. Operations that
/// rebuild the trie require `V: Clone`, because a rebuilt spine node may be
/// shared with another map and its value then has to be copied out.
pub struct PatMap<E: KeyUnit, V> {
    root: Option<Arc<Node<E, V>>>,
}

/// A [`PatMap`] keyed by byte strings.
pub type ByteMap<V> = PatMap<u8, V>;

/// A [`PatMap`] keyed by UTF-16 code units. Iteration order is code unit
/// order, which differs from code point order beyond the basic multilingual
/// plane.
pub type Utf16Map<V> = PatMap<u16, V>;

impl<E: KeyUnit, V> PatMap<E, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        PatMap { root: None }
    }

    /// Creates a map holding the single binding `key -> value`.
    pub fn singleton(key: &[E], value: V) -> Self {
        PatMap {
            root: Some(Arc::new(Node::Stem {
                prefix: frag(key),
                value: Some(value),
                child: Arc::new(Node::Empty),
            })),
        }
    }

    /// True if the map holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of bindings. Counted by a full traversal.
    pub fn len(&self) -> usize {
        self.root.as_deref().map_or(0, Node::len)
    }

    /// Returns the value bound to `key`, if any.
    pub fn get(&self, key: &[E]) -> Option<&V> {
        let mut node = self.root.as_ref()?;
        let mut rest = key;
        loop {
            match &**node {
                Node::Empty => return None,
                Node::Stem {
                    prefix,
                    value,
                    child,
                } => {
                    let n = common_prefix_len(rest, prefix);
                    if n < prefix.len() {
                        return None;
                    }
                    rest = &rest[n..];
                    if rest.is_empty() {
                        return value.as_ref();
                    }
                    node = child;
                }
                Node::Fork {
                    prefix,
                    mask,
                    left,
                    right,
                } => {
                    let Some(&e) = rest.first() else { return None };
                    if !e.match_prefix(*prefix, *mask) {
                        return None;
                    }
                    node = if e.zero_bit(*mask) { left } else { right };
                }
            }
        }
    }

    /// True if `key` is bound.
    pub fn contains_key(&self, key: &[E]) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over all bindings in key order.
    pub fn iter(&self) -> Iter<'_, E, V> {
        Iter::new(self.root.as_deref())
    }

    /// Iterates over all keys in order.
    pub fn keys(&self) -> Keys<'_, E, V> {
        Keys(self.iter())
    }

    /// Iterates over all values, in key order of their bindings.
    pub fn values(&self) -> Values<'_, E, V> {
        Values::new(self.root.as_deref())
    }

    /// Enumerates the stored keys that are prefixes of `query`, shortest
    /// first. Each element is the matched prefix of `query`, the bound
    /// value, and the unconsumed remainder.
    pub fn matches<'t, 'q>(&'t self, query: &'q [E]) -> Matches<'t, 'q, E, V> {
        Matches::new(self.root.as_deref(), query)
    }

    /// Returns the longest stored key that is a prefix of `query`, with its
    /// value and the unconsumed remainder of `query`.
    pub fn longest_match<'t, 'q>(&'t self, query: &'q [E]) -> Option<(&'q [E], &'t V, &'q [E])> {
        self.matches(query).last()
    }

    /// Transforms and filters values, with access to the full key. A `None`
    /// from `f` drops the binding.
    pub fn filter_map_with_key<V2, F>(&self, mut f: F) -> PatMap<E, V2>
    where
        V2: Clone,
        F: FnMut(&[E], &V) -> Option<V2>,
    {
        match self.root.as_deref() {
            None => PatMap::new(),
            Some(root) => {
                let mut path = Vec::new();
                PatMap::from_node(filter_map_node(root, &mut path, &mut f))
            }
        }
    }

    /// Transforms and filters values. A `None` from `f` drops the binding.
    pub fn filter_map<V2, F>(&self, mut f: F) -> PatMap<E, V2>
    where
        V2: Clone,
        F: FnMut(&V) -> Option<V2>,
    {
        self.filter_map_with_key(|_, v| f(v))
    }

    fn from_node(node: Node<E, V>) -> Self {
        match node {
            Node::Empty => PatMap { root: None },
            node => PatMap {
                root: Some(Arc::new(node)),
            },
        }
    }
}

impl<E: KeyUnit, V: Clone> PatMap<E, V> {
    /// Rewrites the binding at `key`: `f` receives the current value, if
    /// any, and its return becomes the new binding. `None` removes it.
    pub fn alter<F>(&mut self, key: &[E], f: F)
    where
        F: FnOnce(Option<V>) -> Option<V>,
    {
        let root = self.take_root();
        *self = Self::from_node(alter_node(root, key, f));
    }

    /// Binds `key` to `value`, returning the previous value if there was
    /// one.
    pub fn insert(&mut self, key: &[E], value: V) -> Option<V> {
        let mut previous = None;
        self.alter(key, |old| {
            previous = old;
            Some(value)
        });
        previous
    }

    /// Removes the binding at `key`, returning its value if there was one.
    pub fn remove(&mut self, key: &[E]) -> Option<V> {
        let mut removed = None;
        self.alter(key, |old| {
            removed = old;
            None
        });
        removed
    }

    /// Applies `f` to the value bound to `key`. A missing key leaves the
    /// map untouched and allocates nothing.
    pub fn adjust<F>(&mut self, key: &[E], f: F)
    where
        F: FnOnce(&mut V),
    {
        if !self.contains_key(key) {
            return;
        }
        let root = self.root.as_mut().expect("binding present in empty map");
        let mut node = Arc::make_mut(root);
        let mut rest = key;
        loop {
            match node {
                Node::Stem {
                    prefix,
                    value,
                    child,
                } => {
                    let n = common_prefix_len(rest, prefix);
                    rest = &rest[n..];
                    if rest.is_empty() {
                        f(value.as_mut().expect("present binding lost on descent"));
                        return;
                    }
                    node = Arc::make_mut(child);
                }
                Node::Fork {
                    mask, left, right, ..
                } => {
                    let e = rest[0];
                    node = if e.zero_bit(*mask) {
                        Arc::make_mut(left)
                    } else {
                        Arc::make_mut(right)
                    };
                }
                Node::Empty => unreachable!("present binding lost on descent"),
            }
        }
    }

    /// Extracts the sub-map of all bindings whose key starts with `prefix`,
    /// keys unchanged. The extracted subtrie is shared, not copied.
    pub fn submap(&self, prefix: &[E]) -> Self {
        let Some(mut node) = self.root.as_ref() else {
            return Self::new();
        };
        let mut consumed = 0;
        loop {
            match &**node {
                Node::Empty => return Self::new(),
                Node::Stem {
                    prefix: p,
                    value,
                    child,
                } => {
                    let rest = &prefix[consumed..];
                    let n = common_prefix_len(rest, p);
                    if n == rest.len() {
                        // The query ends at or inside this stem; everything
                        // below it starts with `prefix`. Re-attach the part
                        // of the key consumed on the way down.
                        let mut full = Vec::with_capacity(consumed + p.len());
                        full.extend_from_slice(&prefix[..consumed]);
                        full.extend_from_slice(p);
                        return Self::from_node(stem(
                            full.into_boxed_slice(),
                            value.clone(),
                            Arc::clone(child),
                        ));
                    }
                    if n < p.len() {
                        return Self::new();
                    }
                    consumed += n;
                    node = child;
                }
                Node::Fork {
                    prefix: fp,
                    mask,
                    left,
                    right,
                } => {
                    let rest = &prefix[consumed..];
                    let Some(&e) = rest.first() else {
                        // The query is spent; the whole fork is the sub-map.
                        return Self::from_node(stem(frag(prefix), None, Arc::clone(node)));
                    };
                    if !e.match_prefix(*fp, *mask) {
                        return Self::new();
                    }
                    node = if e.zero_bit(*mask) { left } else { right };
                }
            }
        }
    }

    /// Removes every binding whose key starts with `prefix`, by locating
    /// the sub-map's root and splicing it out.
    pub fn remove_submap(&mut self, prefix: &[E]) {
        let root = self.take_root();
        *self = Self::from_node(remove_submap_node(root, prefix));
    }

    /// Merges two maps. Keys present in both have their values combined by
    /// `f`, this map's value first; a `None` from `f` drops the key.
    pub fn merge_with<F>(self, other: Self, mut f: F) -> Self
    where
        F: FnMut(V, V) -> Option<V>,
    {
        Self::from_node(merge_nodes(self.into_node(), other.into_node(), &mut f))
    }

    /// Union keeping this map's value on colliding keys.
    pub fn union_left(self, other: Self) -> Self {
        self.merge_with(other, |x, _| Some(x))
    }

    /// Union keeping the other map's value on colliding keys.
    pub fn union_right(self, other: Self) -> Self {
        self.merge_with(other, |_, y| Some(y))
    }

    /// Intersects two maps. Only keys present in both survive, with their
    /// values combined by `f`, this map's value first; a `None` from `f`
    /// drops the key.
    pub fn intersect_with<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(&V, &V) -> Option<V>,
    {
        match (self.root.as_deref(), other.root.as_deref()) {
            (Some(a), Some(b)) => Self::from_node(intersect_nodes(a, b, &mut f)),
            _ => Self::new(),
        }
    }

    fn take_root(&mut self) -> Node<E, V> {
        self.root.take().map(take_arc).unwrap_or(Node::Empty)
    }

    fn into_node(self) -> Node<E, V> {
        self.root.map(take_arc).unwrap_or(Node::Empty)
    }
}

impl<E: KeyUnit, V> Default for PatMap<E, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: KeyUnit, V> Clone for PatMap<E, V> {
    fn clone(&self) -> Self {
        PatMap {
            root: self.root.clone(),
        }
    }
}

impl<E: KeyUnit, V: PartialEq> PartialEq for PatMap<E, V> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl<E: KeyUnit, V: Eq> Eq for PatMap<E, V> {}

impl<E: KeyUnit, V: fmt::Debug> fmt::Debug for PatMap<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Builds a map from key-value pairs. Where a key occurs more than once,
/// the first occurrence wins, matching the left bias of
/// [`PatMap::union_left`].
impl<E: KeyUnit, V: Clone, K: AsRef<[E]>> FromIterator<(K, V)> for PatMap<E, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut map = PatMap::new();
        for (key, value) in entries {
            map.alter(key.as_ref(), |previous| Some(previous.unwrap_or(value)));
        }
        map
    }
}

impl<'a, E: KeyUnit, V> IntoIterator for &'a PatMap<E, V> {
    type Item = (Box<[E]>, &'a V);
    type IntoIter = Iter<'a, E, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rewrites the binding at `key` within an owned node.
fn alter_node<E, V, F>(node: Node<E, V>, key: &[E], f: F) -> Node<E, V>
where
    E: KeyUnit,
    V: Clone,
    F: FnOnce(Option<V>) -> Option<V>,
{
    match node {
        Node::Empty => match f(None) {
            None => Node::Empty,
            Some(v) => Node::Stem {
                prefix: frag(key),
                value: Some(v),
                child: Arc::new(Node::Empty),
            },
        },
        Node::Stem {
            prefix,
            value,
            child,
        } => {
            let n = common_prefix_len(key, &prefix);
            if n == key.len() && n == prefix.len() {
                // The stem is the binding site.
                stem(prefix, f(value), child)
            } else if n == prefix.len() {
                let new_child = alter_node(take_arc(child), &key[n..], f);
                stem(prefix, value, Arc::new(new_child))
            } else if n == key.len() {
                // The key ends inside the fragment: split it there.
                match f(None) {
                    None => Node::Stem {
                        prefix,
                        value,
                        child,
                    },
                    Some(v) => Node::Stem {
                        prefix: frag(&prefix[..n]),
                        value: Some(v),
                        child: Arc::new(Node::Stem {
                            prefix: frag(&prefix[n..]),
                            value,
                            child,
                        }),
                    },
                }
            } else {
                // The key diverges inside the fragment.
                match f(None) {
                    None => Node::Stem {
                        prefix,
                        value,
                        child,
                    },
                    Some(v) => {
                        let shared = frag(&prefix[..n]);
                        let tail = frag(&prefix[n..]);
                        let new = frag(&key[n..]);
                        let (e_old, e_new) = (tail[0], new[0]);
                        let old_stem = Node::Stem {
                            prefix: tail,
                            value,
                            child,
                        };
                        let new_stem = Node::Stem {
                            prefix: new,
                            value: Some(v),
                            child: Arc::new(Node::Empty),
                        };
                        stem(shared, None, Arc::new(join(e_new, new_stem, e_old, old_stem)))
                    }
                }
            }
        }
        Node::Fork {
            prefix,
            mask,
            left,
            right,
        } => {
            let Some(&e) = key.first() else {
                // The empty key in front of a root fork.
                return match f(None) {
                    None => Node::Fork {
                        prefix,
                        mask,
                        left,
                        right,
                    },
                    Some(v) => Node::Stem {
                        prefix: frag(&[]),
                        value: Some(v),
                        child: Arc::new(Node::Fork {
                            prefix,
                            mask,
                            left,
                            right,
                        }),
                    },
                };
            };
            if !e.match_prefix(prefix, mask) {
                match f(None) {
                    None => Node::Fork {
                        prefix,
                        mask,
                        left,
                        right,
                    },
                    Some(v) => {
                        let new_stem = Node::Stem {
                            prefix: frag(key),
                            value: Some(v),
                            child: Arc::new(Node::Empty),
                        };
                        let old = Node::Fork {
                            prefix,
                            mask,
                            left,
                            right,
                        };
                        join(e, new_stem, prefix, old)
                    }
                }
            } else if e.zero_bit(mask) {
                let new_left = alter_node(take_arc(left), key, f);
                fork(prefix, mask, Arc::new(new_left), right)
            } else {
                let new_right = alter_node(take_arc(right), key, f);
                fork(prefix, mask, left, Arc::new(new_right))
            }
        }
    }
}

fn remove_submap_node<E, V>(node: Node<E, V>, prefix: &[E]) -> Node<E, V>
where
    E: KeyUnit,
    V: Clone,
{
    match node {
        Node::Empty => Node::Empty,
        Node::Stem {
            prefix: p,
            value,
            child,
        } => {
            let n = common_prefix_len(prefix, &p);
            if n == prefix.len() {
                // Every key below starts with `prefix`.
                Node::Empty
            } else if n == p.len() {
                let child = remove_submap_node(take_arc(child), &prefix[n..]);
                stem(p, value, Arc::new(child))
            } else {
                Node::Stem {
                    prefix: p,
                    value,
                    child,
                }
            }
        }
        Node::Fork {
            prefix: fp,
            mask,
            left,
            right,
        } => {
            let Some(&e) = prefix.first() else {
                return Node::Empty;
            };
            if !e.match_prefix(fp, mask) {
                Node::Fork {
                    prefix: fp,
                    mask,
                    left,
                    right,
                }
            } else if e.zero_bit(mask) {
                let left = remove_submap_node(take_arc(left), prefix);
                fork(fp, mask, Arc::new(left), right)
            } else {
                let right = remove_submap_node(take_arc(right), prefix);
                fork(fp, mask, left, Arc::new(right))
            }
        }
    }
}

fn filter_map_node<E, V, V2, F>(node: &Node<E, V>, path: &mut Vec<E>, f: &mut F) -> Node<E, V2>
where
    E: KeyUnit,
    V2: Clone,
    F: FnMut(&[E], &V) -> Option<V2>,
{
    match node {
        Node::Empty => Node::Empty,
        Node::Stem {
            prefix,
            value,
            child,
        } => {
            let depth = path.len();
            path.extend_from_slice(prefix);
            let value = value.as_ref().and_then(|v| f(path, v));
            let child = filter_map_node(child, path, f);
            path.truncate(depth);
            stem(prefix.clone(), value, Arc::new(child))
        }
        Node::Fork {
            prefix,
            mask,
            left,
            right,
        } => {
            let left = filter_map_node(left, path, f);
            let right = filter_map_node(right, path, f);
            fork(*prefix, *mask, Arc::new(left), Arc::new(right))
        }
    }
}

#[cfg(test)]
impl<E: KeyUnit, V> PatMap<E, V> {
    pub(crate) fn check_invariants(&self) {
        if let Some(root) = self.root.as_deref() {
            assert!(
                !matches!(root, Node::Empty),
                "empty map stored as an allocated root"
            );
            root.check_invariants(true);
        }
    }
}
