//! Persistent big-endian Patricia trie maps keyed by unit strings.
//!
//! A [`PatMap`] stores bindings from sequences of fixed-width unsigned key
//! units (bytes, or UTF-16 code units) to values, as a Patricia trie with
//! compressed edge labels. Lookup, insertion, removal and submap extraction
//! run in time proportional to the key length; two maps merge in time
//! proportional to their combined size.
//!
//! The structure is a persistent value: it is never mutated in place from an
//! observer's point of view. Cloning a map is O(1), clones share structure,
//! and modifying one clone never affects another. Updates rebuild only the
//! spine from the root to the touched binding.
//!
//! Keys are ordered by the big-endian bit representation of their units,
//! i.e. unsigned numeric order unit by unit, then by length. For byte keys
//! this coincides with lexicographic byte order; for UTF-16 keys it is code
//! unit order, which differs from code point order above the basic
//! multilingual plane.
//!
//! The map answers prefix queries in both directions: [`PatMap::submap`]
//! extracts every binding below a query prefix, while [`PatMap::matches`]
//! enumerates every stored key that is a prefix of a query.
//!
//! ```rust
//! use patmap::ByteMap;
//!
//! let mut routes: ByteMap<&str> = ByteMap::new();
//! routes.insert(b"/", "root");
//! routes.insert(b"/api", "api");
//! routes.insert(b"/api/v1", "v1");
//!
//! let (path, handler, rest) = routes.longest_match(b"/api/v1/users").unwrap();
//! assert_eq!(path, b"/api/v1");
//! assert_eq!(*handler, "v1");
//! assert_eq!(rest, b"/users");
//! ```

#![forbid(unsafe_code)]

pub mod trie;

pub use trie::iter::{Iter, Keys, Matches, Values};
pub use trie::unit::KeyUnit;
pub use trie::{ByteMap, PatMap, Utf16Map};
