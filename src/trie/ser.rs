//! Serialization as a sequence of key-value entries.
//!
//! The trie shape is canonical, so the entry sequence is all that needs to
//! travel; deserialization rebuilds the same shape.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::unit::KeyUnit;
use super::PatMap;

impl<E, V> Serialize for PatMap<E, V>
where
    E: KeyUnit + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

struct EntriesVisitor<E, V>(PhantomData<(E, V)>);

impl<'de, E, V> Visitor<'de> for EntriesVisitor<E, V>
where
    E: KeyUnit + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
{
    type Value = PatMap<E, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of key-value entries")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut map = PatMap::new();
        while let Some((key, value)) = seq.next_element::<(Vec<E>, V)>()? {
            map.insert(&key, value);
        }
        Ok(map)
    }
}

impl<'de, E, V> Deserialize<'de> for PatMap<E, V>
where
    E: KeyUnit + Deserialize<'de>,
    V: Clone + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(EntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::ByteMap;

    #[test]
    fn round_trips_through_json() {
        let map: ByteMap<u32> = [
            (&b""[..], 0),
            (b"a", 1),
            (b"abc", 2),
            (b"b", 3),
        ]
        .into_iter()
        .collect();
        let encoded = serde_json::to_string(&map).unwrap();
        let decoded: ByteMap<u32> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, map);
    }
}
