use patmap::ByteMap;
use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};
use std::collections::BTreeMap;

#[test]
fn iter_returns_keys_in_sorted_order() {
    const N: usize = 512;
    let mut rng = ThreadRng::default();
    let mut map: ByteMap<u64> = ByteMap::new();
    let mut reference: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
    for i in 0..N {
        let len = rng.gen_range(0..12);
        let mut key = vec![0u8; len];
        rng.fill_bytes(&mut key);
        map.insert(&key, i as u64);
        reference.insert(key, i as u64);
    }
    let from_map: Vec<(Vec<u8>, u64)> = map.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
    let from_reference: Vec<(Vec<u8>, u64)> = reference.into_iter().collect();
    assert_eq!(from_map, from_reference);
}

#[test]
fn shorter_keys_come_before_their_extensions() {
    let map: ByteMap<u32> = [(&b"b"[..], 1), (b"a", 2), (b"c", 3), (b"ab", 4)]
        .into_iter()
        .collect();
    let keys: Vec<Vec<u8>> = map.keys().map(|k| k.to_vec()).collect();
    assert_eq!(
        keys,
        vec![b"a".to_vec(), b"ab".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
}
