use patmap::ByteMap;

fn routes() -> ByteMap<u32> {
    [
        (&b"/"[..], 0),
        (b"/api", 1),
        (b"/api/v1", 2),
        (b"/api/v2", 3),
        (b"/static", 4),
    ]
    .into_iter()
    .collect()
}

#[test]
fn submap_keeps_original_keys() {
    let map = routes();
    let api = map.submap(b"/api");
    let keys: Vec<Vec<u8>> = api.keys().map(|k| k.to_vec()).collect();
    assert_eq!(
        keys,
        vec![b"/api".to_vec(), b"/api/v1".to_vec(), b"/api/v2".to_vec()]
    );
    assert_eq!(api.get(b"/api/v2"), Some(&3));
}

#[test]
fn submap_of_the_empty_prefix_is_the_whole_map() {
    let map = routes();
    assert_eq!(map.submap(b""), map);
}

#[test]
fn submap_misses_cleanly() {
    let map = routes();
    assert!(map.submap(b"/nope").is_empty());
    assert!(map.submap(b"/api/v1/x").is_empty());
}

#[test]
fn remove_submap_splices_out_the_subtree() {
    let mut map = routes();
    map.remove_submap(b"/api");
    let keys: Vec<Vec<u8>> = map.keys().map(|k| k.to_vec()).collect();
    assert_eq!(keys, vec![b"/".to_vec(), b"/static".to_vec()]);
    assert_eq!(map.len(), 2);
}

#[test]
fn extracted_submap_and_remainder_recompose() {
    let map = routes();
    let inside = map.submap(b"/api");
    let mut outside = map.clone();
    outside.remove_submap(b"/api");
    assert_eq!(inside.union_left(outside), map);
}
