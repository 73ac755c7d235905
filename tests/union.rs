use patmap::ByteMap;

#[test]
fn union_left_keeps_the_left_value() {
    let left: ByteMap<u32> = [(b"k".to_vec(), 1)].into_iter().collect();
    let right: ByteMap<u32> = [(b"k".to_vec(), 2)].into_iter().collect();
    let unioned = left.union_left(right);
    assert_eq!(unioned.get(b"k"), Some(&1));
}

#[test]
fn union_right_keeps_the_right_value() {
    let left: ByteMap<u32> = [(b"k".to_vec(), 1)].into_iter().collect();
    let right: ByteMap<u32> = [(b"k".to_vec(), 2)].into_iter().collect();
    let unioned = left.union_right(right);
    assert_eq!(unioned.get(b"k"), Some(&2));
}

#[test]
fn merge_with_can_drop_collisions() {
    let left: ByteMap<u32> = [(&b"shared"[..], 1), (b"left", 10)].into_iter().collect();
    let right: ByteMap<u32> = [(&b"shared"[..], 2), (b"right", 20)].into_iter().collect();
    let merged = left.merge_with(right, |_, _| None);
    assert_eq!(merged.get(b"shared"), None);
    assert_eq!(merged.get(b"left"), Some(&10));
    assert_eq!(merged.get(b"right"), Some(&20));
    assert_eq!(merged.len(), 2);
}

#[test]
fn intersect_with_keeps_only_shared_keys() {
    let left: ByteMap<u32> = [(&b"shared"[..], 1), (b"left", 10)].into_iter().collect();
    let right: ByteMap<u32> = [(&b"shared"[..], 2), (b"right", 20)].into_iter().collect();
    let both = left.intersect_with(&right, |x, y| Some(x + y));
    assert_eq!(both.len(), 1);
    assert_eq!(both.get(b"shared"), Some(&3));
}

#[test]
fn removal_leaves_the_canonical_shape() {
    let mut map: ByteMap<u32> = [(&b"a"[..], 1), (b"abc", 2)].into_iter().collect();
    map.remove(b"abc");
    assert_eq!(map, ByteMap::singleton(b"a", 1));
}
