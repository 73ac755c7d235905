use patmap::ByteMap;

#[test]
fn get_returns_value_when_present() {
    let mut map: ByteMap<u32> = ByteMap::new();
    map.insert(b"foobar", 2);
    map.insert(b"foo", 1);
    assert_eq!(map.get(b"foo"), Some(&1));
    assert_eq!(map.get(b"foobar"), Some(&2));
    assert!(map.get(b"missing").is_none());
    assert!(map.get(b"fooba").is_none());
}

#[test]
fn insert_returns_the_previous_value() {
    let mut map: ByteMap<&str> = ByteMap::new();
    assert_eq!(map.insert(b"k", "first"), None);
    assert_eq!(map.insert(b"k", "second"), Some("first"));
    assert_eq!(map.get(b"k"), Some(&"second"));
    assert_eq!(map.len(), 1);
}
