use patmap::Utf16Map;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn utf16_keys_round_trip() {
    let mut map: Utf16Map<u32> = Utf16Map::new();
    map.insert(&units("grüße"), 1);
    map.insert(&units("grün"), 2);
    map.insert(&units("gr"), 3);
    assert_eq!(map.get(&units("grüße")), Some(&1));
    assert_eq!(map.get(&units("grün")), Some(&2));
    assert_eq!(map.len(), 3);

    let query = units("grünlich");
    let (prefix, value, rest) = map.longest_match(&query).unwrap();
    assert_eq!(prefix, &units("grün")[..]);
    assert_eq!(*value, 2);
    assert_eq!(rest, &units("lich")[..]);
}

#[test]
fn iteration_follows_code_unit_order_not_code_point_order() {
    // U+10000 encodes as the surrogate pair [0xD800, 0xDC00], which sorts
    // below the single unit [0xE000] even though the code point U+E000 is
    // smaller. Code unit order is the contract.
    let supplementary = units("\u{10000}");
    let private_use = units("\u{E000}");
    assert!(supplementary[0] < private_use[0]);

    let mut map: Utf16Map<u32> = Utf16Map::new();
    map.insert(&private_use, 1);
    map.insert(&supplementary, 2);
    let keys: Vec<Vec<u16>> = map.keys().map(|k| k.to_vec()).collect();
    assert_eq!(keys, vec![supplementary, private_use]);
}
