use bijection::{BiMapError, ComparisonStrategy, RandomizedComparer, StrictBiHashMap, WellKnownTextComparer};

#[test]
pub fn letters_and_numbers() -> anyhow::Result<()> {
    let mut map: StrictBiHashMap<&'static str, i32> = StrictBiHashMap::new();
    map.insert("a", 1)?;
    map.insert("b", 2)?;
    assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), vec![("a", 1), ("b", 2)]);
    assert_eq!(map.iter_reverse().map(|(v, k)| (*v, *k)).collect::<Vec<_>>(), vec![(1, "a"), (2, "b")]);

    map.set_by_key("a", 3)?;
    assert!(!map.contains_value(&1)?);
    assert_eq!(map.get_by_value(&3)?, Some(&"a"));
    assert_eq!(map.len(), 2);
    Ok(())
}

#[test]
pub fn strict_insert_leaves_map_unchanged() -> anyhow::Result<()> {
    let mut map: StrictBiHashMap<&'static str, i32> = StrictBiHashMap::new();
    map.insert("k", 1)?;
    let err = map.insert("k", 2).unwrap_err();
    assert_eq!(err, BiMapError::DuplicateKey);
    assert_eq!(err.to_string(), "an item with the same key has already been added");
    assert_eq!(map.get_by_key(&"k")?, Some(&1));
    Ok(())
}

#[test]
pub fn copy_out_stops_when_full() -> anyhow::Result<()> {
    let map = StrictBiHashMap::<i32, i32>::from_mapping(vec![(1, 10), (2, 20), (3, 30)])?;
    let mut buffer = [(0, 0); 2];
    assert!(matches!(map.copy_to(&mut buffer, 2), Err(BiMapError::OutOfRange { offset: 2, len: 2 })));
    assert_eq!(map.copy_to(&mut buffer, 1)?, 1);
    assert_eq!(buffer, [(0, 0), (1, 10)]);
    Ok(())
}

#[test]
pub fn flooding_resistant_text_keys() -> anyhow::Result<()> {
    let comparer = RandomizedComparer::new();
    let mut map = StrictBiHashMap::with_comparers(comparer, ComparisonStrategy::<u32>::natural());
    for i in 0..64u32 {
        map.insert(format!("user-{}", i), i)?;
    }
    assert_eq!(map.value_of(&"user-17".to_string())?, &17);
    assert_eq!(map.key_of(&63)?, "user-63");
    assert!(map.comparers().0.for_serialization().is_none());
    assert_ne!(map.comparers().0, &map.comparers().0.reseeded());
    Ok(())
}
