use std::collections::HashMap;

use proptest::prelude::*;
use strict_bi_hashmap::errors::BiMapError;
use strict_bi_hashmap::StrictBiHashMap;

#[derive(Debug, Clone)]
enum MapOp {
    Insert(u8, u8),
    SetByKey(u8, u8),
    SetByValue(u8, u8),
    RemoveByKey(u8),
    RemoveByValue(u8),
    Clear,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    // small domains so that keys and values collide often
    let element = 0u8..24;
    prop_oneof![
        4 => (element.clone(), element.clone()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        4 => (element.clone(), element.clone()).prop_map(|(k, v)| MapOp::SetByKey(k, v)),
        3 => (element.clone(), element.clone()).prop_map(|(v, k)| MapOp::SetByValue(v, k)),
        2 => element.clone().prop_map(MapOp::RemoveByKey),
        2 => element.prop_map(MapOp::RemoveByValue),
        1 => Just(MapOp::Clear),
    ]
}

#[derive(Default)]
struct Model {
    forward: HashMap<u8, u8>,
    reverse: HashMap<u8, u8>,
}

impl Model {
    fn insert(&mut self, key: u8, value: u8) -> Result<(), BiMapError> {
        if self.forward.contains_key(&key) {
            return Err(BiMapError::DuplicateKey);
        }
        if self.reverse.contains_key(&value) {
            return Err(BiMapError::DuplicateValue);
        }
        self.forward.insert(key, value);
        self.reverse.insert(value, key);
        Ok(())
    }

    fn set_by_key(&mut self, key: u8, value: u8) {
        if let Some(old_value) = self.forward.remove(&key) {
            self.reverse.remove(&old_value);
        }
        if let Some(old_key) = self.reverse.remove(&value) {
            self.forward.remove(&old_key);
        }
        self.forward.insert(key, value);
        self.reverse.insert(value, key);
    }

    fn set_by_value(&mut self, value: u8, key: u8) {
        if let Some(old_key) = self.reverse.remove(&value) {
            self.forward.remove(&old_key);
        }
        if let Some(old_value) = self.forward.remove(&key) {
            self.reverse.remove(&old_value);
        }
        self.forward.insert(key, value);
        self.reverse.insert(value, key);
    }

    fn remove_by_key(&mut self, key: u8) -> bool {
        match self.forward.remove(&key) {
            Some(value) => {
                self.reverse.remove(&value);
                true
            }
            None => false,
        }
    }

    fn remove_by_value(&mut self, value: u8) -> bool {
        match self.reverse.remove(&value) {
            Some(key) => {
                self.forward.remove(&key);
                true
            }
            None => false,
        }
    }
}

fn sorted_pairs<'a>(pairs: impl Iterator<Item = (&'a u8, &'a u8)>) -> Vec<(u8, u8)> {
    let mut res = pairs.map(|(a, b)| (*a, *b)).collect::<Vec<_>>();
    res.sort_unstable();
    res
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stays_bijective(ops in proptest::collection::vec(map_op_strategy(), 1..400)) {
        let mut map: StrictBiHashMap<u8, u8> = StrictBiHashMap::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                MapOp::SetByKey(k, v) => {
                    map.set_by_key(k, v).unwrap();
                    model.set_by_key(k, v);
                }
                MapOp::SetByValue(v, k) => {
                    map.set_by_value(v, k).unwrap();
                    model.set_by_value(v, k);
                }
                MapOp::RemoveByKey(k) => {
                    prop_assert_eq!(map.remove_by_key(&k).unwrap(), model.remove_by_key(k));
                }
                MapOp::RemoveByValue(v) => {
                    prop_assert_eq!(map.remove_by_value(&v).unwrap(), model.remove_by_value(v));
                }
                MapOp::Clear => {
                    map.clear();
                    model = Model::default();
                }
            }

            prop_assert_eq!(map.len(), model.forward.len());
            prop_assert_eq!(map.iter_reverse().len(), map.len());
            for (k, v) in map.iter() {
                prop_assert_eq!(map.get_by_value(v).unwrap(), Some(k));
                prop_assert!(map.contains_key(k).unwrap());
            }
            prop_assert_eq!(sorted_pairs(map.iter()), sorted_pairs(model.forward.iter()));
            prop_assert_eq!(sorted_pairs(map.iter_reverse()), sorted_pairs(model.reverse.iter()));
        }
    }
}
