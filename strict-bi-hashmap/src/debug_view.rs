use std::fmt::{Debug, Formatter};

use crate::StrictBiHashMap;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

/// Read-only listing of every live entry, for debuggers and test output.
pub struct DebugView<'a, K, V, KC, VC> {
    map: &'a StrictBiHashMap<K, V, KC, VC>,
}

impl<'a, K, V, KC, VC> DebugView<'a, K, V, KC, VC> {
    pub fn items(&self) -> Vec<KeyValuePair<&'a K, &'a V>> {
        self.map.iter().map(|(key, value)| KeyValuePair { key, value }).collect()
    }
}

impl<K: Debug, V: Debug, KC, VC> Debug for DebugView<'_, K, V, KC, VC> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items()).finish()
    }
}

impl<K, V, KC, VC> StrictBiHashMap<K, V, KC, VC> {
    pub fn debug_view(&self) -> DebugView<'_, K, V, KC, VC> {
        DebugView { map: self }
    }
}
