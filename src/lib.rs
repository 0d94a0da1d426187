pub use comparison_strategy;
pub use strict_bi_hashmap;

pub use comparison_strategy::{Comparer, ComparisonError, ComparisonStrategy, RandomizedComparer, WellKnownTextComparer};
pub use strict_bi_hashmap::errors::BiMapError;
pub use strict_bi_hashmap::StrictBiHashMap;
