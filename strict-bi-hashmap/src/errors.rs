use comparison_strategy::ComparisonError;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum BiMapError {
    #[error("an item with the same key has already been added")]
    DuplicateKey,
    #[error("an item with the same value has already been added")]
    DuplicateValue,
    #[error("the given key was not present in the map")]
    KeyNotFound,
    #[error("the given value was not present in the map")]
    ValueNotFound,
    #[error("offset {offset} is out of range for a buffer of length {len}")]
    OutOfRange {
        offset: usize,
        len: usize,
    },
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

impl BiMapError {
    pub fn resource_name(&self) -> &'static str {
        match self {
            BiMapError::DuplicateKey |
            BiMapError::DuplicateValue => "Argument_AddingDuplicate",
            BiMapError::KeyNotFound => "Arg_KeyNotFound",
            BiMapError::ValueNotFound => "Arg_ValueNotFound",
            BiMapError::OutOfRange { .. } => "ArgumentOutOfRange_Index",
            BiMapError::Comparison(err) => err.resource_name(),
        }
    }
}
