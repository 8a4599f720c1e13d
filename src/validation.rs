//! Device identifier grammar.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::OperationError;

lazy_static! {
    /// Registry identifier grammar: 1 to 128 characters drawn from letters,
    /// digits and a fixed punctuation set. Initialized once; read-only.
    static ref DEVICE_ID_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9\-:.+%_#*?!(),=@;$']{1,128}$")
            .expect("device id pattern is valid");
}

/// Whether `device_id` satisfies the registry identifier grammar.
pub fn is_valid_device_id(device_id: &str) -> bool {
    DEVICE_ID_REGEX.is_match(device_id)
}

/// Partition raw ids into grammar-valid ids and `ArgumentInvalid` errors.
///
/// Input order is preserved on both sides. Purely local; invalid ids are
/// rejected before any registry call is made.
pub fn validate_device_ids(raw_ids: &[String]) -> (Vec<String>, Vec<OperationError>) {
    let mut valid = Vec::with_capacity(raw_ids.len());
    let mut errors = Vec::new();

    for id in raw_ids {
        if is_valid_device_id(id) {
            valid.push(id.clone());
        } else {
            errors.push(OperationError::argument_invalid(id.clone()));
        }
    }

    (valid, errors)
}
