//! Index and range validation against the number of loaded records.
//!
//! Bounds are inclusive: a range is valid iff `0 <= start <= end < total`, an
//! index iff `0 <= index < total`.

use crate::{InputError, InputErrorKind};

fn as_bound(total: usize) -> i64 {
    i64::try_from(total).unwrap_or(i64::MAX)
}

/// Check an inclusive `start..=end` range. Rules apply in order: negative
/// start, start after end, end past the last record.
pub fn validate_range(start: i64, end: i64, total: usize) -> Result<(), InputError> {
    if start < 0 {
        return Err(InputError::new(
            InputErrorKind::InvalidRange,
            "range start index cannot be less than 0",
        ));
    }
    if start > end {
        return Err(InputError::new(
            InputErrorKind::InvalidRange,
            "range start index cannot be greater than end index",
        ));
    }
    if end >= as_bound(total) {
        return Err(InputError::new(
            InputErrorKind::InvalidRange,
            "range end index greater than total number of published collections",
        ));
    }
    Ok(())
}

pub fn validate_index(index: i64, total: usize) -> Result<(), InputError> {
    if index < 0 {
        return Err(InputError::new(
            InputErrorKind::IndexOutOfRange,
            "index must be greater than or equal to 0",
        ));
    }
    if index >= as_bound(total) {
        return Err(InputError::new(
            InputErrorKind::IndexOutOfRange,
            "index cannot be greater than the number of published collections",
        ));
    }
    Ok(())
}

/// Validate every index, failing on the first invalid one.
pub fn validate_indices(indices: &[i64], total: usize) -> Result<Vec<usize>, InputError> {
    indices
        .iter()
        .map(|&index| validate_index(index, total).map(|()| index as usize))
        .collect()
}
