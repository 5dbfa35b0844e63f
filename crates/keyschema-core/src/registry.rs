//! Lazily-populated table of scalar validators, one slot per data type.
//!
//! # Design
//! - Owned by the caller and passed by reference; there is no process-global table.
//! - Each slot is initialised at most once, even under concurrent first use.
//! - Validators are stateless, so one registry can serve every thread.

use std::array;

use once_cell::sync::OnceCell;

use crate::error::ValidationResult;
use crate::model::DataType;
use crate::validator::{ScalarValidator, build_validator};

/// Table mapping each [`DataType`] to its validator.
#[derive(Debug)]
pub struct ValidatorRegistry {
    slots: [OnceCell<Box<dyn ScalarValidator>>; DataType::COUNT],
}

impl ValidatorRegistry {
    /// Create an empty registry; validators are built on first lookup.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: array::from_fn(|_| OnceCell::new()),
        }
    }

    /// Validator for `data_type`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Grammar` when the validator's built-in pattern fails to compile.
    pub fn validator(&self, data_type: DataType) -> ValidationResult<&dyn ScalarValidator> {
        self.slots[data_type.index()]
            .get_or_try_init(|| {
                tracing::trace!(%data_type, "building scalar validator");
                build_validator(data_type)
            })
            .map(|validator| &**validator)
    }

    /// Build every validator up front.
    ///
    /// # Errors
    ///
    /// Returns the first grammar compilation failure.
    pub fn warm_up(&self) -> ValidationResult<()> {
        for data_type in DataType::ALL {
            self.validator(data_type)?;
        }
        Ok(())
    }

    /// Number of validators built so far.
    #[must_use]
    pub fn initialised(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
