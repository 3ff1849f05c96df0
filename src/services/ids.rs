//! Payment record identifiers

use snowflaked::sync::Generator;

use crate::error::{AppError, AppResult};

/// Largest instance id a snowflake can carry (10 bits)
pub const MAX_INSTANCE_ID: u16 = 1023;

/// Source of unique record ids
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> AppResult<String>;
}

/// Time-ordered ids, unique across instances with distinct instance ids
pub struct SnowflakeIdGenerator {
    generator: Generator,
}

impl SnowflakeIdGenerator {
    pub fn new(instance_id: u16) -> AppResult<Self> {
        if instance_id > MAX_INSTANCE_ID {
            return Err(AppError::Internal(format!(
                "Snowflake instance id {} exceeds {}",
                instance_id, MAX_INSTANCE_ID
            )));
        }
        Ok(Self {
            generator: Generator::new(instance_id),
        })
    }
}

impl IdGenerator for SnowflakeIdGenerator {
    fn next_id(&self) -> AppResult<String> {
        let id: u64 = self.generator.generate();
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids = SnowflakeIdGenerator::new(7).unwrap();
        let generated: HashSet<String> = (0..500).map(|_| ids.next_id().unwrap()).collect();
        assert_eq!(generated.len(), 500);
    }

    #[test]
    fn test_instance_id_out_of_range() {
        assert!(SnowflakeIdGenerator::new(MAX_INSTANCE_ID).is_ok());
        assert!(SnowflakeIdGenerator::new(MAX_INSTANCE_ID + 1).is_err());
    }
}
