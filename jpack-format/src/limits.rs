//! Security limits and configuration

/// Security limits applied while reading untrusted TLV input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum payload length of a single record (default: 64 MiB)
    pub max_record_payload_len: u64,
    /// Maximum key/value pairs announced by one member count record (default: 65,535)
    pub max_members_per_object: u32,
    /// Maximum entries loaded from a dictionary trailer (default: 1,048,576)
    pub max_dictionary_entries: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_record_payload_len: 64 * 1024 * 1024,
            max_members_per_object: 65_535,
            max_dictionary_entries: 1_048_576,
        }
    }
}

impl Limits {
    /// Check a record payload length against the configured limit.
    pub fn check_payload_len(&self, len: u64) -> crate::Result<()> {
        if len > self.max_record_payload_len {
            return Err(crate::JpackError::LimitExceeded(format!(
                "record payload of {} bytes exceeds limit of {} bytes",
                len, self.max_record_payload_len
            )));
        }
        Ok(())
    }

    /// Check an object member count against the configured limit.
    pub fn check_member_count(&self, count: u32) -> crate::Result<()> {
        if count > self.max_members_per_object {
            return Err(crate::JpackError::LimitExceeded(format!(
                "object with {} members exceeds limit of {}",
                count, self.max_members_per_object
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_limit() {
        let limits = Limits {
            max_record_payload_len: 16,
            ..Limits::default()
        };
        assert!(limits.check_payload_len(16).is_ok());
        assert!(matches!(
            limits.check_payload_len(17),
            Err(crate::JpackError::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_member_limit() {
        let limits = Limits {
            max_members_per_object: 2,
            ..Limits::default()
        };
        assert!(limits.check_member_count(2).is_ok());
        assert!(limits.check_member_count(3).is_err());
    }
}
