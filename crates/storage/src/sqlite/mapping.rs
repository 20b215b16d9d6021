//! Conversions between SQLite column values and domain types.

use std::str::FromStr;

use prakriti_core::model::{AdminId, Dosha, FollowUpId, Gender, UserId};

use crate::repository::StorageError;

pub(crate) fn ser<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn user_id_to_i64(id: UserId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("user id overflow".into()))
}

pub(crate) fn user_id_from_i64(raw: i64) -> Result<UserId, StorageError> {
    u64::try_from(raw)
        .map(UserId::new)
        .map_err(|_| StorageError::Serialization("user id sign overflow".into()))
}

pub(crate) fn admin_id_from_i64(raw: i64) -> Result<AdminId, StorageError> {
    u64::try_from(raw)
        .map(AdminId::new)
        .map_err(|_| StorageError::Serialization("admin id sign overflow".into()))
}

pub(crate) fn follow_up_id_to_i64(id: FollowUpId) -> Result<i64, StorageError> {
    i64::try_from(id.value())
        .map_err(|_| StorageError::Serialization("follow-up id overflow".into()))
}

pub(crate) fn follow_up_id_from_i64(raw: i64) -> Result<FollowUpId, StorageError> {
    u64::try_from(raw)
        .map(FollowUpId::new)
        .map_err(|_| StorageError::Serialization("follow-up id sign overflow".into()))
}

pub(crate) fn gender_from_str(raw: &str) -> Result<Gender, StorageError> {
    Gender::from_str(raw).map_err(ser)
}

pub(crate) fn dosha_from_str(raw: &str) -> Result<Dosha, StorageError> {
    Dosha::from_str(raw).map_err(ser)
}

/// String lists are stored as JSON arrays in TEXT columns.
pub(crate) fn encode_list(items: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(items).map_err(ser)
}

pub(crate) fn decode_list(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_roundtrip() {
        let items = vec!["dry skin".to_string(), "restless sleep".to_string()];
        let encoded = encode_list(&items).unwrap();
        assert_eq!(decode_list(&encoded).unwrap(), items);
    }

    #[test]
    fn negative_id_is_rejected() {
        assert!(user_id_from_i64(-1).is_err());
    }
}
