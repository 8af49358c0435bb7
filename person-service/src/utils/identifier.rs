//! Conversion between external person ids and MongoDB `ObjectId`s.
//!
//! External ids are the 24-character hex rendering of an `ObjectId`.

use crate::services::PersonError;
use mongodb::bson::oid::ObjectId;

const OBJECT_ID_HEX_LEN: usize = 24;

/// Whether `raw` is a syntactically valid `ObjectId` hex string. No side effects.
pub fn is_valid(raw: &str) -> bool {
    raw.len() == OBJECT_ID_HEX_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Converts an already validated id. Callers check [`is_valid`] first.
pub fn decode(raw: &str) -> Result<ObjectId, PersonError> {
    ObjectId::parse_str(raw).map_err(|_| PersonError::InvalidIdentifier)
}

pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// Validates then decodes a path id, rejecting malformed input before any
/// storage access.
pub fn parse_person_id(raw: &str) -> Result<ObjectId, PersonError> {
    if !is_valid(raw) {
        return Err(PersonError::InvalidIdentifier);
    }
    decode(raw)
}
