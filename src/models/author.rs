use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public author profile as exposed to feed readers.
/// Owned by the identity provider; this service only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub username: String,
    pub profile_image_url: String,
}
