use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A media type object (one entry of a `content` map).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}
