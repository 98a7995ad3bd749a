//! Server record types

use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// Fields a caller supplies when registering a server.
///
/// Any JSON object is accepted; the registry does not prescribe a schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewServer {
    #[serde(flatten)]
    pub fields: Document,
}

impl NewServer {
    /// Document to insert. A caller-supplied `_id` is discarded so the
    /// backend always assigns the identifier.
    pub fn into_document(self) -> Document {
        let mut doc = self.fields;
        doc.remove("_id");
        doc
    }
}

/// A persisted server record.
///
/// `id` is the hex form of the backend-assigned ObjectId and is opaque to
/// callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    #[serde(flatten)]
    pub fields: Document,
}
