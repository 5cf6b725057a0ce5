//! Organization documents (structured documentation templates).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RmmClient;
use crate::error::RmmError;
use crate::query::is_zero;
use crate::wire_time::WireTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    #[serde(skip_serializing_if = "is_zero")]
    pub client_document_id: i64,
    pub client_document_name: String,
    pub client_document_description: String,
    pub client_document_update_time: WireTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attribute_values: Vec<DocumentValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentValue {
    pub value: Value,
    pub value_update_time: WireTime,
    pub attribute_name: String,
}

pub async fn list_organization_documents(
    client: &RmmClient,
    organization_id: i64,
) -> crate::error::Result<Vec<Document>> {
    client
        .get(&format!("organization/{organization_id}/documents"))
        .await
}

/// Updates one document of an organization. The document is sent as the
/// request body; its `client_document_id` selects the target.
///
/// # Errors
///
/// `RmmError::InvalidInput` when `client_document_id` is zero.
pub async fn update_organization_document(
    client: &RmmClient,
    organization_id: i64,
    document: &Document,
) -> crate::error::Result<Document> {
    if document.client_document_id == 0 {
        return Err(RmmError::InvalidInput("document ID required".to_string()));
    }
    client
        .post(
            &format!(
                "organization/{organization_id}/document/{}",
                document.client_document_id
            ),
            document,
        )
        .await
}
