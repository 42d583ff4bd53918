use serde::{Deserialize, Serialize};

use crate::types::Capabilities;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub backend: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesResponse {
    pub backend: String,
    pub capabilities: Capabilities,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub name: String,
    pub display_name: String,
    pub word_count: usize,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionResponse>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordsResponse {
    pub collection: String,
    pub words: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct AddWordRequest {
    pub word: String,
}
