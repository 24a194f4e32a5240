use serde::Deserialize;

/// Envelope of `GET /documents.json?date=...&type=2`.
#[derive(Deserialize)]
pub(crate) struct DocumentsEnvelope {
    pub(crate) results: Option<Vec<RawDocument>>,
}

/// One disclosure row in the daily index. Every field is optional on the
/// wire; rows missing the fields we key on are simply skipped.
#[derive(Deserialize)]
pub(crate) struct RawDocument {
    #[serde(rename = "docID")]
    pub(crate) doc_id: Option<String>,
    #[serde(rename = "secCode")]
    pub(crate) sec_code: Option<String>,
    #[serde(rename = "filerName")]
    pub(crate) filer_name: Option<String>,
    #[serde(rename = "docDescription")]
    pub(crate) doc_description: Option<String>,
    #[serde(rename = "docTypeCode")]
    pub(crate) doc_type_code: Option<String>,
}
