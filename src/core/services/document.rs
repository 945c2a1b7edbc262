use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, FileUpload, MultipartForm, Transport};
use crate::core::models::{Acknowledgement, Document, DocumentCategory, DocumentUpdate, PaginatedResponse};
use crate::core::query::{QueryParams, ToQuery, segment};

use super::EMPLOYEE_ID_PARAM;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilters {
    pub employee_id: Option<String>,
    pub category: Option<DocumentCategory>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for DocumentFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt(EMPLOYEE_ID_PARAM, self.employee_id.as_deref())
            .push_opt("category", self.category)
            .push_opt("search", self.search.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

/// New document with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    pub employee_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category: DocumentCategory,
    pub tags: Option<Vec<String>>,
    pub file: FileUpload,
}

impl DocumentUpload {
    fn into_form(self) -> MultipartForm {
        // The backend expects the tag list as one JSON-encoded field
        let tags = self
            .tags
            .as_ref()
            .and_then(|tags| serde_json::to_string(tags).ok());

        MultipartForm::new()
            .text_opt(EMPLOYEE_ID_PARAM, self.employee_id)
            .text("title", self.title)
            .text_opt("description", self.description)
            .text("category", self.category.to_string())
            .text_opt("tags", tags)
            .file("file", self.file)
    }
}

pub struct DocumentService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> DocumentService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &DocumentFilters) -> ApiResult<PaginatedResponse<Document>> {
        self.client
            .fetch_page(ApiRequest::get("/documents").with_query(filters))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Document> {
        self.client
            .fetch_data(ApiRequest::get(format!("/documents/{}", segment(id))))
            .await
    }

    pub async fn upload(&self, upload: DocumentUpload) -> ApiResult<Document> {
        self.client
            .fetch_data(ApiRequest::post("/documents/upload").multipart(upload.into_form()))
            .await
    }

    pub async fn update(&self, id: &str, input: &DocumentUpdate) -> ApiResult<Document> {
        self.client
            .fetch_data(ApiRequest::put(format!("/documents/{}", segment(id))).json(input))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/documents/{}", segment(id))))
            .await
    }

    /// File contents
    pub async fn download(&self, id: &str) -> ApiResult<Vec<u8>> {
        self.client
            .fetch_bytes(ApiRequest::get(format!("/documents/{}/download", segment(id))))
            .await
    }

    pub async fn my_documents(&self, filters: &DocumentFilters) -> ApiResult<PaginatedResponse<Document>> {
        let query = filters.to_query().without(EMPLOYEE_ID_PARAM);
        self.client
            .fetch_page(ApiRequest::get("/documents/my-documents").with_query(&query))
            .await
    }
}
