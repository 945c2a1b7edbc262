use crate::core::error::ApiResult;
use crate::core::http::{ApiClient, ApiRequest, FileUpload, MultipartForm, Transport};
use crate::core::models::{
    Acknowledgement, Candidate, CandidateInput, CandidateStage, Job, JobInput, JobStatus,
    PaginatedResponse, StageChange,
};
use crate::core::query::{QueryParams, ToQuery, segment};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub status: Option<JobStatus>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for JobFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("status", self.status)
            .push_opt("department", self.department.as_deref())
            .push_opt("location", self.location.as_deref())
            .push_opt("search", self.search.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilters {
    pub job_id: Option<String>,
    pub stage: Option<CandidateStage>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ToQuery for CandidateFilters {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("jobId", self.job_id.as_deref())
            .push_opt("stage", self.stage)
            .push_opt("search", self.search.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
    }
}

/// Job postings and the candidate pipeline
pub struct RecruitmentService<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> RecruitmentService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list_jobs(&self, filters: &JobFilters) -> ApiResult<PaginatedResponse<Job>> {
        self.client
            .fetch_page(ApiRequest::get("/recruitment/jobs").with_query(filters))
            .await
    }

    pub async fn get_job(&self, id: &str) -> ApiResult<Job> {
        self.client
            .fetch_data(ApiRequest::get(format!("/recruitment/jobs/{}", segment(id))))
            .await
    }

    pub async fn create_job(&self, input: &JobInput) -> ApiResult<Job> {
        self.client
            .fetch_data(ApiRequest::post("/recruitment/jobs").json(input))
            .await
    }

    pub async fn update_job(&self, id: &str, input: &JobInput) -> ApiResult<Job> {
        self.client
            .fetch_data(ApiRequest::put(format!("/recruitment/jobs/{}", segment(id))).json(input))
            .await
    }

    pub async fn close_job(&self, id: &str) -> ApiResult<Job> {
        self.client
            .fetch_data(ApiRequest::put(format!("/recruitment/jobs/{}/close", segment(id))).json(&serde_json::json!({})))
            .await
    }

    pub async fn delete_job(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/recruitment/jobs/{}", segment(id))))
            .await
    }

    pub async fn list_candidates(&self, filters: &CandidateFilters) -> ApiResult<PaginatedResponse<Candidate>> {
        self.client
            .fetch_page(ApiRequest::get("/recruitment/candidates").with_query(filters))
            .await
    }

    pub async fn get_candidate(&self, id: &str) -> ApiResult<Candidate> {
        self.client
            .fetch_data(ApiRequest::get(format!("/recruitment/candidates/{}", segment(id))))
            .await
    }

    pub async fn create_candidate(&self, input: &CandidateInput) -> ApiResult<Candidate> {
        self.client
            .fetch_data(ApiRequest::post("/recruitment/candidates").json(input))
            .await
    }

    pub async fn update_candidate(&self, id: &str, input: &CandidateInput) -> ApiResult<Candidate> {
        self.client
            .fetch_data(ApiRequest::put(format!("/recruitment/candidates/{}", segment(id))).json(input))
            .await
    }

    pub async fn update_candidate_stage(
        &self,
        id: &str,
        stage: CandidateStage,
        notes: Option<String>,
    ) -> ApiResult<Candidate> {
        self.client
            .fetch_data(
                ApiRequest::put(format!("/recruitment/candidates/{}/stage", segment(id)))
                    .json(&StageChange { stage, notes }),
            )
            .await
    }

    pub async fn delete_candidate(&self, id: &str) -> ApiResult<Acknowledgement> {
        self.client
            .acknowledge(ApiRequest::delete(format!("/recruitment/candidates/{}", segment(id))))
            .await
    }

    pub async fn upload_resume(&self, id: &str, file: FileUpload) -> ApiResult<Candidate> {
        self.client
            .fetch_data(
                ApiRequest::post(format!("/recruitment/candidates/{}/upload-resume", segment(id)))
                    .multipart(MultipartForm::new().file("resume", file)),
            )
            .await
    }

    pub async fn upload_cover_letter(&self, id: &str, file: FileUpload) -> ApiResult<Candidate> {
        self.client
            .fetch_data(
                ApiRequest::post(format!("/recruitment/candidates/{}/upload-cover-letter", segment(id)))
                    .multipart(MultipartForm::new().file("coverLetter", file)),
            )
            .await
    }
}
