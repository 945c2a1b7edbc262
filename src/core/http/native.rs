//! `reqwest` transport for the server build and tests.

use reqwest::multipart::{Form, Part};

use super::{FormPart, Method, MultipartForm, OutgoingRequest, RawResponse, RequestBody, Transport};
use crate::core::config::Config;
use crate::core::error::TransportError;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest<'_>) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(to_form(form)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}

fn to_form(form: &MultipartForm) -> Result<Form, TransportError> {
    let mut out = Form::new();
    for part in form.parts() {
        out = match part {
            FormPart::Text { name, value } => out.text(name.clone(), value.clone()),
            FormPart::File { name, file } => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.content_type)?;
                out.part(name.clone(), part)
            }
        };
    }
    Ok(out)
}
