//! Browser `fetch` transport built on `gloo-net`.

use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;

use super::{FormPart, Method, MultipartForm, OutgoingRequest, RawResponse, RequestBody, Transport};
use crate::core::config::Config;
use crate::core::error::TransportError;

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    /// Fetch has no client-side timeout knob; the config is accepted for parity
    pub fn new(_config: &Config) -> Self {
        Self
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: OutgoingRequest<'_>) -> Result<RawResponse, TransportError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        // The browser sets the multipart boundary itself
        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.body(to_form_data(form)?),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}

fn to_form_data(form: &MultipartForm) -> Result<web_sys::FormData, TransportError> {
    let data = web_sys::FormData::new().map_err(js_build_error)?;
    for part in form.parts() {
        match part {
            FormPart::Text { name, value } => {
                data.append_with_str(name, value).map_err(js_build_error)?;
            }
            FormPart::File { name, file } => {
                let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
                let parts = js_sys::Array::of1(&bytes);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&file.content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                    .map_err(js_build_error)?;
                data.append_with_blob_and_filename(name, &blob, &file.file_name)
                    .map_err(js_build_error)?;
            }
        }
    }
    Ok(data)
}

fn js_build_error(err: JsValue) -> TransportError {
    TransportError::Build(format!("{err:?}"))
}
