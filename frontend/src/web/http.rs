//! `fetch` transport for the REST client, via `gloo-net`.

use gloo_net::http::{Request, RequestBuilder};
use studyapp::{ApiError, ApiResult, HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Browser implementation of [`HttpClient`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = Self::builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(format!("cannot build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("cannot read body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
