// ============================================================================
// TRANSPORT - SOLO comunicación HTTP (stateless)
// ============================================================================
// reqwest en nativo, gloo-net en el navegador. Sin lógica de sesión: eso vive
// en HttpClient.
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(target_arch = "wasm32")]
pub use browser::GlooTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::ApiError;
    use crate::services::http_client::{HttpMethod, HttpRequest, HttpResponse, Transport};

    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        base_url: String,
    }

    impl ReqwestTransport {
        /// `timeout` aplica a cada request completo
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(map_error)?;

            Ok(Self {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            })
        }
    }

    fn map_error(error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(error.to_string())
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let url = format!("{}{}", self.base_url, request.path);
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &url);
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(ref body) = request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(map_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(map_error)?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::time::Duration;

    use async_trait::async_trait;
    use gloo_net::http::{Method, RequestBuilder};
    use web_sys::AbortController;

    use crate::error::ApiError;
    use crate::services::http_client::{HttpMethod, HttpRequest, HttpResponse, Transport};
    use crate::utils::runtime;

    /// Transporte fetch del navegador. Al vencer `timeout` el fetch se aborta
    /// con un `AbortController` y el request termina en `ApiError::Timeout`.
    #[derive(Clone)]
    pub struct GlooTransport {
        base_url: String,
        timeout: Duration,
    }

    impl GlooTransport {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
            Self {
                base_url: base_url.into().trim_end_matches('/').to_string(),
                timeout,
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for GlooTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let url = format!("{}{}", self.base_url, request.path);
            let method = match request.method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Patch => Method::PATCH,
                HttpMethod::Delete => Method::DELETE,
            };

            let controller = AbortController::new()
                .map_err(|e| ApiError::Network(format!("AbortController error: {:?}", e)))?;
            let signal = controller.signal();

            let mut builder = RequestBuilder::new(&url)
                .method(method)
                .abort_signal(Some(&signal));
            if !request.query.is_empty() {
                builder = builder.query(
                    request
                        .query
                        .iter()
                        .map(|(key, value)| (key.as_str(), value.as_str())),
                );
            }
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let prepared = match request.body {
                Some(ref body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;

            // El plazo cubre la respuesta y la lectura del body
            let exchange = async {
                let response = prepared
                    .send()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| ApiError::Network(format!("Read error: {}", e)))?;
                Ok::<_, ApiError>(HttpResponse { status, body })
            };

            let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
            match runtime::timeout(timeout_ms, exchange).await {
                Ok(result) => result,
                Err(_) => {
                    log::warn!("⏱️ Timeout en {} {}", request.method, request.path);
                    controller.abort();
                    Err(ApiError::Timeout)
                }
            }
        }
    }
}
