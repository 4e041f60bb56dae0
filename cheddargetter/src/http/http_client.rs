use crate::errors::sdk_error::SdkError;
use crate::errors::transport_error::TransportError;
use crate::http::config::ClientConfig;
use crate::http::form::encode_form;
use crate::http::xml::parser::parse;
use crate::models::record::{Record, Value};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::trace;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};

/// Issues the requests. Credentials live here, per instance, and go out with every request.
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    authorization: HeaderValue,
}

impl HttpClient {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let credentials = STANDARD.encode(format!("{}:{}", config.username, config.password));
        let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))
            .or(Err(TransportError::InvalidCredentials))?;
        authorization.set_sensitive(true);

        Ok(Self {
            client: builder.build().map_err(TransportError::from)?,
            base_url: config.base_url.clone(),
            authorization,
        })
    }

    /// Sends a request to `<base url>/<segments joined by "/">` and returns the parsed envelope.
    /// Segments are inserted verbatim, callers make sure they are safe in a path.
    pub(crate) async fn request(
        &self,
        method: Method,
        segments: &[&str],
        attributes: Option<&Record>,
    ) -> Result<Record, SdkError> {
        let url = format!("{}/{}", self.base_url, segments.join("/"));
        trace!("C: {method} {url}");

        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, self.authorization.clone());

        if let Some(attributes) = attributes {
            request = request
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .body(encode_form(attributes));
        }

        let response = request.send().await.map_err(TransportError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(TransportError::from)?;

        trace!("S: {}", describe_response(status, &body));
        read_envelope(status, body)
    }

    pub(crate) async fn get(&self, segments: &[&str]) -> Result<Record, SdkError> {
        self.request(Method::GET, segments, None).await
    }

    pub(crate) async fn post(
        &self,
        segments: &[&str],
        attributes: Option<&Record>,
    ) -> Result<Record, SdkError> {
        self.request(Method::POST, segments, attributes).await
    }
}

/// An `<error>` element wins over the status code. Anything else that isn't a 2xx is a transport error.
fn read_envelope(status: StatusCode, body: String) -> Result<Record, SdkError> {
    match parse(&body) {
        Ok(envelope) => {
            if let Some(error) = envelope.get("error") {
                return Err(remote_error(error));
            }

            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                }
                .into());
            }

            Ok(envelope)
        }

        Err(error) if status.is_success() => Err(error.into()),
        Err(_) => Err(TransportError::Status {
            status: status.as_u16(),
            body,
        }
        .into()),
    }
}

/// Status and size only, bodies carry customer and billing details.
fn describe_response(status: StatusCode, body: &str) -> String {
    format!("{status} ({} bytes)", body.len())
}

fn remote_error(error: &Value) -> SdkError {
    SdkError::Remote {
        message: error.text().unwrap_or_default().to_string(),
        code: error.get("code").and_then(Value::text).map(str::to_string),
    }
}
