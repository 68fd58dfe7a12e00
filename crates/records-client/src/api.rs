//! Port for the student records API and its reqwest adapter.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{Envelope, Student, StudentPayload};

/// Remote student operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsApi: Send + Sync {
    /// Fetch every student in server order.
    async fn list(&self) -> Result<Vec<Student>, ClientError>;

    /// Create a student and return the stored record.
    async fn create(&self, payload: &StudentPayload) -> Result<Student, ClientError>;

    /// Update a student and return the stored record.
    async fn update(&self, id: &str, payload: &StudentPayload) -> Result<Student, ClientError>;

    /// Delete a student and return its last state.
    async fn delete(&self, id: &str) -> Result<Student, ClientError>;
}

/// HTTP implementation of [`StudentsApi`].
#[derive(Debug, Clone)]
pub struct HttpStudentsApi {
    client: Client,
    base: Url,
}

impl HttpStudentsApi {
    /// Build an adapter honouring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the reqwest client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ClientError::Config(err.to_string()))?;
        Ok(Self {
            client,
            base: config.api_url().clone(),
        })
    }

    fn endpoint(&self, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::Config("API URL cannot be a base".to_owned()))?;
            segments.pop_if_empty().push("students");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        id: Option<&str>,
        payload: Option<&StudentPayload>,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(id)?;
        debug!(%method, %url, "student api request");
        let mut request = self.client.request(method, url);
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        let response = request.send().await.map_err(|err| map_transport_error(&err))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| map_transport_error(&err))?;
        decode_envelope(status, body.as_ref())
    }
}

fn map_transport_error(error: &reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::transport("request timed out")
    } else {
        ClientError::transport(error.to_string())
    }
}

/// Turn a response into its payload or the server's failure message.
fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|err| ClientError::Decode {
            status: status.as_u16(),
            message: err.to_string(),
        })?;
    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } if status.is_success() => Ok(data),
        Envelope {
            success: true,
            data: None,
            ..
        } if status.is_success() => Err(ClientError::Decode {
            status: status.as_u16(),
            message: "response carried no data".to_owned(),
        }),
        Envelope { message, .. } => Err(ClientError::server(status.as_u16(), message)),
    }
}

#[async_trait]
impl StudentsApi for HttpStudentsApi {
    async fn list(&self) -> Result<Vec<Student>, ClientError> {
        self.send(Method::GET, None, None).await
    }

    async fn create(&self, payload: &StudentPayload) -> Result<Student, ClientError> {
        self.send(Method::POST, None, Some(payload)).await
    }

    async fn update(&self, id: &str, payload: &StudentPayload) -> Result<Student, ClientError> {
        self.send(Method::PUT, Some(id), Some(payload)).await
    }

    async fn delete(&self, id: &str) -> Result<Student, ClientError> {
        self.send(Method::DELETE, Some(id), None).await
    }
}
