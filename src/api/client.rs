//! School API client
//!
//! `SchoolApi` is the seam between the view models and the network. The
//! HTTP implementation talks to `{base_url}/api/schools`; tests substitute
//! an in-memory implementation.

use std::future::Future;

use tracing::{debug, warn};

use super::errors::{ApiError, ApiResult};
use super::request::multipart_form;
use super::response::{ErrorBody, School};
use crate::config::ClientConfig;
use crate::schema::ValidatedSchool;

/// The two remote operations the client performs
pub trait SchoolApi: Send + Sync + 'static {
    /// `GET /api/schools`
    fn fetch_schools(&self) -> impl Future<Output = ApiResult<Vec<School>>> + Send;

    /// `POST /api/schools` with a multipart body.
    ///
    /// The response body of a successful create is not interpreted.
    fn create_school(
        &self,
        school: &ValidatedSchool,
    ) -> impl Future<Output = ApiResult<()>> + Send;
}

/// `SchoolApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpSchoolApi {
    client: reqwest::Client,
    schools_url: String,
}

impl HttpSchoolApi {
    /// Create a client for the configured origin
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            schools_url: config.schools_url(),
        })
    }

    /// Endpoint used for both list and create
    pub fn schools_url(&self) -> &str {
        &self.schools_url
    }
}

impl SchoolApi for HttpSchoolApi {
    fn fetch_schools(&self) -> impl Future<Output = ApiResult<Vec<School>>> + Send {
        async move {
            debug!(url = %self.schools_url, "Fetching schools");

            let response = self.client.get(&self.schools_url).send().await?;
            let status = response.status();
            let body = response.bytes().await?;

            if !status.is_success() {
                warn!(status = status.as_u16(), "School list request rejected");
                return Err(ApiError::ServerRejection {
                    status: status.as_u16(),
                    message: ErrorBody::message_from(&body),
                });
            }

            let schools: Vec<School> =
                serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
            debug!(count = schools.len(), "Fetched schools");
            Ok(schools)
        }
    }

    fn create_school(
        &self,
        school: &ValidatedSchool,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let form = multipart_form(school);
        let image_bytes = school.image().size();

        async move {
            let form = form?;
            debug!(url = %self.schools_url, image_bytes, "Submitting school");

            let response = self
                .client
                .post(&self.schools_url)
                .multipart(form)
                .send()
                .await?;
            let status = response.status();

            if status.is_success() {
                return Ok(());
            }

            let body = response.bytes().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Create school request rejected");
            Err(ApiError::ServerRejection {
                status: status.as_u16(),
                message: ErrorBody::message_from(&body),
            })
        }
    }
}
