//! Remote school API
//!
//! Two calls, both against `{base_url}/api/schools`:
//!
//! - `GET`: list all schools
//! - `POST`: create a school from a multipart form
//!
//! The server is an opaque collaborator. Its responses are interpreted only
//! as far as the client needs: the status code, the list body, and the
//! optional `message` of a rejection.

mod client;
mod errors;
mod request;
mod response;

pub use client::{HttpSchoolApi, SchoolApi};
pub use errors::{ApiError, ApiResult};
pub use request::multipart_form;
pub use response::{ErrorBody, School, SchoolId};
