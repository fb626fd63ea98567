//! Submission notice sent to the registry service after a run is reviewed.

use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineOutput;

/// JSON body posted to the notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionNotice {
    pub application_number: String,
    pub lga_name: String,
    pub block_number: String,
    pub parcel_number: String,
}

impl SubmissionNotice {
    /// Describe a run by its first parcel. Returns `None` for a run with no parcels.
    pub fn from_output(application_number: &str, output: &PipelineOutput) -> Option<Self> {
        let first = output.parcels.first()?;
        Some(Self {
            application_number: application_number.to_string(),
            lga_name: first.join.region_name.clone().unwrap_or_else(|| first.join.region_id.to_string()),
            block_number: first.join.block_id.to_string(),
            parcel_number: first.parcel_num.to_string(),
        })
    }
}

/// Post `notice` to `endpoint` once. Failures are returned, never retried.
/// Any 2xx reply counts as accepted; its body is only logged.
#[cfg(feature = "notify")]
pub fn send(endpoint: &str, notice: &SubmissionNotice) -> crate::error::Result<()> {
    let response = reqwest::blocking::Client::new()
        .post(endpoint)
        .json(notice)
        .send()?
        .error_for_status()?;
    let status = response.status();
    let body = response.text().unwrap_or_default();
    tracing::info!(endpoint, application = %notice.application_number, %status, body = %body, "submission notice accepted");
    Ok(())
}
