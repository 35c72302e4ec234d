//! OWS exception reports.

use serde::{Deserialize, Serialize};
use wfs_common::protocol::WFS_VERSION;
use wfs_common::{ExceptionCode, WfsError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwsException {
    pub exception_code: ExceptionCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    pub exception_text: Vec<String>,
}

/// The logical error payload returned to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionReport {
    pub version: String,
    pub exceptions: Vec<OwsException>,
}

impl ExceptionReport {
    /// Build a report with one entry per individual failure.
    pub fn from_error(error: &WfsError) -> Self {
        let exceptions = error
            .exceptions()
            .into_iter()
            .map(|e| OwsException {
                exception_code: e.code(),
                locator: e.locator().map(str::to_string),
                exception_text: exception_text(e),
            })
            .collect();

        Self {
            version: WFS_VERSION.to_string(),
            exceptions,
        }
    }
}

/// The message followed by the chain of causes.
fn exception_text(error: &WfsError) -> Vec<String> {
    let mut text = vec![error.to_string()];
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push(cause.to_string());
        source = cause.source();
    }
    text
}

impl From<&WfsError> for ExceptionReport {
    fn from(error: &WfsError) -> Self {
        ExceptionReport::from_error(error)
    }
}
