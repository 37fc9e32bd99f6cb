// Versioned JSON envelopes for the two persisted blobs.
//
// Current format:
//   projects slot: {"schemaVersion":1,"projects":[...]}
//   session slot:  {"schemaVersion":1,"user":{"id":..,"name":..,"email":..}}
// Legacy bare blobs (a JSON array of projects, a bare user object) are still
// accepted and reported as `Decoded::Legacy` so callers can rewrite them.

use serde::{Deserialize, Serialize};

use crate::types::{AdminUser, Project};

/// Envelope version written by this build.
pub const ENVELOPE_VERSION: u32 = 1;

/// A successfully decoded blob and which format it was in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Current(T),
    Legacy(T),
}

impl<T> Decoded<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Current(v) | Self::Legacy(v) => v,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// Not JSON, or JSON of the wrong shape.
    #[error("malformed blob: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Written by a newer build.
    #[error("unsupported envelope version {0} (this build reads {ENVELOPE_VERSION})")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectsOut<'a> {
    schema_version: u32,
    projects: &'a [Project],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectsIn {
    projects: Vec<Project>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionOut<'a> {
    schema_version: u32,
    user: &'a AdminUser,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionIn {
    user: AdminUser,
}

pub fn encode_projects(projects: &[Project]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ProjectsOut {
        schema_version: ENVELOPE_VERSION,
        projects,
    })
}

pub fn decode_projects(blob: &str) -> Result<Decoded<Vec<Project>>, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(blob)?;
    if value.is_array() {
        return Ok(Decoded::Legacy(serde_json::from_value(value)?));
    }
    check_version(&value)?;
    let envelope: ProjectsIn = serde_json::from_value(value)?;
    Ok(Decoded::Current(envelope.projects))
}

pub fn encode_session(user: &AdminUser) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SessionOut {
        schema_version: ENVELOPE_VERSION,
        user,
    })
}

pub fn decode_session(blob: &str) -> Result<Decoded<AdminUser>, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(blob)?;
    if value.get("schemaVersion").is_none() {
        return Ok(Decoded::Legacy(serde_json::from_value(value)?));
    }
    check_version(&value)?;
    let envelope: SessionIn = serde_json::from_value(value)?;
    Ok(Decoded::Current(envelope.user))
}

fn check_version(value: &serde_json::Value) -> Result<(), DecodeError> {
    let version: u32 = serde_json::from_value(
        value
            .get("schemaVersion")
            .cloned()
            .unwrap_or(serde_json::Value::Null),
    )?;
    if version > ENVELOPE_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }
    Ok(())
}
