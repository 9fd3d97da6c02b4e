//! Wire shapes that differ from the domain records.
//!
//! Most records decode straight into domain types. These DTOs cover the
//! envelopes the backend wraps them in and the auth payloads.

use serde::{Deserialize, Serialize};

use crate::domain::{
    LoginCredentials, MonitoringSnapshot, RecordId, Registration, SignInResponse,
    SignedInAccount,
};

/// A collection sent either bare or inside a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ListPayload<T> {
    Bare(Vec<T>),
    Enveloped { data: Vec<T> },
}

impl<T> ListPayload<T> {
    pub(super) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Enveloped { data: items } => items,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SnapshotBody {
    Many(Vec<MonitoringSnapshot>),
    One(MonitoringSnapshot),
}

/// Monitoring counters: one object, an array led by the snapshot, or either
/// of those inside a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum MonitoringPayload {
    Enveloped { data: SnapshotBody },
    Bare(SnapshotBody),
}

impl MonitoringPayload {
    pub(super) fn into_snapshot(self) -> MonitoringSnapshot {
        let (Self::Enveloped { data: body } | Self::Bare(body)) = self;
        match body {
            SnapshotBody::Many(snapshots) => snapshots.into_iter().next().unwrap_or_default(),
            SnapshotBody::One(snapshot) => snapshot,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for SignInBody<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterBody<'a> {
    email: &'a str,
    first_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    role: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Registration> for RegisterBody<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            email: registration.email(),
            first_name: registration.first_name(),
            last_name: registration.last_name(),
            phone: registration.phone(),
            role: registration.role().as_str(),
            password: registration.password(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SignInResponseDto {
    #[serde(default)]
    found_user: Option<FoundUserDto>,
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FoundUserDto {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl From<SignInResponseDto> for SignInResponse {
    fn from(dto: SignInResponseDto) -> Self {
        Self {
            found_user: dto.found_user.map(|user| SignedInAccount {
                id: user.id,
                email: user.email,
                username: user.username,
                role: user.role,
            }),
            access_token: dto.access_token,
        }
    }
}
