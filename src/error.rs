use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use serde::{Serialize, Serializer};
use serde_json::Error as JsonError;
use tokio::task::JoinError;

use crate::campaign::CampaignId;
use crate::creative::CreativeId;
use crate::team::TeamMemberId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),
    InvalidCampaignStatus {
        status: String,
    },
    EmailAlreadyRegistered {
        email: String,
    },
    TeamMemberAlreadyInvited {
        email: String,
        company: String,
    },

    // 401
    InvalidCredentials,
    CallerNotRegistered {
        email: String,
    },

    // 404
    PathNotFound,
    CampaignNotFound {
        campaign_id: CampaignId,
    },
    CreativeNotFound {
        creative_id: CreativeId,
    },
    TeamMemberNotFound {
        member_id: TeamMemberId,
    },

    // 500
    ExistentialState(String),
    CorruptCollection {
        collection: &'static str,
    },
    #[serde(serialize_with = "display")]
    StorageFailure(#[derivative(PartialEq = "ignore")] IoError),
    #[serde(serialize_with = "display")]
    FailedToSerializeJson(#[derivative(PartialEq = "ignore")] JsonError),
    #[serde(serialize_with = "display")]
    BackgroundTaskFailed(#[derivative(PartialEq = "ignore")] JoinError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidQuery(_) => "E4001002",
            Error::InvalidCampaignStatus { .. } => "E4001003",
            Error::EmailAlreadyRegistered { .. } => "E4001004",
            Error::TeamMemberAlreadyInvited { .. } => "E4001005",
            Error::InvalidCredentials => "E4011000",
            Error::CallerNotRegistered { .. } => "E4011001",
            Error::PathNotFound => "E4041000",
            Error::CampaignNotFound { .. } => "E4041001",
            Error::CreativeNotFound { .. } => "E4041002",
            Error::TeamMemberNotFound { .. } => "E4041003",
            Error::ExistentialState(_) => "E5001000",
            Error::CorruptCollection { .. } => "E5001001",
            Error::StorageFailure(_) => "E5001002",
            Error::FailedToSerializeJson(_) => "E5001003",
            Error::BackgroundTaskFailed(_) => "E5001004",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidQuery(_) => "The given query could not be parsed",
            Error::InvalidCampaignStatus { .. } => {
                "The given status must be one of active, paused, completed or draft"
            }
            Error::EmailAlreadyRegistered { .. } => "The given email is already registered",
            Error::TeamMemberAlreadyInvited { .. } => {
                "The given email has already been invited to this company"
            }
            Error::InvalidCredentials => "The given email or password is invalid",
            Error::CallerNotRegistered { .. } => "The requesting user is not registered",
            Error::PathNotFound => "The requested path was not found",
            Error::CampaignNotFound { .. } => "The requested campaign was not found",
            Error::CreativeNotFound { .. } => "The requested creative was not found",
            Error::TeamMemberNotFound { .. } => "The requested team member was not found",
            Error::ExistentialState(_) => "The server detected an invalid state",
            Error::CorruptCollection { .. } => "A stored collection could not be parsed",
            Error::StorageFailure(_) => "An error occurred when accessing storage",
            Error::FailedToSerializeJson(_) => {
                "An error occurred when serializing an object to json"
            }
            Error::BackgroundTaskFailed(_) => "A background storage task did not complete",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCampaignStatus { .. } => StatusCode::BAD_REQUEST,
            Error::EmailAlreadyRegistered { .. } => StatusCode::BAD_REQUEST,
            Error::TeamMemberAlreadyInvited { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::CallerNotRegistered { .. } => StatusCode::UNAUTHORIZED,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            Error::CreativeNotFound { .. } => StatusCode::NOT_FOUND,
            Error::TeamMemberNotFound { .. } => StatusCode::NOT_FOUND,
            Error::ExistentialState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::CorruptCollection { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToSerializeJson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::BackgroundTaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::StorageFailure(error)
    }
}

impl From<JsonError> for Error {
    fn from(error: JsonError) -> Error {
        Error::FailedToSerializeJson(error)
    }
}

impl From<JoinError> for Error {
    fn from(error: JoinError) -> Error {
        Error::BackgroundTaskFailed(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::StorageFailure(err) => Some(err),
            Error::FailedToSerializeJson(err) => Some(err),
            Error::BackgroundTaskFailed(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
