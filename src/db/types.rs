use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "assignmentstatus", rename_all = "kebab-case")]
pub(crate) enum AssignmentStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "contentstatus", rename_all = "kebab-case")]
pub(crate) enum ContentStatus {
    UnderReview,
    Reviewed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status cannot move from '{from}' to '{to}'")]
pub(crate) struct TransitionError {
    pub(crate) from: &'static str,
    pub(crate) to: &'static str,
}

impl AssignmentStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Forward-only: `pending -> completed`; repeating the current status is a no-op.
    pub(crate) fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        match (self, next) {
            (current, next) if current == next => Ok(current),
            (Self::Pending, Self::Completed) => Ok(Self::Completed),
            (from, to) => Err(TransitionError { from: from.as_str(), to: to.as_str() }),
        }
    }
}

impl ContentStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::UnderReview => "under-review",
            Self::Reviewed => "reviewed",
        }
    }

    /// Forward-only: `under-review -> reviewed`; repeating the current status is a no-op.
    pub(crate) fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        match (self, next) {
            (current, next) if current == next => Ok(current),
            (Self::UnderReview, Self::Reviewed) => Ok(Self::Reviewed),
            (from, to) => Err(TransitionError { from: from.as_str(), to: to.as_str() }),
        }
    }
}
