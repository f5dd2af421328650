use thiserror::Error as ThisError;

use crate::entities::QueueName;

#[derive(ThisError, Debug)]
pub enum OutageInfoError {
    #[error("queue \"{0}\" not found")]
    QueueNotFound(QueueName),
    /// Any failure reported by the schedule service, passed through untouched.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
