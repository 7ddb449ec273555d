use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("assignment wire format is malformed: {0}")]
    Wire(#[from] serde_json::Error),

    #[error("engine error: {0}")]
    Sim(#[from] fleet_sim::SimError),
}

pub type ControlResult<T> = Result<T, ControlError>;
