use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputFault {
    #[error("arrival time {0} is negative")]
    NegativeArrival(i64),
    #[error("burst time {0} is not positive")]
    NonPositiveBurst(i64),
    #[error("id is empty")]
    EmptyId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    #[error("invalid input for process `{id}`: {fault}")]
    InvalidInput { id: String, fault: InputFault },
    #[error("malformed process spec `{0}`, expected id:arrival:priority:burst")]
    MalformedSpec(String),
}
