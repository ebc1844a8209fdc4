use std::{fmt, str::FromStr};

use crate::{
    core::{Priority, ProcessKey, Ticks},
    error::{InputFault, SchedError},
};

/// One unit of schedulable work as supplied by the caller.
///
/// Identity, arrival and priority never change after construction; the
/// remaining service is tracked by the scheduler, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescriptor {
    id: String,
    arrival_time: Ticks,
    priority: Priority,
    burst_time: Ticks,
}

impl ProcessDescriptor {
    pub fn new(
        id: impl Into<String>,
        arrival_time: i64,
        priority: Priority,
        burst_time: i64,
    ) -> Result<Self, SchedError> {
        let id = id.into();
        let invalid = |id: String, fault| SchedError::InvalidInput { id, fault };

        if id.is_empty() {
            return Err(invalid(id, InputFault::EmptyId));
        }
        let Ok(arrival) = Ticks::try_from(arrival_time) else {
            return Err(invalid(id, InputFault::NegativeArrival(arrival_time)));
        };
        let burst = match Ticks::try_from(burst_time) {
            Ok(burst) if burst > 0 => burst,
            _ => return Err(invalid(id, InputFault::NonPositiveBurst(burst_time))),
        };

        Ok(Self {
            id,
            arrival_time: arrival,
            priority,
            burst_time: burst,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }
}

// id:arrival:priority:burst
impl FromStr for ProcessDescriptor {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SchedError::MalformedSpec(s.to_string());

        let fields: Vec<&str> = s.split(':').map(str::trim).collect();
        let [id, arrival, priority, burst] = fields.as_slice() else {
            return Err(malformed());
        };
        let arrival = arrival.parse::<i64>().map_err(|_| malformed())?;
        let priority = priority.parse::<Priority>().map_err(|_| malformed())?;
        let burst = burst.parse::<i64>().map_err(|_| malformed())?;

        Self::new(*id, arrival, priority, burst)
    }
}

impl fmt::Display for ProcessDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.id, self.arrival_time, self.priority, self.burst_time
        )
    }
}

#[derive(Debug, Clone)]
pub struct ProcessInstance {
    pub descriptor: ProcessDescriptor,
    // Set once the process has arrived
    pub key: Option<ProcessKey>,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl ProcessInstance {
    pub fn new(descriptor: ProcessDescriptor) -> Self {
        Self {
            descriptor,
            key: None,
            first_run: None,
            completion_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }
}
