//! Read-concern propagation

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::call::{UnaryCall, UnaryResponse};
use crate::error::Error;
use crate::status::Status;

use super::{Interceptor, Next};

pub const READ_CONCERN_HEADER: &str = "read-concern";

/// Consistency preference for reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReadConcern {
    /// Reads may be served by any replica (default)
    #[default]
    Balanced,

    /// Reads observe all acknowledged writes
    Consistent,
}

impl ReadConcern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Consistent => "consistent",
        }
    }
}

impl fmt::Display for ReadConcern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadConcern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "consistent" => Ok(Self::Consistent),
            other => Err(Error::invalid_config(format!(
                "unknown read concern '{}', expected 'balanced' or 'consistent'",
                other
            ))),
        }
    }
}

/// Sets the `read-concern` header on every attempt
#[derive(Debug, Clone, Copy)]
pub struct ReadConcernInterceptor {
    read_concern: ReadConcern,
}

impl ReadConcernInterceptor {
    pub fn new(read_concern: ReadConcern) -> Self {
        Self { read_concern }
    }

    pub fn read_concern(&self) -> ReadConcern {
        self.read_concern
    }
}

#[async_trait]
impl Interceptor for ReadConcernInterceptor {
    fn name(&self) -> &'static str {
        "read-concern"
    }

    async fn intercept(&self, mut call: UnaryCall, next: Next<'_>) -> Result<UnaryResponse, Status> {
        call.metadata
            .insert(READ_CONCERN_HEADER, self.read_concern.as_str());
        next.run(call).await
    }
}
