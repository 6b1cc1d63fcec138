use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventsError {
    #[error("Forbidden: role '{role}' may not subscribe to events {location}")]
    Forbidden {
        role: String,
        location: ErrorLocation,
    },

    #[error("Transport closed {location}")]
    TransportClosed { location: ErrorLocation },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl EventsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::TransportClosed { .. } => "TRANSPORT_CLOSED",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    #[track_caller]
    pub fn transport_closed() -> Self {
        Self::TransportClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EventsError>;
