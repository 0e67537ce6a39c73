//! Error types for the calculator

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("origin city is required")]
    MissingOrigin,

    #[error("destination city is required")]
    MissingDestination,

    #[error("origin and destination must be different cities")]
    SameCity,

    #[error("a transport mode is required")]
    MissingTransport,

    #[error("unknown transport mode '{0}' (expected bicicleta, carro, onibus or caminhao)")]
    UnknownTransport(String),

    #[error("distance must be greater than 0 km")]
    InvalidDistance,

    #[error("no route from '{origin}' to '{destination}'; supply the distance manually")]
    RouteNotFound { origin: String, destination: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
