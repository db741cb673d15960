use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}
