pub mod password;

pub use password::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid hash cost {0} (expected {min}..={max})", min = MIN_COST, max = MAX_COST)]
    InvalidCost(u32),

    #[error("Malformed password hash")]
    MalformedHash,
}
