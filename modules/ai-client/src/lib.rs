pub mod client;
pub mod error;
pub mod traits;

pub use client::InterpreterClient;
pub use error::InterpreterError;
pub use traits::InstructionRunner;

pub use reqwest::StatusCode;
