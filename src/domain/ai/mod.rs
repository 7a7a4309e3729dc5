pub mod error;
pub mod failover;
pub mod gateway;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod validation;


pub use error::{FailoverError, GenerationError, ResponseFormatError};
pub use failover::{AttemptFailure, FailoverInvoker, ProviderResult};
pub use gateway::AiGateway;
pub use parser::{parse_json_array, strip_code_fence};
pub use provider::{AiProvider, ProviderError};
