//! Convenience re-exports.

pub use crate::config::GatewayConfig;
pub use crate::error::{ClassifiedError, ErrorKind};
pub use crate::gateway::{ApiResponse, HttpGateway, RequestConfig};
pub use crate::operation::{AsyncOperation, OperationState};
pub use crate::report::{ErrorReporter, ErrorSink};
pub use crate::util::retry::RetryPolicy;
