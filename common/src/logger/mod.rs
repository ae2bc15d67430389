mod init;
mod span;
mod trace_id;

pub use init::{init_logger, LogFormat};
pub use span::{child_span, redact, root_span};
pub use trace_id::TraceId;
