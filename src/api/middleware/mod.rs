pub mod access_gate;
pub mod request_id;

pub use access_gate::{AccessGate, denial_message};
pub use request_id::{RequestId, RequestIdMiddleware};
