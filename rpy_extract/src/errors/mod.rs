pub mod rpy_error;
pub use rpy_error::*;
