pub mod sdk_error;
pub mod transport_error;
