pub mod descriptor;
pub mod error;
pub mod ports;
pub mod record;
