pub mod date_utils;
pub mod dom;
pub mod logging;

pub use logging::Logger;
