pub mod capabilities;
pub mod channel_order;
pub mod constants;
pub mod error;
pub mod frame;
pub mod open_options;
