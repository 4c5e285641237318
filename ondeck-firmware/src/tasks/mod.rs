//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod display;
pub mod mqtt;
pub mod net;

pub use display::display_task;
pub use mqtt::mqtt_task;
pub use net::{join_wifi, net_task, wait_for_address};
