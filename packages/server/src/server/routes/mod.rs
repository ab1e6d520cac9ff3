// HTTP routes
pub mod health;
pub mod logs;
pub mod progress_socket;
pub mod verify;

pub use health::*;
pub use logs::*;
pub use progress_socket::*;
pub use verify::*;
