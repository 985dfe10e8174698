pub mod handler;
pub mod heartbeat;
pub mod rooms;

pub use heartbeat::start_heartbeat;
pub use rooms::ChatRooms;
