pub mod params;
pub mod session;

pub use params::EngineParams;
pub use session::{Answer, Session, SessionError, Turn};
