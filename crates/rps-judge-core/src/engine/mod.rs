pub mod driver;
pub mod opponent;
pub mod scoreboard;
pub mod session;

pub use driver::{Driver, DriverExit};
pub use opponent::Opponent;
pub use session::{RoundOutcome, Session};
