pub mod dispatch;
pub mod judge;
pub mod judge_builder;
pub mod play;
pub mod prompt;

pub use dispatch::dispatch;
