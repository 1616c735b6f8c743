pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod prize_editor;
pub mod prize_pool;
pub mod reconciler;
pub mod shared_wheel_game;
pub mod spin_animator;
pub mod spin_planner;
pub mod validation;
pub mod wheel_renderer;

pub use config::WheelConfig;
pub use error::{ErrorKind, WheelError};
pub use prize_pool::{PrizeDesignation, PrizeEntry, PrizePool, PrizeRecord};
pub use shared_wheel_game::{SpinOutcome, SpinPhase, WheelController};
