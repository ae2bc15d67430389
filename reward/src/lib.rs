pub mod boundary;
pub mod clock;
pub mod error;
pub mod limiter;
pub mod policy;

pub use boundary::DayBoundary;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::RewardError;
pub use limiter::{DrawOutcome, WinLimiter};
pub use policy::DrawPolicy;
