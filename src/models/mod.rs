pub mod advice;
pub mod air_quality;
pub mod condition;
pub mod health_log;
pub mod location;
pub mod session;
pub mod weather;

pub use advice::*;
pub use air_quality::*;
pub use condition::*;
pub use health_log::*;
pub use location::*;
pub use session::*;
pub use weather::*;
