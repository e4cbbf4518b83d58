//! Command implementations.

pub mod ask;
pub mod history;
pub mod quick;
pub mod topics;

pub use self::ask::execute_ask;
pub use self::history::execute_history;
pub use self::quick::execute_quick;
pub use self::topics::execute_topics;
