pub mod errors;
pub mod shutdown;
pub mod slug;

pub use errors::*;
pub use shutdown::ShutdownSignal;
pub use slug::slugify;
