pub mod feedback;
pub mod logging;
pub mod markdown;
