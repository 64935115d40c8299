pub mod report;
pub mod serve;

pub use report::report;
pub use serve::serve;
