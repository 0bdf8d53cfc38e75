//! Command implementations.

pub mod centile;
pub mod chart;
pub mod curves;
pub mod latest;
pub mod report;

pub use self::centile::execute_centile;
pub use self::chart::execute_chart;
pub use self::curves::execute_curves;
pub use self::latest::execute_latest;
pub use self::report::execute_report;
