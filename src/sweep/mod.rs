pub mod driver;
pub mod process;
pub mod report;
pub mod tools;

pub use driver::SweepDriver;
pub use process::{ProcessOutput, ProcessRunner, SystemRunner};
pub use report::ResultTable;
pub use tools::ToolDescriptor;
