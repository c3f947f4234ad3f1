// Process table inspection
pub mod inspector;

pub use inspector::ProcessInspector;
