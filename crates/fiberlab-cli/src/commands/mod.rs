pub mod analyze;
pub mod fibers;
