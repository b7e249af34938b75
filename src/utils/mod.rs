//! Small helpers shared by reports and the module walker

pub mod string;
