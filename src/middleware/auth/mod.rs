pub mod gate;
pub mod guard;
pub mod policy;
