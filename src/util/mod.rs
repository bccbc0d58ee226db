pub mod date;
pub mod id;
