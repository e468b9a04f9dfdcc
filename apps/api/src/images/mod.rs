pub mod handlers;
pub mod naming;
