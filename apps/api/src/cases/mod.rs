pub mod fields;
pub mod handlers;
pub mod paging;
pub mod quiz;
pub mod search;
pub mod sort;
pub mod store;
pub mod tags;
