pub mod handlers;
pub mod html;
