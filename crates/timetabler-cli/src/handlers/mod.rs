pub mod launcher;
pub mod list;
pub mod new;
pub mod open;
pub mod session;
pub mod validate;
