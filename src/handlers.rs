pub mod catalog;
pub mod grants;
pub mod schools;
