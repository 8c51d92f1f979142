pub mod history;
pub mod import;
pub mod quiz;
pub mod register;
pub mod summary;
pub mod topics;
