pub mod check;
pub mod drill;
pub mod init;
pub mod validate;
