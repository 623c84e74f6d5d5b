pub mod catalog;
pub mod record;
pub mod requests;
pub mod responses;
