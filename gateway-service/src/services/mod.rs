pub mod filter;
pub mod proxy;
pub mod resolver;
