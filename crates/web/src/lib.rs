//! TaskGrid login page

pub mod client;
pub mod components;
pub mod pages;

pub use client::api_client;
pub use pages::LoginPage;
