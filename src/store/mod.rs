pub mod auth;
pub mod client;
pub mod queries;

pub use client::SupabaseClient;
pub use queries::advice_filter;
