//! External feed adapters.

pub mod alphavantage;

pub use alphavantage::AlphaVantageFxClient;
