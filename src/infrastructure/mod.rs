//! Infrastructure layer - external services and durable state

pub mod chart;
pub mod coinmarketcap;
pub mod history;
pub mod telegram;

pub use coinmarketcap::{CmcClient, QuoteSource};
pub use history::HistoryStore;
pub use telegram::TelegramClient;
