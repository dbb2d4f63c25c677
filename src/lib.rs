//! btc-notify - Bitcoin price monitor
//!
//! Fetches BTC quotes, keeps an append-only CSV history, renders a line
//! chart and pushes Telegram notifications.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::monitor::Monitor;
pub use infrastructure::coinmarketcap::CmcClient;
pub use infrastructure::history::HistoryStore;
pub use infrastructure::telegram::TelegramClient;
pub use shared::config::Config;
