//! Operational diagnostics for the price monitor.
//!
//! Prints the effective environment (secrets masked), evaluates the
//! broadcast windows against the current clock, inspects the history and
//! chart files, probes CoinMarketCap and the Telegram bot, and finally
//! attempts a test message and photo unless DRY_RUN=1.

use std::env;
use std::path::Path;

use anyhow::Result;
use chrono::{Duration, Utc};

use btc_notify::domain::schedule::BroadcastWindows;
use btc_notify::infrastructure::coinmarketcap::{CmcClient, QuoteSource};
use btc_notify::infrastructure::telegram::TelegramClient;
use btc_notify::shared::config::parse_hours;
use btc_notify::shared::utils::mask_secret;

fn get(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn show(var: &str, masked: bool) {
    match get(var) {
        Some(v) if masked => println!("{}: {}", var, mask_secret(&v)),
        Some(v) => println!("{}: {}", var, v),
        None => println!("{}: <not set>", var),
    }
}

fn check_file(label: &str, path: &Path) {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let mtime = meta
                .modified()
                .ok()
                .map(|t| chrono::DateTime::<Utc>::from(t).to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string());
            println!("{}: exists, {} bytes, mtime {}", label, meta.len(), mtime);
        }
        Err(_) => println!("{}: MISSING", label),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    println!("=== ENVIRONMENT ===");
    show("CMC_API_KEY", true);
    show("TELEGRAM_BOT_TOKEN", true);
    show("TELEGRAM_CHAT_ID", false);
    show("ALERT_THRESHOLD", false);
    show("NOTIFY_HOURS", false);
    show("NOTIFY_UTC_OFFSET_HOURS", false);
    show("DRY_RUN", false);
    println!();

    let now = Utc::now();
    println!("=== CLOCKS ===");
    println!("UTC:       {}", now.to_rfc3339());
    println!("Brasília:  {}", (now + Duration::hours(-3)).format("%Y-%m-%dT%H:%M:%S-03:00"));
    println!();

    println!("=== BROADCAST WINDOWS ===");
    let hours = parse_hours(&get("NOTIFY_HOURS").unwrap_or_else(|| "12,16,20".to_string()))
        .unwrap_or_else(|_| vec![12, 16, 20]);
    let offset: i64 = get("NOTIFY_UTC_OFFSET_HOURS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let windows = BroadcastWindows {
        hours: hours.clone(),
        tolerance_minutes: 15,
        utc_offset_hours: offset,
    };
    println!(
        "hours {:?} at offset {}h, first 15 min: inside = {}",
        hours,
        offset,
        windows.contains(now)
    );
    // The two conventions older revisions used, for comparison
    for (name, hs, off) in [
        ("UTC [12,16,20]", vec![12u32, 16, 20], 0i64),
        ("Brasília [9,16,23]", vec![9, 16, 23], -3),
    ] {
        let w = BroadcastWindows {
            hours: hs,
            tolerance_minutes: 15,
            utc_offset_hours: off,
        };
        println!("convention {}: inside = {}", name, w.contains(now));
    }
    println!();

    println!("=== FILES ===");
    let history = get("HISTORY_FILE").unwrap_or_else(|| "btc_history.csv".to_string());
    let chart = get("CHART_FILE").unwrap_or_else(|| "btc_chart.png".to_string());
    check_file(&history, Path::new(&history));
    check_file(&chart, Path::new(&chart));
    println!();

    println!("=== COINMARKETCAP ===");
    match get("CMC_API_KEY") {
        Some(key) => {
            let cmc = CmcClient::new(key);
            match cmc.latest_price("BTC", "USD").await {
                Ok(price) => println!("BTC/USD quote OK: {}", price),
                Err(e) => println!("quote FAILED: {}", e),
            }
        }
        None => println!("CMC_API_KEY not set; skipping"),
    }
    println!();

    println!("=== TELEGRAM ===");
    let token = get("TELEGRAM_BOT_TOKEN");
    let chat_id = get("TELEGRAM_CHAT_ID");
    let dry_run = matches!(get("DRY_RUN").as_deref(), Some("1" | "true" | "yes"));

    let (token, chat_id) = match (token, chat_id) {
        (Some(t), Some(c)) => (t, c),
        _ => {
            println!("TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set; stopping here");
            return Ok(());
        }
    };
    let telegram = TelegramClient::new(token, chat_id.clone(), dry_run);

    for (method, params) in [
        ("getMe", Vec::new()),
        ("getChat", vec![("chat_id", chat_id.as_str())]),
        ("getUpdates", Vec::new()),
    ] {
        match telegram.call_raw(method, &params).await {
            Ok(json) => println!("{}:\n{}", method, serde_json::to_string_pretty(&json)?),
            Err(e) => println!("{} FAILED: {}", method, e),
        }
    }
    println!();

    println!("=== TEST SENDS ===");
    if dry_run {
        println!("DRY_RUN active; skipping test message and photo");
        return Ok(());
    }
    let text = format!("[DEBUG] Mensagem de teste automática. Hora UTC: {}", Utc::now().to_rfc3339());
    match telegram.send_message(&text).await {
        Ok(()) => println!("test message sent"),
        Err(e) => println!("test message FAILED: {}", e),
    }
    let chart_path = Path::new(&chart);
    if chart_path.is_file() {
        match telegram.send_photo(chart_path, Some("[DEBUG] Gráfico BTC")).await {
            Ok(()) => println!("test photo sent"),
            Err(e) => println!("test photo FAILED: {}", e),
        }
    } else {
        println!("no chart file to send");
    }

    Ok(())
}
