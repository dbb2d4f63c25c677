//! The monitor run: fetch → persist → compare → chart → notify

use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::observation::Observation;
use crate::domain::variation::{self, VariationAlert};
use crate::infrastructure::chart;
use crate::infrastructure::coinmarketcap::{fetch_btc_quotes, CmcClient};
use crate::infrastructure::history::HistoryStore;
use crate::infrastructure::telegram::TelegramClient;
use crate::shared::config::Config;
use crate::shared::errors::MonitorError;
use crate::shared::utils::format_money;

/// One scheduled invocation of the price monitor
pub struct Monitor {
    config: Config,
    quotes: CmcClient,
    telegram: TelegramClient,
    history: HistoryStore,
}

impl Monitor {
    pub fn new(config: &Config) -> Self {
        Self {
            quotes: CmcClient::new(config.cmc_api_key.clone()),
            telegram: TelegramClient::new(
                config.telegram_bot_token.clone(),
                config.telegram_chat_id.clone(),
                config.dry_run,
            ),
            history: HistoryStore::new(&config.history_file),
            config: config.clone(),
        }
    }

    /// Run to completion. Failures are logged and forwarded to Telegram on a
    /// best-effort basis; a failed run simply produces no observation and the
    /// next scheduled invocation starts fresh.
    pub async fn run(&self) {
        if let Err(e) = self.run_once().await {
            error!("Monitor run failed: {}", e);
            let notice = format!("⚠️ Erro ao buscar cotação BTC: {}", e);
            if let Err(secondary) = self.telegram.send_message(&notice).await {
                warn!("Failure notification also failed: {}", secondary);
            }
        }
    }

    async fn run_once(&self) -> Result<(), MonitorError> {
        let (price_usd, price_brl) = fetch_btc_quotes(&self.quotes, self.config.quote_brl).await?;
        info!("BTC quote: USD {}{}", price_usd, match price_brl {
            Some(brl) => format!(", BRL {}", brl),
            None => String::new(),
        });

        let previous = self.history.last()?;
        let observation = Observation::now(price_usd, price_brl);
        self.history.append(&observation)?;

        let alert = variation::check(previous.as_ref(), price_usd, self.config.alert_threshold);
        let scheduled = self.config.windows.contains(Utc::now());

        if alert.is_none() && !scheduled {
            info!("No variation alert and outside broadcast windows; staying quiet");
            return Ok(());
        }

        if let Some(ref alert) = alert {
            info!(
                "Variation alert: {:+.2}% (from {} to {})",
                alert.change_pct, alert.previous_price, alert.new_price
            );
        }
        if scheduled {
            info!("Inside a scheduled broadcast window");
        }

        let text = compose_message(&observation, alert.as_ref());
        self.telegram.send_message(&text).await?;

        // Chart wants the freshly appended row too
        let history = self.history.load()?;
        if chart::render_usd_chart(&history, &self.config.chart_file)? {
            let caption = format!("Histórico BTC/USD ({} leituras)", history.len());
            self.telegram
                .send_photo(&self.config.chart_file, Some(&caption))
                .await?;
        }

        Ok(())
    }
}

/// Notification body, matching the bot's established message format
fn compose_message(obs: &Observation, alert: Option<&VariationAlert>) -> String {
    let mut text = format!(
        "💰 Bitcoin (BTC)\nCotação atual:\n🇺🇸 USD: ${}",
        format_money(obs.price_usd)
    );
    if let Some(brl) = obs.price_brl {
        text.push_str(&format!("\n🇧🇷 BRL: R${}", format_money(brl)));
    }
    if let Some(alert) = alert {
        let arrow = if alert.is_increase() { "📈" } else { "📉" };
        text.push_str(&format!(
            "\n{} Variação de {:+.2}% desde a última leitura",
            arrow, alert.change_pct
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn obs() -> Observation {
        Observation::new(
            Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
            65432.1,
            Some(330123.456),
        )
    }

    #[test]
    fn test_compose_plain_broadcast() {
        let text = compose_message(&obs(), None);
        assert_eq!(
            text,
            "💰 Bitcoin (BTC)\nCotação atual:\n🇺🇸 USD: $65,432.10\n🇧🇷 BRL: R$330,123.46"
        );
    }

    #[test]
    fn test_compose_without_brl() {
        let mut o = obs();
        o.price_brl = None;
        let text = compose_message(&o, None);
        assert!(!text.contains("BRL"));
        assert!(text.ends_with("🇺🇸 USD: $65,432.10"));
    }

    #[test]
    fn test_compose_with_alert_line() {
        let alert = VariationAlert {
            previous_price: 61728.0,
            new_price: 65432.1,
            change_pct: 6.0,
        };
        let text = compose_message(&obs(), Some(&alert));
        assert!(text.contains("📈 Variação de +6.00%"));
    }

    #[test]
    fn test_compose_with_drop_alert() {
        let alert = VariationAlert {
            previous_price: 70000.0,
            new_price: 65432.1,
            change_pct: -6.53,
        };
        let text = compose_message(&obs(), Some(&alert));
        assert!(text.contains("📉 Variação de -6.53%"));
    }
}
