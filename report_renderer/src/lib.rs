//! HTML report rendering for completed wallet analyses.
//!
//! Reports are self-contained HTML files written under the configured
//! output directory, one per wallet, overwritten on every rerun. Rendering
//! is the one pipeline stage that is allowed to fail an analysis run: a
//! report that cannot be written is an operator problem, not an upstream
//! data problem.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use config_manager::ReportConfig;
use pnl_core::{round2, PortfolioStats, TokenLedger};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Filename a wallet's report is stored under.
///
/// Anything outside ASCII alphanumerics is replaced so a crafted "wallet"
/// can never escape the output directory. Real base58 addresses pass
/// through unchanged.
pub fn report_filename(wallet_address: &str) -> String {
    let safe: String = wallet_address
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.html", safe)
}

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders ranked ledgers and portfolio statistics into report files.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    config: ReportConfig,
}

impl ReportRenderer {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Directory report files are written to.
    pub fn output_dir(&self) -> &Path {
        Path::new(&self.config.output_dir)
    }

    /// Full path of the report file for a wallet.
    pub fn report_path(&self, wallet_address: &str) -> PathBuf {
        self.output_dir().join(report_filename(wallet_address))
    }

    /// Render the report for one wallet and write it to disk, creating the
    /// output directory on first use.
    pub fn render(
        &self,
        wallet_address: &str,
        ranked: &[(String, TokenLedger)],
        stats: &PortfolioStats,
    ) -> Result<PathBuf> {
        fs::create_dir_all(self.output_dir())?;

        let html = self.build_report_html(wallet_address, ranked, stats);
        let path = self.report_path(wallet_address);
        fs::write(&path, html)?;

        info!("Report generated: {}", path.display());
        Ok(path)
    }

    fn build_report_html(
        &self,
        wallet_address: &str,
        ranked: &[(String, TokenLedger)],
        stats: &PortfolioStats,
    ) -> String {
        let wallet_html = escape_html(wallet_address);

        let token_cards = if ranked.is_empty() {
            EMPTY_GRID_MESSAGE.to_string()
        } else {
            ranked
                .iter()
                .enumerate()
                .map(|(rank, (mint, entry))| self.token_card(rank, mint, entry, wallet_address))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let win_rate = stats.win_rate;
        let avg_roi = fmt_optional_percent(stats.avg_roi);
        let avg_buy = fmt_optional_sol(stats.avg_buy_amount);
        let total_pnl = stats.total_pnl;
        let total_fiat = stats.total_pnl_fiat;
        let generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>PNL Report for Wallet: {wallet_html}</title>
  <style>{REPORT_STYLE}</style>
</head>
<body>
  <div class="container">
{SAKURA}
    <h1>PNL Report for Wallet</h1>
    <div class="wallet-address">{wallet_html}</div>
    <div class="overall-stats">
      <div class="stat-card">
        <p><strong>Win Rate</strong></p>
        <p>{win_rate:.2}%</p>
      </div>
      <div class="stat-card">
        <p><strong>Average ROI</strong></p>
        <p>{avg_roi}</p>
      </div>
      <div class="stat-card">
        <p><strong>Average Buy Amount</strong></p>
        <p>{avg_buy}</p>
      </div>
      <div class="stat-card">
        <p title="Approximate Value: {total_fiat:.2}$"><strong>Total PNL</strong></p>
        <p>{total_pnl:.2} SOL</p>
      </div>
    </div>
    <div class="token-grid">
{token_cards}
    </div>
    <p class="generated-at">Generated at {generated_at}</p>
  </div>
  <script>
    function openDexscreener(token, wallet) {{
      var url = "https://dexscreener.com/solana/" + token + "?maker=" + wallet;
      window.open(url, '_blank');
    }}
  </script>
</body>
</html>
"##
        )
    }

    fn token_card(
        &self,
        rank: usize,
        mint: &str,
        entry: &TokenLedger,
        wallet_address: &str,
    ) -> String {
        let mint_html = escape_html(mint);
        let wallet_html = escape_html(wallet_address);
        let bought = round2(entry.total_bought);
        let sold = round2(entry.total_sold);
        let net_sol = round2(entry.net_pnl);
        let net_fiat = round2(net_sol * self.config.sol_fiat_rate);
        let color = pnl_color(net_sol);
        let roi = fmt_optional_percent(entry.roi());
        let latest = entry.latest_trade;
        let earliest = entry.earliest_trade;

        format!(
            r##"      <div class="token-card" data-order="{rank}" data-latest="{latest}" data-earliest="{earliest}" onclick="openDexscreener('{mint_html}', '{wallet_html}')">
        <h2>Token: <span>{mint_html}</span></h2>
        <div class="detail">
          <p>Total Bought: {bought:.2} SOL</p>
          <p>Total Sold: {sold:.2} SOL</p>
          <p>Net PNL: <span style="color: {color};">{net_sol:.2} SOL</span></p>
          <p>Approximate Value: <span style="color: {color};">{net_fiat:.2}$</span></p>
          <p>ROI: {roi}</p>
        </div>
      </div>"##
        )
    }
}

/// Gain, loss, and break-even accent colors used by the report cards.
fn pnl_color(net_sol: f64) -> &'static str {
    if net_sol > 0.0 {
        "#2AE3FF"
    } else if net_sol < 0.0 {
        "#AD2AFF"
    } else {
        "#e0e0e0"
    }
}

fn fmt_optional_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", round2(v)),
        None => "N/A".to_string(),
    }
}

fn fmt_optional_sol(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2} SOL", round2(v)),
        None => "N/A".to_string(),
    }
}

const EMPTY_GRID_MESSAGE: &str =
    "<p style='grid-column: 1 / -1; text-align: center;'>No swap transactions found.</p>";

const SAKURA: &str = r##"    <div class="sakura">
      <span style="left: 10%; animation-delay: 0s; animation-duration: 5s;"></span>
      <span style="left: 20%; animation-delay: 1s; animation-duration: 6s;"></span>
      <span style="left: 30%; animation-delay: 2s; animation-duration: 7s;"></span>
      <span style="left: 40%; animation-delay: 3s; animation-duration: 8s;"></span>
      <span style="left: 50%; animation-delay: 4s; animation-duration: 9s;"></span>
      <span style="left: 60%; animation-delay: 5s; animation-duration: 10s;"></span>
      <span style="left: 70%; animation-delay: 6s; animation-duration: 11s;"></span>
      <span style="left: 80%; animation-delay: 7s; animation-duration: 12s;"></span>
      <span style="left: 90%; animation-delay: 8s; animation-duration: 13s;"></span>
    </div>"##;

const REPORT_STYLE: &str = r##"
    body {
      background-color: #121212;
      color: #e0e0e0;
      font-family: 'Roboto', sans-serif;
      margin: 0;
      padding: 0;
      display: flex;
      flex-direction: column;
      align-items: center;
      padding-top: 20px;
      overflow-x: hidden;
    }
    .container {
      width: 90%;
      max-width: 1200px;
      padding: 20px;
      background-color: #1e1e1e;
      border-radius: 15px;
      box-shadow: 0 4px 8px rgba(0, 0, 0, 0.5);
      position: relative;
      overflow: hidden;
    }
    h1 {
      text-align: center;
      color: #ff69b4;
      margin-bottom: 10px;
      font-size: 2.5em;
      animation: glow 1.5s ease-in-out infinite alternate;
    }
    @keyframes glow {
      from {
        text-shadow: 0 0 10px #ff69b4, 0 0 20px #ff69b4, 0 0 30px #ff69b4;
      }
      to {
        text-shadow: 0 0 20px #ff69b4, 0 0 40px #ff69b4, 0 0 60px #ff69b4;
      }
    }
    .wallet-address {
      text-align: center;
      font-size: 1.8em;
      color: #c0c0c0;
      margin-bottom: 20px;
      word-break: break-all;
    }
    .overall-stats {
      display: flex;
      justify-content: space-around;
      flex-wrap: wrap;
      gap: 20px;
      margin-bottom: 30px;
    }
    .stat-card {
      background-color: #2a2a2a;
      padding: 20px;
      border-radius: 10px;
      text-align: center;
      flex: 1;
      min-width: 200px;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.3);
      transition: box-shadow 0.3s ease;
    }
    .stat-card:hover {
      box-shadow: 0 4px 8px rgba(255, 105, 180, 0.5);
    }
    .stat-card p {
      margin: 10px 0;
      font-size: 1.2em;
    }
    .token-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
      gap: 60px;
      padding: 40px;
    }
    .token-card {
      background-color: #303030;
      padding: 20px;
      border-radius: 10px;
      box-shadow: 0 2px 4px rgba(0, 0, 0, 0.3);
      overflow: hidden;
      position: relative;
      transition: transform 0.3s ease, box-shadow 0.3s ease;
      cursor: pointer;
    }
    .token-card:hover {
      transform: translateY(-5px);
      box-shadow: 0 4px 8px rgba(255, 105, 180, 0.4);
    }
    .token-card h2 {
      font-size: 1.2em;
      color: #ff69b4;
      margin-bottom: 10px;
      white-space: nowrap;
      overflow: hidden;
      text-overflow: ellipsis;
    }
    .detail p {
      margin: 5px 0;
      font-size: 1.1em;
    }
    .detail span {
      font-weight: bold;
    }
    .generated-at {
      text-align: center;
      color: #666666;
      font-size: 0.8em;
      margin-top: 30px;
    }
    .sakura {
      position: absolute;
      width: 100%;
      height: 100%;
      overflow: hidden;
      pointer-events: none;
    }
    .sakura span {
      position: absolute;
      bottom: -100px;
      opacity: 0;
      width: 20px;
      height: 20px;
      background: #ff69b4;
      border-radius: 50%;
      animation: fall 5s linear infinite, fade 5s linear infinite;
    }
    @keyframes fall {
      0% {
        transform: translateY(0) rotate(0deg);
      }
      100% {
        transform: translateY(600px) rotate(360deg);
      }
    }
    @keyframes fade {
      0%, 20%, 100% {
        opacity: 0;
      }
      50% {
        opacity: 1;
      }
    }
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use pnl_core::{aggregate, PortfolioStats, RawTransaction};
    use serde_json::json;
    use tempfile::tempdir;

    const WALLET: &str = "DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK";

    fn renderer_in(dir: &std::path::Path) -> ReportRenderer {
        ReportRenderer::new(ReportConfig {
            output_dir: dir.to_string_lossy().into_owned(),
            sol_fiat_rate: 200.0,
        })
    }

    fn tx(payload: serde_json::Value) -> RawTransaction {
        serde_json::from_value(payload).expect("test payload should deserialize")
    }

    fn buy_tx(mint: &str, lamports: &str, block_time: i64) -> RawTransaction {
        tx(json!({
            "blockTime": block_time,
            "events": {"swap": {
                "nativeInput": {"amount": lamports},
                "tokenOutputs": [{"mint": mint}]
            }}
        }))
    }

    fn sell_tx(mint: &str, lamports: &str, block_time: i64) -> RawTransaction {
        tx(json!({
            "blockTime": block_time,
            "events": {"swap": {
                "nativeOutput": {"amount": lamports},
                "tokenInputs": [{"mint": mint}]
            }}
        }))
    }

    #[test]
    fn report_filename_keeps_base58_and_defuses_path_tricks() {
        assert_eq!(report_filename(WALLET), format!("{}.html", WALLET));

        let tricky = report_filename("../../etc/passwd");
        assert!(!tricky.contains('/'));
        assert!(!tricky.contains(".."));
        assert!(tricky.ends_with(".html"));
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<img src=x onerror='alert("hi")'>&"#),
            "&lt;img src=x onerror=&#39;alert(&quot;hi&quot;)&#39;&gt;&amp;"
        );
    }

    #[test]
    fn render_writes_report_with_ranked_cards_and_stats() {
        let dir = tempdir().expect("tempdir");
        let renderer = renderer_in(dir.path());

        let ledger = aggregate(&[
            buy_tx("WINTOKEN", "2000000000", 100),
            sell_tx("WINTOKEN", "3000000000", 200),
            buy_tx("LOSSTOKEN", "2000000000", 300),
        ]);
        let stats = PortfolioStats::compute(&ledger, 200.0);
        let ranked = ledger.ranked_by_latest_trade();

        let path = renderer
            .render(WALLET, &ranked, &stats)
            .expect("render should succeed");
        assert!(path.exists());

        let html = std::fs::read_to_string(&path).expect("report should be readable");
        assert!(html.contains(WALLET));
        assert!(html.contains("Win Rate"));
        assert!(html.contains("50.00%"));
        assert!(html.contains("WINTOKEN"));
        assert!(html.contains("LOSSTOKEN"));
        // LOSSTOKEN traded last, so it ranks first.
        assert!(html.find("LOSSTOKEN").expect("present") < html.find("WINTOKEN").expect("present"));
        assert!(html.contains(r#"data-order="0""#));
        // Gain and loss accent colors both appear.
        assert!(html.contains("#2AE3FF"));
        assert!(html.contains("#AD2AFF"));
        assert!(html.contains("dexscreener.com"));
        assert!(!html.contains("No swap transactions found."));
    }

    #[test]
    fn empty_ledger_renders_placeholder_and_neutral_stats() {
        let dir = tempdir().expect("tempdir");
        let renderer = renderer_in(dir.path());

        let ledger = aggregate(&[]);
        let stats = PortfolioStats::compute(&ledger, 200.0);

        let path = renderer
            .render(WALLET, &ledger.ranked_by_latest_trade(), &stats)
            .expect("render should succeed");

        let html = std::fs::read_to_string(&path).expect("report should be readable");
        assert!(html.contains("No swap transactions found."));
        assert!(html.contains("0.00%"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn rerun_overwrites_previous_report() {
        let dir = tempdir().expect("tempdir");
        let renderer = renderer_in(dir.path());

        let empty = aggregate(&[]);
        renderer
            .render(WALLET, &empty.ranked_by_latest_trade(), &PortfolioStats::compute(&empty, 200.0))
            .expect("first render should succeed");

        let ledger = aggregate(&[buy_tx("FRESHTOKEN", "1000000000", 100)]);
        let path = renderer
            .render(
                WALLET,
                &ledger.ranked_by_latest_trade(),
                &PortfolioStats::compute(&ledger, 200.0),
            )
            .expect("second render should succeed");

        let html = std::fs::read_to_string(&path).expect("report should be readable");
        assert!(html.contains("FRESHTOKEN"));
        assert!(!html.contains("No swap transactions found."));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let dir = tempdir().expect("tempdir");
        let renderer = renderer_in(dir.path());

        let payload = "<script>alert('pwned')</script>";
        let ledger = aggregate(&[buy_tx(payload, "1000000000", 100)]);
        let path = renderer
            .render(
                payload,
                &ledger.ranked_by_latest_trade(),
                &PortfolioStats::compute(&ledger, 200.0),
            )
            .expect("render should succeed");

        let html = std::fs::read_to_string(&path).expect("report should be readable");
        assert!(!html.contains(payload));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn output_directory_is_created_on_demand() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("deep").join("Output");
        let renderer = renderer_in(&nested);

        let empty = aggregate(&[]);
        renderer
            .render(WALLET, &[], &PortfolioStats::compute(&empty, 200.0))
            .expect("render should create missing directories");
        assert!(nested.join(format!("{}.html", WALLET)).exists());
    }
}
