//! Server-rendered page shells around the analysis workflow.
//!
//! The actual PnL report is produced by `report_renderer`; the pages here
//! are the small interactive surface around it: the address form, the
//! landing page linking to a rendered report, and error pages.

use axum::http::StatusCode;
use report_renderer::{escape_html, report_filename};

/// Landing page shown after an analysis run, linking to the rendered
/// report file for the wallet.
pub fn interstitial_page(wallet_address: &str) -> String {
    let wallet_html = escape_html(wallet_address);
    let report_link = format!("/serve_report/{}", report_filename(wallet_address));

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Report for {wallet_html}</title>
  <style>{PAGE_STYLE}</style>
</head>
<body>
  <div class="container">
{SAKURA}
    <h1>Report for</h1>
    <div class="wallet-address">{wallet_html}</div>
    <a href="{report_link}" target="_blank">Open Report in New Tab</a>
    <br>
    <a href="/">Return to Main Page</a>
  </div>
</body>
</html>
"##
    )
}

/// Minimal error page in the same visual shell as the rest of the site.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    let message_html = escape_html(message);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{code} {reason}</title>
  <style>{PAGE_STYLE}</style>
</head>
<body>
  <div class="container">
    <h1>{code} {reason}</h1>
    <div class="wallet-address">{message_html}</div>
    <a href="/">Return to Main Page</a>
  </div>
</body>
</html>
"##
    )
}

/// Index page with the wallet address form.
pub const INDEX_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Solana Report Generator</title>
  <style>
    body {
      background-color: #121212;
      color: #e0e0e0;
      font-family: 'Roboto', sans-serif;
      margin: 0;
      padding: 0;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      height: 100vh;
      overflow-x: hidden;
    }
    .container {
      width: 90%;
      max-width: 560px;
      padding: 20px;
      background-color: #1e1e1e;
      border-radius: 15px;
      box-shadow: 0 4px 8px rgba(0, 0, 0, 0.5);
      position: relative;
      overflow: hidden;
      text-align: center;
    }
    h1 {
      color: #ff69b4;
      margin-bottom: 20px;
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
    input[type="text"] {
      width: 80%;
      padding: 10px;
      margin: 10px 0;
      border: none;
      border-radius: 4px;
      background-color: #2a2a2a;
      color: #e0e0e0;
    }
    input[type="submit"] {
      padding: 10px 20px;
      background-color: #ff69b4;
      color: white;
      border: none;
      border-radius: 4px;
      cursor: pointer;
      transition: background-color 0.5s ease, color 0.5s ease;
    }
    input[type="submit"]:hover {
      background-color: white;
      color: #ff69b4;
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
  </style>
</head>
<body>
  <div class="container">
    <div class="sakura">
      <span style="left: 10%; animation-delay: 0s; animation-duration: 5s;"></span>
      <span style="left: 20%; animation-delay: 1s; animation-duration: 6s;"></span>
      <span style="left: 30%; animation-delay: 2s; animation-duration: 7s;"></span>
      <span style="left: 40%; animation-delay: 3s; animation-duration: 8s;"></span>
      <span style="left: 50%; animation-delay: 4s; animation-duration: 9s;"></span>
      <span style="left: 60%; animation-delay: 5s; animation-duration: 10s;"></span>
      <span style="left: 70%; animation-delay: 6s; animation-duration: 11s;"></span>
      <span style="left: 80%; animation-delay: 7s; animation-duration: 12s;"></span>
      <span style="left: 90%; animation-delay: 8s; animation-duration: 13s;"></span>
    </div>
    <h1>Solana Report Generator</h1>
    <form action="/run" method="post">
      <label for="wallet">Enter Solana wallet address:</label>
      <input type="text" id="wallet" name="wallet" required>
      <input type="submit" value="Generate Report">
    </form>
  </div>
</body>
</html>
"##;

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

const PAGE_STYLE: &str = r##"
    body {
      background-color: #121212;
      color: #e0e0e0;
      font-family: 'Roboto', sans-serif;
      margin: 0;
      padding: 0;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      height: 100vh;
      overflow-x: hidden;
    }
    .container {
      width: 90%;
      max-width: 600px;
      padding: 20px;
      background-color: #1e1e1e;
      border-radius: 15px;
      box-shadow: 0 4px 8px rgba(0, 0, 0, 0.5);
      position: relative;
      overflow: hidden;
      text-align: center;
    }
    h1 {
      color: #ff69b4;
      margin-bottom: 20px;
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
    a {
      display: inline-block;
      padding: 10px 20px;
      margin-top: 20px;
      background-color: #ff69b4;
      color: white;
      text-decoration: none;
      border-radius: 4px;
      transition: background-color 0.5s ease, color 0.5s ease;
    }
    a:hover {
      background-color: white;
      color: #ff69b4;
    }
    .wallet-address {
      word-break: break-all;
      margin-bottom: 20px;
      font-size: 1.2em;
      padding: 10px;
      background-color: #2a2a2a;
      border-radius: 4px;
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
