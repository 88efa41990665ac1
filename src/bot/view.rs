//! Display payloads: message text plus optional inline keyboard. The
//! transport renders these; nothing in here talks to the network.

use crate::bot::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};
use crate::market::quote::ResolvedQuote;

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, rows: Vec<Vec<(&str, String)>>) -> Self {
        Reply {
            text: text.into(),
            keyboard: Some(keyboard(rows)),
        }
    }
}

fn keyboard(rows: Vec<Vec<(&str, String)>>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(text, callback_data)| InlineKeyboardButton {
                        text: text.to_string(),
                        callback_data,
                    })
                    .collect()
            })
            .collect(),
    }
}

fn main_keyboard() -> Vec<Vec<(&'static str, String)>> {
    vec![
        vec![("🟢 Buy", "buy".into()), ("❓ Help", "help".into())],
        vec![
            ("📊 Limit Orders", "limit_orders".into()),
            ("🔄 Refresh", "refresh".into()),
        ],
        vec![("👛 Wallet", "wallet".into())],
    ]
}

pub fn welcome(wallet: &str, balance_sol: f64) -> Reply {
    let text = format!(
        "🚀 *Welcome to BONKbot* — the fastest and most secure bot for trading any token on Solana!\n\n\
        You currently have *{balance_sol:.4} SOL* in your wallet.\n\n\
        To start trading, deposit SOL to your *BONKbot wallet address*:\n\n\
        `{wallet}`\n\n\
        Once done, tap *Refresh* and your balance will update.\n\n\
        *To buy a token:* enter a ticker or token contract address from pump.fun, Birdeye, DEX Screener, or Meteora.\n\n\
        For more info on your wallet and to export your private key, tap *Wallet* below."
    );
    Reply::with_keyboard(text, main_keyboard())
}

pub fn wallet_view(wallet: &str, balance_sol: f64) -> Reply {
    let text = format!(
        "👛 *Your BONKbot Wallet*\n\n*Address:*\n`{wallet}`\n\n*Balance:* `{balance_sol:.4} SOL`"
    );
    Reply::with_keyboard(
        text,
        vec![
            vec![("➖ Withdraw All SOL", "withdraw_all".into())],
            vec![("➖ Withdraw X SOL", "withdraw_x".into())],
            vec![("🔑 Export Private Key", "export_seed".into())],
            vec![("❌ Close", "close_wallet".into())],
        ],
    )
}

pub fn refresh_view(wallet: &str, balance_sol: f64) -> Reply {
    let text = format!(
        "🔄 *Balance Refreshed*\n\n👛 *Your BONKbot Wallet*\n\n*Address:*\n`{wallet}`\n\n*Balance:* `{balance_sol:.4} SOL`"
    );
    let mut rows = main_keyboard();
    rows.pop();
    rows.push(vec![("❌ Close", "close_wallet".into())]);
    Reply::with_keyboard(text, rows)
}

pub fn buy_prompt() -> Reply {
    Reply::text("📈 *Buy Token*\n\nEnter the *token contract address*:")
}

pub fn help_view() -> Reply {
    Reply::with_keyboard(
        "❓ *Help*\n\n\
        *Which tokens can I trade?*\n\
        Any SPL token that is a SOL pair, on Raydium, pump.fun, Meteora, Moonshot, or Jupiter.\n\n\
        *Is BONKbot free?*\n\
        Yes! We charge 1% on transactions. All other actions are free.\n\n\
        *Net Profit:* Calculated after fees and price impact.",
        vec![vec![("❌ Close", "close_wallet".into())]],
    )
}

pub fn limit_orders_view() -> Reply {
    Reply::with_keyboard(
        "📊 *Limit Orders*",
        vec![
            vec![("➕ Add TP/SL", "add_tp_sl".into())],
            vec![("❌ Close", "close_wallet".into())],
        ],
    )
}

pub fn tp_sl_prompt() -> Reply {
    Reply::text(
        "Enter trigger for TP / SL order:\n- Multiple (e.g. 0.8x, 2x)\n- Percentage change (e.g. 5%, -5%)",
    )
}

pub fn withdraw_all_prompt() -> Reply {
    Reply::text("➖ *Withdraw All SOL*\n\nEnter destination wallet address:")
}

pub fn withdraw_amount_prompt() -> Reply {
    Reply::text("➖ *Withdraw X SOL*\n\nEnter the amount of SOL you want to withdraw:")
}

pub fn withdraw_destination_prompt() -> Reply {
    Reply::text("Enter destination wallet address:")
}

pub fn export_seed_warning() -> Reply {
    Reply::with_keyboard(
        "⚠️ *WARNING:* Keep your private key safe.\nClick below to reveal.",
        vec![
            vec![("🗝️ Reveal Private Key", "reveal_private_key".into())],
            vec![("❌ Close", "close_wallet".into())],
        ],
    )
}

pub fn reveal_private_key(private_key: &str) -> Reply {
    Reply::with_keyboard(
        format!("🗝️ *Your Private Key:*\n`{private_key}`\n⚠️ Keep it safe."),
        vec![vec![("❌ Close", "close_wallet".into())]],
    )
}

pub fn setkey_usage() -> Reply {
    Reply::text(
        "🔑 *Set Private Key*\n\n\
        Usage: `/setkey YOUR_PRIVATE_KEY_HERE`\n\n\
        Example:\n\
        `/setkey 5J8fH3kL9mN2pQ4rS6tU8vW1xY3zA5bC7dE9fG1hI3jK5lM7nO9pQ1rS3tU5vW7xY9zA1bC3dE5fG7hI9jK1`",
    )
}

pub fn setkey_saved() -> Reply {
    Reply::text(
        "✅ *Private key updated successfully!*\n\n\
        ⚠️ Your private key has been saved securely.\n\
        Use the Wallet → Export Private Key option to view it.",
    )
}

/// Successful lookup: every field is shown verbatim, including the
/// trimmed address the user sent, so results are auditable.
pub fn token_result(quote: &ResolvedQuote, address: &str) -> Reply {
    let text = format!(
        "🪙 *{name} ({symbol})*\n\n\
        💲 *Price:* {price}\n\
        💧 *Liquidity:* {liquidity}\n\
        📊 *Market Cap:* {market_cap}\n\
        🔍 *Source:* {source}\n\n\
        _Contract: `{address}`_",
        name = quote.token_name,
        symbol = quote.token_symbol,
        price = quote.price_display,
        liquidity = quote.liquidity_display,
        market_cap = quote.market_cap_display,
        source = quote.source,
    );
    Reply::with_keyboard(
        text,
        vec![
            vec![
                ("Buy 0.1 SOL", format!("buy_fixed_0.1:{address}")),
                ("Buy 0.5 SOL", format!("buy_fixed_0.5:{address}")),
            ],
            vec![
                ("Buy 1.0 SOL", format!("buy_fixed_1.0:{address}")),
                ("Buy 5.0 SOL", format!("buy_fixed_5.0:{address}")),
            ],
            vec![("Buy X SOL", format!("buy_x:{address}"))],
            vec![("❌ Close", "close_wallet".into())],
        ],
    )
}

/// Failed lookup: distinct message per failure class plus remediation
/// hints and the list of sources actually in the chain.
pub fn token_failure(quote: &ResolvedQuote, address: &str, sources_tried: &[&str]) -> Reply {
    let reason = quote
        .failure_message
        .as_deref()
        .unwrap_or("Unknown error");
    let tried = sources_tried.join(", ");
    let text = format!(
        "❌ *Token Lookup Failed*\n\n\
        {reason}\n\n\
        *Troubleshooting:*\n\
        • Verify contract address is correct\n\
        • Ensure token is on Solana mainnet\n\
        • Check if token has trading pairs on DEXs\n\n\
        _Tried: {tried}_\n\n\
        Contract: `{address}`"
    );
    Reply::with_keyboard(text, vec![vec![("🔄 Try Again", "buy".into())]])
}
