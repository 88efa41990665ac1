//! Conversation state machine: routes commands, callback actions and
//! free text. Free text means whatever the session says the bot last
//! asked for; in the idle state it is ignored. All network output is
//! returned as [`Outbound`] actions so the run loop owns the I/O.

use std::sync::Arc;

use log::{debug, info};

use crate::bot::session::{AwaitingInput, SessionStore};
use crate::bot::telegram::{CallbackQuery, Update};
use crate::bot::view::{self, Reply};
use crate::market::resolver::TokenResolver;
use crate::solana::BalanceProvider;

#[derive(Debug)]
pub enum Outbound {
    Send { chat_id: i64, reply: Reply },
    AnswerCallback { id: String },
    DeleteMessage { chat_id: i64, message_id: i64 },
}

pub struct Dispatcher {
    resolver: TokenResolver,
    sessions: SessionStore,
    balances: Arc<dyn BalanceProvider>,
}

impl Dispatcher {
    pub fn new(
        resolver: TokenResolver,
        sessions: SessionStore,
        balances: Arc<dyn BalanceProvider>,
    ) -> Self {
        Self {
            resolver,
            sessions,
            balances,
        }
    }

    pub async fn handle_update(&self, update: Update) -> Vec<Outbound> {
        if let Some(message) = update.message {
            let Some(user) = message.from else {
                return Vec::new();
            };
            let Some(text) = message.text else {
                return Vec::new();
            };
            let chat_id = message.chat.id;
            return if text == "/start" || text.starts_with("/start ") {
                self.cmd_start(user.id, chat_id).await
            } else if text == "/setkey" || text.starts_with("/setkey ") {
                let args = text["/setkey".len()..].trim();
                self.cmd_setkey(user.id, chat_id, args)
            } else if text.starts_with('/') {
                debug!("unknown command from {}: {text}", user.id);
                Vec::new()
            } else {
                self.handle_text(user.id, chat_id, &text).await
            };
        }
        if let Some(callback) = update.callback_query {
            return self.handle_callback(callback).await;
        }
        Vec::new()
    }

    async fn cmd_start(&self, user_id: i64, chat_id: i64) -> Vec<Outbound> {
        let wallet = self.sessions.wallet(user_id);
        let balance = self.balances.sol_balance(&wallet).await;
        self.sessions.set_balance(user_id, balance);
        vec![Outbound::Send {
            chat_id,
            reply: view::welcome(&wallet, balance),
        }]
    }

    fn cmd_setkey(&self, user_id: i64, chat_id: i64, args: &str) -> Vec<Outbound> {
        let reply = if args.is_empty() {
            view::setkey_usage()
        } else {
            self.sessions.set_private_key(user_id, args.to_string());
            view::setkey_saved()
        };
        vec![Outbound::Send { chat_id, reply }]
    }

    /// Free text resolves whatever the session was waiting for. The flag
    /// is cleared before any handler runs, so a second message from the
    /// same user never double-resolves against a stale state.
    async fn handle_text(&self, user_id: i64, chat_id: i64, text: &str) -> Vec<Outbound> {
        match self.sessions.take_awaiting(user_id) {
            AwaitingInput::TokenAddress => {
                let address = text.trim().to_string();
                let quote = self.resolver.resolve(&address).await;
                let reply = if quote.failed {
                    view::token_failure(&quote, &address, &self.resolver.source_names())
                } else {
                    view::token_result(&quote, &address)
                };
                vec![Outbound::Send { chat_id, reply }]
            }
            AwaitingInput::WithdrawAmount => {
                self.sessions.set_withdraw_amount(user_id, text.to_string());
                vec![Outbound::Send {
                    chat_id,
                    reply: view::withdraw_destination_prompt(),
                }]
            }
            AwaitingInput::None => {
                info!("ignoring free text from idle user {user_id}");
                Vec::new()
            }
        }
    }

    async fn handle_callback(&self, callback: CallbackQuery) -> Vec<Outbound> {
        let user_id = callback.from.id;
        let mut actions = vec![Outbound::AnswerCallback { id: callback.id }];
        let Some(message) = callback.message else {
            return actions;
        };
        let chat_id = message.chat.id;

        match callback.data.as_deref() {
            Some("wallet") => {
                let wallet = self.sessions.wallet(user_id);
                let balance = self.balances.sol_balance(&wallet).await;
                self.sessions.set_balance(user_id, balance);
                actions.push(Outbound::Send {
                    chat_id,
                    reply: view::wallet_view(&wallet, balance),
                });
            }
            Some("refresh") => {
                let wallet = self.sessions.wallet(user_id);
                let balance = self.balances.sol_balance(&wallet).await;
                self.sessions.set_balance(user_id, balance);
                actions.push(Outbound::Send {
                    chat_id,
                    reply: view::refresh_view(&wallet, balance),
                });
            }
            Some("buy") => {
                self.sessions
                    .set_awaiting(user_id, AwaitingInput::TokenAddress);
                actions.push(Outbound::Send {
                    chat_id,
                    reply: view::buy_prompt(),
                });
            }
            Some("help") => actions.push(Outbound::Send {
                chat_id,
                reply: view::help_view(),
            }),
            Some("limit_orders") => actions.push(Outbound::Send {
                chat_id,
                reply: view::limit_orders_view(),
            }),
            Some("add_tp_sl") => actions.push(Outbound::Send {
                chat_id,
                reply: view::tp_sl_prompt(),
            }),
            Some("withdraw_all") => actions.push(Outbound::Send {
                chat_id,
                reply: view::withdraw_all_prompt(),
            }),
            Some("withdraw_x") => {
                self.sessions
                    .set_awaiting(user_id, AwaitingInput::WithdrawAmount);
                actions.push(Outbound::Send {
                    chat_id,
                    reply: view::withdraw_amount_prompt(),
                });
            }
            Some("export_seed") => actions.push(Outbound::Send {
                chat_id,
                reply: view::export_seed_warning(),
            }),
            Some("reveal_private_key") => {
                let key = self.sessions.private_key(user_id);
                actions.push(Outbound::Send {
                    chat_id,
                    reply: view::reveal_private_key(&key),
                });
            }
            Some("close_wallet") => actions.push(Outbound::DeleteMessage {
                chat_id,
                message_id: message.message_id,
            }),
            // buy_fixed_*/buy_x:* stay inert placeholders; execution is
            // out of scope.
            other => debug!("unhandled callback from {user_id}: {other:?}"),
        }
        actions
    }
}
