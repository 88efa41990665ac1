pub mod dispatch;
pub mod session;
pub mod telegram;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::bot::dispatch::{Dispatcher, Outbound};
use crate::bot::telegram::TelegramClient;
use crate::error::BotError;

/// Long-poll loop: fetch updates, hand each to the dispatcher on its own
/// task, send whatever the dispatcher produced. Transport errors are
/// logged and the loop keeps polling; nothing here is fatal.
pub async fn run(
    transport: Arc<TelegramClient>,
    dispatcher: Arc<Dispatcher>,
    poll_timeout_secs: u64,
) -> Result<(), BotError> {
    let mut offset = 0i64;
    info!("bot long-poll loop started");
    loop {
        let updates = match transport.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("getUpdates failed: {e}");
                tokio::time::sleep(Duration::from_secs(3)).await;
                continue;
            }
        };
        for update in updates {
            offset = offset.max(update.update_id + 1);
            let transport = transport.clone();
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                for action in dispatcher.handle_update(update).await {
                    if let Err(e) = execute(&transport, action).await {
                        warn!("outbound action failed: {e}");
                    }
                }
            });
        }
    }
}

async fn execute(transport: &TelegramClient, action: Outbound) -> Result<(), BotError> {
    match action {
        Outbound::Send { chat_id, reply } => transport.send_message(chat_id, &reply).await,
        Outbound::AnswerCallback { id } => transport.answer_callback(&id).await,
        Outbound::DeleteMessage {
            chat_id,
            message_id,
        } => transport.delete_message(chat_id, message_id).await,
    }
}
