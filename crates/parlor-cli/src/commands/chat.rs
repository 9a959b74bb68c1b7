use anyhow::Result;

use super::{chat_failure, print_message};
use crate::bootstrap::AppContext;

/// Sends one message to a durable conversation and prints the answer.
pub async fn run(app: &AppContext, conversation_id: &str, message: &str) -> Result<()> {
    app.durable()?;
    let reply = app
        .chat
        .send_message(conversation_id, message)
        .await
        .map_err(chat_failure)?;
    print_message(&reply.assistant_message);
    Ok(())
}
