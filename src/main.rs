/*
 * Responsibility
 * - tokio runtime entry point
 * - Calls app::run() only (no logic here); startup errors end the process
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dropgox::app::run().await
}
