//! Send a contact message from the command line.

use crate::relay::{relay_from_config, send_contact_message};
use anyhow::{Context, Result};
use folio_core::{mailto_fallback, Config, ContactMessage};
use folio_render::EmailContext;
use std::path::Path;

/// Deliver `message` through the configured relay.
///
/// On failure the equivalent `mailto:` draft link is printed so the message
/// can still be sent by hand.
pub async fn send_contact(config_path: &Path, message: ContactMessage) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let relay = relay_from_config(&config).context("Failed to configure contact relay")?;
    let emails = EmailContext::from_config(&config);

    match send_contact_message(relay.as_ref(), &emails, &message).await {
        Ok(delivery) => {
            println!(
                "✓ Sent notification to {} and confirmation to {}",
                delivery.notified, delivery.confirmed
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("Send via email instead:");
            eprintln!("  {}", mailto_fallback(&config.contact.admin_email, &message));
            Err(err).context("Failed to send message")
        }
    }
}
