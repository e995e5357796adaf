//! Non-wizard subcommands: `show`, `check`, and `delete`.

use color_eyre::Result;
use herald_core::credentials::{redact, Credentials};
use herald_core::store::{SecretStore, SecretStoreError};

use crate::wizard;

/// Print per-platform status with secrets redacted.
pub async fn show(store: &dyn SecretStore) -> Result<()> {
    match store.get().await {
        Ok(blob) => {
            let credentials = Credentials::from_json(&blob)
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            for line in render_show(&credentials) {
                println!("{line}");
            }
        }
        Err(SecretStoreError::NotFound) => {
            println!("No credentials stored yet. Run `herald setup` to add them.");
        }
        Err(err) => {
            wizard::print_store_failure(&err);
            return Err(color_eyre::eyre::eyre!(err.to_string()));
        }
    }
    Ok(())
}

/// Verify the storage backend is reachable and report what is stored.
pub async fn check(store: &dyn SecretStore) -> Result<()> {
    match store.get().await {
        Ok(blob) => {
            let credentials = Credentials::from_json(&blob)
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Storage: ok ({})", store.name());
            let names = configured_platforms(&credentials);
            if names.is_empty() {
                println!("Credentials stored, but no platform is configured.");
            } else {
                println!("Configured platforms: {}", names.join(", "));
            }
        }
        Err(SecretStoreError::NotFound) => {
            println!("Storage: ok ({})", store.name());
            println!("No credentials stored yet. Run `herald setup` to add them.");
        }
        Err(err) => {
            wizard::print_store_failure(&err);
            return Err(color_eyre::eyre::eyre!(err.to_string()));
        }
    }
    Ok(())
}

/// Delete the stored blob, asking first unless `yes` is set.
pub async fn delete(store: &dyn SecretStore, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = wizard::prompt_yes_no("Delete stored credentials?", false)?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store
        .delete()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Credentials deleted.");
    Ok(())
}

fn configured_platforms(credentials: &Credentials) -> Vec<&'static str> {
    let mut names = Vec::new();
    if credentials.has_bluesky() {
        names.push("BlueSky");
    }
    if credentials.has_nostr() {
        names.push("Nostr");
    }
    if credentials.has_twitter() {
        names.push("X/Twitter");
    }
    if credentials.has_threads() {
        names.push("Threads");
    }
    names
}

fn render_show(credentials: &Credentials) -> Vec<String> {
    let mut lines = Vec::new();

    if credentials.has_bluesky() {
        lines.push("BlueSky: configured".to_string());
        if let Some(handle) = &credentials.bluesky_handle {
            lines.push(format!("  handle:       {handle}"));
        }
        if let Some(password) = &credentials.bluesky_app_password {
            lines.push(format!("  app password: {}", redact(password)));
        }
    } else {
        lines.push("BlueSky: not configured".to_string());
    }

    if credentials.has_nostr() {
        lines.push("Nostr: configured".to_string());
        if credentials.nostr_use_pleb_signer {
            lines.push("  signing:      Pleb_Signer".to_string());
        } else if let Some(nsec) = &credentials.nostr_nsec {
            lines.push(format!("  nsec:         {}", redact(nsec)));
        }
        if credentials.nostr_relays.is_empty() {
            lines.push("  relays:       default".to_string());
        } else {
            lines.push(format!("  relays:       {}", credentials.nostr_relays.join(", ")));
        }
        if let Some(url) = &credentials.nostr_image_host_url {
            lines.push(format!("  image host:   {url}"));
        }
    } else {
        lines.push("Nostr: not configured".to_string());
    }

    if credentials.has_twitter() {
        lines.push("X/Twitter: configured".to_string());
        if let Some(key) = &credentials.twitter_consumer_key {
            lines.push(format!("  consumer key: {}", redact(key)));
        }
        if let Some(token) = &credentials.twitter_access_token {
            lines.push(format!("  access token: {}", redact(token)));
        }
    } else {
        lines.push("X/Twitter: not configured".to_string());
    }

    if credentials.has_threads() {
        lines.push("Threads: configured".to_string());
        if let Some(user_id) = &credentials.threads_user_id {
            lines.push(format!("  user id:      {user_id}"));
        }
        if let Some(token) = &credentials.threads_access_token {
            lines.push(format!("  access token: {}", redact(token)));
        }
    } else {
        lines.push("Threads: not configured".to_string());
    }

    lines
}
