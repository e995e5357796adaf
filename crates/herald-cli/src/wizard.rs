//! Interactive credential setup wizard.
//!
//! One section per platform (BlueSky, Nostr, X/Twitter, Threads), each gated
//! by a yes/no question. Answers accumulate into a single credential blob
//! that is written to OS secret storage in one shot at the end.

use std::io::{self, Write};

use color_eyre::Result;
use console::style;
use herald_core::credentials::Credentials;
use herald_core::store::{SecretStore, SecretStoreError};

/// Interactive setup wizard.
pub struct SetupWizard {
    force: bool,
}

impl SetupWizard {
    /// * `force` – overwrite existing credentials without asking.
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    /// Run the full wizard against the given store.
    pub async fn run(&self, store: &dyn SecretStore) -> Result<()> {
        print_welcome();

        if !self.force && self.existing_blob(store).await? {
            let overwrite = prompt_yes_no("Credentials already exist. Overwrite?", false)?;
            if !overwrite {
                eprintln!("  Keeping existing credentials.");
                return Ok(());
            }
        }

        let mut credentials = Credentials::default();
        section_bluesky(&mut credentials)?;
        section_nostr(&mut credentials)?;
        section_twitter(&mut credentials)?;
        section_threads(&mut credentials)?;

        let blob = credentials
            .to_json()
            .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
        if let Err(err) = store.put(&blob).await {
            print_store_failure(&err);
            return Err(color_eyre::eyre::eyre!(err.to_string()));
        }

        print_done(&credentials);
        Ok(())
    }

    /// Check whether a blob is already stored. Helper trouble is fatal here:
    /// if the store cannot be read it cannot be written either.
    async fn existing_blob(&self, store: &dyn SecretStore) -> Result<bool> {
        match store.get().await {
            Ok(_) => Ok(true),
            Err(SecretStoreError::NotFound) => Ok(false),
            Err(err) => {
                print_store_failure(&err);
                Err(color_eyre::eyre::eyre!(err.to_string()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt utilities
// ---------------------------------------------------------------------------

/// Prompt for a line of text input (printed to stderr so stdout stays clean).
fn prompt_input(prompt: &str) -> Result<String> {
    eprint!("  {prompt}");
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Prompt that maps an empty answer to `None`.
fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    Ok(non_empty(prompt_input(prompt)?))
}

/// Prompt for a yes/no question with a default.
pub(crate) fn prompt_yes_no(prompt: &str, default_yes: bool) -> Result<bool> {
    let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
    let answer = prompt_input(&format!("{prompt} {suffix}: "))?;
    Ok(answer_is_yes(&answer, default_yes))
}

/// Prompt for a secret (masked input); empty answers map to `None`.
fn prompt_secret(prompt: &str) -> Result<Option<String>> {
    let value = rpassword::prompt_password(format!("  {prompt}"))?;
    Ok(non_empty(value.trim().to_string()))
}

fn answer_is_yes(answer: &str, default_yes: bool) -> bool {
    if answer.is_empty() {
        default_yes
    } else {
        answer.to_lowercase().starts_with('y')
    }
}

fn non_empty(input: String) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

/// Split a comma-separated relay answer into a clean list.
fn parse_relay_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Platform sections
// ---------------------------------------------------------------------------

fn print_section(name: &str) {
    eprintln!();
    eprintln!("{}", style(format!("--- {name} ---")).bold());
}

fn print_skipped(name: &str) {
    eprintln!("  {} Skipping {name}.", style("*").dim());
}

fn section_bluesky(credentials: &mut Credentials) -> Result<()> {
    print_section("BlueSky");
    if !prompt_yes_no("Configure BlueSky?", false)? {
        print_skipped("BlueSky");
        return Ok(());
    }

    credentials.bluesky_handle = prompt_optional("BlueSky handle (e.g. user.bsky.social): ")?;
    credentials.bluesky_app_password = prompt_secret("BlueSky app password: ")?;
    Ok(())
}

fn section_nostr(credentials: &mut Credentials) -> Result<()> {
    print_section("Nostr");
    if !prompt_yes_no("Configure Nostr?", false)? {
        print_skipped("Nostr");
        return Ok(());
    }

    let use_signer = prompt_yes_no("Sign with Pleb_Signer instead of a local key?", false)?;
    credentials.nostr_use_pleb_signer = use_signer;
    if !use_signer {
        credentials.nostr_nsec = prompt_secret("Nostr nsec key: ")?;
        if let Some(nsec) = &credentials.nostr_nsec {
            if !nsec.starts_with("nsec1") {
                eprintln!(
                    "  {} Key does not start with 'nsec1'. It may be invalid.",
                    style("!").yellow(),
                );
            }
        }
    }

    if !prompt_yes_no("Use default relays?", true)? {
        let raw = prompt_input("Relay URLs (comma-separated): ")?;
        credentials.nostr_relays = parse_relay_list(&raw);
    }

    credentials.nostr_image_host_url = prompt_optional("Image host URL (optional): ")?;
    Ok(())
}

fn section_twitter(credentials: &mut Credentials) -> Result<()> {
    print_section("X/Twitter");
    if !prompt_yes_no("Configure X/Twitter?", false)? {
        print_skipped("X/Twitter");
        return Ok(());
    }

    eprintln!("  Keys come from https://developer.twitter.com/en/portal/dashboard");
    credentials.twitter_consumer_key = prompt_optional("Consumer Key (API Key): ")?;
    credentials.twitter_consumer_secret = prompt_secret("Consumer Secret (API Secret): ")?;
    credentials.twitter_access_token = prompt_optional("Access Token: ")?;
    credentials.twitter_access_secret = prompt_secret("Access Token Secret: ")?;
    Ok(())
}

fn section_threads(credentials: &mut Credentials) -> Result<()> {
    print_section("Threads");
    if !prompt_yes_no("Configure Threads?", false)? {
        print_skipped("Threads");
        return Ok(());
    }

    eprintln!("  Tokens come from the Meta for Developers portal.");
    credentials.threads_access_token = prompt_secret("Threads access token: ")?;
    credentials.threads_user_id = prompt_optional("Threads user ID: ")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_welcome() {
    eprintln!();
    eprintln!("  {}", style("Herald credential setup").bold().cyan());
    eprintln!(
        "  {}",
        style("Credentials are stored securely in your system keyring.").dim(),
    );
}

/// Explain a storage failure the way a user can act on it.
pub(crate) fn print_store_failure(err: &SecretStoreError) {
    eprintln!();
    match err {
        SecretStoreError::HelperMissing { helper } => {
            eprintln!("  {} '{helper}' not found.", style("x").red().bold());
            eprintln!("  Install it with: sudo apt install libsecret-tools");
        }
        _ => {
            eprintln!(
                "  {} Failed to save credentials: {err}",
                style("x").red().bold(),
            );
            eprintln!("  Make sure 'secret-tool' is installed (part of libsecret-tools).");
        }
    }
}

fn summary_lines(credentials: &Credentials) -> Vec<String> {
    let label = |configured: bool| {
        if configured {
            "configured"
        } else {
            "not configured"
        }
    };
    vec![
        format!("BlueSky:   {}", label(credentials.has_bluesky())),
        format!("Nostr:     {}", label(credentials.has_nostr())),
        format!("X/Twitter: {}", label(credentials.has_twitter())),
        format!("Threads:   {}", label(credentials.has_threads())),
    ]
}

fn print_done(credentials: &Credentials) {
    eprintln!();
    eprintln!("  {} Credentials saved.", style("*").green().bold());
    for line in summary_lines(credentials) {
        eprintln!("    {line}");
    }
    if credentials.is_empty() {
        eprintln!(
            "  {}",
            style("No platform was configured; the applet will have nothing to post to.").yellow(),
        );
    }
    eprintln!();
    eprintln!("  The Herald applet picks these up on its next launch.");
}
