//! Encrypt command.

use tracing::info;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompt;
use crate::core::archive::Tar;
use crate::core::constants;
use crate::core::project::Project;
use crate::error::Result;

/// Encrypt the secrets of the project in the current directory.
pub fn execute() -> Result<()> {
    let project = Project::open(std::env::current_dir()?)?;
    let tar = Tar::locate()?;

    let outcome = project.encrypt(&tar, &TerminalPrompt)?;

    for entry in &outcome.gitignore_added {
        info!(entry = %entry, "added to .gitignore");
    }

    let encrypted = outcome.encrypted_file.display();
    match &outcome.generated {
        Some(key) => {
            output::success("Success! Now, you need to follow these last few steps:");
            output::step(
                1,
                &format!(
                    "Make sure to add {} to your source code repository",
                    output::path(&encrypted)
                ),
            );
            output::step(
                2,
                &format!(
                    "Create a *secret* environment variable {} with value:",
                    output::key(constants::DECRYPT_KEY_ENV_VAR)
                ),
            );
            output::kv(constants::DECRYPT_KEY_ENV_VAR, key.key_base64());
            output::step(
                3,
                &format!(
                    "Create a *secret* environment variable {} with value:",
                    output::key(constants::DECRYPT_IV_ENV_VAR)
                ),
            );
            output::kv(constants::DECRYPT_IV_ENV_VAR, key.iv_base64());
            output::warn("these values are shown only once; store them before closing this terminal");
        }
        None => {
            output::success(&format!("Success! {} updated", output::path(&encrypted)));
        }
    }

    Ok(())
}
