//! Decrypt command.

use crate::cli::output;
use crate::core::archive::Tar;
use crate::core::key::KeyMaterial;
use crate::core::project::Project;
use crate::error::Result;

/// Decrypt the archive of the project in the current directory and restore `set`.
pub fn execute(set: Option<&str>) -> Result<()> {
    let project = Project::open(std::env::current_dir()?)?;
    project.config().set(set)?;
    project.ensure_encrypted_archive()?;

    let key = KeyMaterial::from_env()?;
    let tar = Tar::locate()?;

    let outcome = project.decrypt(set, &key, &tar)?;

    output::success("Files successfully decrypted and copied to their destination!");
    for path in &outcome.restored {
        output::list_item(&path.display().to_string());
    }
    if outcome.restored.is_empty() {
        output::dimmed("the selected set lists no secrets");
    }

    Ok(())
}
