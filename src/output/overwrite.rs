//! Overwrite policy for existing report files

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{InventoryError, Result};

/// Make room for a report at `path`.
///
/// Nothing happens if the file does not exist. Otherwise it is deleted when
/// `assume_yes` is set or the user answers `Y`/`y` on `input`. Any other
/// answer leaves the file alone and returns `OutputExists`.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    assume_yes: bool,
    input: &mut R,
    prompt: &mut W,
) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let confirmed = assume_yes || ask(path, input, prompt);
    if !confirmed {
        return Err(InventoryError::OutputExists {
            path: path.to_path_buf(),
        });
    }

    tracing::info!("Deleting: {}", path.display());
    std::fs::remove_file(path).map_err(|e| InventoryError::write(path, e))
}

fn ask<R: BufRead, W: Write>(path: &Path, input: &mut R, prompt: &mut W) -> bool {
    tracing::warn!("{} already exists", path.display());
    let asked = write!(
        prompt,
        "{} exists, would you like to delete it? Y or N: ",
        path.display()
    )
    .and_then(|_| prompt.flush());
    // An unasked question is never read as consent
    if let Err(e) = asked {
        tracing::warn!("cannot ask about {}: {}", path.display(), e);
        return false;
    }

    let mut answer = String::new();
    if let Err(e) = input.read_line(&mut answer) {
        tracing::warn!("cannot read answer for {}: {}", path.display(), e);
        return false;
    }
    matches!(answer.trim(), "Y" | "y")
}
