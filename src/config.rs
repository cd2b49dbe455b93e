// SPDX-License-Identifier: MPL-2.0

use std::path::PathBuf;

const DEF_NOTES_DIR: &str = ".local/share/notes-store";

/// Configuration data that persists between application runs.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the saved notes, one file per note.
    pub notes_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: dirs_next::home_dir().map_or_else(
                || PathBuf::from(DEF_NOTES_DIR),
                |mut home| {
                    home.push(DEF_NOTES_DIR);
                    home
                },
            ),
        }
    }
}
