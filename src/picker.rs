use std::path::{Path, PathBuf};

use osuguide::parser::beatmap_parser::OSU_EXTENSION;

#[derive(Debug, Clone, thiserror::Error)]
pub enum FilePickerError {
    #[error("dialog window closed without selecting a file")]
    DialogClosed,
    #[error("IO error: {0}")]
    IoError(String),
}

/// Opens a file dialog restricted to beatmaps and returns the picked path.
pub async fn open_file_dialog(start_folder: Option<&Path>) -> Result<PathBuf, FilePickerError> {
    let mut dialog = rfd::AsyncFileDialog::new()
        .add_filter(".osu (file format)", &[OSU_EXTENSION])
        .set_title("Pick an osu! beatmap");
    if let Some(folder) = start_folder {
        dialog = dialog.set_directory(folder);
    }
    let picked_file = dialog
        .pick_file()
        .await
        .ok_or(FilePickerError::DialogClosed)?;
    Ok(picked_file.path().to_path_buf())
}

/// Loads the content of a beatmap at the given path.
pub async fn load_file(path: &Path) -> Result<Vec<u8>, FilePickerError> {
    let file_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if file_extension != OSU_EXTENSION {
        return Err(FilePickerError::IoError(format!(
            "Unsupported file extension: {file_extension}"
        )));
    }
    log::info!("Loading file: {path:?}");
    tokio::fs::read(path)
        .await
        .map_err(|error| FilePickerError::IoError(error.to_string()))
}
