//! Document I/O operations for the notes conversion

use crate::constants::OUTPUT_SUFFIX;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Load the source PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();

    if !tokio::fs::try_exists(&path).await? {
        return Err(NotesError::SourceNotFound(path));
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(NotesError::UnreadableDocument {
            path,
            reason: "input file must be a PDF".to_string(),
        });
    }

    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
        .await?
        .map_err(|e| NotesError::UnreadableDocument {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    Ok(doc)
}

/// Save the converted document.
///
/// The bytes go to a temporary file next to `path` which is renamed into
/// place, so a failed save never leaves a partial file behind.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, NotesError>(writer)
    })
    .await??;

    let partial = partial_path(&path);
    let written = match tokio::fs::write(&partial, bytes).await {
        Ok(()) => tokio::fs::rename(&partial, &path).await,
        Err(e) => Err(e),
    };

    if let Err(source) = written {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(NotesError::OutputWrite { path, source });
    }
    Ok(())
}

/// `lecture.pdf` -> `lecture_notes.pdf` in the same directory
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}{}.pdf", stem, OUTPUT_SUFFIX))
}

/// Pick the output path, refusing to overwrite the input
pub fn resolve_output_path(input: impl AsRef<Path>, output: Option<&Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    let same_file = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same_file {
        return Err(NotesError::Config(format!(
            "Output path {} would overwrite the input",
            output.display()
        )));
    }

    Ok(output)
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}
