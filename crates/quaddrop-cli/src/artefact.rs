use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quaddrop_common::digest::artefact_digest_hex;

/// Write a set of output files together.
///
/// Every file is first staged as a sibling `.json.tmp`; only when all of them
/// are staged are they renamed into place. A staging failure removes the temp
/// files already written and leaves every target untouched.
pub fn write_artefacts(artefacts: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(artefacts.len());

    for (path, bytes) in artefacts {
        match stage(path, bytes) {
            Ok(tmp) => staged.push((tmp, *path)),
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        }
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(err).with_context(|| format!("renaming into {}", path.display()));
        }
    }

    for (path, bytes) in artefacts {
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            sha256 = %artefact_digest_hex(bytes),
            "wrote artefact"
        );
    }
    Ok(())
}

pub fn write_artefact(path: &Path, bytes: &[u8]) -> Result<()> {
    write_artefacts(&[(path, bytes)])
}

fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    if let Err(err) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("writing {}", tmp.display()));
    }
    Ok(tmp)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(err) = fs::remove_file(tmp) {
            tracing::warn!(path = %tmp.display(), %err, "could not remove temp file");
        }
    }
}
