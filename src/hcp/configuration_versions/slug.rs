//! Slug archives: a directory packed as tar + gzip

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use crate::error::{Result, TfeError};

/// Directory names never packed into a slug
const SKIPPED_DIRS: &[&str] = &[".git", ".terraform"];

/// Pack `dir` into an in-memory `.tar.gz`, paths relative to `dir`
pub fn pack(dir: &Path) -> Result<Vec<u8>> {
    if !dir.is_dir() {
        return Err(TfeError::Config(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut buffer = Vec::new();
    write_archive(&mut buffer, dir)?;
    debug!("Packed {} into {} byte slug", dir.display(), buffer.len());
    Ok(buffer)
}

fn write_archive<W: Write>(writer: W, dir: &Path) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);
    tar.follow_symlinks(false);

    append_dir(&mut tar, dir, Path::new(""))?;

    tar.into_inner()?.finish()?;
    Ok(())
}

fn append_dir<W: Write>(tar: &mut tar::Builder<W>, root: &Path, relative: &Path) -> Result<()> {
    let mut entries = fs::read_dir(root.join(relative))?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let rel_path = relative.join(&name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if SKIPPED_DIRS.iter().any(|skip| name == *skip) {
                continue;
            }
            tar.append_dir(&rel_path, entry.path())?;
            append_dir(tar, root, &rel_path)?;
        } else {
            tar.append_path_with_name(entry.path(), &rel_path)?;
        }
    }
    Ok(())
}

/// Unpack a `.tar.gz` slug into `dir`, creating it if needed
pub fn unpack(bytes: &[u8], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive.unpack(dir).map_err(|e| {
        TfeError::Io(format!(
            "failed to unpack slug into {}: {}",
            dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_skips_vcs_dirs() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("main.tf"), "resource \"null_resource\" \"a\" {}").unwrap();
        fs::create_dir_all(src.path().join("modules/net")).unwrap();
        fs::write(src.path().join("modules/net/vars.tf"), "variable \"cidr\" {}").unwrap();
        fs::create_dir_all(src.path().join(".git")).unwrap();
        fs::write(src.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        fs::create_dir_all(src.path().join(".terraform/providers")).unwrap();

        let slug = pack(src.path()).unwrap();

        let dst = tempfile::tempdir().unwrap();
        unpack(&slug, dst.path()).unwrap();
        assert!(dst.path().join("main.tf").is_file());
        assert_eq!(
            fs::read_to_string(dst.path().join("modules/net/vars.tf")).unwrap(),
            "variable \"cidr\" {}"
        );
        assert!(!dst.path().join(".git").exists());
        assert!(!dst.path().join(".terraform").exists());
    }

    #[test]
    fn test_pack_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.tf");
        fs::write(&file, "").unwrap();
        let err = pack(&file).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_unpack_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(unpack(b"not a slug", dir.path()).is_err());
    }
}
