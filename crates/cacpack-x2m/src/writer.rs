//! Package writing.
//!
//! The archive is written to a uniquely named temporary file next to the
//! destination and persisted over it once complete, so a failed write never leaves a partial
//! package behind.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{manifest, Error, ModPackage, Result};

/// Archive path of the manifest.
pub const MANIFEST_PATH: &str = "x2m.xml";
/// Archive path of the custom part-set table.
pub const BCS_PATH: &str = "bcs.xml";
/// Archive path of the skeleton override.
pub const SKELETON_PATH: &str = "skeleton.esk";
/// Archive path of the camera animation override.
pub const CAMERA_PATH: &str = "camera.ean";

impl ModPackage {
    /// Every archive entry except the manifest, in write order.
    fn archive_entries(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut entries = Vec::with_capacity(self.file_count() + 3);

        entries.push((BCS_PATH.to_string(), self.bcs().to_xml()?.into_bytes()));

        if let Some(skeleton) = self.skeleton() {
            entries.push((SKELETON_PATH.to_string(), skeleton.esk.clone()));
            entries.push((CAMERA_PATH.to_string(), skeleton.cam_ean.clone()));
        }

        for (path, data) in self.files() {
            entries.push((path.to_string(), data.to_vec()));
        }

        Ok(entries)
    }

    /// Serialize the whole package into an archive held in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write the package archive to a seekable writer.
    pub fn write_to<W: Write + std::io::Seek>(&self, writer: W) -> Result<()> {
        let entries = self.archive_entries()?;
        let listing: Vec<(String, &[u8])> = entries
            .iter()
            .map(|(path, data)| (path.clone(), data.as_slice()))
            .collect();
        let manifest = manifest::render(self, &listing)?;

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(writer);

        zip.start_file(MANIFEST_PATH, options)?;
        zip.write_all(manifest.as_bytes())?;

        for (path, data) in &entries {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(data)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Write the package to `path`.
    ///
    /// Either the complete package ends up at `path` or nothing changes there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir)?;
        debug!("Writing package to {}", temp_file.path().display());

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            self.write_to(&mut writer)?;
            writer.flush()?;
        }

        temp_file.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Read;

    use super::*;
    use crate::{PackageInfo, SkeletonPair};

    fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = Vec::new();
        file.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_archive_layout() {
        let mut package = ModPackage::new(PackageInfo {
            entry_name: "XYZ".into(),
            ..PackageInfo::default()
        });
        package.set_skeleton(SkeletonPair {
            esk: vec![1, 2],
            cam_ean: vec![3],
        });
        package.add_file("UI/SEL.DDS", vec![9; 16]).unwrap();

        let bytes = package.to_bytes().unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(&bytes[..])).unwrap();
        let names: Vec<_> = archive.file_names().map(str::to_string).collect();

        for expected in [MANIFEST_PATH, BCS_PATH, SKELETON_PATH, CAMERA_PATH, "UI/SEL.DDS"] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
        assert_eq!(read_entry(&bytes, SKELETON_PATH), vec![1, 2]);
        assert_eq!(read_entry(&bytes, "UI/SEL.DDS"), vec![9; 16]);

        let manifest = String::from_utf8(read_entry(&bytes, MANIFEST_PATH)).unwrap();
        assert!(manifest.contains(r#"path="camera.ean""#));
    }

    #[test]
    fn test_save_replaces_destination_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.x2m");
        fs::write(&dest, b"old").unwrap();

        ModPackage::new(PackageInfo::default()).save(&dest).unwrap();

        let written = fs::read(&dest).unwrap();
        assert_ne!(written, b"old");

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.x2m"]);
    }

    #[test]
    fn test_save_leaves_neighbouring_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.x2m");
        let neighbour = dir.path().join("out.x2m.tmp");
        fs::write(&neighbour, b"user data").unwrap();

        ModPackage::new(PackageInfo::default()).save(&dest).unwrap();
        assert_eq!(fs::read(&neighbour).unwrap(), b"user data");

        let missing = dir.path().join("missing").join("out.x2m");
        assert!(ModPackage::default().save(&missing).is_err());
        assert_eq!(fs::read(&neighbour).unwrap(), b"user data");
    }

    #[test]
    fn test_save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.x2m");

        assert!(ModPackage::default().save(&dest).is_err());
        assert!(!dest.exists());
    }
}
