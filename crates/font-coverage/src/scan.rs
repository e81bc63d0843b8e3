//! Turning a font table into scanned fonts.

use std::{collections::HashSet, path::PathBuf, result};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
    Coverage, CoverageSource, FileDescription, FileKind, FontIdentity, FontTable, ScannedFont,
};

/// A font that was left out of the run, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFont {
    pub name: String,
    pub path: PathBuf,
    pub face_index: Option<u32>,
    pub reason: String,
}

/// Result of scanning a font table.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Scanned fonts in font table order, collection faces by face index.
    pub fonts: Vec<ScannedFont>,
    pub skipped: Vec<SkippedFont>,
}

impl ScanOutcome {
    pub fn total(&self) -> usize {
        self.fonts.len() + self.skipped.len()
    }
}

/// Resolve every font table entry into one identity per face.
///
/// Plain font files keep their logical name. Each face of a collection is
/// named from its own metadata, or `"{logical} #{index}"` when it has none.
/// Logical names of plain files are claimed first; a face name that clashes
/// with any name already taken gets ` #2`, ` #3`, ...
pub fn expand_identities(
    source: &impl CoverageSource,
    table: &FontTable,
) -> (Vec<FontIdentity>, Vec<SkippedFont>) {
    let mut skipped = Vec::new();
    let mut files = Vec::new();

    for (name, path) in table.iter() {
        match source.describe(path) {
            Ok(FileDescription { kind: FileKind::Collection { faces: 0 }, .. }) => {
                warn!("Skipping font {name} ({}): collection has no faces", path.display());
                skipped.push(SkippedFont {
                    name: name.to_string(),
                    path: path.to_path_buf(),
                    face_index: None,
                    reason: "collection has no faces".to_string(),
                });
            }
            Ok(description) => files.push((name, path, description)),
            Err(e) => {
                warn!("Skipping font {name} ({}): {e}", path.display());
                skipped.push(SkippedFont {
                    name: name.to_string(),
                    path: path.to_path_buf(),
                    face_index: None,
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut used: HashSet<String> = files
        .iter()
        .filter(|(_, _, description)| description.kind == FileKind::Single)
        .map(|(name, _, _)| name.to_string())
        .collect();

    let mut identities = Vec::new();
    for (name, path, description) in files {
        if description.kind == FileKind::Single {
            identities.push(FontIdentity::new(name, path));
            continue;
        }

        info!("Found collection {} with {} faces", path.display(), description.face_names.len());
        for (index, face_name) in (0u32..).zip(description.face_names) {
            let face_name = match face_name {
                Ok(Some(face_name)) => face_name,
                Ok(None) => format!("{name} #{index}"),
                Err(e) => {
                    debug!("No name for face {index} of {}: {e}", path.display());
                    format!("{name} #{index}")
                }
            };
            let unique = unique_name(&mut used, &face_name);
            identities.push(FontIdentity::with_face(unique, path, index));
        }
    }

    (identities, skipped)
}

fn unique_name(used: &mut HashSet<String>, name: &str) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }
    let unique = (2..)
        .map(|n| format!("{name} #{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| name.to_string());
    warn!("Duplicate font name {name:?}, using {unique:?}");
    used.insert(unique.clone());
    unique
}

/// Compute coverage for every font in the table.
///
/// Files are scanned in parallel, each read once for all of its faces. A
/// font or face that cannot be read or parsed is skipped with a warning and
/// does not abort the scan.
pub fn scan_fonts(source: &impl CoverageSource, table: &FontTable) -> ScanOutcome {
    let (identities, mut skipped) = expand_identities(source, table);

    let results: Vec<(FontIdentity, result::Result<Coverage, String>)> = identities
        .chunk_by(|a, b| a.path == b.path)
        .collect::<Vec<_>>()
        .into_par_iter()
        .flat_map_iter(|faces| {
            let coverages: Vec<result::Result<Coverage, String>> =
                match source.file_coverage(faces) {
                    Ok(coverages) => {
                        coverages.into_iter().map(|r| r.map_err(|e| e.to_string())).collect()
                    }
                    Err(e) => faces.iter().map(|_| Err(e.to_string())).collect(),
                };
            faces.iter().cloned().zip(coverages)
        })
        .collect();

    let mut fonts = Vec::with_capacity(results.len());
    for (identity, result) in results {
        match result {
            Ok(coverage) => {
                debug!(
                    "{identity}: {} characters in {} blocks",
                    coverage.len(),
                    coverage.block_sizes().len()
                );
                fonts.push(ScannedFont::new(identity, coverage));
            }
            Err(reason) => {
                warn!("Skipping font {identity}: {reason}");
                skipped.push(SkippedFont {
                    name: identity.name,
                    path: identity.path,
                    face_index: identity.face_index,
                    reason,
                });
            }
        }
    }

    info!("Scanned {} fonts, skipped {}", fonts.len(), skipped.len());
    ScanOutcome { fonts, skipped }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, fs::write, path::Path};

    use super::*;
    use crate::{
        Coverage, Error, FontFileSource, Result,
        test_support::{build_collection, build_font, build_font_without_cmap},
    };

    /// In-memory source: path -> faces, each face a name and its characters.
    #[derive(Default)]
    struct MemorySource {
        files: HashMap<PathBuf, (FileKind, Vec<(Option<String>, Vec<char>)>)>,
    }

    impl MemorySource {
        fn single(mut self, path: &str, chars: &[char]) -> Self {
            self.files.insert(path.into(), (FileKind::Single, vec![(None, chars.to_vec())]));
            self
        }

        fn collection(mut self, path: &str, faces: &[(Option<&str>, &[char])]) -> Self {
            let faces: Vec<_> =
                faces.iter().map(|(n, c)| (n.map(str::to_string), c.to_vec())).collect();
            let kind = FileKind::Collection { faces: faces.len() as u32 };
            self.files.insert(path.into(), (kind, faces));
            self
        }

        fn lookup(&self, path: &Path) -> Result<&(FileKind, Vec<(Option<String>, Vec<char>)>)> {
            self.files.get(path).ok_or_else(|| Error::Io {
                path: path.to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            })
        }
    }

    impl CoverageSource for MemorySource {
        fn file_kind(&self, path: &Path) -> Result<FileKind> {
            Ok(self.lookup(path)?.0)
        }

        fn face_name(&self, path: &Path, face_index: u32) -> Result<Option<String>> {
            Ok(self.lookup(path)?.1[face_index as usize].0.clone())
        }

        fn coverage(&self, identity: &FontIdentity) -> Result<Coverage> {
            let (_, faces) = self.lookup(&identity.path)?;
            Ok(faces[identity.index() as usize].1.iter().copied().collect())
        }
    }

    #[test]
    fn test_two_face_collection_yields_two_fonts() {
        let source = MemorySource::default()
            .collection("han.ttc", &[(Some("Han JP"), &['あ']), (Some("Han KR"), &['가'])]);
        let table: FontTable = [("Han", "han.ttc")].into_iter().collect();

        let outcome = scan_fonts(&source, &table);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.fonts.len(), 2);
        assert_eq!(outcome.fonts[0].identity, FontIdentity::with_face("Han JP", "han.ttc", 0));
        assert_eq!(outcome.fonts[1].identity, FontIdentity::with_face("Han KR", "han.ttc", 1));
        assert!(outcome.fonts[0].coverage.contains('あ'));
        assert!(outcome.fonts[1].coverage.contains('가'));
    }

    #[test]
    fn test_unnamed_faces_use_logical_name() {
        let source = MemorySource::default().collection("c.ttc", &[(None, &['a']), (None, &['b'])]);
        let table: FontTable = [("Coll", "c.ttc")].into_iter().collect();
        let (identities, _) = expand_identities(&source, &table);
        let names: Vec<&str> = identities.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Coll #0", "Coll #1"]);
    }

    #[test]
    fn test_duplicate_names_made_unique() {
        let source = MemorySource::default()
            .single("a.ttf", &['a'])
            .collection("c.ttc", &[(Some("A"), &['b']), (Some("A"), &['c'])]);
        let table: FontTable = [("A", "a.ttf"), ("C", "c.ttc")].into_iter().collect();
        let (identities, _) = expand_identities(&source, &table);
        let names: Vec<&str> = identities.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "A #2", "A #3"]);
    }

    #[test]
    fn test_plain_file_keeps_name_over_earlier_face() {
        let source = MemorySource::default()
            .collection("a.ttc", &[(Some("Zed"), &['x']), (Some("Other"), &['z'])])
            .single("zed.ttf", &['y']);
        let table: FontTable = [("A", "a.ttc"), ("Zed", "zed.ttf")].into_iter().collect();

        let (identities, _) = expand_identities(&source, &table);
        assert_eq!(identities[0], FontIdentity::with_face("Zed #2", "a.ttc", 0));
        assert_eq!(identities[1], FontIdentity::with_face("Other", "a.ttc", 1));
        assert_eq!(identities[2], FontIdentity::new("Zed", "zed.ttf"));
    }

    #[test]
    fn test_unreadable_font_is_skipped() {
        let source = MemorySource::default().single("ok.ttf", &['a']);
        let table: FontTable = [("Missing", "missing.ttf"), ("Ok", "ok.ttf")].into_iter().collect();

        let outcome = scan_fonts(&source, &table);
        assert_eq!(outcome.fonts.len(), 1);
        assert_eq!(outcome.fonts[0].name(), "Ok");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].name, "Missing");
        assert_eq!(outcome.total(), 2);
    }

    #[test]
    fn test_scan_files_on_disk() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let sans = dir.path().join("sans.ttf");
        let han = dir.path().join("han.ttc");
        let broken = dir.path().join("broken.ttf");
        write(&sans, build_font("Test Sans", &['A', 'B'])).unwrap();
        write(&han, build_collection(&[build_font("Han JP", &['あ']), build_font("Han KR", &['가'])]))
            .unwrap();
        write(&broken, b"garbage").unwrap();

        let table: FontTable =
            [("Sans", &sans), ("Han", &han), ("Broken", &broken)].into_iter().collect();
        let outcome = scan_fonts(&FontFileSource::new(), &table);

        let names: Vec<&str> = outcome.fonts.iter().map(ScannedFont::name).collect();
        assert_eq!(names, vec!["Sans", "Han JP", "Han KR"]);
        assert_eq!(outcome.fonts[1].identity.face_index, Some(0));
        assert_eq!(outcome.fonts[2].identity.face_index, Some(1));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].path, broken);
    }

    #[test]
    fn test_face_without_cmap_skipped_alone() {
        let dir = tempfile::tempdir().unwrap();
        let han = dir.path().join("han.ttc");
        write(
            &han,
            build_collection(&[
                build_font("Han JP", &['あ']),
                build_font_without_cmap("Han Names"),
                build_font("Han KR", &['가']),
            ]),
        )
        .unwrap();

        let table: FontTable = [("Han", &han)].into_iter().collect();
        let outcome = scan_fonts(&FontFileSource::new(), &table);

        let names: Vec<&str> = outcome.fonts.iter().map(ScannedFont::name).collect();
        assert_eq!(names, vec!["Han JP", "Han KR"]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].name, "Han Names");
        assert_eq!(outcome.skipped[0].face_index, Some(1));
        assert_eq!(outcome.skipped[0].reason, Error::NoCharmap.to_string());
    }
}
