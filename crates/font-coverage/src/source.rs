//! Coverage sources: where face counts, face names and glyph coverage come from.

use std::{fs::read, path::Path};

use rayon::prelude::*;
use read_fonts::{FileRef, FontRef};
use skrifa::{MetadataProvider, string::StringId};

use crate::{Coverage, Error, FontIdentity, Result};

/// What kind of font file a path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A plain font file with a single face.
    Single,
    /// A collection bundling several independently addressable faces.
    Collection { faces: u32 },
}

impl FileKind {
    pub fn face_count(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Collection { faces } => faces,
        }
    }
}

/// A font file's kind plus the metadata name of each collection face.
#[derive(Debug)]
pub struct FileDescription {
    pub kind: FileKind,
    /// One entry per face of a collection, empty for a plain font file.
    pub face_names: Vec<Result<Option<String>>>,
}

/// Provider of font metadata and glyph coverage.
///
/// Implementations must be safe to call from several threads at once; the
/// scanner queries one identity per worker.
pub trait CoverageSource: Sync {
    /// Whether `path` is a single font or a collection, and how many faces it has.
    fn file_kind(&self, path: &Path) -> Result<FileKind>;

    /// Name recorded in the face's own metadata, if any.
    fn face_name(&self, path: &Path, face_index: u32) -> Result<Option<String>>;

    /// Printable characters the identified face maps to a real glyph.
    fn coverage(&self, identity: &FontIdentity) -> Result<Coverage>;

    /// Kind and face names of the file at `path`.
    fn describe(&self, path: &Path) -> Result<FileDescription> {
        let kind = self.file_kind(path)?;
        let face_names = match kind {
            FileKind::Single => Vec::new(),
            FileKind::Collection { faces } => {
                (0..faces).map(|index| self.face_name(path, index)).collect()
            }
        };
        Ok(FileDescription { kind, face_names })
    }

    /// Coverage of faces that all live in the same file, in input order.
    ///
    /// The outer error means the file itself could not be loaded.
    fn file_coverage(&self, faces: &[FontIdentity]) -> Result<Vec<Result<Coverage>>> {
        Ok(faces.par_iter().map(|identity| self.coverage(identity)).collect())
    }
}

/// Coverage source backed by font files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontFileSource;

impl FontFileSource {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<Vec<u8>> {
        read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
    }
}

impl CoverageSource for FontFileSource {
    fn file_kind(&self, path: &Path) -> Result<FileKind> {
        let data = Self::read(path)?;
        file_kind(&data)
    }

    fn face_name(&self, path: &Path, face_index: u32) -> Result<Option<String>> {
        let data = Self::read(path)?;
        face_name(&data, face_index)
    }

    fn coverage(&self, identity: &FontIdentity) -> Result<Coverage> {
        let data = Self::read(&identity.path)?;
        face_coverage(&data, identity.index())
    }

    fn describe(&self, path: &Path) -> Result<FileDescription> {
        let data = Self::read(path)?;
        let kind = file_kind(&data)?;
        let face_names = match kind {
            FileKind::Single => Vec::new(),
            FileKind::Collection { faces } => {
                (0..faces).map(|index| face_name(&data, index)).collect()
            }
        };
        Ok(FileDescription { kind, face_names })
    }

    fn file_coverage(&self, faces: &[FontIdentity]) -> Result<Vec<Result<Coverage>>> {
        let Some(first) = faces.first() else {
            return Ok(Vec::new());
        };
        let data = Self::read(&first.path)?;
        Ok(faces.par_iter().map(|identity| face_coverage(&data, identity.index())).collect())
    }
}

/// Inspect raw font data.
pub fn file_kind(data: &[u8]) -> Result<FileKind> {
    match FileRef::new(data)? {
        FileRef::Font(_) => Ok(FileKind::Single),
        FileRef::Collection(collection) => Ok(FileKind::Collection { faces: collection.len() }),
    }
}

fn open_face(data: &[u8], face_index: u32) -> Result<FontRef<'_>> {
    let count = file_kind(data)?.face_count();
    if face_index >= count {
        return Err(Error::FaceOutOfRange { index: face_index, count });
    }
    Ok(FontRef::from_index(data, face_index)?)
}

/// Full name of a face, falling back to its PostScript name.
pub fn face_name(data: &[u8], face_index: u32) -> Result<Option<String>> {
    let font = open_face(data, face_index)?;
    let name = [StringId::FULL_NAME, StringId::POSTSCRIPT_NAME].into_iter().find_map(|id| {
        font.localized_strings(id)
            .english_or_first()
            .map(|s| s.chars().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    });
    Ok(name)
}

/// Coverage of one face of raw font data.
pub fn face_coverage(data: &[u8], face_index: u32) -> Result<Coverage> {
    let font = open_face(data, face_index)?;
    let charmap = font.charmap();
    if !charmap.has_map() {
        return Err(Error::NoCharmap);
    }

    Ok(charmap
        .mappings()
        .filter(|(_, glyph_id)| glyph_id.to_u32() != 0)
        .filter_map(|(codepoint, _)| char::from_u32(codepoint))
        .collect())
}
