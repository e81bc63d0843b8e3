//! Synthetic fonts for tests: a cmap and a name table, nothing else.

use write_fonts::{
    FontBuilder,
    tables::{
        cmap::{Cmap, Cmap12, CmapSubtable, EncodingRecord, PlatformId, SequentialMapGroup},
        name::{Name, NameRecord},
    },
    types::NameId,
};

const TTC_HEADER_LEN: usize = 12;
const TABLE_DIRECTORY_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;

/// Build a font whose full name is `full_name` and which maps each of
/// `chars` to its own glyph.
pub fn build_font(full_name: &str, chars: &[char]) -> Vec<u8> {
    let mut codepoints: Vec<u32> = chars.iter().map(|c| *c as u32).collect();
    codepoints.sort_unstable();
    codepoints.dedup();

    let groups = codepoints
        .iter()
        .enumerate()
        .map(|(i, cp)| SequentialMapGroup::new(*cp, *cp, i as u32 + 1))
        .collect();
    let cmap12 = Cmap12 { language: 0, groups };
    let cmap = Cmap::new(vec![
        EncodingRecord::new(PlatformId::Unicode, 4, CmapSubtable::Format12(cmap12.clone())),
        EncodingRecord::new(PlatformId::Windows, 10, CmapSubtable::Format12(cmap12)),
    ]);

    let mut builder = FontBuilder::new();
    builder.add_table(&cmap).expect("cmap table");
    builder.add_table(&name_table(full_name)).expect("name table");
    builder.build()
}

/// Build a font with a name table but no cmap.
pub fn build_font_without_cmap(full_name: &str) -> Vec<u8> {
    let mut builder = FontBuilder::new();
    builder.add_table(&name_table(full_name)).expect("name table");
    builder.build()
}

fn name_table(full_name: &str) -> Name {
    Name::new(vec![NameRecord::new(
        3,
        1,
        0x409,
        NameId::FULL_NAME,
        full_name.to_string().into(),
    )])
}

/// Pack standalone fonts into a single collection file.
pub fn build_collection(fonts: &[Vec<u8>]) -> Vec<u8> {
    let mut offsets = Vec::with_capacity(fonts.len());
    let mut pos = TTC_HEADER_LEN + 4 * fonts.len();
    for font in fonts {
        offsets.push(pos);
        pos = (pos + font.len() + 3) & !3;
    }

    let mut out = Vec::with_capacity(pos);
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&(fonts.len() as u32).to_be_bytes());
    for offset in &offsets {
        out.extend_from_slice(&(*offset as u32).to_be_bytes());
    }

    // Table offsets in a collection are relative to the start of the file.
    for (font, base) in fonts.iter().zip(&offsets) {
        out.resize(*base, 0);
        let mut data = font.clone();
        let num_tables = u16::from_be_bytes([data[4], data[5]]) as usize;
        for i in 0..num_tables {
            let at = TABLE_DIRECTORY_LEN + TABLE_RECORD_LEN * i + 8;
            let offset = u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
            data[at..at + 4].copy_from_slice(&(offset + *base as u32).to_be_bytes());
        }
        out.extend_from_slice(&data);
    }
    out
}
