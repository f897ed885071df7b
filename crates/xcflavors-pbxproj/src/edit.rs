//! Text splicing against the original source.

/// Text to insert at a byte offset of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    /// Orders insertions that share an offset; empty for plain inserts
    pub key: String,
    pub text: String,
}

/// An insertion landed outside the source or inside a UTF-8 sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("insertion offset {offset} is not a valid position in a {len}-byte source")]
pub struct PatchError {
    pub offset: usize,
    pub len: usize,
}

/// An ordered set of insertions.
///
/// Insertions at the same offset are applied by ascending key, then in the
/// order they were added.
#[derive(Debug, Clone, Default)]
pub struct TextPatch {
    insertions: Vec<Insertion>,
}

impl TextPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.insert_sorted(offset, String::new(), text);
    }

    /// Insert `text` at `offset`, ordered by `key` among insertions at the
    /// same offset.
    pub fn insert_sorted(&mut self, offset: usize, key: impl Into<String>, text: impl Into<String>) {
        self.insertions.push(Insertion {
            offset,
            key: key.into(),
            text: text.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
    }

    /// Produce `src` with every insertion applied.
    pub fn apply(&self, src: &str) -> Result<String, PatchError> {
        let mut ordered: Vec<&Insertion> = self.insertions.iter().collect();
        // stable: equal offset and key keep insertion order
        ordered.sort_by(|a, b| a.offset.cmp(&b.offset).then_with(|| a.key.cmp(&b.key)));

        let extra: usize = ordered.iter().map(|i| i.text.len()).sum();
        let mut out = String::with_capacity(src.len() + extra);
        let mut cursor = 0;
        for insertion in ordered {
            if insertion.offset > src.len() || !src.is_char_boundary(insertion.offset) {
                return Err(PatchError {
                    offset: insertion.offset,
                    len: src.len(),
                });
            }
            out.push_str(&src[cursor..insertion.offset]);
            out.push_str(&insertion.text);
            cursor = insertion.offset;
        }
        out.push_str(&src[cursor..]);
        Ok(out)
    }
}

/// Byte offset of the first character of the line containing `offset`.
pub fn line_start(src: &str, offset: usize) -> usize {
    src[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indent(src: &str, offset: usize) -> &str {
    let start = line_start(src, offset);
    let rest = &src[start..];
    let width = rest
        .find(|c: char| c != '\t' && c != ' ')
        .unwrap_or(rest.len());
    &rest[..width]
}
