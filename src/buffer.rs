//! Growing byte buffers backing the header and per-column outputs.
//!
//! Layout (the stable wire contract with downstream typed converters, per
//! the crate's external interface): a concatenation of field records, each
//! either `<payload> 0x00` or the two-byte empty marker `0x01 0x00`. The
//! unused tail of a buffer is always zero-filled, which is what lets
//! [`crate::iter::FieldIterator::finished`] treat "cursor at capacity" and
//! "next byte is zero" as equivalent end-of-data signals.
//!
//! Growth doubles capacity and zero-fills the new half, following the same
//! discipline as `TextColumn::resize_max_str` in `odbc-api` (see DESIGN.md):
//! preserve the logical fill offset across reallocation, log the resize.

const INITIAL_CAPACITY: usize = 50;

/// A growing, zero-filled byte buffer with an append cursor. Used for both
/// the header buffer and each per-column output buffer — the two share an
/// identical layout (spec §3, "Header buffer").
#[derive(Debug)]
pub struct ColumnBuffer {
    data: Vec<u8>,
    cursor: usize,
}

impl ColumnBuffer {
    /// Allocates a zero-filled buffer of the default initial capacity.
    pub fn new() -> Self {
        ColumnBuffer {
            data: vec![0u8; INITIAL_CAPACITY],
            cursor: 0,
        }
    }

    /// Logical end of written data. Always has room for at least one more
    /// byte of capacity (the append-cursor invariant from spec §3).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The full backing slice, including the zero-filled unused tail.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// True when nothing has been written for the field currently being
    /// accumulated: either the buffer is empty, or the byte immediately
    /// preceding the cursor is the previous field's 0x00 terminator.
    pub fn at_field_start(&self) -> bool {
        self.cursor == 0 || self.data[self.cursor - 1] == 0x00
    }

    fn reserve(&mut self, additional: usize) {
        while self.cursor + additional > self.data.len() {
            let old_cap = self.data.len();
            let new_cap = old_cap * 2;
            self.data.resize(new_cap, 0);
            log::trace!("grew column buffer {} -> {} bytes", old_cap, new_cap);
        }
    }

    pub fn push_byte(&mut self, byte: u8) {
        self.reserve(1);
        self.data[self.cursor] = byte;
        self.cursor += 1;
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.data[self.cursor..self.cursor + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
    }

    /// Walks the cursor back over trailing space/tab bytes, overwriting them
    /// with 0x00. Stops at the start of the current field: every byte before
    /// that is either non-whitespace content or a previous field's 0x00
    /// terminator, neither of which this ever needs to cross.
    pub fn trim_trailing_whitespace(&mut self) {
        while self.cursor > 0 {
            let b = self.data[self.cursor - 1];
            if b == b' ' || b == b'\t' {
                self.cursor -= 1;
                self.data[self.cursor] = 0;
            } else {
                break;
            }
        }
    }

    /// Closes out the field currently being accumulated: emits the 0x01
    /// empty marker if nothing was written for it, then the 0x00 terminator.
    pub fn terminate_field(&mut self) {
        if self.at_field_start() {
            self.push_byte(0x01);
        }
        self.push_byte(0x00);
    }

    /// Drops whatever has been written since `cursor`, re-zeroing it. Used
    /// to discard a partially-accumulated field when a comment character is
    /// found mid-field, so no unterminated bytes are left for the next
    /// field to be appended against.
    pub fn truncate_to(&mut self, cursor: usize) {
        for b in &mut self.data[cursor..self.cursor] {
            *b = 0;
        }
        self.cursor = cursor;
    }
}

impl Default for ColumnBuffer {
    fn default() -> Self {
        Self::new()
    }
}
