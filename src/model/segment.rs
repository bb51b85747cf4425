// File: src/model/segment.rs
// Rebuilds the page header and the logical table cells from the raw
// positioned fragments, using nothing but their geometry and the cell
// marker glyph.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Layout;

/// Marker glyph that closes every table cell on the source page.
pub const CELL_SENTINEL: &str = "]";

/// One positioned text run, as delivered by the extraction step.
///
/// Fragments must arrive in raster reading order (top-to-bottom rows,
/// left-to-right within a row); segmentation relies on that ordering
/// and performs no sorting of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Page header record. Currently only the group name is encoded there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub group: String,
}

/// One reconstructed table cell.
///
/// `data` carries the fragments' text joined in reading order, with a
/// single space at every row break. The bounding box comes from the
/// first fragment (`left`/`top`), the closing sentinel (`bottom`) and
/// the rightmost fragment seen anywhere in the cell (`right`). Cell
/// content can extend rightward mid-row, so the last fragment's x is
/// not good enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub data: String,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("malformed document: {0}")]
    MalformedDocument(&'static str),
}

/// Splits a page's fragment sequence into a header and table cells.
pub struct Segmenter {
    layout: Layout,
}

impl Segmenter {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Decodes the header and every cell of the page in one pass.
    pub fn decode(&self, fragments: &[Fragment]) -> Result<(Meta, Vec<Unit>), SegmentError> {
        let (meta, consumed) = self.decode_meta(fragments)?;
        let units = self.decode_units(&fragments[consumed..]);
        Ok((meta, units))
    }

    /// Decodes the page header from the leading fragments.
    ///
    /// The header is the first contiguous run of fragments sharing one
    /// `y`; its texts concatenate (no separator) into the group name.
    /// Fragments after the run that sit left of the page's content
    /// margin or below its bottom margin are page furniture and are
    /// skipped. Returns the metadata and the total number of fragments
    /// consumed.
    pub fn decode_meta(&self, fragments: &[Fragment]) -> Result<(Meta, usize), SegmentError> {
        if fragments.len() < 2 {
            return Err(SegmentError::MalformedDocument(
                "page has fewer than two fragments",
            ));
        }

        let mut i = 1;
        while i < fragments.len() && fragments[i].y == fragments[i - 1].y {
            i += 1;
        }
        if i == fragments.len() {
            return Err(SegmentError::MalformedDocument(
                "header run spans the entire page",
            ));
        }

        let group: String = fragments[..i].iter().map(|f| f.text.as_str()).collect();

        while i < fragments.len()
            && (fragments[i].x < self.layout.left_margin
                || fragments[i].y > self.layout.bottom_margin)
        {
            i += 1;
        }

        Ok((Meta { group }, i))
    }

    /// Splits the remaining fragments into sentinel-terminated cells,
    /// consuming all of them.
    pub fn decode_units(&self, mut fragments: &[Fragment]) -> Vec<Unit> {
        let mut units = Vec::new();
        while !fragments.is_empty() {
            let (unit, consumed) = decode_unit(fragments);
            units.push(unit);
            fragments = &fragments[consumed..];
        }
        units
    }
}

/// Scans one cell: everything up to and including the sentinel glyph.
/// A cell consisting of a bare sentinel is legal and yields an
/// empty-interior box. Returns the cell and the fragment count consumed.
fn decode_unit(fragments: &[Fragment]) -> (Unit, usize) {
    let first = &fragments[0];
    let mut data = String::with_capacity(first.text.len());
    data.push_str(&first.text);

    let mut right = first.x;
    let mut i = 1;
    while i < fragments.len() && fragments[i - 1].text != CELL_SENTINEL {
        let frag = &fragments[i];
        if frag.x > right {
            right = frag.x;
        }
        if frag.y != fragments[i - 1].y {
            data.push(' ');
        }
        data.push_str(&frag.text);
        i += 1;
    }

    let unit = Unit {
        data,
        left: first.x,
        top: first.y,
        right,
        bottom: fragments[i - 1].y,
    };
    (unit, i)
}
