// Header Locator
// First row with a text cell mentioning the tax-ID marker is the header

use crate::sheet::Sheet;

/// Marker looked for (case-insensitive substring) to recognise the header row
pub const HEADER_MARKER: &str = "CPF";

/// Find the header row index.
///
/// Scans top to bottom, left to right; only text cells count. Returns the
/// first qualifying row, or `None` when the sheet has no header at all.
pub fn locate_header(sheet: &Sheet) -> Option<usize> {
    sheet
        .rows()
        .find(|(_, cells)| {
            cells.iter().any(|cell| {
                cell.as_text()
                    .is_some_and(|text| text.to_uppercase().contains(HEADER_MARKER))
            })
        })
        .map(|(idx, _)| idx)
}
