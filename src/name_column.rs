// Name-Column Inferrer
// The person's name column is usually unlabeled and sits left of CPF

use crate::sheet::Sheet;

/// Find the name column among the columns strictly left of `cpf_col`.
///
/// Pass 1 only looks at columns whose header cell is missing; pass 2 looks
/// at every left column. In both, the first column (ascending) holding any
/// non-blank text below the header wins.
pub fn infer_name_column(sheet: &Sheet, header_row: usize, cpf_col: usize) -> Option<usize> {
    if cpf_col == 0 {
        return None;
    }

    let has_text_below = |col: usize| {
        sheet
            .rows_below(header_row)
            .any(|row| sheet.cell(row, col).has_text_content())
    };

    let unlabeled = (0..cpf_col)
        .filter(|&col| sheet.cell(header_row, col).is_missing())
        .find(|&col| has_text_below(col));

    unlabeled.or_else(|| (0..cpf_col).find(|&col| has_text_below(col)))
}
