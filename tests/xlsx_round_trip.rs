// Real files: write source workbooks, run the batch, read the XLSX output back
#![cfg(feature = "xlsx")]

use pix_extract::{
    enumerate_workbooks, run_batch, CalamineReader, FieldValue, RecordSink, WorkbookReader,
    XlsxSink, FIELD_NAMES,
};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;

fn write_source(path: &Path) {
    let mut workbook = Workbook::new();

    let cover = workbook.add_worksheet();
    cover.set_name("Capa").unwrap();
    cover.write_string(0, 0, "Pagamentos do mês").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Bolsistas").unwrap();
    sheet.write_string(1, 1, "Relação de pagamento").unwrap();
    for (col, label) in ["CPF", "BANCO", "NOME BANCO", "AGENCIA", "CONTA", "CHAVE PIX", "PIX"]
        .iter()
        .enumerate()
    {
        sheet.write_string(3, 2 + col as u16, *label).unwrap();
    }
    // Name column (B) has no header label
    sheet.write_string(4, 1, "Maria Silva").unwrap();
    sheet.write_string(4, 2, "11122233344").unwrap();
    sheet.write_number(4, 3, 1).unwrap();
    sheet.write_string(4, 4, "Banco do Brasil").unwrap();
    sheet.write_string(4, 5, "0001").unwrap();
    sheet.write_number(4, 6, 12345).unwrap();
    sheet.write_string(4, 7, "CPF").unwrap();
    sheet.write_number(4, 8, 11122233344.0).unwrap();

    sheet.write_string(5, 1, "TOTAL").unwrap();
    sheet.write_number(5, 6, 12345).unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_batch_over_real_workbooks() {
    let dir = tempfile::tempdir().unwrap();
    write_source(&dir.path().join("a_folha.xlsx"));
    fs::write(dir.path().join("b_corrompido.xlsx"), b"garbage").unwrap();

    let output = dir.path().join("pix_output.xlsx");
    fs::write(&output, b"stale output from a previous run").unwrap();

    let extensions = vec!["xlsx".to_string()];
    let workbooks = enumerate_workbooks(dir.path(), &extensions, &[output.clone()]).unwrap();
    assert_eq!(workbooks.len(), 2, "previous output must not be re-read");

    let outcome = run_batch(&workbooks, &CalamineReader::new());
    assert_eq!(outcome.report.unreadable().len(), 1);
    assert_eq!(outcome.records.len(), 1);

    let record = &outcome.records[0];
    assert_eq!(record.nome, "Maria Silva");
    assert_eq!(record.cod_banco, FieldValue::Integer(1));
    assert_eq!(record.banco, "Banco do Brasil");
    assert_eq!(record.agencia, "0001");
    assert_eq!(record.conta, "12345");
    assert_eq!(record.chave_pix, FieldValue::Integer(11122233344));

    let sheets = &outcome.report.workbooks[0].sheets;
    assert_eq!(sheets[0].name, "Capa");
    assert!(sheets[0].skipped.is_some());
    assert_eq!(sheets[1].header_row, Some(3));

    XlsxSink::new(&output).write(&outcome.records).unwrap();

    let written = CalamineReader::new().read(&output).unwrap();
    assert_eq!(written.len(), 1);
    let (_, table) = &written[0];
    for (col, name) in FIELD_NAMES.iter().enumerate() {
        assert_eq!(table.cell(0, col).as_text(), Some(*name));
    }
    assert_eq!(table.cell(1, 0).as_text(), Some("Maria Silva"));
    assert_eq!(pix_extract::normalize(table.cell(1, 2)), "1");
    assert_eq!(pix_extract::normalize(table.cell(1, 7)), "11122233344");
    assert_eq!(table.row_count(), 2);
}
