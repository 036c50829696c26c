use std::path::Path;

use rust_xlsxwriter::{ColNum, Format, FormatAlign, RowNum, Workbook, Worksheet, XlsxError};

use crate::error::Result;
use crate::export::ensure_parent_dir;
use crate::export::rows::{container_cells, controller_cells, Cell, CONTROLLER_COLUMNS, HEADERS};
use crate::items::ControllerItem;

pub const DEFAULT_SHEET: &str = "resources";

/// Write a single-sheet workbook. Controller columns are merged vertically
/// across that controller's container rows; a controller without containers
/// still takes one row. The file is written in place, not atomically.
pub fn write(items: &[ControllerItem], path: &Path, sheet: &str) -> Result<()> {
    ensure_parent_dir(path)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;
    fill_sheet(worksheet, items)?;

    workbook.save(path)?;
    Ok(())
}

fn fill_sheet(worksheet: &mut Worksheet, items: &[ControllerItem]) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let merged = Format::new().set_align(FormatAlign::VerticalCenter);
    let plain = Format::new();

    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, column(col), *title, &bold)?;
    }

    let mut row: RowNum = 1;
    for item in items {
        let span = RowNum::try_from(item.row_span().max(1)).unwrap_or(RowNum::MAX);
        let last = row.saturating_add(span - 1);

        for (col, cell) in controller_cells(item).iter().enumerate() {
            let col = column(col);
            // a one-row range is not a valid merge
            if last > row {
                worksheet.merge_range(row, col, last, col, "", &merged)?;
            }
            write_cell(worksheet, row, col, cell, &merged)?;
        }

        for (container_row, cells) in (row..).zip(container_cells(item)) {
            for (offset, cell) in cells.iter().enumerate() {
                let col = column(CONTROLLER_COLUMNS + offset);
                write_cell(worksheet, container_row, col, cell, &plain)?;
            }
        }

        row = last.saturating_add(1);
    }

    worksheet.autofit();
    Ok(())
}

fn column(index: usize) -> ColNum {
    ColNum::try_from(index).unwrap_or(ColNum::MAX)
}

#[allow(clippy::cast_precision_loss)] // report values stay far below 2^53
fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &Cell,
    format: &Format,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(s) => worksheet.write_string_with_format(row, col, s, format)?,
        Cell::Int(n) => worksheet.write_number_with_format(row, col, *n as f64, format)?,
        Cell::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, format)?,
    };
    Ok(())
}
