//! Spreadsheet export of the order list.
//!
//! A stateless projection: one sheet, a fixed header row, one row per
//! order, rendered from whatever order sequence the caller read at
//! that moment. The workbook is never a second source of truth.

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::models::{NOTE_PLACEHOLDER, Order};

/// Sheet name, in the display language.
pub const SHEET_NAME: &str = "Đơn Hàng Lì Xì";

/// Column headers and widths, in output order. Widths are presentation
/// hints, not semantically load-bearing.
pub const COLUMNS: [(&str, f64); 13] = [
    ("ID Đơn Hàng", 15.0),
    ("Thời Gian", 20.0),
    ("Tên Khách Hàng", 25.0),
    ("Số Điện Thoại", 15.0),
    ("Mệnh Giá", 15.0),
    ("Số Lượng Tờ", 12.0),
    ("Giá Trị Tiền Đổi", 18.0),
    ("Tỷ Lệ Phí", 12.0),
    ("Phí Dịch Vụ", 18.0),
    ("Tổng Thanh Toán", 18.0),
    ("Địa Chỉ Giao Hàng", 40.0),
    ("Ghi Chú", 30.0),
    ("Trạng Thái", 15.0),
];

/// Fee percentage cell contents (`"3%"`).
fn percentage_display(order: &Order) -> String {
    format!("{}%", order.fee_percentage)
}

/// Note cell contents; a blank note displays as the placeholder.
fn note_display(order: &Order) -> &str {
    if order.note.trim().is_empty() {
        NOTE_PLACEHOLDER
    } else {
        &order.note
    }
}

/// Renders the order list into an XLSX workbook and returns its bytes.
///
/// An empty list yields a workbook with the header row only.
///
/// # Errors
///
/// Returns an error if the workbook cannot be generated.
pub fn write_workbook(orders: &[Order]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    _ = sheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in (0_u16..).zip(COLUMNS.iter()) {
        _ = sheet.write_string(0, col, *header)?;
        _ = sheet.set_column_width(col, *width)?;
    }

    for (row, order) in (1_u32..).zip(orders.iter()) {
        _ = sheet.write_string(row, 0, order.id.as_inner())?;
        _ = sheet.write_string(row, 1, &order.created_at)?;
        _ = sheet.write_string(row, 2, &order.customer_name)?;
        _ = sheet.write_string(row, 3, &order.phone_number)?;
        _ = sheet.write_string(row, 4, &order.denomination_label)?;
        _ = sheet.write_number(row, 5, f64::from(order.quantity))?;
        _ = sheet.write_string(row, 6, &order.subtotal_formatted)?;
        _ = sheet.write_string(row, 7, percentage_display(order))?;
        _ = sheet.write_string(row, 8, &order.fee_formatted)?;
        _ = sheet.write_string(row, 9, &order.total_formatted)?;
        _ = sheet.write_string(row, 10, &order.address)?;
        _ = sheet.write_string(row, 11, note_display(order))?;
        _ = sheet.write_string(row, 12, order.status.label())?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(orders = orders.len(), bytes = bytes.len(), "rendered workbook");
    Ok(bytes)
}

/// Download file name embedding the given date
/// (`don-hang-li-xi-2026-08-07.xlsx`).
#[inline]
#[must_use]
pub fn file_name(date: NaiveDate) -> String {
    format!("don-hang-li-xi-{}.xlsx", date.format("%Y-%m-%d"))
}
