use crate::error::ReportError;
use crate::report::ops::SheetOp;
use crate::sheets::client::SheetsApi;

// ============================================================================
// Submission phase — sequential, fail-fast
// ============================================================================

/// Submit the ordered operation list against the writer collaborator.
///
/// Operations run sequentially and the first failure aborts the run: after a
/// structural-write failure no cosmetic write is issued, since merges and
/// formats are meaningless without a valid body. There is no rollback — a
/// mid-sequence failure leaves the tab partially updated and the error names
/// the failed fragment for the operator.
pub fn submit_ops(
    client: &mut dyn SheetsApi,
    ops: &[SheetOp],
    verbose: u8,
) -> Result<(), ReportError> {
    for op in ops {
        match op {
            SheetOp::WriteRows { tab_title, rows } => {
                if verbose > 0 {
                    eprintln!("  writing {} rows to '{}'", rows.len(), tab_title);
                }
                client.write_rows(tab_title, rows)?;
            }
            SheetOp::Batch { label, requests } => {
                if verbose > 0 {
                    eprintln!("  submitting {} ({} requests)", label, requests.len());
                }
                client.batch_update(requests)?;
            }
        }
    }
    Ok(())
}
