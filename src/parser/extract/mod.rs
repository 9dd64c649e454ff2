pub mod identity;
pub mod subjects;

use tracing::debug;

use crate::parser::segment::StudentBlock;
use crate::table::StudentRecord;

/// Assemble one flat record from a student block: the eight identity columns
/// plus every subject attribute found in the block.
pub fn extract_record(block: &StudentBlock) -> StudentRecord {
    let id = identity::extract(block);
    let subject_pairs = subjects::extract(block);
    debug!(prn = %id.prn, columns = subject_pairs.len(), "extracted student block");

    let mut record = StudentRecord::default();
    record.set("PRN", id.prn);
    record.set("Seat No", id.seat_no);
    record.set("Name", id.name);
    record.set("Mother Name", id.mother_name);
    record.set("Semester", id.semester);
    record.set("SGPA", id.sgpa);
    record.set("Credits Earned/Total", id.credits_earned);
    record.set("Total Credit Points", id.total_credit_points);
    for (column, value) in subject_pairs {
        record.set(column, value);
    }
    record
}

// ── Tests ──
