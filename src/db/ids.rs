//! Row id policy for the `transactions` table.
//!
//! New rows take the lowest free id below the current maximum, falling back
//! to `max + 1`. After a delete the survivors are renumbered `1..N` in their
//! existing order. Both functions expect to run inside the caller's SQL
//! transaction.

use rusqlite::{params, Connection};

/// Id for the next inserted row.
pub(super) fn next_id(conn: &Connection) -> rusqlite::Result<i64> {
    if let Some(gap) = first_gap(conn)? {
        return Ok(gap);
    }
    let max: Option<i64> = conn.query_row("SELECT MAX(id) FROM transactions", [], |row| {
        row.get(0)
    })?;
    Ok(max.map_or(1, |m| m + 1))
}

/// Smallest id missing from `1..max`, if any.
pub(super) fn first_gap(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT MIN(candidate) FROM (
             SELECT 1 AS candidate
             WHERE NOT EXISTS (SELECT 1 FROM transactions WHERE id = 1)
             UNION ALL
             SELECT t.id + 1 FROM transactions t
             WHERE NOT EXISTS (SELECT 1 FROM transactions u WHERE u.id = t.id + 1)
         )
         WHERE candidate < (SELECT MAX(id) FROM transactions)",
        [],
        |row| row.get(0),
    )
}

/// Reassign ids so the table holds exactly `1..N`, ordered by current id.
/// Returns how many rows changed id.
///
/// Walking in ascending order never collides: the rank of a row is at most
/// its current id, and every smaller rank is already taken by an earlier row.
pub(super) fn renumber(conn: &Connection) -> rusqlite::Result<usize> {
    let ids: Vec<i64> = {
        let mut stmt = conn.prepare("SELECT id FROM transactions ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut changed = 0;
    for (rank, old_id) in ids.into_iter().enumerate() {
        let new_id = rank as i64 + 1;
        if new_id != old_id {
            conn.execute(
                "UPDATE transactions SET id = ?1 WHERE id = ?2",
                params![new_id, old_id],
            )?;
            changed += 1;
        }
    }
    Ok(changed)
}
