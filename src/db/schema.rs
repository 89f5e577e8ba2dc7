pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id       INTEGER PRIMARY KEY,
    date     TEXT,
    type     TEXT,
    category TEXT,
    amount   REAL
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);
"#;
