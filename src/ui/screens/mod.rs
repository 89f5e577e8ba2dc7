pub(crate) mod charts;
pub(crate) mod entry;
pub(crate) mod export;
pub(crate) mod history;
