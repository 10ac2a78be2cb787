mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::CustomDbRow;

/// Write acknowledgement reported by the driver for statements that do not
/// return rows (`OkPacket` / `ResultSetHeader` on the MySQL wire).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteAck {
    /// `LAST_INSERT_ID()` for the statement; the first generated id on multi-row inserts.
    pub insert_id: u64,
    pub affected_rows: u64,
    /// Number of warnings the server recorded for the statement.
    pub warning_status: u32,
}

impl WriteAck {
    #[must_use]
    pub fn new(insert_id: u64, affected_rows: u64) -> Self {
        Self {
            insert_id,
            affected_rows,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_warnings(mut self, warning_status: u32) -> Self {
        self.warning_status = warning_status;
        self
    }
}

/// Payload handed back by the driver's completion callback.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDriverResult {
    /// Row data from a read statement.
    Rows(ResultSet),
    /// Acknowledgement of a write.
    Ack(WriteAck),
}

impl RawDriverResult {
    /// Warnings the server reported; row sets never carry a count.
    #[must_use]
    pub fn warning_count(&self) -> u32 {
        match self {
            RawDriverResult::Ack(ack) => ack.warning_status,
            RawDriverResult::Rows(_) => 0,
        }
    }

    #[must_use]
    pub fn affected_rows(&self) -> u64 {
        match self {
            RawDriverResult::Ack(ack) => ack.affected_rows,
            RawDriverResult::Rows(set) => set.rows_affected as u64,
        }
    }

    #[must_use]
    pub fn insert_id(&self) -> Option<u64> {
        match self {
            RawDriverResult::Ack(ack) => Some(ack.insert_id),
            RawDriverResult::Rows(_) => None,
        }
    }

    #[must_use]
    pub fn as_rows(&self) -> Option<&ResultSet> {
        match self {
            RawDriverResult::Rows(set) => Some(set),
            RawDriverResult::Ack(_) => None,
        }
    }

    /// Row view of the payload. An acknowledgement becomes an empty set that
    /// keeps its affected-row count.
    #[must_use]
    pub fn into_rows(self) -> ResultSet {
        match self {
            RawDriverResult::Rows(set) => set,
            RawDriverResult::Ack(ack) => {
                ResultSet::empty_with_affected(usize::try_from(ack.affected_rows).unwrap_or(usize::MAX))
            }
        }
    }
}

impl From<ResultSet> for RawDriverResult {
    fn from(set: ResultSet) -> Self {
        RawDriverResult::Rows(set)
    }
}

impl From<WriteAck> for RawDriverResult {
    fn from(ack: WriteAck) -> Self {
        RawDriverResult::Ack(ack)
    }
}
