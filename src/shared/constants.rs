/// Number of digits in a CPF
pub const CPF_DIGITS: usize = 11;

/// Informational message returned when a counter calls and nobody is waiting
pub const EMPTY_QUEUE_MESSAGE: &str = "No citizens waiting";

/// Row id of the single persisted reception snapshot
pub const RECEPTION_SNAPSHOT_ID: i16 = 1;
