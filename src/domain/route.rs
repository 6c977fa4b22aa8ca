/// A single transit route record.
///
/// A route is an immutable value: once constructed it is never modified.
/// The catalog operations build new sequences instead of mutating records
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Name of the origin point.
    start: String,
    /// Name of the destination point. Empty when none was supplied.
    finish: String,
    /// Identifying number. Not required to be unique across records.
    number: i64,
}

impl Route {
    /// Construct a new [`Route`] from its field values.
    ///
    /// No validation is performed beyond the `i64` type of `number`.
    #[must_use]
    pub const fn new(start: String, finish: String, number: i64) -> Self {
        Self {
            start,
            finish,
            number,
        }
    }

    /// The route's origin point name.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The route's destination point name.
    ///
    /// Empty when no finish point was supplied.
    #[must_use]
    pub fn finish(&self) -> &str {
        &self.finish
    }

    /// The route's identifying number.
    #[must_use]
    pub const fn number(&self) -> i64 {
        self.number
    }
}
