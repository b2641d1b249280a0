use ora2pg_core::DEFAULT_ORACLE_CODE;

/// The Oracle snippet a fresh session starts with.
pub fn render() -> &'static str {
    DEFAULT_ORACLE_CODE
}
