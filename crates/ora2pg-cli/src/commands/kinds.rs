use ora2pg_core::MigrationKind;

/// One line per kind: identifier padded to a column, then its label.
pub fn render() -> String {
    let kinds = MigrationKind::all();
    let width = kinds
        .iter()
        .map(|kind| kind.identifier().len())
        .max()
        .unwrap_or(0);

    kinds
        .iter()
        .map(|kind| format!("{:<width$}  {}\n", kind.identifier(), kind.label()))
        .collect()
}
