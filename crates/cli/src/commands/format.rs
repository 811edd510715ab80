use crate::ExitCode;
use mapper_ide::{format_sql, parse_parameters, split_parameters_line};

/// Print `sql` with the logged `parameters` substituted.
///
/// With nothing to substitute the template is printed as given.
pub fn run(sql: &str, parameters: &str) -> ExitCode {
    let literals = parse_parameters(&split_parameters_line(parameters));
    let formatted = format_sql(sql, &literals);
    if formatted.is_empty() {
        tracing::debug!(parameters = literals.len(), "Nothing to substitute");
        println!("{}", sql.trim());
    } else {
        println!("{formatted}");
    }
    ExitCode::Success
}
