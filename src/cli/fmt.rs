//! Reformat an expression to canonical text

use super::CliError;
use crate::{output::SexprPrinter, Ast};

/// Parse `query` and print it back in canonical form.
///
/// The default layout is the multiline pretty form; `compact` collapses
/// the whole expression onto one line. Both forms parse back to the
/// same tree.
pub fn execute_fmt(query: &str, compact: bool) -> Result<String, CliError> {
    let ast = Ast::parse(query)?;
    Ok(SexprPrinter::new(!compact).print_items(ast.root()))
}
