//! Checkout commands.

use super::CliResult;
use libris_core::Library;
use std::io::Write;

/// Checks a book out to a user.
pub fn checkout(
    library: &mut Library,
    user_id: &str,
    isbn: &str,
    out: &mut dyn Write,
) -> CliResult<()> {
    let checkout = library.checkouts_mut().checkout_book(user_id, isbn)?;
    writeln!(
        out,
        "Book {} checked out to user {}.",
        checkout.isbn(),
        checkout.user_id()
    )?;
    Ok(())
}

/// Lists every active checkout.
pub fn list(library: &Library, out: &mut dyn Write) -> CliResult<()> {
    let checkouts = library.checkouts().list_checkouts();
    if checkouts.is_empty() {
        writeln!(out, "No books are checked out.")?;
    }
    for checkout in checkouts {
        writeln!(out, " *  {checkout}")?;
    }
    Ok(())
}

/// Prints who holds the book with the given ISBN.
pub fn find(library: &Library, isbn: &str, out: &mut dyn Write) -> CliResult<()> {
    let checkout = library.checkouts().find_checkout(isbn)?;
    writeln!(out, "{checkout}")?;
    Ok(())
}
