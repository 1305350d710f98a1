//! Book commands.

use super::CliResult;
use libris_core::Library;
use std::io::Write;

/// Adds a book.
pub fn add(
    library: &mut Library,
    title: &str,
    author: &str,
    isbn: &str,
    out: &mut dyn Write,
) -> CliResult<()> {
    let book = library.books_mut().add_book(title, author, isbn)?;
    writeln!(out, "Book added: {book}")?;
    Ok(())
}

/// Lists every book.
pub fn list(library: &Library, out: &mut dyn Write) -> CliResult<()> {
    let books = library.books().list_books();
    if books.is_empty() {
        writeln!(out, "No books in the catalog.")?;
    }
    for book in books {
        writeln!(out, " *  {book}")?;
    }
    Ok(())
}

/// Prints the book with the given ISBN.
pub fn find(library: &Library, isbn: &str, out: &mut dyn Write) -> CliResult<()> {
    let book = library.books().find_book_by_isbn(isbn)?;
    writeln!(out, "{book}")?;
    Ok(())
}

/// Removes the book with the given ISBN.
pub fn remove(library: &mut Library, isbn: &str, out: &mut dyn Write) -> CliResult<()> {
    let book = library.books_mut().remove_book_by_isbn(isbn)?;
    writeln!(out, "Book removed: {book}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CliError;
    use libris_core::CoreError;

    #[test]
    fn add_list_remove() {
        let mut library = Library::open_in_memory().unwrap();
        let mut out = Vec::new();

        add(&mut library, "Dune", "Frank Herbert", "9780441013593", &mut out).unwrap();
        list(&library, &mut out).unwrap();
        remove(&mut library, "9780441013593", &mut out).unwrap();
        list(&library, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Book added: Dune by Frank Herbert, ISBN: 9780441013593\n\
             \x20*  Dune by Frank Herbert, ISBN: 9780441013593\n\
             Book removed: Dune by Frank Herbert, ISBN: 9780441013593\n\
             No books in the catalog.\n"
        );
    }

    #[test]
    fn find_missing_returns_core_error() {
        let library = Library::open_in_memory().unwrap();
        let mut out = Vec::new();
        let err = find(&library, "9999999999", &mut out).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::NotFound { .. })));
        assert!(out.is_empty());
    }
}
