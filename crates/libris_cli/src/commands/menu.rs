//! Interactive text menu.

use super::{books, checkouts, users, CliError, CliResult};
use libris_core::Library;
use std::io::{self, BufRead, Write};
use tracing::debug;

const MENU: &str = "\
Library Management System
1. Add Book
2. List Books
3. Find Book by ISBN
4. Remove Book by ISBN
5. Add User
6. List Users
7. Find User by User ID
8. Remove User by User ID
9. Checkout Book
10. List Checkouts
11. Exit";

/// Runs the menu on the process's stdin and stdout.
pub fn run(library: &mut Library) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock()).run(library)
}

/// A numbered text menu over arbitrary input and output streams.
///
/// Each choice maps to exactly one catalog operation. Catalog errors are
/// printed and the loop resumes; only I/O failures end it early. End of
/// input is treated like choosing Exit.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Creates a menu reading choices from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self, library: &mut Library) -> CliResult<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };
            debug!(choice = choice.as_str(), "menu choice");

            let outcome = match choice.trim() {
                "1" => {
                    let Some([title, author, isbn]) =
                        self.prompts(["Enter title: ", "Enter author: ", "Enter ISBN: "])?
                    else {
                        break;
                    };
                    books::add(library, &title, &author, &isbn, &mut self.output)
                }
                "2" => books::list(library, &mut self.output),
                "3" => {
                    let Some([isbn]) = self.prompts(["Enter ISBN: "])? else {
                        break;
                    };
                    books::find(library, &isbn, &mut self.output)
                }
                "4" => {
                    let Some([isbn]) = self.prompts(["Enter ISBN: "])? else {
                        break;
                    };
                    books::remove(library, &isbn, &mut self.output)
                }
                "5" => {
                    let Some([name, user_id]) =
                        self.prompts(["Enter user name: ", "Enter user ID: "])?
                    else {
                        break;
                    };
                    users::add(library, &name, &user_id, &mut self.output)
                }
                "6" => users::list(library, &mut self.output),
                "7" => {
                    let Some([user_id]) = self.prompts(["Enter user ID: "])? else {
                        break;
                    };
                    users::find(library, &user_id, &mut self.output)
                }
                "8" => {
                    let Some([user_id]) = self.prompts(["Enter user ID: "])? else {
                        break;
                    };
                    users::remove(library, &user_id, &mut self.output)
                }
                "9" => {
                    let Some([user_id, isbn]) = self.prompts([
                        "Enter user ID: ",
                        "Enter ISBN of the book to checkout: ",
                    ])?
                    else {
                        break;
                    };
                    checkouts::checkout(library, &user_id, &isbn, &mut self.output)
                }
                "10" => checkouts::list(library, &mut self.output),
                "11" => {
                    writeln!(self.output, "Exiting.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice, please try again.")?;
                    Ok(())
                }
            };
            self.report(outcome)?;
        }
        writeln!(self.output, "Exiting.")?;
        Ok(())
    }

    /// Prints a catalog error and swallows it; other errors propagate.
    fn report(&mut self, outcome: CliResult<()>) -> CliResult<()> {
        match outcome {
            Err(CliError::Core(e)) => {
                writeln!(self.output, "{e}")?;
                Ok(())
            }
            other => other,
        }
    }

    /// Reads one line after printing `label`. Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Reads one line per label. Returns `None` if input ends part way.
    fn prompts<const N: usize>(&mut self, labels: [&str; N]) -> CliResult<Option<[String; N]>> {
        let mut answers: [String; N] = std::array::from_fn(|_| String::new());
        for (answer, label) in answers.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(line) => *answer = line,
                None => return Ok(None),
            }
        }
        Ok(Some(answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(library: &mut Library, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(Cursor::new(script.as_bytes()), &mut output)
            .run(library)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn scripted_session() {
        let mut library = Library::open_in_memory().unwrap();
        let script = "\
1\nPython Programming\nJohn Doe\n1234567890\n\
5\nJane Doe\n002\n\
9\n002\n1234567890\n\
10\n\
11\n";
        let output = session(&mut library, script);

        assert!(output.contains("Book added: Python Programming by John Doe, ISBN: 1234567890"));
        assert!(output.contains("User added: User(Jane Doe, 002)"));
        assert!(output.contains("Book 1234567890 checked out to user 002."));
        assert!(output.contains(" *  Checkout(User ID: 002, ISBN: 1234567890)"));
        assert!(output.ends_with("Exiting.\n"));
        assert_eq!(library.stats().checkouts, 1);
    }

    #[test]
    fn errors_are_printed_and_loop_continues() {
        let mut library = Library::open_in_memory().unwrap();
        let script = "\
3\n9999999999\n\
7\n\n\
1\nShort\nAuthor\n12345\n\
42\n\
6\n\
11\n";
        let output = session(&mut library, script);

        assert!(output.contains("book not found: 9999999999"));
        assert!(output.contains("invalid argument: User ID must not be empty"));
        assert!(output.contains("ISBN must be exactly 10 or 13 digits"));
        assert!(output.contains("Invalid choice, please try again."));
        assert!(output.contains("No users registered."));
        assert!(library.books().is_empty());
    }

    #[test]
    fn end_of_input_exits() {
        let mut library = Library::open_in_memory().unwrap();
        let output = session(&mut library, "5\nJane Doe\n");

        assert!(output.ends_with("Exiting.\n"));
        assert!(library.users().is_empty());
    }

    #[test]
    fn remove_user_via_menu() {
        let mut library = Library::open_in_memory().unwrap();
        library.users_mut().add_user("John Doe", "001").unwrap();

        let output = session(&mut library, "8\n001\n8\n001\n11\n");
        assert!(output.contains("User removed: User(John Doe, 001)"));
        assert!(output.contains("user not found: 001"));
    }
}
