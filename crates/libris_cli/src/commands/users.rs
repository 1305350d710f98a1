//! User commands.

use super::CliResult;
use libris_core::Library;
use std::io::Write;

/// Registers a user.
pub fn add(library: &mut Library, name: &str, user_id: &str, out: &mut dyn Write) -> CliResult<()> {
    let user = library.users_mut().add_user(name, user_id)?;
    writeln!(out, "User added: {user}")?;
    Ok(())
}

/// Lists every user.
pub fn list(library: &Library, out: &mut dyn Write) -> CliResult<()> {
    let users = library.users().list_users();
    if users.is_empty() {
        writeln!(out, "No users registered.")?;
    }
    for user in users {
        writeln!(out, " *  {user}")?;
    }
    Ok(())
}

/// Prints the user with the given id.
pub fn find(library: &Library, user_id: &str, out: &mut dyn Write) -> CliResult<()> {
    let user = library.users().get_user(user_id)?;
    writeln!(out, "{user}")?;
    Ok(())
}

/// Removes the user with the given id.
pub fn remove(library: &mut Library, user_id: &str, out: &mut dyn Write) -> CliResult<()> {
    let user = library.users_mut().remove_user(user_id)?;
    writeln!(out, "User removed: {user}")?;
    Ok(())
}
