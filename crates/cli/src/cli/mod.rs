//! Subcommand implementations.

pub mod lower;
pub mod schemas;

/// Run a fallible command, printing the error and mapping to an exit code.
pub fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), String>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    }
}
