//! Admin utility: hash one plaintext password for manual insertion into
//! the credential store. Trusted-operator tool; no store or network
//! access.
//!
//! Usage: `hash-util <password>` or pipe the password on stdin.

use auth_service::services::auth::MIN_PASSWORD_LEN;
use auth_service::utils::{hash_password, Password};
use std::io::{BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let password = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            print!("Password: ");
            let _ = std::io::stdout().flush();
            let mut line = String::new();
            if std::io::stdin().lock().read_line(&mut line).is_err() {
                eprintln!("error: could not read password from stdin");
                return ExitCode::FAILURE;
            }
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        eprintln!("error: password must not be empty");
        return ExitCode::FAILURE;
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        eprintln!(
            "error: password must be at least {} characters",
            MIN_PASSWORD_LEN
        );
        return ExitCode::FAILURE;
    }

    match hash_password(&Password::new(password)) {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
