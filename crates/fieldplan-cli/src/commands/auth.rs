use clap::Subcommand;
use fieldplan_core::storage::token;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the scheduling-service API token
    Set {
        /// Token value; read from stdin when omitted
        token: Option<String>,
    },
    /// Remove the stored token
    Clear,
    /// Check whether a token is stored
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Set { token } => {
            let value = match token {
                Some(t) => t,
                None => {
                    let mut line = String::new();
                    std::io::stdin().read_line(&mut line)?;
                    line
                }
            };
            let value = value.trim();
            if value.is_empty() {
                return Err("empty token".into());
            }
            token::set(value)?;
            println!("token stored");
        }
        AuthAction::Clear => {
            token::delete()?;
            println!("token cleared");
        }
        AuthAction::Status => {
            println!(
                "{}",
                if token::get()?.is_some() {
                    "token present"
                } else {
                    "no token stored"
                }
            );
        }
    }
    Ok(())
}
