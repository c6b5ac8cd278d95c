//! Login, logout, and session display

use anyhow::Result;
use clap::ValueEnum;
use colored::*;

use cloudemy_core::domain::session::Role;

use crate::config::Config;
use crate::session;

/// Role argument for the login command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Student,
    Ta,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Student => Role::Student,
            RoleArg::Ta => Role::Ta,
        }
    }
}

/// Check credentials and create the session
pub fn handle_login(config: &Config, role: RoleArg, email: &str, password: &str) -> Result<()> {
    let role = Role::from(role);

    let Some(new_session) = session::authenticate(role, email, password) else {
        anyhow::bail!("{} account credentials do not match", role);
    };

    session::store(&config.state_dir, &new_session)?;

    println!(
        "{} Logged in as {} ({})",
        "✓".green(),
        new_session.display_name.bold(),
        new_session.role
    );
    match new_session.role {
        Role::Student => println!(
            "  Work against assignment {} with {} and {}",
            config.assignment_id.cyan(),
            "cloudemy run".cyan(),
            "cloudemy save".cyan()
        ),
        Role::Ta => println!("  View submission stats with {}", "cloudemy dashboard".cyan()),
    }

    Ok(())
}

/// Destroy the session
pub fn handle_logout(config: &Config) -> Result<()> {
    if session::clear(&config.state_dir)? {
        println!("{} Logged out", "✓".green());
    } else {
        println!("{}", "No active session.".yellow());
    }
    Ok(())
}

/// Show the active session
pub fn handle_whoami(config: &Config) -> Result<()> {
    match session::load(&config.state_dir)? {
        Some(active) => {
            println!("{}", "Session:".bold());
            println!("  Name:  {}", active.display_name);
            println!("  Email: {}", active.email);
            println!("  Role:  {}", active.role);
            println!(
                "  Since: {}",
                active.started_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
            );
        }
        None => println!("{}", "Not logged in.".yellow()),
    }
    Ok(())
}
