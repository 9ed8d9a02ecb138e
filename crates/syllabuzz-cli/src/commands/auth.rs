use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::json;
use std::io::{self, BufRead, Write};
use syllabuzz_core::AppClient;
use syllabuzz_core::forms::{FieldErrors, PasswordStrength, ResetPasswordForm, SignupForm, is_valid_email};

use super::action_error;
use crate::cli::{LoginArgs, SignupArgs};
use crate::output::{OutputFormat, json::print_json};

pub async fn login(client: &AppClient, args: LoginArgs, format: OutputFormat) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    let user = client
        .auth
        .login(&email, &password)
        .await
        .map_err(|err| action_error(err, "Login"))?;

    if format.is_json() {
        return print_json(&user);
    }
    println!(
        "{} Logged in as {} ({})",
        "✓".green(),
        user.display_name().bold(),
        user.email
    );
    Ok(())
}

pub async fn logout(client: &AppClient, format: OutputFormat) -> Result<()> {
    let was_logged_in = client.auth.is_authenticated();
    client.auth.logout().await;

    if format.is_json() {
        return print_json(&json!({ "logged_out": was_logged_in }));
    }
    if !was_logged_in {
        println!("You were not logged in.");
    }
    Ok(())
}

pub async fn signup(client: &AppClient, args: SignupArgs, format: OutputFormat) -> Result<()> {
    let (password, confirm_password) = match args.password {
        Some(password) => (password.clone(), password),
        None => {
            let password = rpassword::prompt_password("Password: ")?;
            if !format.is_json() {
                eprintln!("Password strength: {}", PasswordStrength::of(&password));
            }
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            (password, confirm)
        }
    };

    let form = SignupForm {
        name: args.name,
        email: args.email,
        password,
        confirm_password,
        agreed_to_terms: args.accept_terms,
    };
    if let Err(errors) = form.validate() {
        report_field_errors(&errors);
        bail!("Signup form is invalid");
    }

    let response = client
        .auth
        .signup(&form.name, &form.email, &form.password)
        .await
        .map_err(|err| action_error(err, "Signup"))?;

    if format.is_json() {
        return print_json(&response);
    }
    if !response.message.is_empty() {
        println!("{}", response.message);
    }
    Ok(())
}

pub fn whoami(client: &AppClient, view: &str, format: OutputFormat) -> Result<()> {
    let user = client.auth.require_identity(view)?;

    if format.is_json() {
        return print_json(&user);
    }
    println!("Name: {}", user.display_name());
    println!("Email: {}", user.email);
    println!("ID: {}", user.id);
    if !user.modules.is_empty() {
        println!("Modules: {}", user.modules.join(", "));
    }
    Ok(())
}

pub async fn forgot_password(client: &AppClient, email: &str, format: OutputFormat) -> Result<()> {
    if !is_valid_email(email.trim()) {
        bail!("Email is invalid");
    }

    let message = client
        .auth
        .forgot_password(email)
        .await
        .map_err(|err| action_error(err, "Password reset request"))?;
    print_message(&message, format)
}

pub async fn reset_password(
    client: &AppClient,
    token: &str,
    password: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    // Fail early on a dead link before asking for a new password.
    client
        .auth
        .verify_reset_token(token)
        .await
        .map_err(|err| action_error(err, "Token verification"))?;

    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => {
            let password = rpassword::prompt_password("New password: ")?;
            let confirm = rpassword::prompt_password("Confirm password: ")?;
            (password, confirm)
        }
    };

    let form = ResetPasswordForm {
        password,
        confirm_password,
    };
    if let Err(errors) = form.validate() {
        report_field_errors(&errors);
        bail!("Password is not acceptable");
    }

    let message = client
        .auth
        .reset_password(token, &form.password)
        .await
        .map_err(|err| action_error(err, "Password reset"))?;
    print_message(&message, format)
}

pub async fn verify_token(client: &AppClient, token: &str, format: OutputFormat) -> Result<()> {
    let message = client
        .auth
        .verify_reset_token(token)
        .await
        .map_err(|err| action_error(err, "Token verification"))?;
    print_message(&message, format)
}

fn print_message(message: &str, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(&json!({ "message": message }));
    }
    println!("{} {}", "✓".green(), message);
    Ok(())
}

fn report_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {} {}", format!("{field}:").yellow(), message);
    }
}

fn prompt_line(label: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}
