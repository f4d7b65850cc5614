use std::io::{self, BufRead, Write};

use crate::config::{parse_endpoint, Config, DEFAULT_ENDPOINT};
use crate::error::{DiscussError, Result};

fn prompt(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &mut out,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("gh-discuss Configuration");
    println!("========================\n");

    let config = ask(&mut input, &mut out)?;
    config.save_to(&config_path)?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'gh-discuss' commands!");

    Ok(())
}

fn ask(input: &mut impl BufRead, out: &mut impl Write) -> Result<Config> {
    let token = prompt(
        input,
        out,
        "Enter a GitHub token (create one at https://github.com/settings/tokens): ",
    )?;
    if token.is_empty() {
        return Err(DiscussError::MissingToken);
    }

    let default_owner = prompt(input, out, "Enter default owner (user or org) [optional]: ")?;
    let endpoint = prompt(
        input,
        out,
        &format!("GraphQL endpoint [{DEFAULT_ENDPOINT}]: "),
    )?;

    let endpoint = Some(endpoint).filter(|s| !s.is_empty());
    if let Some(raw) = &endpoint {
        parse_endpoint(raw)?;
    }

    Ok(Config {
        token: Some(token),
        default_owner: Some(default_owner).filter(|s| !s.is_empty()),
        endpoint,
    })
}
