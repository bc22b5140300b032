use colored::Colorize;

use crate::config::AppConfig;

pub fn run(config: &AppConfig, number: usize) -> Result<(), String> {
    let mut repository = super::open_repository(&config.store);
    let index = super::position(number, repository.len())?;

    let removed = repository.delete_at(index).map_err(|e| e.to_string())?;
    println!(
        "  {} question {number}: {}",
        "Removed".yellow().bold(),
        removed.prompt
    );
    println!(
        "  {} question{} left",
        repository.len(),
        if repository.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
