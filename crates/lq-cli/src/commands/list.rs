use comfy_table::{ContentArrangement, Table};

use crate::config::AppConfig;
use crate::present;

pub fn run(config: &AppConfig) -> Result<(), String> {
    let repository = super::open_repository(&config.store);

    if repository.is_empty() {
        println!("  No questions yet. Add one with `lq add`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Kind", "Prompt", "Shows", "Options"]);

    for (i, question) in repository.questions().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            question.kind().to_string(),
            present::truncate(&question.prompt, 50),
            present::truncate(&present::stimulus_summary(question), 40),
            question.answer_options.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} question{}",
        repository.len(),
        if repository.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
