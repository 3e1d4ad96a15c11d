use anyhow::Result;
use colored::Colorize;
use slagate_core::read_samples;
use std::path::PathBuf;

use crate::ui;

pub async fn execute(jtl_file: PathBuf) -> Result<()> {
    println!("{}", "=== Validating Result Log ===".bold().cyan());
    println!("File: {}", jtl_file.display());

    match read_samples(&jtl_file) {
        Ok(samples) => {
            println!("\n{}", "✓ Result log is readable!".green().bold());

            let ok = samples.iter().filter(|s| s.success).count();
            let server_errors = samples.iter().filter(|s| s.is_server_error()).count();

            println!("\nIngestion Details:");
            println!("  Samples: {}", samples.len());
            println!("  Successful: {}", ok);
            println!("  Failed: {}", samples.len() - ok);
            println!("  HTTP 5xx: {}", server_errors);

            if samples.is_empty() {
                ui::print_warning("Log has a header but no sample rows; `check` would fail");
            }

            Ok(())
        }
        Err(e) => {
            println!("\n{}", "✗ Result log is not readable!".red().bold());
            println!("\nError: {}", e);
            Err(e.into())
        }
    }
}
