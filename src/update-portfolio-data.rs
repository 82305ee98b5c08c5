use std::{env, path::PathBuf, process};

use anyhow::Context;
use portfolio_content::import::{default_target, import_portfolio_data, ImportError};

const USAGE: &str = "\n💡 Usage: update-portfolio-data <path-to-exported-json>\n   Example: update-portfolio-data portfolio-data.json";

fn run() -> anyhow::Result<()> {
    let source = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(ImportError::MissingArgument)?;

    let target = default_target();
    let summary = import_portfolio_data(&source, &target)
        .with_context(|| format!("Error updating portfolio data from {}", source.display()))?;

    println!("✅ Portfolio data updated successfully!");
    println!("📁 Updated file: {}", target.display());
    println!("\n📊 Summary:");
    println!("   Projects: {}", summary.projects);
    println!("   Certificates: {}", summary.certificates);
    println!("   Blogs: {}", summary.blogs);
    println!("   Blog Categories: {}", summary.blog_categories);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ {:#}", e);
        eprintln!("{USAGE}");
        process::exit(1);
    }
}
