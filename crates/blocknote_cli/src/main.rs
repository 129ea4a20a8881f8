//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `blocknote_core` linkage.
//! - Render the demo workspace's saved searches, query block and Today
//!   view deterministically for quick local sanity checks.

use blocknote_core::seed::{demo_workspace, DEMO_QUERY_BLOCK_ID};
use blocknote_core::{
    display_content, init_logging, InMemoryOrderRepository, LoggingConfig, ProjectService,
    QueryService, SurfacedBlock,
};
use log::warn;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("blocknote_core ping={}", blocknote_core::ping());
    println!("blocknote_core version={}", blocknote_core::core_version());

    match LoggingConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = init_logging(&config) {
                eprintln!("logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    match render_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=cli_render module=cli status=error");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_demo() -> Result<(), Box<dyn std::error::Error>> {
    let (blocks, projects) = demo_workspace().into_repositories();
    let projects = ProjectService::new(projects);
    let mut queries = QueryService::new(blocks, InMemoryOrderRepository::new());

    for search in projects.list_saved_searches()? {
        let results = queries.saved_search_results(&search)?;
        print_view(&format!("saved search: {}", search.name), &results, &projects)?;
    }

    let results = queries.query_block_results(DEMO_QUERY_BLOCK_ID)?;
    print_view("query block: Everything tagged work", &results, &projects)?;

    let results = queries.today_tasks()?;
    print_view("today", &results, &projects)?;
    Ok(())
}

fn print_view<R: blocknote_core::ProjectRepository>(
    title: &str,
    results: &[SurfacedBlock],
    projects: &ProjectService<R>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("== {title} ({})", results.len());
    for item in results {
        let origin = projects
            .project_name(&item.origin)?
            .unwrap_or_else(|| item.origin.clone());
        let check = match item.block.checked() {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "",
        };
        let priority = if item.block.priority.is_none() {
            String::new()
        } else {
            format!(" ({})", item.block.priority.as_str())
        };
        println!(
            "- {check}{}{priority}  <{origin}>",
            display_content(&item.block.content)
        );
    }
    Ok(())
}
