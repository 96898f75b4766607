use clap::Parser;
use site_patch::Patcher;
use std::process::ExitCode;

mod args;
use args::{Args, convert_task};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut patcher = Patcher::new(convert_task(args.task));

    if let Some(path) = &args.config {
        ::log::info!("Loading configuration from {}", path.display());
        patcher = match patcher.with_config_file(path) {
            Ok(patcher) => patcher,
            Err(e) => {
                ::log::error!("Failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        };
    }

    // Command-line overrides win over the configuration file
    if let Some(root) = args.root {
        patcher = patcher.with_site_root(root);
    }
    if let Some(dir) = args.content_dir {
        patcher = patcher.with_content_dir(dir);
    }
    if let Some(domain) = args.domain {
        patcher = patcher.with_domain(domain);
    }
    if args.dry_run {
        ::log::info!("Dry run: no files will be written");
        patcher = patcher.with_dry_run(true);
    }

    let start_time = std::time::Instant::now();
    match patcher.run() {
        Ok(summary) => {
            println!("{}", summary);
            ::log::info!(
                "Processed {} pages in {:.2} seconds",
                summary.total(),
                start_time.elapsed().as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
