//! Application startup: arguments, config, logging, then the workload

use crate::app::cli::args::Args;
use crate::app::workload::{self, WorkloadReport};
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use clap::Parser;

/// Run the binary; exits the process with status 1 on any error
pub fn startup() {
    let mut args = Args::parse();

    let config_path = match args.load_config_file() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let use_color = args.use_color();
    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = config_path {
        log::debug!("configuration loaded from {}", path.display());
    }

    let settings = match args.workload_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("workload settings: {:?}", settings);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(ShutdownCoordinator::guard(|coordinator| {
        workload::run(settings, coordinator)
    }));

    match result {
        Ok(report) => print_report(&report, args.json, use_color),
        Err(e) => {
            log::error!("run failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_report(report: &WorkloadReport, json: bool, use_color: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", report.render_text(use_color));
    }
}
