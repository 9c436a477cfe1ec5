//! poly dispatch engine CLI

use polyc::{commands, init_tracing, load, LoadedManifest};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let run: fn(&LoadedManifest, &mut std::io::StdoutLock<'static>) -> std::io::Result<bool> =
        match command.as_str() {
            "check" => commands::check,
            "run" => commands::run,
            "explain" => commands::explain,
            "help" | "--help" | "-h" => {
                print_usage();
                return;
            }
            "version" | "--version" | "-V" => {
                println!("polyc {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            _ => {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        };

    let Some(path) = args.get(2) else {
        eprintln!("error: missing manifest path");
        eprintln!("Usage: polyc {command} <manifest.json>");
        std::process::exit(1);
    };

    let manifest = match load(path) {
        Ok(manifest) => manifest,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    match run(&manifest, &mut std::io::stdout().lock()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("poly dispatch engine");
    println!();
    println!("Usage: polyc <command> <manifest.json>");
    println!();
    println!("Commands:");
    println!("  check <manifest>     Register the manifest and report problems");
    println!("  run <manifest>       Resolve every query and compare with its expectation");
    println!("  explain <manifest>   Print the full resolution trace of every query");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  POLY_LOG=<filter>    Log filter, e.g. poly_resolve=trace (falls back to RUST_LOG)");
    println!();
    println!("Examples:");
    println!("  polyc check catalog.json");
    println!("  polyc run catalog.json");
    println!("  POLY_LOG=debug polyc explain catalog.json");
}
