use clap::Parser;

use sunspot_levels::cli::{handle_config_action, run_render, run_session, Args, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match args.command {
        Command::Render(render) => run_render(&render).map(|path| {
            println!("Exported {}", path.display());
        }),
        Command::Session { config } => run_session(config.as_deref()),
        Command::Config { config, action } => handle_config_action(action, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
