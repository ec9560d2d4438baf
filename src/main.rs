use clap::Parser;
use review_insight::cli::{
    analytics, handle_completions, handle_config_init, reviews, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => review_insight::cli::serve::run_serve(args).await,
        Commands::Reviews(args) => match args.store.open_store().await {
            Ok((config, store)) => {
                let output = reviews::handle_reviews(&args, &store, &config.reviews).await;
                store.close().await;
                output.map(|text| println!("{}", text))
            }
            Err(e) => Err(e),
        },
        Commands::Analytics(args) => match args.store.open_store().await {
            Ok((_, store)) => {
                let output = analytics::handle_analytics(&args, &store).await;
                store.close().await;
                output.map(|text| println!("{}", text))
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
