use asynq_inspector::commands::{Cli, parse_error_code};
use asynq_inspector::logging;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_error_code(&e));
        }
    };
    logging::init();

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = cli.execute(&mut stdout).await {
        println!("{}", e);
        std::process::exit(1);
    }
}
