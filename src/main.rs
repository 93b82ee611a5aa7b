use std::error::Error;
use subnet_random_ip::config::Config;
use subnet_random_ip::session::Session;
use subnet_random_ip::{logging, make_clipboard, make_rng};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cfg = Config::from_env()?;
    logging::init(&cfg.log_config)?;
    log::info!("#Start main()");

    let mut session = Session::new(make_rng(&cfg), make_clipboard(&cfg), std::io::stdout());
    session.run()?;

    log::info!("#End main()");
    Ok(())
}
