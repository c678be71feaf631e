use env_logger::Env;
use node_pack::LibraryError;
use node_pack::run;

fn main() -> Result<(), LibraryError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    run(std::env::args().collect())
}
