use log::LevelFilter;

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    if let Err(e) = kumi_core::real_main() {
        log::error!("Replay failed for {:?}", e);
        eprintln!("Replay failed for {:?}", e);
        std::process::exit(1);
    }
}
