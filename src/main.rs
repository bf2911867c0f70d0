fn main() {
    if let Err(error) = temview::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
