fn main() {
    let args: Vec<String> = std::env::args().collect();
    std::process::exit(svcgen_cli::run_cli(args));
}
