fn main() {
    if let Err(err) = stammbaum::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
