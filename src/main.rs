fn main() {
    std::process::exit(proqueue::app::startup::startup());
}
