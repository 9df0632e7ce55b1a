fn main() {
    paramtest::cli::run();
}
