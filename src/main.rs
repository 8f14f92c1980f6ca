fn main() -> std::process::ExitCode {
    handpointer_lib::run()
}
