fn main() {
    #[cfg(feature = "cli")]
    blocklz::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("blocklz: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
