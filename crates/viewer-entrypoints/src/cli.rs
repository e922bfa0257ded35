use clap::Parser;

/// Read an environment variable, parsing it to the desired type.
///
/// Unset and unparsable values both give `None`.
pub fn get_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Parse the process command line arguments.
pub fn parse_args<T: Parser>() -> Result<T, clap::Error> {
    T::try_parse()
}

/// Parse the command line, printing usage and exiting on error or `--help`.
pub fn parse_args_or_exit<T: Parser>() -> T {
    match parse_args::<T>() {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
