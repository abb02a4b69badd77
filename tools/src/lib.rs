//! Shared command-line plumbing for the raffle tools.
//!
//! Three tiny binaries share the same hand-rolled flag scanning: long or
//! short flags with a value, standalone switches, and positional args.

/// Exit codes shared by all three tools.
pub const EXIT_OK: i32 = 0;
/// The data failed its check (violations or a distribution anomaly).
pub const EXIT_FINDINGS: i32 = 1;
/// The tool itself failed: bad arguments, unreadable or malformed file.
pub const EXIT_ERROR: i32 = 2;

/// True when a standalone switch such as `--json` is present.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value of the first `name value` pair whose name matches any alias.
pub fn opt_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    args.windows(2)
        .find(|w| names.contains(&w[0].as_str()))
        .map(|w| w[1].as_str())
}

/// Positional arguments: everything that is not a flag and not the value
/// of a flag listed in `value_flags`.
pub fn positionals<'a>(args: &'a [String], value_flags: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if value_flags.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        // A leading dash means a flag unless it reads as a negative number,
        // which must fall through so count parsing can reject it clearly.
        let is_flag = arg.starts_with('-')
            && arg.len() > 1
            && !arg[1..].chars().all(|c| c.is_ascii_digit());
        if is_flag {
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

/// Report a usage mistake and exit with EXIT_ERROR.
pub fn fail_usage(usage: &str, message: impl AsRef<str>) -> ! {
    eprintln!("error: {}", message.as_ref());
    eprintln!();
    eprintln!("{usage}");
    std::process::exit(EXIT_ERROR);
}
