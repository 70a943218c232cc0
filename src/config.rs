use clap::{ArgAction, ArgMatches};
use clap_complete::Shell;
use std::ffi::OsString;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug)]
pub struct ConfigInner {
    pub log_level: tracing::Level,
    pub targets: Vec<OsString>,
    pub detach: bool,
    pub timeout: Option<Duration>,
}

const fn const_unwrap_or(opt: Option<&'static str>, default: &'static str) -> &'static str {
    match opt {
        Some(x) => x,
        None => default,
    }
}

fn wrap_at(s: &str, at: usize) -> String {
    let words = s.split(&[' ', '\t']).filter(|l| !l.is_empty());
    let mut wrapped = vec![];
    let mut line = String::new();
    for w in words {
        if !line.is_empty() && line.len() + w.len() >= at {
            wrapped.push(line);
            line = "".into()
        }
        line = line + w + " ";
    }
    wrapped.push(line);
    wrapped.join("\n")
}

fn wrap_help(s: &str) -> String {
    wrap_at(s, 70)
}

pub type Config = std::sync::Arc<ConfigInner>;

pub(crate) const VERSION: &str = clap::crate_version!();
pub(crate) const COMMIT_HASH: &str = const_unwrap_or(option_env!("COMMIT_HASH"), "deadbeef");
pub(crate) const FULL_VERSION: &str = const_format::formatcp!("{} {}", VERSION, COMMIT_HASH);

fn cli() -> clap::Command {
    clap::command!()
        .version(FULL_VERSION)
        .about("Open URIs and paths with the default application")
        .args(&[
            clap::Arg::new("target")
                .value_name("TARGET")
                .help(wrap_help(
                    "URI or path to open; it is passed to the platform launcher as is",
                ))
                .num_args(1..)
                .required_unless_present("print-completions")
                .value_parser(clap::value_parser!(OsString)),
            clap::Arg::new("log")
                .long("log")
                .help(wrap_help("Log level"))
                .value_parser(clap::value_parser!(tracing::Level))
                .default_value(tracing::Level::ERROR.as_str()),
            clap::Arg::new("detach")
                .long("detach")
                .help(wrap_help(
                    "Exit as soon as the launcher is started instead of waiting for it",
                ))
                .conflicts_with("timeout")
                .action(ArgAction::SetTrue),
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help(wrap_help(
                    "Stop waiting on the launcher after this many seconds",
                ))
                .value_parser(clap::value_parser!(u64)),
            clap::Arg::new("print-completions")
                .long("print-completions")
                .value_name("SHELL")
                .help("Print shell completions.")
                .value_parser(clap::value_parser!(clap_complete::Shell)),
        ])
}

fn from_matches(args: &ArgMatches) -> ConfigInner {
    ConfigInner {
        log_level: *args.get_one("log").unwrap_or(&tracing::Level::ERROR),
        targets: args
            .get_many::<OsString>("target")
            .map(|targets| targets.cloned().collect())
            .unwrap_or_default(),
        detach: args.get_flag("detach"),
        timeout: args.get_one::<u64>("timeout").copied().map(Duration::from_secs),
    }
}

fn new() -> Config {
    let args = cli().get_matches();

    if let Some(shell) = args.get_one::<Shell>("print-completions").copied() {
        let mut cmd = cli();
        eprintln!("Generating completion file for {shell}...");
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        std::process::exit(0);
    }

    std::sync::Arc::new(from_matches(&args))
}

pub(crate) fn app_config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(self::new)
}

pub(crate) fn parse_args() -> &'static Config {
    app_config()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> ConfigInner {
        let args = cli().try_get_matches_from(argv).unwrap();
        from_matches(&args)
    }

    #[test]
    fn defaults() {
        let config = parse(&["uri-open", "http://example.com"]);
        assert_eq!(config.targets, vec![OsString::from("http://example.com")]);
        assert_eq!(config.log_level, tracing::Level::ERROR);
        assert!(!config.detach);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn several_targets_and_options() {
        let config = parse(&[
            "uri-open",
            "--log",
            "debug",
            "--timeout",
            "5",
            "a.txt",
            "mailto:someone@example.com",
        ]);
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn target_is_required() {
        assert!(cli().try_get_matches_from(["uri-open"]).is_err());
    }

    #[test]
    fn detach_conflicts_with_timeout() {
        let res = cli().try_get_matches_from(["uri-open", "--detach", "--timeout", "1", "x"]);
        assert!(res.is_err());
    }

    #[test]
    fn wrap_help_breaks_long_lines() {
        let wrapped = wrap_at("one two three four", 9);
        assert_eq!(wrapped, "one two \nthree \nfour ");
    }
}
