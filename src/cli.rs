use clap::Parser;

/// Fetch a URL and stream the response to stdout as it arrives.
#[derive(Clone, Debug, Parser)]
#[command(name = "httpstream", version, about, long_about = None)]
pub struct Args {
    /// URL to request
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Request a gzip response
    #[arg(long)]
    pub compress: bool,

    /// Report the time taken by each stage on stderr (default)
    #[arg(short, long, overrides_with = "quiet")]
    pub verbose: bool,

    /// Do not report timings
    #[arg(short, long, overrides_with = "verbose")]
    pub quiet: bool,
}

/// Run settings, fixed once the command line is parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub url: String,
    pub verbose: bool,
    pub color: bool,
    pub compress: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Self {
            url: args.url.unwrap_or_default(),
            verbose: !args.quiet,
            color: !args.no_color,
            compress: args.compress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(argv: &[&str]) -> Options {
        Args::try_parse_from(argv).unwrap().into()
    }

    #[test]
    fn defaults() {
        assert_eq!(
            options(&["httpstream", "http://example.com"]),
            Options {
                url: "http://example.com".into(),
                verbose: true,
                color: true,
                compress: false,
            }
        );
    }

    #[test]
    fn flags() {
        let opts = options(&["httpstream", "--no-color", "--compress", "http://a"]);
        assert!(!opts.color);
        assert!(opts.compress);
    }

    #[test]
    fn last_of_verbose_and_quiet_wins() {
        assert!(!options(&["httpstream", "-v", "-q", "http://a"]).verbose);
        assert!(options(&["httpstream", "--quiet", "--verbose", "http://a"]).verbose);
    }

    #[test]
    fn missing_url_is_left_to_the_runner() {
        assert_eq!(options(&["httpstream"]).url, "");
        assert_eq!(options(&["httpstream", ""]).url, "");
    }
}
