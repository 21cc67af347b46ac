#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    /// `[ctx: 58173/200000 29.1%] model`
    Full,
    /// `[29.1%]`
    Compact,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    /// Color when stdout is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

#[derive(clap::Parser, Debug)]
#[command(about = "Context window usage indicator for Claude Code's statusLine")]
pub struct Args {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Text layout: full|compact
    #[arg(long, value_enum, default_value_t = StyleArg::Full)]
    pub style: StyleArg,

    /// Color output: auto|always|never
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    pub color: ColorArg,

    /// Override the model's context window (tokens)
    #[arg(long, env = "CLAUDE_CONTEXT_LIMIT", value_parser = clap::value_parser!(u64).range(1..))]
    pub context_limit: Option<u64>,

    /// Debug mode: log parsing and calculation details to stderr
    #[arg(long, env = "CLAUDE_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
