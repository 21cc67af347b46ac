use anyhow::Result;

use ctx_statusline::app::run;
use ctx_statusline::cli::Args;
use ctx_statusline::display::color_enabled;
use ctx_statusline::utils::{init_logging, read_stdin};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);
    let stdin = read_stdin()?;
    let color = color_enabled(args.color);
    let mut stdout = std::io::stdout().lock();
    run(&stdin, &mut stdout, &args, color)
}
