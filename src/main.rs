use std::io;

use clap::Parser;
use dashline::{
    config::{Args, Command},
    init, write_prompt, Fields, RenderContext,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args = Args::parse();

    if let Some(Command::Init { shell }) = args.command {
        init::echo_init_script(shell);
        return;
    }

    let ctx = RenderContext::from_args(&args);
    let fields = Fields::gather(&ctx);

    // a closed pipe is not worth a non-zero exit from a prompt
    if let Err(err) = write_prompt(&ctx, &fields, &mut io::stdout().lock()) {
        log::debug!("failed to write prompt: {}", err);
    }
}
