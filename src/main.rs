use clap::Parser;
use dicominfo::cli::Args;
use dicominfo::display::TerminalRenderer;
use dicominfo::{driver, logging};
use std::io;

fn main() {
    let args = Args::parse();
    logging::init(&args);

    let mut renderer = TerminalRenderer::new(&args);
    let code = driver::run(&args, &mut io::stdout().lock(), &mut io::stderr(), &mut renderer);

    std::process::exit(code);
}
