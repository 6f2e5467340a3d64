//! ferrowiki CLI - wiki markup to HTML converter
//!
//! Usage: `ferrowiki [FILE|-] [TITLE]`

use std::io::{self, Read, Write};

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    // Read from stdin or file
    let input = match args.get(1).map(String::as_str) {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let title = args.get(2).map(String::as_str).unwrap_or("");

    let rendered = ferrowiki::WikiParser::default().parse(&input, title);
    if let Some(target) = rendered.redirect_target() {
        log::info!("document redirects to {target}");
    }
    io::stdout().write_all(rendered.html().as_bytes())?;

    Ok(())
}
