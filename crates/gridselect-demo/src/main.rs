#![forbid(unsafe_code)]

//! Installer-style walkthrough: a sequence of menu picks, each consumed
//! as `(selected, ok)`. Run with `RUST_LOG=gridselect=debug` to watch
//! the raw-mode transitions.

use std::io;

use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let shells: &[&str] = &["bash", "zsh", "fish", "nushell", "dash"];
    let Some(shell) = gridselect::select("Select a login shell:", shells)? else {
        eprintln!("aborted");
        return Ok(());
    };

    // Fourteen options exercise the multi-column layout with a ragged
    // final column.
    let zones: &[&str] = &[
        "UTC",
        "Europe/London",
        "Europe/Berlin",
        "Europe/Madrid",
        "Europe/Warsaw",
        "America/New_York",
        "America/Chicago",
        "America/Denver",
        "America/Sao_Paulo",
        "Asia/Tokyo",
        "Asia/Seoul",
        "Asia/Kolkata",
        "Australia/Sydney",
        "Pacific/Auckland",
    ];
    let Some(zone) = gridselect::select("Select a timezone:", zones)? else {
        eprintln!("aborted");
        return Ok(());
    };

    let themes: &[&str] = &["gruvbox", "nord", "solarized", "dracula"];
    let Some(theme) = gridselect::select("Select a theme:", themes)? else {
        eprintln!("aborted");
        return Ok(());
    };

    println!();
    println!("shell:    {shell}");
    println!("timezone: {zone}");
    println!("theme:    {theme}");
    Ok(())
}
