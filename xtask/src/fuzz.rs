// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

use clap::Subcommand;
use duct::cmd;

#[derive(Subcommand)]
pub enum Fuzz {
    /// Run the configuration file parser
    Config,

    /// Run the menu layout engine
    Layout,

    /// Run the colour pair and RGBA parsers
    Colors,
}

pub fn fuzz_target(command: Fuzz) -> anyhow::Result<()> {
    let mut args = vec!["fuzz", "run"];
    match command {
        Fuzz::Config => args.push("config"),
        Fuzz::Layout => args.push("layout"),
        Fuzz::Colors => args.push("colors"),
    }

    cmd!("cargo", "install", "cargo-fuzz").run()?; // will not install if its already installed
    cmd("cargo", args).run()?;
    Ok(())
}
