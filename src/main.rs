use std::{
    io::{self, stdout},
    process,
};

use clap::Parser;
use cli::{Args, Options};
use download::Download;
use reqwest::blocking::Client;

mod cli;
mod decoder;
mod download;
mod presenter;
mod reporter;

fn main() {
    env_logger::init();

    let options = Options::from(Args::parse());
    let client = Client::new();

    let mut stdout = stdout().lock();
    if let Err(e) = Download::new(client, options).run(&mut stdout, io::stderr()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
