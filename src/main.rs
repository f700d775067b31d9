mod cli;

use structopt::StructOpt;

use crate::cli::commands::Command;
use crate::cli::Riposte;

fn main() {
    env_logger::init();
    Riposte::from_args().execute();
}
