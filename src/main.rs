use std::process;

use structopt::StructOpt;

use mp3tag::cli::{self, Opt};
use mp3tag::ErrorKind;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opt = Opt::from_args();
    match opt.operation().and_then(cli::run) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            if e.kind() == ErrorKind::Input {
                eprintln!("INFO: use \"mp3tag --help\" for usage");
            }
            process::exit(1);
        }
    }
}
