//! Command line program that reads a Textile document from a file or
//! from `stdin`, renders it as HTML and prints the result to `stdout`,
//! followed by one extra line terminator.

use std::io;
use std::process;
use structopt::clap::ErrorKind;
use structopt::StructOpt;

mod harness;

use harness::usage;
use harness::TextileTransform;

#[derive(Debug, PartialEq, StructOpt)]
#[structopt(name = "textile2html", about = "Render Textile markup as HTML.")]
/// This structure holds the command-line-options.
pub struct Args {
    /// keep single newlines as-is instead of rendering `<br />`
    #[structopt(long)]
    pub toggle_line_wrap: bool,

    /// dump the parsed switches and the raw input before the output
    #[structopt(long)]
    pub debug: bool,

    /// path to the file to render, `-` for stdin, or `help`
    #[structopt(name = "FILE")]
    pub input: Option<String>,
}

fn main() {
    let args = match Args::from_iter_safe(std::env::args()) {
        Ok(args) => args,
        // `-h` and `--help` are intercepted by the argument parser
        // before they could reach the positional; they get the same
        // fixed usage text as the `help` positional does.
        Err(e) if e.kind == ErrorKind::HelpDisplayed => {
            print!("{}", usage());
            process::exit(0);
        }
        Err(e) if e.kind == ErrorKind::VersionDisplayed => {
            println!("{}", e.message);
            process::exit(0);
        }
        // A malformed argument list gets the usage text too, but counts
        // as a failed run.
        Err(_) => {
            print!("{}", usage());
            process::exit(2);
        }
    };

    let mut transformer = TextileTransform::new();
    if let Err(e) = harness::run(&args, &mut transformer, &mut io::stdout()) {
        eprintln!("textile2html: {}", e);
        process::exit(1);
    }
}
