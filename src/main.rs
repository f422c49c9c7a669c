#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

use env_logger::WriteStyle::Auto;

mod client;
mod config;
mod desktop;
mod drag;
mod error;
mod events;
mod focus;
mod geometry;
mod input;
mod layout;
mod status;
mod wm;
mod x11conn;
mod xconn;

use wm::Wm;
use x11conn::X11Conn;

const USAGE: &str = "usage: ferrowm [-v]";
const VERSION_BANNER: &str = concat!("ferrowm ", env!("CARGO_PKG_VERSION"));

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => {}
        Some("-v") | Some("--version") => {
            println!("{VERSION_BANNER}");
            return Ok(());
        }
        Some(_) => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    env_logger::builder().format_timestamp(None).write_style(Auto).init();
    info!("{VERSION_BANNER} starting");

    let conn = X11Conn::init().map_err(|err| {
        error!("{err}");
        eprintln!("ferrowm: {err}");
        err
    })?;

    wm::install_sigchld_handler();

    let mut wm = Wm::new(conn);
    events::run(&mut wm);

    info!("shutting down");
    std::process::exit(wm.exit_code);
}
