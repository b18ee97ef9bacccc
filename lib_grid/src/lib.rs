pub mod codec;
pub mod color;
pub mod error;
pub mod grid;
pub mod notify;
pub mod raster;

use log::*;
use std::fs::File;
use std::io::Write;

pub use crate::codec::{ImageCodec, StandardCodec};
pub use crate::color::Color;
pub use crate::error::GridError;
pub use crate::grid::GridAdapter;
pub use crate::notify::{Change, Invalidation, ListenerId};
pub use crate::raster::{Raster, MAX_PIXELS};

pub const LOG_FILE: &str = "log.txt";

/// Sets up `env_logger` for the library and the editor.
///
/// Records go to [`LOG_FILE`] in the working directory, or to stderr when the
/// file can't be created. `RUST_LOG` overrides the default filters.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();

    builder
        .filter(Some("lib_grid"), LevelFilter::Debug)
        .filter(Some("grid_editor"), LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });

    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    if builder.try_init().is_err() {
        eprintln!("Logger was already initialised");
    }
}
