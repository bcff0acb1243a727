// SPDX-License-Identifier: MPL-2.0
use infinite_grid::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let config_dir = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("invalid arguments: {err}");
            std::process::exit(2);
        }
    };

    app::run(Flags { config_dir })
}
