//! `fcomp` - compresses a file into the Fednet container format.

use fednet::cli::dispatch::main_common;
use fednet::Direction;

fn main() {
    std::process::exit(main_common(Direction::Compress));
}
