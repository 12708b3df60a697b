//! `fdecomp` - decompresses a file from the Fednet container format.

use fednet::cli::dispatch::main_common;
use fednet::Direction;

fn main() {
    std::process::exit(main_common(Direction::Decompress));
}
