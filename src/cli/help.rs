// cli/help.rs - Usage text.

use std::io::{self, Write};

/// Returns the usage text for the tool invoked as `exe_name`.
pub fn usage_text(exe_name: &str) -> String {
    format!(
        "usage: {exe} [switches] inputfile [outputfile]\n\
         or     {exe} -batch [switches] file1 [file2 file3 .. fileN]\n\
         If no input file is specified, it reads from stdin.\n\
         If no output file is specified, it writes to stdout.\n\
         In batch processing mode, output overwrites the input.\n\
         Switches (names may be abbreviated):\n\
         \x20 -help               Display this text\n\
         \x20 -batch              Process a batch of files (see above)\n\
         \x20 -outfile name       Specify name for output file\n\
         \x20 -history N          History buffer size as a base 2 logarithm\n\
         \x20 -time               Show the total time for each file processed\n\
         \x20 -verbose or -debug  Emit debug information (and keep bad output)\n",
        exe = exe_name
    )
}

/// Prints usage to stdout, for `-help`.
pub fn print_usage(exe_name: &str) {
    let mut out = io::stdout().lock();
    let _ = out.write_all(usage_text(exe_name).as_bytes());
    let _ = out.flush();
}

/// Prints a usage error followed by the usage text to stderr.
pub fn print_bad_usage(exe_name: &str, msg: &str) {
    let mut err = io::stderr().lock();
    let _ = writeln!(err, "{}", msg);
    let _ = err.write_all(usage_text(exe_name).as_bytes());
}
