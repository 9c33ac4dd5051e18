//! Paint text onto a commit activity heatmap.

use ghht::core::{platform, run_app};
use ghht::logging;

fn main() {
    let cli_args = platform::get_cli_args();
    let guard = logging::init(cli_args.verbose);
    let result = run_app(cli_args);
    // Flush the log file before a possible exit
    drop(guard);
    if let Err(error) = result {
        platform::handle_error(error);
    }
}
