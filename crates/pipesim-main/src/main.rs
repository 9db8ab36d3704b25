use std::path::PathBuf;

use pipesim_lib::context::PipesimContext;
use pipesim_lib::db::driver::DatabaseDriver;
use pipesim_lib::output::StdOutput;
use pipesim_lib::runtime::Runtime;

fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let data_dir = std::env::var("PIPESIM_DATA_DIR").ok().map(PathBuf::from);
    let log_dir = std::env::var("PIPESIM_LOG_DIR").ok().map(PathBuf::from);
    let context = PipesimContext::with_dirs(cwd, data_dir, log_dir);

    pipesim_cli::logging::init_file_logging(&context);

    std::panic::set_hook(Box::new(|info| {
        tracing::error!("{info}");
        eprintln!("{info}");
    }));

    let db = DatabaseDriver::file(context.db_path());
    let runtime = Runtime { context, db };

    let args: Vec<String> = std::env::args().collect();
    let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut output = StdOutput::new();

    let result = pipesim_cli::try_run(&args_refs, &runtime, &mut output);
    if let Err(ref e) = result {
        if let Some(usage) = e.downcast_ref::<clap::Error>() {
            usage.exit();
        }
        tracing::error!(error = format!("{e:?}"), "command failed");
    }
    result
}
