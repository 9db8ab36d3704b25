use pipesim_lib::context::PipesimContext;
use pipesim_lib::db::driver::DatabaseDriver;
use pipesim_lib::output::BufferedOutput;
use pipesim_lib::runtime::Runtime;

/// Runtime over a named in-memory store. Use a unique `name` per test.
pub fn runtime_in_memory(name: &str) -> (tempfile::TempDir, Runtime) {
    let tmp = tempfile::tempdir().unwrap();
    let context = PipesimContext::new(tmp.path().to_path_buf());
    let db = DatabaseDriver::in_memory(name).unwrap();
    (tmp, Runtime { context, db })
}

/// Runtime over a file store inside a fresh temporary directory.
pub fn runtime_on_disk() -> (tempfile::TempDir, Runtime) {
    let tmp = tempfile::tempdir().unwrap();
    let context = PipesimContext::new(tmp.path().to_path_buf());
    let db = DatabaseDriver::file(context.db_path());
    (tmp, Runtime { context, db })
}

/// Run `args` against a throwaway on-disk runtime and return
/// `(stdout, stderr)`.
pub fn run_cli(args: &[&str]) -> anyhow::Result<(String, String)> {
    let (_tmp, runtime) = runtime_on_disk();
    let mut output = BufferedOutput::new();
    crate::try_run(args, &runtime, &mut output)?;
    Ok((output.stdout_to_string(), output.stderr_to_string()))
}
