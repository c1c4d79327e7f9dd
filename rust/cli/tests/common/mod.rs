#![allow(dead_code)]

pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI in-process; `args` excludes the program name.
pub fn run_cli(args: &[&str]) -> CliResult {
    let mut argv = vec!["cardroom"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = cardroom_cli::run(argv, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8(out).expect("utf8 stdout"),
        stderr: String::from_utf8(err).expect("utf8 stderr"),
    }
}

pub const CARDROOM_VARS: [&str; 5] = [
    "CARDROOM_CONFIG",
    "CARDROOM_SEED",
    "CARDROOM_PLAYERS",
    "CARDROOM_STARTING_CHIPS",
    "CARDROOM_SIM_BREAK_AFTER",
];

/// Sets environment variables for one test and restores them on drop.
/// Callers must be `#[serial]`.
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clears every `CARDROOM_*` variable, then applies `pairs`.
    pub fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in CARDROOM_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            if !CARDROOM_VARS.contains(key) {
                restores.push((key.to_string(), std::env::var(key).ok()));
            }
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
