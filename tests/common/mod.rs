//! Shared test utilities and fixtures
//!
//! Drives the `mypyls` binary against a fake checker script so the suite
//! does not need mypy installed.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Checker that reports one diagnostic for saved runs and echoes the first
/// line of the shadow file for unsaved runs. `$last` is the checked path.
pub const FAKE_CHECKER: &str = r#"
for last; do :; done
name=$(basename "$last")
if [ "$3" = "--shadow-file" ]; then
    echo "$name:1:1: error: unsaved $(head -n 1 "$5")"
else
    echo "$name:2:7: error: Name \"undefined_name\" is not defined  [name-defined]"
    echo "$name:3: note: See https://mypy.rtfd.io"
fi
echo "unrelated.py:1:1: error: should be dropped"
echo "Found 1 error in 1 file (checked 1 source file)"
exit 1
"#;

/// Checker that fails like mypy does when it cannot read the checked path,
/// and otherwise reports the path it was given.
pub const PATH_CHECKER: &str = r#"
for last; do :; done
if [ ! -f "$last" ]; then
    echo "mypy: can't read file '$last'" >&2
    exit 2
fi
echo "$(basename "$last"):1:1: error: checked $last"
exit 1
"#;

/// Checker whose only finding is a note.
pub const NOTE_CHECKER: &str = r#"
for last; do :; done
echo "$(basename "$last"):1:1: note: Revealed type is \"builtins.int\""
"#;

/// A workspace on disk with a fake checker wired up through `mypyls.toml`.
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new(checker: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp workspace");
        let script = dir.path().join("fake_mypy.sh");
        std::fs::write(&script, checker).expect("write fake checker");
        let config = format!(
            "[mypy]\ncommand = [\"sh\", {:?}]\n",
            script.display().to_string()
        );
        std::fs::write(dir.path().join("mypyls.toml"), config).expect("write config");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write document");
        path
    }

    /// Run `mypyls check` with the workspace set to this fixture.
    pub fn check(&self, args: &[&str], stdin: Option<&str>) -> Output {
        self.check_from(self.root(), args, stdin)
    }

    /// Like [`Fixture::check`], but start the binary in `cwd`.
    pub fn check_from(&self, cwd: &Path, args: &[&str], stdin: Option<&str>) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mypyls"));
        cmd.current_dir(cwd)
            .arg("check")
            .args(args)
            .arg("--workspace")
            .arg(self.root())
            .env_remove("RUST_LOG")
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("spawn mypyls");
        if let Some(input) = stdin {
            let mut pipe = child.stdin.take().expect("stdin piped");
            pipe.write_all(input.as_bytes()).expect("write stdin");
        }
        child.wait_with_output().expect("wait for mypyls")
    }
}

pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "mypyls failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
